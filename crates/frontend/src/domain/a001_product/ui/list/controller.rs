//! Async side of the product list: fetching the collection and running a
//! confirmed delete.

use super::delete_flow::{DeleteFlow, DeleteOutcome};
use super::state::ProductListState;
use crate::domain::a001_product::api::ProductApi;
use crate::shared::modal::ModalRole;
use crate::shared::state::Store;

/// Re-fetch the collection and replace it wholesale. Returns whether the
/// result was applied; a reload overtaken by a later one is not.
pub async fn reload<A, S>(api: &A, list: &S) -> bool
where
    A: ProductApi + ?Sized,
    S: Store<ProductListState>,
{
    let Some(generation) = list.update_with(|state| state.begin_loading()) else {
        return false;
    };
    let result = api.fetch_all_products().await;
    match list.update_with(|state| state.apply_fetch(generation, result)) {
        Some(applied) => applied,
        None => {
            log::debug!("product list: disposed before the fetch finished");
            false
        }
    }
}

/// Apply the modal choice; on a confirmed delete, call the API and reload
/// the list when it succeeded.
pub async fn resolve_delete<A, L, D>(api: &A, list: &L, flow: &D, role: ModalRole) -> DeleteOutcome
where
    A: ProductApi + ?Sized,
    L: Store<ProductListState>,
    D: Store<DeleteFlow>,
{
    let Some(id) = flow.update_with(|flow| flow.resolve(role)).flatten() else {
        return DeleteOutcome::Ignored;
    };

    let result = api.delete_product(&id).await;
    let Some(outcome) = flow.update_with(|flow| flow.complete(result)) else {
        return DeleteOutcome::Ignored;
    };

    if let DeleteOutcome::Deleted(_) = &outcome {
        reload(api, list).await;
    }
    outcome
}
