use crate::domain::a001_product::api::ApiError;
use crate::shared::modal::{ModalData, ModalRole};
use contracts::domain::a001_product::Product;

pub const DELETE_SUCCESS_NOTICE: &str = "Product deleted successfully.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeletePhase {
    #[default]
    Idle,
    PendingConfirmation,
    Executing,
}

/// Result of a confirmation round trip
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Product removed; the list must be reloaded
    Deleted(String),
    /// Delete call failed; the list is left as is
    Failed(ApiError),
    /// Cancelled, nothing pending, or a delete already running
    Ignored,
}

/// Two-step delete: request, then confirm or cancel
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteFlow {
    phase: DeletePhase,
    target_id: Option<String>,
    modal: Option<ModalData>,
    notice: Option<String>,
}

impl DeleteFlow {
    pub fn phase(&self) -> &DeletePhase {
        &self.phase
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    pub fn modal(&self) -> Option<&ModalData> {
        self.modal.as_ref()
    }

    pub fn is_modal_visible(&self) -> bool {
        self.phase != DeletePhase::Idle
    }

    /// Notice produced by the last successful delete, consumed once
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Ask for confirmation before deleting `id`.
    ///
    /// Unknown ids are ignored. A request made while another one waits for
    /// confirmation replaces it; nothing changes while a delete is running.
    pub fn request_delete(&mut self, id: &str, products: &[Product]) -> bool {
        if self.phase == DeletePhase::Executing {
            log::debug!("delete: {} requested while a delete is running", id);
            return false;
        }
        let Some(product) = products.iter().find(|p| p.id == id) else {
            log::warn!("delete: product {} is not in the list", id);
            return false;
        };

        self.phase = DeletePhase::PendingConfirmation;
        self.target_id = Some(id.to_string());
        self.modal = Some(
            ModalData::confirm(format!(
                "Are you sure you want to delete the product \"{}\"?",
                product.name
            ))
            .with_title("Delete product"),
        );
        true
    }

    /// Resolve the pending confirmation.
    ///
    /// Returns the id to delete when the role is `Confirm`; every other role
    /// closes the modal.
    pub fn resolve(&mut self, role: ModalRole) -> Option<String> {
        match (self.phase, role) {
            (DeletePhase::Executing, _) => None,
            (DeletePhase::PendingConfirmation, ModalRole::Confirm) => {
                let id = self.target_id.clone()?;
                self.phase = DeletePhase::Executing;
                Some(id)
            }
            _ => {
                self.clear();
                None
            }
        }
    }

    /// Record the result of the delete call and go back to idle
    pub fn complete(&mut self, result: Result<(), ApiError>) -> DeleteOutcome {
        let Some(id) = self.target_id.clone() else {
            self.clear();
            return DeleteOutcome::Ignored;
        };
        self.clear();

        match result {
            Ok(()) => {
                log::info!("delete: product {} deleted", id);
                self.notice = Some(DELETE_SUCCESS_NOTICE.to_string());
                DeleteOutcome::Deleted(id)
            }
            Err(e) => {
                log::error!("delete: failed to delete product {}: {}", id, e);
                DeleteOutcome::Failed(e)
            }
        }
    }

    fn clear(&mut self) {
        self.phase = DeletePhase::Idle;
        self.target_id = None;
        self.modal = None;
    }
}
