pub mod controller;
pub mod delete_flow;
pub mod state;

use crate::domain::a001_product::api::ApiContext;
use crate::layout::global_context::{use_app_context, Screen};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::AppConfig;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, truncate_text, SearchInput};
use crate::shared::modal::{alert, ConfirmationModal, ModalRole};
use contracts::domain::a001_product::Product;
use controller::{reload, resolve_delete};
use delete_flow::{DeleteFlow, DeleteOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{PageDirection, ProductListState};

const DESCRIPTION_MAX_LENGTH: usize = 30;

/// Logo image, replaced by the initials of the name when it fails to load
#[component]
fn ProductLogo(name: String, logo: String) -> impl IntoView {
    let failed = RwSignal::new(logo.trim().is_empty());
    let initials = contracts::domain::a001_product::aggregate::logo_initials(&name);

    view! {
        <div class="product-logo">
            {move || if failed.get() {
                view! { <span class="product-logo__initials">{initials.clone()}</span> }.into_any()
            } else {
                view! {
                    <img
                        class="product-logo__image"
                        src=logo.clone()
                        alt=name.clone()
                        on:error=move |_| failed.set(true)
                    />
                }.into_any()
            }}
        </div>
    }
}

/// Row menu with the edit and delete actions
#[component]
fn OptionsMenu(id: String, on_edit: Callback<String>, on_delete: Callback<String>) -> impl IntoView {
    let open = RwSignal::new(false);
    let edit_id = id.clone();
    let delete_id = id;

    view! {
        <div class="options-menu">
            <button
                class="button button--icon"
                title="Options"
                on:click=move |_| open.update(|v| *v = !*v)
            >
                {icon("more-vertical")}
            </button>
            <Show when=move || open.get()>
                <ul class="options-menu__list">
                    <li>
                        <button class="options-menu__item" on:click={
                            let id = edit_id.clone();
                            move |_| {
                                open.set(false);
                                on_edit.run(id.clone());
                            }
                        }>
                            {"Edit"}
                        </button>
                    </li>
                    <li>
                        <button class="options-menu__item" on:click={
                            let id = delete_id.clone();
                            move |_| {
                                open.set(false);
                                on_delete.run(id.clone());
                            }
                        }>
                            {"Delete"}
                        </button>
                    </li>
                </ul>
            </Show>
        </div>
    }
}

#[component]
pub fn ProductList() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let api = use_context::<ApiContext>();
    let ctx = use_app_context();

    let list = RwSignal::new(ProductListState::new(&config.list));
    let flow = RwSignal::new(DeleteFlow::default());

    let fetch = move || {
        let Some(api) = api else {
            log::error!("product list: ApiContext is not provided");
            return;
        };
        let api = api.api();
        spawn_local(async move {
            reload(api.as_ref(), &list).await;
        });
    };

    let on_search = Callback::new(move |term: String| {
        list.update(|state| {
            state.set_search_term(term);
        });
    });

    let on_step = Callback::new(move |forward: bool| {
        let direction = if forward {
            PageDirection::Next
        } else {
            PageDirection::Previous
        };
        list.update(|state| state.change_page(direction));
    });

    let on_page_size_change = Callback::new(move |size: usize| {
        list.update(|state| {
            state.set_records_per_page(size);
        });
    });

    let on_edit = Callback::new(move |id: String| ctx.navigate(Screen::Edit(id)));

    let on_delete = Callback::new(move |id: String| {
        let products = list.with_untracked(|state| state.raw_products().to_vec());
        flow.update(|flow| {
            flow.request_delete(&id, &products);
        });
    });

    let on_modal_action = Callback::new(move |role: ModalRole| {
        let Some(api) = api else {
            return;
        };
        let api = api.api();
        spawn_local(async move {
            if let DeleteOutcome::Deleted(_) = resolve_delete(api.as_ref(), &list, &flow, role).await {
                if let Some(notice) = flow.try_update(|flow| flow.take_notice()).flatten() {
                    alert(&notice);
                }
            }
        });
    });

    fetch();

    let search_term = move || list.with(|state| state.search_term().to_string());

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{Product::list_name()}</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        on_change=on_search
                        debounce=config.list.search_debounce()
                        placeholder="Search..."
                    />
                    <button class="button button--primary" on:click=move |_| ctx.navigate(Screen::Create)>
                        {icon("plus")}
                        {"Add"}
                    </button>
                </div>
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Logo"}</th>
                            <th class="table__header-cell">{"Product name"}</th>
                            <th class="table__header-cell">{"Description"}</th>
                            <th class="table__header-cell">{"Release date"}</th>
                            <th class="table__header-cell">{"Revision date"}</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if list.with(|state| state.is_loading) {
                                return view! {
                                    <tr><td class="table__cell" colspan="6">{"Loading..."}</td></tr>
                                }.into_any();
                            }
                            let rows = list.with(|state| state.view().page_slice.clone());
                            if rows.is_empty() {
                                return view! {
                                    <tr><td class="table__cell" colspan="6">{"No products found"}</td></tr>
                                }.into_any();
                            }
                            let term = search_term();
                            rows.into_iter().map(|product| {
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">
                                            <ProductLogo name=product.name.clone() logo=product.logo.clone() />
                                        </td>
                                        <td class="table__cell">{highlight_matches(&product.name, &term)}</td>
                                        <td class="table__cell" title=product.description.clone()>
                                            {truncate_text(Some(&product.description), DESCRIPTION_MAX_LENGTH)}
                                        </td>
                                        <td class="table__cell">{format_date(&product.date_release)}</td>
                                        <td class="table__cell">{format_date(&product.date_revision)}</td>
                                        <td class="table__cell">
                                            <OptionsMenu id=product.id.clone() on_edit=on_edit on_delete=on_delete />
                                        </td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || list.with(|state| state.current_page()))
                is_first_page=Signal::derive(move || list.with(|state| state.view().is_first_page))
                is_last_page=Signal::derive(move || list.with(|state| state.view().is_last_page))
                total_count=Signal::derive(move || list.with(|state| state.view().total_filtered_count))
                page_size=Signal::derive(move || list.with(|state| state.records_per_page()))
                on_step=on_step
                on_page_size_change=on_page_size_change
                page_size_options=config.list.page_size_options.clone()
            />

            {move || flow.with(|flow| flow.modal().cloned()).map(|data| view! {
                <ConfirmationModal data=data on_action=on_modal_action />
            })}
        </div>
    }
}
