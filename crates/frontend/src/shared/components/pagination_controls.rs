use crate::shared::icons::icon;
use leptos::prelude::*;

/// Previous / next controls with a page-size selector.
///
/// Pages are 1-based. The buttons are driven by the first/last flags of the
/// list, so "next" is disabled on the last page.
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    is_first_page: Signal<bool>,

    #[prop(into)]
    is_last_page: Signal<bool>,

    /// Total count of filtered items
    #[prop(into)]
    total_count: Signal<usize>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,

    /// Called with `false` for previous, `true` for next
    on_step: Callback<bool>,

    on_page_size_change: Callback<usize>,

    page_size_options: Vec<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <span class="pagination-info">
                {move || format!("{} results", total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_step.run(false)
                disabled=move || is_first_page.get()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-page">{move || current_page.get()}</span>
            <button
                class="pagination-btn"
                on:click=move |_| on_step.run(true)
                disabled=move || is_last_page.get()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    match event_target_value(&ev).parse() {
                        Ok(size) => on_page_size_change.run(size),
                        Err(e) => log::warn!("page size select: {}", e),
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
