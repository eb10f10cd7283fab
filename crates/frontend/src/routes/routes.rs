use crate::domain::a001_product::ui::details::{ProductEditPage, ProductRegistrationPage};
use crate::domain::a001_product::ui::list::ProductList;
use crate::layout::global_context::{use_app_context, Screen};
use leptos::prelude::*;

#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = use_app_context();

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    view! {
        <main class="app-main">
            {move || match ctx.screen.get() {
                Screen::List => view! { <ProductList /> }.into_any(),
                Screen::Create => view! { <ProductRegistrationPage /> }.into_any(),
                Screen::Edit(id) => view! { <ProductEditPage id=id /> }.into_any(),
            }}
        </main>
    }
}
