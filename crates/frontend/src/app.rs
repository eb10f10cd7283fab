use crate::domain::a001_product::api::{ApiContext, HttpProductApi};
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::config::AppConfig;
use leptos::prelude::*;
use std::rc::Rc;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let api = HttpProductApi::from_config(&config.api);
    log::info!("Products API at {}", api.products_url());

    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());
    provide_context(ApiContext::new(Rc::new(api)));
    provide_context(config);

    view! {
        <AppRoutes />
    }
}
