use super::view_model::{load_product, ProductDetailsViewModel};
use crate::domain::a001_product::api::ApiContext;
use crate::layout::global_context::{use_app_context, Screen};
use crate::shared::config::AppConfig;
use crate::shared::modal::alert;
use contracts::domain::a001_product::ProductField;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn input_type(field: ProductField) -> &'static str {
    match field {
        ProductField::DateRelease | ProductField::DateRevision => "date",
        _ => "text",
    }
}

#[component]
fn FormField(vm: ProductDetailsViewModel, field: ProductField) -> impl IntoView {
    let id = field.as_str();

    view! {
        <div class="form-group">
            <label for=id>{field.label()}</label>
            <input
                type=input_type(field)
                id=id
                prop:value=move || vm.form.with(|form| form.value(field).to_string())
                disabled=move || vm.form.with(|form| !form.is_enabled(field))
                on:input=move |ev| vm.on_input(field, event_target_value(&ev))
                on:blur=move |_| vm.on_blur(field)
            />
            {move || vm.form.with(|form| form.field(field).is_pending())
                .then(|| view! { <span class="form-hint">{"Checking..."}</span> })}
            {move || vm.form.with(|form| form.field(field).visible_error().map(|e| e.to_string()))
                .map(|message| view! { <span class="form-error">{message}</span> })}
        </div>
    }
}

/// Six product fields with reset and submit actions
#[component]
pub fn ProductFormView(vm: ProductDetailsViewModel, on_saved: Callback<String>) -> impl IntoView {
    view! {
        <div class="details-form">
            {move || vm.form.with(|form| form.error_message().map(str::to_string))
                .map(|e| view! { <div class="error">{e}</div> })}

            {ProductField::ALL
                .into_iter()
                .map(|field| view! { <FormField vm=vm field=field /> })
                .collect_view()}

            <div class="details-actions">
                <button class="button button--secondary" on:click=move |_| vm.reset()>
                    {"Reset"}
                </button>
                <button
                    class="button button--primary"
                    disabled=move || vm.form.with(|form| form.is_submitting())
                    on:click=move |_| vm.save_command(on_saved)
                >
                    {"Submit"}
                </button>
            </div>
        </div>
    }
}

fn page_services() -> Option<(ApiContext, AppConfig)> {
    let Some(api) = use_context::<ApiContext>() else {
        log::error!("product form: ApiContext is not provided");
        return None;
    };
    Some((api, use_context::<AppConfig>().unwrap_or_default()))
}

#[component]
pub fn ProductRegistrationPage() -> impl IntoView {
    let ctx = use_app_context();
    let Some((api, config)) = page_services() else {
        return view! { <div class="error">{"Service unavailable"}</div> }.into_any();
    };

    let vm = ProductDetailsViewModel::new(api.api(), config.form.id_check_debounce());
    let on_saved = Callback::new(move |notice: String| {
        alert(&notice);
        ctx.navigate(Screen::List);
    });

    view! {
        <div class="page details-container">
            <div class="details-header">
                <h1>{"Registration form"}</h1>
            </div>
            <ProductFormView vm=vm on_saved=on_saved />
        </div>
    }
    .into_any()
}

#[component]
pub fn ProductEditPage(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let Some((api, config)) = page_services() else {
        return view! { <div class="error">{"Service unavailable"}</div> }.into_any();
    };

    let vm = ProductDetailsViewModel::new(api.api(), config.form.id_check_debounce());
    vm.loaded.set(false);

    let api = api.api();
    spawn_local(async move {
        match load_product(api.as_ref(), Some(id.as_str())).await {
            Some(product) => vm.load_existing(product),
            None => ctx.navigate(Screen::List),
        }
    });

    let on_saved = Callback::new(move |notice: String| {
        alert(&notice);
        ctx.navigate(Screen::List);
    });

    view! {
        <div class="page details-container">
            <div class="details-header">
                <h1>{"Edit product"}</h1>
            </div>
            <Show
                when=move || vm.loaded.get()
                fallback=|| view! { <div class="loading">{"Loading..."}</div> }
            >
                <ProductFormView vm=vm on_saved=on_saved />
            </Show>
        </div>
    }
    .into_any()
}
