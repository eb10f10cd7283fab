use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// What a modal button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalRole {
    Confirm,
    Cancel,
    Action,
}

impl ModalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalRole::Confirm => "confirm",
            ModalRole::Cancel => "cancel",
            ModalRole::Action => "action",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalButton {
    pub label: String,
    pub role: ModalRole,
    pub style_class: String,
}

impl ModalButton {
    pub fn new(label: impl Into<String>, role: ModalRole, style_class: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role,
            style_class: style_class.into(),
        }
    }
}

/// Content of a generic confirmation modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalData {
    pub title: Option<String>,
    pub message: String,
    pub buttons: Vec<ModalButton>,
}

impl ModalData {
    /// Cancel / Confirm pair asking about a destructive action
    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            buttons: vec![
                ModalButton::new("Cancel", ModalRole::Cancel, "button button--secondary"),
                ModalButton::new("Confirm", ModalRole::Confirm, "button button--primary"),
            ],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Blocking browser notice
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            log::warn!("alert failed: {:?}", e);
        }
    }
}

/// Modal that reports the role of the pressed button.
///
/// Escape, the overlay and the close icon all report `Cancel`.
#[component]
pub fn ConfirmationModal(
    data: ModalData,
    /// Called with the role of the chosen button
    on_action: Callback<ModalRole>,
) -> impl IntoView {
    let escape_listener = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_action.run(ModalRole::Cancel);
        }
    });
    on_cleanup(move || escape_listener.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let ModalData {
        title,
        message,
        buttons,
    } = data;

    view! {
        <div class="modal-overlay" on:click=move |_| on_action.run(ModalRole::Cancel)>
            <div class="modal" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title.unwrap_or_default()}</h2>
                    <button
                        class="button button--icon modal__close"
                        on:click=move |_| on_action.run(ModalRole::Cancel)
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    <p>{message}</p>
                </div>
                <div class="modal-footer">
                    {buttons
                        .into_iter()
                        .map(|button| {
                            let role = button.role;
                            view! {
                                <button
                                    class=button.style_class
                                    on:click=move |_| on_action.run(role)
                                >
                                    {button.label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}
