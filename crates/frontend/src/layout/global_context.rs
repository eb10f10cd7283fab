use leptos::prelude::Effect;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

/// Screen shown by the application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    List,
    Create,
    Edit(String),
}

/// URL query form of a [`Screen`]: `?view=list|new|edit&id=...`
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScreenQuery {
    #[serde(default)]
    view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl Screen {
    /// Parse a query string. Unknown views and an edit without id land on
    /// the list.
    pub fn from_query(query: &str) -> Self {
        let query: ScreenQuery =
            serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_default();
        match query.view.as_str() {
            "new" => Screen::Create,
            "edit" => match query.id.filter(|id| !id.is_empty()) {
                Some(id) => Screen::Edit(id),
                None => {
                    log::warn!("edit screen requested without a product id");
                    Screen::List
                }
            },
            _ => Screen::List,
        }
    }

    pub fn to_query(&self) -> String {
        let query = match self {
            Screen::List => ScreenQuery {
                view: "list".into(),
                id: None,
            },
            Screen::Create => ScreenQuery {
                view: "new".into(),
                id: None,
            },
            Screen::Edit(id) => ScreenQuery {
                view: "edit".into(),
                id: Some(id.clone()),
            },
        };
        serde_qs::to_string(&query).unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub screen: RwSignal<Screen>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            screen: RwSignal::new(Screen::default()),
        }
    }

    pub fn navigate(&self, screen: Screen) {
        log::debug!("navigate: {:?}", screen);
        self.screen.set(screen);
    }

    /// Restore the screen from the URL and keep the URL in sync afterwards
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        self.screen.set(Screen::from_query(&search));

        let this = *self;
        Effect::new(move |_| {
            let new_url = format!("?{}", this.screen.get().to_query());

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Context of the running application
pub fn use_app_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().unwrap_or_else(|| {
        log::error!("AppGlobalContext is not provided");
        AppGlobalContext::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_from_query() {
        assert_eq!(Screen::from_query(""), Screen::List);
        assert_eq!(Screen::from_query("?view=list"), Screen::List);
        assert_eq!(Screen::from_query("?view=new"), Screen::Create);
        assert_eq!(
            Screen::from_query("?view=edit&id=trj-crd"),
            Screen::Edit("trj-crd".into())
        );
        assert_eq!(Screen::from_query("view=unknown"), Screen::List);
    }

    #[test]
    fn test_edit_without_id_lands_on_list() {
        assert_eq!(Screen::from_query("?view=edit"), Screen::List);
        assert_eq!(Screen::from_query("?view=edit&id="), Screen::List);
    }

    #[test]
    fn test_screen_to_query() {
        assert_eq!(Screen::List.to_query(), "view=list");
        assert_eq!(Screen::Create.to_query(), "view=new");
        let edit = Screen::Edit("p1".into());
        assert_eq!(edit.to_query(), "view=edit&id=p1");
        assert_eq!(Screen::from_query(&edit.to_query()), edit);
    }
}
