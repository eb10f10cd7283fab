use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub form: FormConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Empty means "derive from the window location"
    #[serde(default)]
    pub base_url: String,
    pub products_path: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub page_size_options: Vec<usize>,
    pub default_page_size: usize,
    pub search_debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FormConfig {
    pub id_check_debounce_ms: u64,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
products_path = "/bp/products"

[list]
page_size_options = [5, 10, 20]
default_page_size = 5
search_debounce_ms = 300

[form]
id_check_debounce_ms = 500
"#;

impl ApiConfig {
    /// Full URL of the products collection
    pub fn products_url(&self) -> String {
        let base = if self.base_url.is_empty() {
            crate::shared::api_utils::api_base()
        } else {
            self.base_url.clone()
        };
        format!("{}{}", base.trim_end_matches('/'), self.products_path)
    }
}

impl ListConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl FormConfig {
    pub fn id_check_debounce(&self) -> Duration {
        Duration::from_millis(self.id_check_debounce_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        // The embedded document is covered by tests
        parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!("Embedded configuration is invalid: {}", e);
            Self {
                api: ApiConfig {
                    base_url: String::new(),
                    products_path: "/bp/products".to_string(),
                },
                list: ListConfig {
                    page_size_options: vec![5, 10, 20],
                    default_page_size: 5,
                    search_debounce_ms: 300,
                },
                form: FormConfig {
                    id_check_debounce_ms: 500,
                },
            }
        })
    }
}

/// Parse and sanity-check a TOML configuration document
pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;

    if config.list.page_size_options.is_empty()
        || config.list.page_size_options.contains(&0)
    {
        anyhow::bail!("list.page_size_options must contain positive sizes");
    }
    if !config
        .list
        .page_size_options
        .contains(&config.list.default_page_size)
    {
        anyhow::bail!(
            "list.default_page_size {} is not one of {:?}",
            config.list.default_page_size,
            config.list.page_size_options
        );
    }

    Ok(config)
}

/// Load the application configuration
///
/// The bundle carries its configuration; an override document can be passed
/// in (e.g. read from a `<script type="application/toml">` tag by the host page).
pub fn load_config(override_doc: Option<&str>) -> anyhow::Result<AppConfig> {
    match override_doc {
        Some(doc) => {
            log::info!("Loading configuration override");
            parse_config(doc)
        }
        None => {
            log::info!("Using default embedded configuration");
            parse_config(DEFAULT_CONFIG)
        }
    }
}
