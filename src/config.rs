use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://alcuino-chatbot.azurewebsites.net/api/OpenAIProxy";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CATALOG: &str = "data/products.json";
pub const LOG_FILE: &str = "onwear-chat.log";

/// Runtime settings, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Proxy URL that accepts `{model, input, instructions}`.
    pub endpoint: String,
    pub model: String,
    /// Product catalog: an `http(s)://` URL or a local path.
    pub catalog: String,
    /// Directory for the log file.
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
            catalog: DEFAULT_CATALOG.into(),
            log_dir: std::env::temp_dir(),
        }
    }
}

impl Config {
    /// Apply command-line overrides on top of the defaults.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        model: Option<String>,
        catalog: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(catalog) = catalog {
            self.catalog = catalog;
        }
        if let Some(log_dir) = log_dir {
            self.log_dir = log_dir;
        }
        self
    }
}
