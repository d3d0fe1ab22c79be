use std::env;

/// Default backend base URL; point GOALTUI_API_URL at a deployed backend.
const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Display currency for money stats and goals ("USD", "BRL", "EUR", ...).
const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) base_url: String,
    pub(crate) currency: String,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        let base_url = env_or("GOALTUI_API_URL", DEFAULT_API_URL);
        let currency = env_or("GOALTUI_CURRENCY", DEFAULT_CURRENCY);
        Self {
            // A trailing slash would double up when paths are appended.
            base_url: base_url.trim_end_matches('/').to_string(),
            currency,
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
