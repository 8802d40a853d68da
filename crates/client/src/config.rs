/// Default base URL of the classification service.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the classification service.
    pub api_url: String,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `CONTENTSCAN_API_URL` | `http://localhost:5001` |
    pub fn from_env() -> Self {
        let api_url = std::env::var("CONTENTSCAN_API_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());

        Self { api_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}
