use std::path::PathBuf;

use contentscan_client::ClientConfig;

/// Default directory the export report is written to.
pub const DEFAULT_EXPORT_DIR: &str = ".";

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub client: ClientConfig,
    /// Directory for `content_scan_report_<date>.json`.
    pub export_dir: PathBuf,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `CONTENTSCAN_API_URL`    | `http://localhost:5001` |
    /// | `CONTENTSCAN_EXPORT_DIR` | `.`                     |
    pub fn from_env() -> Self {
        let export_dir = std::env::var("CONTENTSCAN_EXPORT_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_DIR.into());

        Self {
            client: ClientConfig::from_env(),
            export_dir: PathBuf::from(export_dir),
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, export_dir: Option<PathBuf>) -> Self {
        if let Some(url) = api_url {
            self.client.api_url = url;
        }
        if let Some(dir) = export_dir {
            self.export_dir = dir;
        }
        self
    }
}
