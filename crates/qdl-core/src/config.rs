use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User-visible strings. Templates use `{url}` and `{file_name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub please_enter_url: String,
    pub filename_must_not_be_empty: String,
    pub url_must_start_with_http: String,
    pub confirm_title: String,
    /// Confirmation body; `{url}` is replaced by the literal URL.
    pub confirm_message: String,
    /// Success message; `{file_name}` is replaced by the dispatched file name.
    pub started_download: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            please_enter_url: "please enter url".to_string(),
            filename_must_not_be_empty: "filename must not be empty".to_string(),
            url_must_start_with_http: "url must start with http:// or https://".to_string(),
            confirm_title: "Verify URL".to_string(),
            confirm_message: "Do you really want to download from {url}?".to_string(),
            started_download: "started download: {file_name}".to_string(),
        }
    }
}

impl Messages {
    pub fn confirm_message_for(&self, url: &str) -> String {
        self.confirm_message.replace("{url}", url)
    }

    pub fn started_download_for(&self, file_name: &str) -> String {
        self.started_download.replace("{file_name}", file_name)
    }
}

/// Global configuration loaded from `~/.config/qdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdlConfig {
    /// Destination directory override. None = the OS downloads directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Reject URLs that are not `http://` or `https://` at submit time.
    #[serde(default = "default_true")]
    pub require_http_scheme: bool,
    /// Emit a completion notification for every finished job.
    #[serde(default = "default_true")]
    pub notify_on_completion: bool,
    /// TCP connect timeout for the background transfer.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Maximum HTTP redirects followed by the background transfer.
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
    #[serde(default)]
    pub messages: Messages,
}

fn default_true() -> bool {
    true
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_max_redirections() -> u32 {
    10
}

impl Default for QdlConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            require_http_scheme: true,
            notify_on_completion: true,
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirections: default_max_redirections(),
            messages: Messages::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<QdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = QdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<QdlConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: QdlConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
