use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// HTTP settings for fetching remote manifests (`[http]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of redirects to follow (0 = do not follow).
    pub max_redirections: u32,
    /// Optional User-Agent header; libcurl's default is used when absent.
    pub user_agent: Option<String>,
    /// Upper bound on the manifest body; larger responses abort the transfer.
    pub max_body_bytes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
            max_redirections: 10,
            user_agent: None,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Mount subsystem settings (`[mount]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Program invoked as `<program> mount <uri>`.
    pub program: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            program: "gio".to_string(),
        }
    }
}

/// "Open in file manager" settings (`[viewer]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// If false, a successful mount does not open anything.
    pub enabled: bool,
    /// Program invoked as `<program> <uri>`.
    pub program: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "xdg-open".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/davmount/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DavmountConfig {
    pub http: HttpConfig,
    pub mount: MountConfig,
    pub viewer: ViewerConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("davmount")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DavmountConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DavmountConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DavmountConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
