use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Global configuration loaded from `~/.config/docpoll/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocpollConfig {
    /// Retry and file-size policy for the document reader.
    #[serde(rename = "document-reader", default)]
    pub document_reader: RetryPolicy,
    /// Optional overall time budget for one polling session, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_deadline_secs: Option<u64>,
}

impl DocpollConfig {
    pub fn poll_deadline(&self) -> Option<Duration> {
        self.poll_deadline_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("docpoll")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DocpollConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DocpollConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing keys take defaults.
///
/// A policy that breaks its invariants is kept as configured; the problem
/// is only logged.
pub fn load_from_path(path: &Path) -> Result<DocpollConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: DocpollConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    if let Err(e) = cfg.document_reader.validate() {
        tracing::warn!("config {}: {}", path.display(), e);
    }
    Ok(cfg)
}
