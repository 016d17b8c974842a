use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::url_model::QueryOptions;

/// Default longest accepted input line in forward mode (1 MiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Global configuration loaded from `~/.config/urlconv/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlconvConfig {
    /// Longest stdin line accepted when reading URLs; longer lines are fatal.
    pub max_line_bytes: usize,
    /// Emit query names in byte order instead of first-occurrence order.
    pub sort_query_keys: bool,
    /// Treat `;` as a query pair separator in addition to `&`.
    pub semicolon_separator: bool,
}

impl Default for UrlconvConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            sort_query_keys: false,
            semicolon_separator: true,
        }
    }
}

impl UrlconvConfig {
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            semicolon_separator: self.semicolon_separator,
            sort_keys: self.sort_query_keys,
        }
    }
}

/// `$XDG_CONFIG_HOME/urlconv/config.toml`; the prefix is added by `xdg`.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlconv")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<UrlconvConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: UrlconvConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    if cfg.max_line_bytes == 0 {
        anyhow::bail!("{}: max_line_bytes must be greater than 0", path.display());
    }
    Ok(cfg)
}

/// Load configuration from the default location, falling back to built-in
/// defaults when no file exists. Never writes to the config directory.
pub fn load_or_default() -> Result<UrlconvConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(UrlconvConfig::default());
    }
    load_from_path(&path)
}
