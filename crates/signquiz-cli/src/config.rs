//! CLI configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use signquiz_core::catalog::Catalog;
use signquiz_core::media::GlossImages;
use signquiz_core::parser;

/// Top-level signquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignquizConfig {
    /// Catalog file or directory.
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
    /// Naming convention for option images without an explicit path.
    #[serde(default)]
    pub media: GlossImages,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("./catalogs")
}

impl Default for SignquizConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            media: GlossImages::default(),
        }
    }
}

impl SignquizConfig {
    /// Load the configured catalog, or `override_path` when given.
    pub fn load_catalog(&self, override_path: Option<&Path>) -> Result<Catalog> {
        let path = override_path.unwrap_or(&self.catalog);
        parser::load_catalog(path, Arc::new(self.media.clone()))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `signquiz.toml` in the current directory
/// 2. `~/.config/signquiz/config.toml`
///
/// Environment variable overrides: `SIGNQUIZ_CATALOG`, `SIGNQUIZ_MEDIA_BASE`.
pub fn load_config_from(path: Option<&Path>) -> Result<SignquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("signquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            config
        }
        None => SignquizConfig::default(),
    };

    if let Ok(catalog) = std::env::var("SIGNQUIZ_CATALOG") {
        config.catalog = PathBuf::from(catalog);
    }
    if let Ok(base) = std::env::var("SIGNQUIZ_MEDIA_BASE") {
        config.media.base_path = base;
    }

    Ok(config)
}

/// Parse config text and expand `${VAR}` references in its string values.
fn parse_config(content: &str) -> Result<SignquizConfig> {
    let mut config: SignquizConfig = toml::from_str(content)?;
    config.catalog = PathBuf::from(resolve_env_vars(&config.catalog.to_string_lossy()));
    config.media.base_path = resolve_env_vars(&config.media.base_path);
    config.media.extension = resolve_env_vars(&config.media.extension);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("signquiz"))
}
