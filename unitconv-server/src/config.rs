//! Server configuration from the environment

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use thiserror::Error;
use unitconv_core::ConversionKey;
use unitconv_units::{ConversionRegistry, ConversionRule};

pub const LOG_ENV: &str = "UNITCONV_LOG";
pub const RULES_ENV: &str = "UNITCONV_RULES";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read rules file '{}': {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Malformed rules file '{}': {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("Rule {key} needs a finite, non-zero factor and a finite offset")]
    InvalidRule { key: ConversionKey },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Log filter directive, e.g. "info" or "unitconv_units=trace"
    pub log_filter: String,
    /// Optional JSON file of extra rules
    pub rules_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_LEVEL.to_string(),
            rules_path: None,
        }
    }
}

impl ServerConfig {
    /// Read UNITCONV_LOG (falling back to RUST_LOG) and UNITCONV_RULES
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = lookup(LOG_ENV)
            .or_else(|| lookup("RUST_LOG"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let rules_path = lookup(RULES_ENV)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self { log_filter, rules_path }
    }
}

/// One extra rule: `destination = source * factor + offset`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleDef {
    pub source: String,
    pub destination: String,
    pub factor: f64,
    #[serde(default)]
    pub offset: f64,
}

impl RuleDef {
    fn key(&self) -> ConversionKey {
        ConversionKey::new(self.source.as_str(), self.destination.as_str())
    }
}

pub fn load_rules(path: &Path) -> Result<Vec<RuleDef>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_rules(content: &str) -> Result<Vec<RuleDef>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Register extra rules on top of `registry`.
///
/// All definitions are validated before any is registered, so a bad file
/// leaves the registry untouched.
pub fn apply_rules(registry: &mut ConversionRegistry, defs: &[RuleDef]) -> Result<usize, ConfigError> {
    if let Some(bad) = defs.iter().find(|d| d.factor == 0.0 || !d.factor.is_finite() || !d.offset.is_finite()) {
        return Err(ConfigError::InvalidRule { key: bad.key() });
    }

    for def in defs {
        let key = def.key();
        if registry.register(key.clone(), ConversionRule::affine(def.factor, def.offset)).is_some() {
            tracing::warn!(%key, "extra rule overrides an existing rule");
        }
    }
    Ok(defs.len())
}
