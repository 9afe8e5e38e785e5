// src/config/mod.rs
pub mod harvest;

pub use harvest::HarvestConfig;

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "AIREP_CONFIG_PATH";

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<HarvestConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading harvest config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing harvest config {}", path.display()))?
        .sanitize()
}

/// Load config using env var + fallbacks:
/// 1) $AIREP_CONFIG_PATH
/// 2) config/airep.toml
/// 3) config/airep.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<HarvestConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/airep.toml");
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/airep.json");
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    HarvestConfig::default().sanitize()
}

fn parse_config(s: &str, hint_ext: &str) -> Result<HarvestConfig> {
    match hint_ext {
        "toml" => return Ok(toml::from_str(s)?),
        "json" => return Ok(serde_json::from_str(s)?),
        _ => {}
    }
    // No usable extension: JSON if it looks like an object, TOML otherwise.
    if s.trim_start().starts_with('{') {
        Ok(serde_json::from_str(s)?)
    } else {
        Ok(toml::from_str(s)?)
    }
}
