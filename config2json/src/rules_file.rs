use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use xml_config_core::ShapeRule;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    #[serde(default)]
    rule: Vec<ShapeRule>,
}

/// Errors returned when loading rule files.
#[derive(Debug, Error)]
pub enum RulesLoadError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse rules file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("rules file {path} does not define any [[rule]] tables")]
    Empty { path: String },
}

/// Load shape rules, in priority order, from a TOML file.
pub fn load_rules(path: &Path) -> Result<Vec<ShapeRule>, RulesLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| RulesLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_rules(&raw, path.display().to_string())
}

/// Built-in rules.
pub fn default_rules() -> Vec<ShapeRule> {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/rules/default.toml"));
    parse_rules(embedded, "embedded rules".to_string()).unwrap_or_else(|_| ShapeRule::defaults())
}

fn parse_rules(raw: &str, path: String) -> Result<Vec<ShapeRule>, RulesLoadError> {
    let parsed: RuleFile = toml::from_str(raw).map_err(|source| RulesLoadError::Parse {
        path: path.clone(),
        source,
    })?;
    if parsed.rule.is_empty() {
        return Err(RulesLoadError::Empty { path });
    }
    Ok(parsed.rule)
}
