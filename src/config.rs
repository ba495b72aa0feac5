#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::cli::OutputFormat;
use ledger_bindings::{BindingError, Result};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = ".ledger-bindings/config.toml";
pub const MANIFEST_ENV_VAR: &str = "LEDGER_BINDINGS_MANIFEST";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub manifest_path: Option<PathBuf>,
    pub output: Option<OutputFormat>,
}

pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    if !config_path.exists() {
        return if explicit {
            Err(BindingError::ConfigError(format!(
                "Config file does not exist: {}",
                config_path.display()
            )))
        } else {
            Ok(Config::default())
        };
    }

    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| BindingError::ConfigError(format!("Failed to read config: {e}")))?;

    parse_config_content(&content)
}

pub fn parse_config_content(content: &str) -> Result<Config> {
    let mut config = Config::default();

    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        if let Some(value) = parse_key_value(line, "manifest_path") {
            config.manifest_path = Some(PathBuf::from(expand_env_vars(value)));
        }
        if let Some(value) = parse_key_value(line, "output") {
            config.output = Some(OutputFormat::parse(value).ok_or_else(|| {
                BindingError::ConfigError(format!("Unknown output format: {value}"))
            })?);
        }
    }

    Ok(config)
}

/// Argument first, then the environment, then the config file.
pub fn resolve_manifest_path(argument: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    argument
        .or_else(|| non_empty_env_var(MANIFEST_ENV_VAR).map(PathBuf::from))
        .or_else(|| config.manifest_path.clone())
        .ok_or_else(|| {
            BindingError::ConfigError(format!(
                "No manifest given: pass a path, set {MANIFEST_ENV_VAR} or manifest_path in {DEFAULT_CONFIG_PATH}"
            ))
        })
}

/// Substituted values are not expanded again.
fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}').map(|offset| start + offset) else {
            break;
        };
        let var_part = &rest[start + 2..end];
        let (var_name, default) = var_part.split_once(":-").unwrap_or((var_part, ""));
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_else(|_| default.to_string()));
        rest = &rest[end + 1..];
    }
    result.push_str(rest);
    result
}

pub fn parse_key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split_once('=')
        .and_then(|(lhs, rhs)| (lhs.trim() == key).then_some(rhs.trim().trim_matches('"')))
}

fn non_empty_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
