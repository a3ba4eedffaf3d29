use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::error;

use crate::config::settings::ServiceConfig;
use crate::error::WecomError;

/// Load config from a YAML file, expanding `${VAR}` / `${VAR:default}`
/// environment placeholders first
pub fn file_to_config(path: &Path) -> Result<ServiceConfig, WecomError> {
    let content = fs::read_to_string(path).map_err(|e| {
        WecomError::Config(format!("cannot read config file {}: {}", path.display(), e))
    })?;

    let expanded = expand_env_vars(&content);
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<ServiceConfig, WecomError> {
    serde_yaml::from_str(content).map_err(|e| {
        error!("parse config error: {}", e);
        WecomError::Config(format!("invalid config format: {}", e))
    })
}

fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
