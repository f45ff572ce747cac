use std::path::Path;
use crate::errors::RollupError;
use super::types::ReformatConfig;
use tracing::debug;

pub async fn parse_config(path: &Path) -> Result<ReformatConfig, RollupError> {
    if !path.exists() {
        return Err(RollupError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(RollupError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config = parse_config_str(&content)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

pub fn parse_config_str(content: &str) -> Result<ReformatConfig, RollupError> {
    // An empty file is a valid, empty config
    if content.trim().is_empty() {
        return Ok(ReformatConfig::default());
    }
    let config: ReformatConfig = serde_yaml::from_str(content)?;
    validate_conflicts(&config)?;
    Ok(config)
}

/// Resolve the delimiter to the single byte the table reader and writer use.
pub fn delimiter_byte(delimiter: char) -> Result<u8, RollupError> {
    if !delimiter.is_ascii() {
        return Err(RollupError::Config(format!(
            "Delimiter {:?} must be a single ASCII character",
            delimiter
        )));
    }
    match delimiter {
        '"' | '\r' | '\n' => Err(RollupError::Config(format!(
            "Delimiter {:?} conflicts with CSV quoting or line endings",
            delimiter
        ))),
        c => Ok(c as u8),
    }
}

/// Detect semantic conflicts in the parsed configuration.
pub fn validate_conflicts(config: &ReformatConfig) -> Result<(), RollupError> {
    if let Some(delimiter) = config.delimiter {
        delimiter_byte(delimiter)?;
    }
    Ok(())
}
