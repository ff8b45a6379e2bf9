//! Serving configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServingConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    ParseJson(serde_json::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::ParseJson(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate a serving configuration from a descriptor file.
/// TOML by default, JSON when the file extension is `.json`.
pub fn load_serving_config(path: &Path) -> Result<ServingConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ServingConfig = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(ConfigError::ParseJson)?
    } else {
        toml::from_str(&content).map_err(ConfigError::Parse)?
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
