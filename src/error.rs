use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Property list error: {0}")]
    Plist(#[from] plist::Error),

    #[error("Color scheme is not a dictionary")]
    NotADictionary,

    #[error("Missing row: {0}")]
    MissingRow(String),

    #[error("Row {row} is missing {component}")]
    MissingComponent { row: String, component: &'static str },

    #[error("Row {row} has a non-numeric {component}")]
    InvalidComponent { row: String, component: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Viewing conditions {name}: {field} must be a positive number")]
    InvalidConditions { name: String, field: &'static str },

    #[error("Viewing conditions {0} are defined more than once")]
    DuplicateConditions(String),
}
