use std::collections::{HashMap, HashSet};
use std::path::Path;

use cam02_ucs::{Surround, ViewingConditions};
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "ITERM_SCHEMER_CONFIG";

/// Defaults for the command line, loaded from a YAML file.
///
/// Every field is optional; a missing file means all built-in defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Background of input schemes
    pub src_bg: Option<String>,

    /// Background to translate to
    pub dst_bg: Option<String>,

    /// Invert the foreground/background/bold/cursor rows
    pub invert: Option<bool>,

    /// Lightness factor for the ANSI rows
    pub j_fac: Option<f64>,

    /// Colorfulness factor for all rows
    pub m_fac: Option<f64>,

    /// Custom viewing conditions by name
    pub conditions: HashMap<String, ConditionsConfig>,
}

/// A custom viewing condition.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConditionsConfig {
    #[serde(default = "default_adapting_white")]
    pub adapting_white: f64,

    #[serde(default = "default_adapting_luminance")]
    pub adapting_luminance: f64,

    #[serde(default = "default_background_luminance")]
    pub background_luminance: f64,

    #[serde(default)]
    pub surround: SurroundConfig,
}

fn default_adapting_white() -> f64 {
    80.0
}

fn default_adapting_luminance() -> f64 {
    16.0
}

fn default_background_luminance() -> f64 {
    16.0
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurroundConfig {
    #[default]
    Average,
    Dim,
    Dark,
}

impl From<SurroundConfig> for Surround {
    fn from(surround: SurroundConfig) -> Self {
        match surround {
            SurroundConfig::Average => Surround::Average,
            SurroundConfig::Dim => Surround::Dim,
            SurroundConfig::Dark => Surround::Dark,
        }
    }
}

impl ConditionsConfig {
    /// Check the luminances are usable by the appearance model.
    ///
    /// Zero or negative luminances turn every conversion into NaN.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let fields = [
            ("adapting_white", self.adapting_white),
            ("adapting_luminance", self.adapting_luminance),
            ("background_luminance", self.background_luminance),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidConditions {
                    name: name.to_string(),
                    field,
                });
            }
        }
        Ok(())
    }
}

impl From<&ConditionsConfig> for ViewingConditions {
    fn from(config: &ConditionsConfig) -> Self {
        ViewingConditions::new(
            config.adapting_white,
            config.adapting_luminance,
            config.background_luminance,
            config.surround.into(),
        )
    }
}

impl AppConfig {
    /// Parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject custom conditions the model cannot use, and names that only
    /// differ by case.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (name, conditions) in &self.conditions {
            if !seen.insert(name.to_lowercase()) {
                return Err(ConfigError::DuplicateConditions(name.to_lowercase()));
            }
            conditions.validate(name)?;
        }
        Ok(())
    }

    /// Load the config at `path`, or defaults when there is none.
    ///
    /// A file that cannot be read, parsed or validated is logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    conditions = config.conditions.len(),
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve a viewing-condition name.
    ///
    /// Custom conditions from the config win over the built-in presets.
    /// Names match case-insensitively; [`AppConfig::validate`] guarantees
    /// at most one custom match. Unknown names fall back to neutral with a
    /// warning.
    pub fn resolve_conditions(&self, name: &str) -> ViewingConditions {
        let wanted = name.to_lowercase();
        if let Some((_, custom)) = self
            .conditions
            .iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
        {
            return custom.into();
        }
        if ViewingConditions::lookup(name).is_none() {
            tracing::warn!(name, "Unknown viewing conditions, using neutral");
        }
        ViewingConditions::by_name(Some(name))
    }
}
