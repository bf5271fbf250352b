pub mod config;
pub mod scheme;

pub use config::{AppConfig, ConditionsConfig, SurroundConfig, CONFIG_ENV};
pub use scheme::{ColorScheme, COMPONENTS};
