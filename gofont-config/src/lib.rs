//! Configuration system for the gofont font browser.
//!
//! Provides YAML configuration loading and saving, default values,
//! `${VAR}` substitution restricted to an allowlist, and the log level type.

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::{Config, expand_home, substitute_variables};
pub use error::ConfigError;
pub use types::LogLevel;
