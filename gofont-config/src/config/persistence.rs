//! Config persistence, validation and path resolution methods for `Config`.
//!
//! Covers:
//! - `load` / `save` and the explicit-path `load_from` / `save_to`
//!   (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - Runtime helpers resolving configured directories and the API key

use super::config_struct::Config;
use super::env_vars;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Expand a leading `~/` (or a bare `~`) to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

impl Config {
    /// Load configuration from the default path, creating it if missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing the defaults there if it does
    /// not exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            log::info!("Loading existing config from {:?}", path);

            let contents = fs::read_to_string(path)
                .map_err(ConfigError::from)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config = Self::from_yaml(&contents)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            Ok(config)
        } else {
            log::info!("Config file not found, creating default at {:?}", path);
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Parse YAML text, applying `${VAR}` substitution first.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // The allow-all switch must be known before substitution runs.
        let allow_all = env_vars::pre_scan_allow_all_env_vars(contents);
        let contents = env_vars::substitute_variables_with_allowlist(contents, allow_all);
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the browser cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Validation(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.font_size.trim().is_empty() {
            return Err(ConfigError::Validation(
                "font_size must not be empty".to_string(),
            ));
        }
        if self.google_fonts_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "google_fonts_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Get the configuration file path (`~/.config/gofont/config.yaml`)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("gofont")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("gofont")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Directory downloaded fonts are saved to.
    ///
    /// The configured directory with `~` expanded, else the platform
    /// download directory, else the current directory.
    pub fn download_dir(&self) -> PathBuf {
        match &self.download_directory {
            Some(dir) if !dir.trim().is_empty() => expand_home(dir),
            _ => dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Configured template override directory, with `~` expanded.
    pub fn template_dir(&self) -> Option<PathBuf> {
        self.template_directory
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(expand_home)
    }

    /// The API key with environment references resolved, or `None` when it
    /// is empty or still refers to an unset variable.
    pub fn api_key(&self) -> Option<String> {
        let key = env_vars::substitute_variables_with_allowlist(
            &self.google_fonts_api_key,
            self.allow_all_env_vars,
        );
        let key = key.trim();
        if key.is_empty() || env_vars::has_unresolved_variable(key) {
            None
        } else {
            Some(key.to_string())
        }
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    pub fn sample_delay(&self) -> Duration {
        Duration::from_millis(self.sample_delay_ms)
    }

    pub fn status_delay(&self) -> Duration {
        Duration::from_millis(self.status_delay_ms)
    }
}
