//! Template resource lookup.
//!
//! A [`TemplateSource`] maps a template key (for example `"FontsView"`) to
//! the raw template text, and reports the base URL that relative references
//! inside the rendered document resolve against.

use crate::error::TemplateError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Well-known template keys.
pub mod keys {
    /// Composite results page.
    pub const FONTS_VIEW: &str = "FontsView";
    /// One Google Fonts family section.
    pub const GOOGLE_FONTS_FAMILY: &str = "GoogleFontsFamily";
    /// One Google Fonts variant sample row.
    pub const GOOGLE_FONTS_VARIANT: &str = "GoogleFontsVariant";
    /// Welcome page shown before the first search completes.
    pub const WELCOME: &str = "GoFont";
}

/// Base URL used for documents rendered from embedded resources.
const EMBEDDED_BASE_URL: &str = "gofont://resources/";

/// Name of the JavaScript bridge the page templates reference.
pub const BRIDGE_SCRIPT: &str = "GoFont.js";

/// Resource collaborator for the template engine.
pub trait TemplateSource: Send + Sync {
    /// Load the template text registered under `key`.
    fn load(&self, key: &str) -> Result<String, TemplateError>;

    /// Base URL for resolving relative references in rendered output.
    fn base_url(&self) -> String;
}

/// Templates compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    /// Raw bytes of a bundled, non-template resource such as the bridge script.
    pub fn resource(name: &str) -> Option<&'static str> {
        match name {
            BRIDGE_SCRIPT => Some(include_str!("../resources/GoFont.js")),
            _ => None,
        }
    }

    /// Write the bundled support files into `dir` so a rendered document
    /// saved there can resolve its relative references.
    pub fn export_support_files(dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        for name in [BRIDGE_SCRIPT] {
            if let Some(text) = Self::resource(name) {
                std::fs::write(dir.join(name), text)?;
            }
        }
        Ok(())
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn load(&self, key: &str) -> Result<String, TemplateError> {
        let text = match key {
            keys::FONTS_VIEW => include_str!("../resources/FontsView.html"),
            keys::GOOGLE_FONTS_FAMILY => include_str!("../resources/GoogleFontsFamily.html"),
            keys::GOOGLE_FONTS_VARIANT => include_str!("../resources/GoogleFontsVariant.html"),
            keys::WELCOME => include_str!("../resources/GoFont.html"),
            _ => {
                return Err(TemplateError::Resource {
                    key: key.to_string(),
                });
            }
        };
        Ok(text.to_string())
    }

    fn base_url(&self) -> String {
        EMBEDDED_BASE_URL.to_string()
    }
}

/// Templates loaded from `<dir>/<key>.html`.
#[derive(Debug, Clone)]
pub struct DirTemplates {
    dir: PathBuf,
}

impl DirTemplates {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the templates are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TemplateSource for DirTemplates {
    fn load(&self, key: &str) -> Result<String, TemplateError> {
        let path = self.dir.join(format!("{key}.html"));
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                TemplateError::Resource {
                    key: key.to_string(),
                }
            } else {
                TemplateError::Io { path, source }
            }
        })
    }

    fn base_url(&self) -> String {
        let dir = self.dir.canonicalize().unwrap_or_else(|_| self.dir.clone());
        match url::Url::from_directory_path(&dir) {
            Ok(url) => url.to_string(),
            Err(()) => {
                log::warn!("Template directory {:?} is not absolute", dir);
                "file:///".to_string()
            }
        }
    }
}

/// In-memory templates, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    templates: HashMap<String, String>,
}

impl StaticTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` under `key`, replacing any previous entry.
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.templates.insert(key.into(), text.into());
        self
    }
}

impl TemplateSource for StaticTemplates {
    fn load(&self, key: &str) -> Result<String, TemplateError> {
        self.templates
            .get(key)
            .cloned()
            .ok_or_else(|| TemplateError::Resource {
                key: key.to_string(),
            })
    }

    fn base_url(&self) -> String {
        "about:blank".to_string()
    }
}
