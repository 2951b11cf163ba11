//! A very small handlebars-like HTML template engine for gofont.
//!
//! Provides:
//! - [`TemplateEngine`]: renders named templates by replacing `{{key}}`
//!   placeholders with caller supplied values
//! - [`TemplateSource`]: the resource lookup used to load template text,
//!   with embedded ([`EmbeddedTemplates`]), directory ([`DirTemplates`]) and
//!   in-memory ([`StaticTemplates`]) implementations
//!
//! Rendering is total: a template that cannot be loaded renders as a short
//! diagnostic string naming the missing key.

pub mod engine;
pub mod error;
pub mod source;

pub use engine::{Template, TemplateEngine, missing_resource_text};
pub use error::TemplateError;
pub use source::{
    BRIDGE_SCRIPT, DirTemplates, EmbeddedTemplates, StaticTemplates, TemplateSource, keys,
};
