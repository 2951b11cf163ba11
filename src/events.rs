//! Inbound messages posted by the rendered page.

use crate::error::BrowserError;
use gofont_catalog::SelectedFont;
use serde_json::Value;

/// Message names the page's bridge script posts.
pub mod names {
    pub const LOAD_PAGE: &str = "loadPage";
    pub const SELECT_FONT: &str = "selectFont";
    pub const UNSELECT_FONT: &str = "unselectFont";
}

/// A validated message from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    /// Show the given 1-indexed page of the current results.
    LoadPage(usize),
    /// Add a `"<family>|<variant>"` id to the selection.
    SelectFont(SelectedFont),
    /// Remove a `"<family>|<variant>"` id from the selection.
    UnselectFont(SelectedFont),
}

impl UiMessage {
    /// Validate a raw `(name, body)` pair.
    pub fn parse(name: &str, body: &Value) -> Result<Self, BrowserError> {
        match name {
            names::LOAD_PAGE => parse_page(body).map(UiMessage::LoadPage),
            names::SELECT_FONT => parse_font(name, body).map(UiMessage::SelectFont),
            names::UNSELECT_FONT => parse_font(name, body).map(UiMessage::UnselectFont),
            _ => Err(BrowserError::Event(format!("unknown message '{name}'"))),
        }
    }
}

fn parse_page(body: &Value) -> Result<usize, BrowserError> {
    // JavaScript numbers arrive as floats; accept whole values only.
    let page = match body {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    };
    match page.and_then(|p| usize::try_from(p).ok()) {
        Some(page) if page >= 1 => Ok(page),
        _ => Err(BrowserError::Event(format!(
            "loadPage expects a positive integer, got {body}"
        ))),
    }
}

fn parse_font(name: &str, body: &Value) -> Result<SelectedFont, BrowserError> {
    let id = body
        .as_str()
        .ok_or_else(|| BrowserError::Event(format!("{name} expects a font id string, got {body}")))?;
    Ok(SelectedFont::parse_id(id)?)
}
