//! Renderer module: trait-based format dispatch.

pub mod html;
pub mod js;
pub mod json;

use crate::registry::Registry;
use anyhow::{anyhow, Result};

/// Trait for rendering a Registry into a specific output format.
pub trait Renderer {
    /// `start_type` is the type a viewer opens first; formats without a
    /// viewer ignore it.
    fn render(&self, registry: &Registry, start_type: Option<&str>) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "js" => Ok(Box::new(js::DataJsRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use html, json, or js", format)),
    }
}
