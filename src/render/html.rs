//! HTML renderer: a single self-contained viewer page.
//!
//! The page template and viewer script live in `assets/`; the registry is
//! inlined as a data script, so the page has no external requests.

use crate::registry::Registry;
use crate::render::js::data_script;
use crate::render::Renderer;
use anyhow::{Context, Result};

const TEMPLATE: &str = include_str!("../../assets/viewer.html");
const VIEWER_JS: &str = include_str!("../../assets/viewer.js");

const DATA_MARKER: &str = "/*{{DATA}}*/";
const APP_MARKER: &str = "/*{{APP}}*/";

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, registry: &Registry, start_type: Option<&str>) -> Result<String> {
        let data = data_script(registry, start_type)?;
        // Split the template itself, so markers inside doc strings stay inert.
        let (head, rest) = TEMPLATE
            .split_once(DATA_MARKER)
            .context("viewer template has no data marker")?;
        let (middle, tail) = rest
            .split_once(APP_MARKER)
            .context("viewer template has no script marker after the data marker")?;

        let mut page = String::with_capacity(TEMPLATE.len() + data.len() + VIEWER_JS.len());
        page.push_str(head);
        page.push_str(&data);
        page.push_str(middle);
        page.push_str(VIEWER_JS);
        page.push_str(tail);
        Ok(page)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}
