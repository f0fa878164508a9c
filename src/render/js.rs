//! Data script renderer: `typeData` and `startTypes` as plain JavaScript,
//! for pages that bring their own viewer.

use crate::registry::Registry;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct DataJsRenderer;

impl Renderer for DataJsRenderer {
    fn render(&self, registry: &Registry, start_type: Option<&str>) -> Result<String> {
        data_script(registry, start_type)
    }

    fn file_extension(&self) -> &str {
        "js"
    }
}

/// `const typeData = {...};` followed by `const startTypes = [...];`.
///
/// Without an explicit start type the registry's default is used. The output
/// is safe to inline inside a `<script>` element.
pub fn data_script(registry: &Registry, start_type: Option<&str>) -> Result<String> {
    let data = serde_json::to_string(registry).context("failed to serialize types")?;
    let start: Vec<&str> = start_type
        .or_else(|| registry.default_start_type())
        .into_iter()
        .collect();
    let start = serde_json::to_string(&start).context("failed to serialize start types")?;
    Ok(format!(
        "const typeData = {};\nconst startTypes = {};\n",
        script_safe(&data),
        script_safe(&start)
    ))
}

/// JSON allows `\/` for `/`, so `</script>` can never appear in the data.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
