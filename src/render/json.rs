//! JSON renderer: the full registry for tooling integration.
//!
//! Fields and enum values are sorted by name so that output does not depend
//! on declaration order in the source.

use crate::model::TypeInfo;
use crate::registry::Registry;
use crate::render::Renderer;
use anyhow::{Context, Result};
use std::collections::BTreeMap;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, registry: &Registry, _start_type: Option<&str>) -> Result<String> {
        let sorted: BTreeMap<&str, TypeInfo> = registry
            .iter()
            .map(|(name, info)| (name.as_str(), sorted_members(info)))
            .collect();
        let mut out =
            serde_json::to_string_pretty(&sorted).context("failed to serialize types to JSON")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn sorted_members(info: &TypeInfo) -> TypeInfo {
    let mut info = info.clone();
    info.fields.sort_by(|a, b| a.field_name.cmp(&b.field_name));
    info.enum_values.sort_by(|a, b| a.name.cmp(&b.name));
    info
}
