//! Parser module: doc comments, and declaration files dispatched by extension.

pub mod declarations;
pub mod doc;

use crate::model::TypeInfo;
use anyhow::{anyhow, Result};
use std::path::Path;

pub use doc::parse;

/// Parse an extractor output file into its declared types.
pub fn parse_file(path: &Path, content: &str) -> Result<Vec<TypeInfo>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => declarations::parse(path, content),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}
