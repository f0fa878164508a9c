//! Declaration input: the extractor's JSON output.
//!
//! The extractor emits an array of type records with raw `docString`s. A
//! `parsedDocString` key in the input is never read, whatever its shape; the
//! registry computes it from `docString`.

use crate::model::TypeInfo;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a JSON array of declared types read from `path`.
pub fn parse(path: &Path, input: &str) -> Result<Vec<TypeInfo>> {
    serde_json::from_str(input)
        .with_context(|| format!("malformed declaration JSON in {}", path.display()))
}
