//! Registry of documented types, keyed by qualified name.
//!
//! Building the registry is the fan-out point: every doc string is parsed on
//! a pool of scoped worker threads, and finished records meet in a shared
//! concurrent map. Iteration order is always by qualified name.

use crate::model::TypeInfo;
use crate::parser;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::num::NonZeroUsize;
use std::thread;
use tracing::{debug, trace};

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    types: BTreeMap<String, TypeInfo>,
}

impl Registry {
    /// Parse the doc strings of `types` across `jobs` workers.
    ///
    /// When two records share a qualified name, the first one in input order
    /// is kept.
    pub fn build(types: Vec<TypeInfo>, jobs: NonZeroUsize) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(types.len());
        for info in types {
            let name = info.qualified_name();
            if seen.insert(name.clone()) {
                unique.push((name, info));
            } else {
                debug!(type_name = %name, "skipping already processed type");
            }
        }

        let documented: DashMap<String, TypeInfo> = DashMap::with_capacity(unique.len());
        let batch_size = unique.len().div_ceil(jobs.get()).max(1);
        debug!(
            types = unique.len(),
            workers = unique.len().div_ceil(batch_size),
            "parsing doc strings"
        );

        thread::scope(|scope| {
            for batch in unique.chunks_mut(batch_size) {
                let documented = &documented;
                scope.spawn(move || {
                    for (name, info) in batch.iter_mut() {
                        let mut info = std::mem::take(info);
                        document(&mut info);
                        trace!(type_name = %name, fields = info.fields.len(), "documented type");
                        documented.insert(std::mem::take(name), info);
                    }
                });
            }
        });

        Registry {
            types: documented.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, qualified_name: &str) -> Option<&TypeInfo> {
        self.types.get(qualified_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeInfo)> {
        self.types.iter()
    }

    /// First root type by name, else the first type of all.
    pub fn default_start_type(&self) -> Option<&str> {
        self.types
            .iter()
            .find(|(_, info)| info.is_root)
            .or_else(|| self.types.iter().next())
            .map(|(name, _)| name.as_str())
    }
}

/// Fill in every parsed doc string of a type record.
fn document(info: &mut TypeInfo) {
    info.parsed_doc_string = parser::parse(&info.doc_string);
    for field in &mut info.fields {
        field.parsed_doc_string = parser::parse(&field.doc_string);
    }
    for value in &mut info.enum_values {
        value.parsed_doc_string = parser::parse(&value.doc_string);
    }
}
