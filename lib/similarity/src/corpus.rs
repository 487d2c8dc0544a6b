//! Corpus builder
//!
//! Linearizes a service record into a single space-joined document so that
//! arbitrary vertical-specific attributes contribute to similarity instead of
//! being dropped.

use crate::record::ServiceRecord;
use serde_json::Value;
use sift_core::{Error, Result};
use tracing::debug;

/// Additional fields emitted first, in this order
const LIST_FIELDS: [&str; 3] = ["amenities", "thingsToKnow", "offers"];

const DESCRIPTION_FIELD: &str = "description";

/// Default bound on how deep nested additional fields are followed.
///
/// Depth counts nesting levels below a top-level additional field: the
/// elements of a list field sit at level 1 and the values of a mapping inside
/// a list at level 2.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Smallest accepted depth; lists of mappings must always be emitted in full
pub const MIN_MAX_DEPTH: usize = 2;

/// Builds one document per service record
#[derive(Debug, Clone, Copy)]
pub struct CorpusBuilder {
    max_depth: usize,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CorpusBuilder {
    /// Fails when `max_depth` is below [`MIN_MAX_DEPTH`]
    pub fn new(max_depth: usize) -> Result<Self> {
        if max_depth < MIN_MAX_DEPTH {
            return Err(Error::InvalidConfig(format!(
                "max_depth must be at least {}, got {}",
                MIN_MAX_DEPTH, max_depth
            )));
        }
        Ok(Self { max_depth })
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Document for a single record.
    ///
    /// Category comes first, then the additional `description`, then the
    /// `amenities`, `thingsToKnow` and `offers` additional fields, then every
    /// other additional field in insertion order. The record's own
    /// amenities/thingsToKnow/offers attributes are not read.
    pub fn build(&self, service: &ServiceRecord) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !service.category.is_empty() {
            parts.push(service.category.clone());
        }

        if let Some(description) = service.field(DESCRIPTION_FIELD) {
            self.emit(description, 0, &mut parts);
        }

        for key in LIST_FIELDS {
            if let Some(value) = service.field(key) {
                self.emit(value, 0, &mut parts);
            }
        }

        for (key, value) in &service.additional_fields {
            if key == DESCRIPTION_FIELD || LIST_FIELDS.contains(&key.as_str()) {
                continue;
            }
            self.emit(value, 0, &mut parts);
        }

        parts.join(" ")
    }

    /// Documents for many records, index-aligned with the input
    pub fn build_all(&self, services: &[ServiceRecord]) -> Vec<String> {
        services.iter().map(|s| self.build(s)).collect()
    }

    // Sequences and mappings contribute each element or value in order;
    // null contributes nothing.
    fn emit(&self, value: &Value, depth: usize, parts: &mut Vec<String>) {
        if depth > self.max_depth {
            debug!(depth, "skipping additional field nested past the depth limit");
            return;
        }

        match value {
            Value::Null => {}
            Value::String(s) => {
                if !s.is_empty() {
                    parts.push(s.clone());
                }
            }
            Value::Number(n) => parts.push(n.to_string()),
            Value::Bool(b) => parts.push(b.to_string()),
            Value::Array(items) => {
                for item in items {
                    self.emit(item, depth + 1, parts);
                }
            }
            Value::Object(map) => {
                for item in map.values() {
                    self.emit(item, depth + 1, parts);
                }
            }
        }
    }
}

/// Document for a single record with the default depth limit
pub fn build_document(service: &ServiceRecord) -> String {
    CorpusBuilder::default().build(service)
}
