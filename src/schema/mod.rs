//! Schema Module
//!
//! The ordered list of fields a store is built from.
//!
//! ## Responsibilities
//! - Hold field descriptors in declaration order
//! - Validate names, lengths and defaults once, at construction
//! - Resolve names to indexes (first match wins)
//!
//! ## Limits
//! Names and payloads are bounded by `MAX_VALUE_LEN - 1` bytes. The stored
//! length of a record is a single byte, so that bound can never exceed 255.

mod field;
mod validate;

pub use field::FieldDescriptor;
pub use validate::SchemaIssue;

use crate::config::ValidationMode;
use crate::diagnostics::Diagnostics;
use crate::error::{NvmError, Result};

/// Buffer size (max length + 1) for names and values
pub const MAX_VALUE_LEN: usize = 65;

const _: () = assert!(MAX_VALUE_LEN - 1 <= 255, "stored length must fit one byte");

/// Ordered, immutable set of fields
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    issues: Vec<SchemaIssue>,
}

impl Schema {
    /// Build a schema, reporting every issue to `diagnostics` and keeping the
    /// fields as given
    pub fn new(fields: Vec<FieldDescriptor>, diagnostics: &dyn Diagnostics) -> Self {
        let issues = validate::validate(&fields);
        for issue in &issues {
            diagnostics.warn(&format!("ERROR: Nvm {}", issue));
        }
        Self { fields, issues }
    }

    /// Build a schema, failing if any issue is found
    pub fn strict(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let issues = validate::validate(&fields);
        if !issues.is_empty() {
            let joined = issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(NvmError::Schema(joined));
        }
        Ok(Self { fields, issues })
    }

    /// Build a schema with the given validation policy
    pub fn with_mode(
        fields: Vec<FieldDescriptor>,
        mode: ValidationMode,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        match mode {
            ValidationMode::Lenient => Ok(Self::new(fields, diagnostics)),
            ValidationMode::Strict => Self::strict(fields),
        }
    }

    /// Number of fields
    pub fn count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, if in range
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Index of the first field called `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Issues found at construction (always empty for strict schemas)
    pub fn issues(&self) -> &[SchemaIssue] {
        &self.issues
    }
}
