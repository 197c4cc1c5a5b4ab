//! Schema validation
//!
//! Checks each descriptor against the bounds the record format can hold.

use std::collections::HashSet;
use std::fmt;

use super::{FieldDescriptor, MAX_VALUE_LEN};

/// A problem found in a schema definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    /// Field name is the empty string
    EmptyName { index: usize },

    /// Field name is longer than `MAX_VALUE_LEN - 1`
    NameTooLong { name: String, len: usize },

    /// Reserved length is larger than `MAX_VALUE_LEN - 1`
    FieldTooLong { name: String, max_len: usize },

    /// Default value does not fit in the reserved length
    DefaultTooLong {
        name: String,
        default_len: usize,
        max_len: usize,
    },

    /// Same name used twice; lookups only ever see the first one
    DuplicateName {
        name: String,
        first: usize,
        duplicate: usize,
    },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let limit = MAX_VALUE_LEN - 1;
        match self {
            SchemaIssue::EmptyName { index } => {
                write!(f, "field #{} has an empty name", index)
            }
            SchemaIssue::NameTooLong { name, len } => write!(
                f,
                "field '{}' has a name of len {} that exceeds max length {}",
                name, len, limit
            ),
            SchemaIssue::FieldTooLong { name, max_len } => write!(
                f,
                "field '{}' has len {} which exceeds max {}",
                name, max_len, limit
            ),
            SchemaIssue::DefaultTooLong {
                name,
                default_len,
                max_len,
            } => write!(
                f,
                "field '{}' has a default of len {} which exceeds field len {}",
                name, default_len, max_len
            ),
            SchemaIssue::DuplicateName {
                name,
                first,
                duplicate,
            } => write!(
                f,
                "field '{}' at #{} duplicates #{} and can only be reached by index",
                name, duplicate, first
            ),
        }
    }
}

/// Run every check over the descriptors, in declaration order
pub(crate) fn validate(fields: &[FieldDescriptor]) -> Vec<SchemaIssue> {
    let limit = MAX_VALUE_LEN - 1;
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, field) in fields.iter().enumerate() {
        if field.name.is_empty() {
            issues.push(SchemaIssue::EmptyName { index });
        }
        if field.name.len() > limit {
            issues.push(SchemaIssue::NameTooLong {
                name: field.name.clone(),
                len: field.name.len(),
            });
        }
        if field.max_len > limit {
            issues.push(SchemaIssue::FieldTooLong {
                name: field.name.clone(),
                max_len: field.max_len,
            });
        }
        if field.default.len() > field.max_len {
            issues.push(SchemaIssue::DefaultTooLong {
                name: field.name.clone(),
                default_len: field.default.len(),
                max_len: field.max_len,
            });
        }
        if !seen.insert(field.name.as_str()) {
            let first = fields
                .iter()
                .position(|f| f.name == field.name)
                .unwrap_or(index);
            issues.push(SchemaIssue::DuplicateName {
                name: field.name.clone(),
                first,
                duplicate: index,
            });
        }
    }

    issues
}
