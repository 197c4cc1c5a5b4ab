//! Offset table
//!
//! Start address of every field record, plus one trailing entry for the end
//! of used storage. Computed once from the schema.

use std::ops::Range;

use crate::error::{NvmError, Result};
use crate::schema::Schema;

use super::record::record_size;

/// Field index → device address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    /// `count + 1` strictly increasing entries, first is 0
    offsets: Vec<usize>,
}

impl OffsetTable {
    /// Fails if the layout does not fit the address space
    pub fn new(schema: &Schema) -> Result<Self> {
        let mut offsets = Vec::with_capacity(schema.count() + 1);
        let mut next: usize = 0;
        offsets.push(next);
        for field in schema.iter() {
            next = record_size(field.max_len)
                .and_then(|size| next.checked_add(size))
                .ok_or_else(|| {
                    NvmError::Schema(format!(
                        "field '{}' with len {} does not fit the address space",
                        field.name, field.max_len
                    ))
                })?;
            offsets.push(next);
        }
        Ok(Self { offsets })
    }

    /// Number of fields covered
    pub fn field_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Start of the record of field `index`, if in range
    pub fn offset(&self, index: usize) -> Option<usize> {
        if index < self.field_count() {
            Some(self.offsets[index])
        } else {
            None
        }
    }

    /// Bytes occupied by field `index`, if in range
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        if index < self.field_count() {
            Some(self.offsets[index]..self.offsets[index + 1])
        } else {
            None
        }
    }

    /// Storage needed for all fields
    pub fn total(&self) -> usize {
        self.offsets[self.field_count()]
    }

    /// True if `address` is any table entry (a record start or the end)
    pub fn is_boundary(&self, address: usize) -> bool {
        self.offsets.binary_search(&address).is_ok()
    }

    /// Index of the field whose record starts exactly at `address`
    pub fn field_starting_at(&self, address: usize) -> Option<usize> {
        match self.offsets.binary_search(&address) {
            Ok(index) if index < self.field_count() => Some(index),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }
}
