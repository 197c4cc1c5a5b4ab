//! Store Module
//!
//! Maps schema fields onto device addresses and reads/writes them.
//!
//! ## Responsibilities
//! - Compute the offset table once from the schema
//! - Encode values into checksummed records on `put`
//! - Validate records on `get`, falling back to the field default
//! - Hex dump of the used storage, annotated with field boundaries
//!
//! ## Device Layout
//! ```text
//! 0x0000 ┌────────────────────────────┐ offset[0]
//!        │ field 0 record             │ 1 + max_len[0] + 1 + 1
//!        ├────────────────────────────┤ offset[1]
//!        │ field 1 record             │
//!        ├────────────────────────────┤
//!        │ ...                        │
//!        └────────────────────────────┘ offset[count] = required capacity
//! ```

mod layout;
mod record;
mod record_store;
mod shared;

use std::fmt;

pub use layout::OffsetTable;
pub use record::{
    decode, encode, record_size, Checksum, Corruption, Decoded, CHECKSUM_SEED, RECORD_OVERHEAD,
};
pub use record_store::{RecordStore, DUMP_WIDTH};
pub use shared::SharedStore;

/// Selects a field by position or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for FieldKey<'_> {
    fn from(index: usize) -> Self {
        FieldKey::Index(index)
    }
}

impl<'a> From<&'a str> for FieldKey<'a> {
    fn from(name: &'a str) -> Self {
        FieldKey::Name(name)
    }
}

impl<'a> From<&'a String> for FieldKey<'a> {
    fn from(name: &'a String) -> Self {
        FieldKey::Name(name.as_str())
    }
}

impl fmt::Display for FieldKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Index(index) => write!(f, "#{}", index),
            FieldKey::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// Where a value returned by `read` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A valid record on the device
    Stored,

    /// The field default, because the record was rejected
    Default(Corruption),
}

/// Value of a field together with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub bytes: Vec<u8>,
    pub origin: Origin,
}

impl FieldValue {
    pub fn is_default(&self) -> bool {
        matches!(self.origin, Origin::Default(_))
    }

    /// Lossy UTF-8 view of the bytes
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
