//! Field descriptor
//!
//! One named slot of the layout.

/// Declares a single field: its name, default value and reserved payload size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name used to look the field up
    pub name: String,

    /// Value returned while nothing valid is stored
    pub default: String,

    /// Maximum payload length in bytes (the reserved space on the device)
    pub max_len: usize,

    /// Caller data, never interpreted by the store
    pub extra: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, default: impl Into<String>, max_len: usize) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
            max_len,
            extra: None,
        }
    }

    /// Attach caller data
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }
}
