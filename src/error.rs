//! Error types for nvfields
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using NvmError
pub type Result<T> = std::result::Result<T, NvmError>;

/// Unified error type for nvfields operations
#[derive(Debug, Error)]
pub enum NvmError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Invalid schema: {0}")]
    Schema(String),

    // -------------------------------------------------------------------------
    // Usage Errors
    // -------------------------------------------------------------------------
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field index {index} out of range (schema has {count} fields)")]
    IndexOutOfRange { index: usize, count: usize },

    // -------------------------------------------------------------------------
    // Device Errors
    // -------------------------------------------------------------------------
    #[error("Address 0x{address:04x} outside device capacity {capacity}")]
    AddressOutOfRange { address: usize, capacity: usize },

    #[error("Device is not open")]
    DeviceNotOpen,

    #[error("Device cannot provide {capacity} bytes")]
    CapacityUnavailable { capacity: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NvmError {
    /// True for errors caused by the caller naming a field that does not exist
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            NvmError::UnknownField(_) | NvmError::IndexOutOfRange { .. }
        )
    }
}
