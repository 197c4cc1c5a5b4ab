//! # nvfields
//!
//! Named string fields stored in a flat, fixed-size non-volatile byte array
//! (an EEPROM or anything that behaves like one):
//! - Fixed schema of fields, each with a maximum length and a default
//! - One checksummed record per field at a precomputed offset
//! - Corrupt or never-written fields read back as their default
//! - Write-through: every `put` is committed before it returns
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Schema                                │
//! │           (field names, defaults, max lengths)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ borrowed
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     RecordStore                              │
//! │        (offset table, record encode / decode, dump)          │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │     Device      │                │   Diagnostics   │
//!   │ (read/write/    │                │  (warnings and  │
//!   │  commit bytes)  │                │   dump output)  │
//!   └─────────────────┘                └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use nvfields::{FieldDescriptor, MemoryDevice, RecordStore, Schema, TracingDiagnostics};
//!
//! let schema = Schema::new(
//!     vec![
//!         FieldDescriptor::new("ssid", "", 32),
//!         FieldDescriptor::new("password", "", 32),
//!     ],
//!     &TracingDiagnostics,
//! );
//! let mut store = RecordStore::open(&schema, MemoryDevice::new(), Arc::new(TracingDiagnostics))?;
//!
//! store.put("ssid", "MyWifi")?;
//! assert_eq!(store.get_string("ssid"), "MyWifi");
//! assert_eq!(store.get_string("password"), "");
//! # Ok::<(), nvfields::NvmError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod diagnostics;

pub mod schema;
pub mod device;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NvmError, Result};
pub use config::{Config, ValidationMode};
pub use diagnostics::{CollectingDiagnostics, Diagnostics, TracingDiagnostics};
pub use schema::{FieldDescriptor, Schema, SchemaIssue, MAX_VALUE_LEN};
pub use device::{Device, FileDevice, MemoryDevice};
pub use store::{FieldKey, FieldValue, Origin, RecordStore, SharedStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of nvfields
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
