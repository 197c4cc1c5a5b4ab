//! Record store
//!
//! Named-field access to a device, one checksummed record per field.

use std::sync::Arc;

use crate::device::Device;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{NvmError, Result};
use crate::schema::{FieldDescriptor, Schema};

use super::layout::OffsetTable;
use super::record::{self, Corruption, Decoded, RECORD_OVERHEAD};
use super::{FieldKey, FieldValue, Origin};

/// Bytes shown per dump line
pub const DUMP_WIDTH: usize = 16;

/// Fixed-layout string fields over a byte device
///
/// ## Concurrency:
/// None. `get` takes `&self` and `put` takes `&mut self`, so the borrow
/// checker keeps writes exclusive. Wrap in `SharedStore` to share across
/// threads.
pub struct RecordStore<'s, D: Device> {
    /// Field layout (borrowed, never copied)
    schema: &'s Schema,

    /// Start address of every record
    offsets: OffsetTable,

    /// Persistent byte array
    device: D,

    /// Sink for usage errors and dump output
    diagnostics: Arc<dyn Diagnostics>,
}

impl<'s, D: Device> RecordStore<'s, D> {
    /// Compute the layout and attach the device
    ///
    /// The device is opened with exactly the capacity the layout needs.
    pub fn open(
        schema: &'s Schema,
        mut device: D,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self> {
        let offsets = OffsetTable::new(schema)?;
        device.open(offsets.total())?;

        tracing::info!(
            fields = schema.count(),
            capacity = offsets.total(),
            "record store opened"
        );

        Ok(Self {
            schema,
            offsets,
            device,
            diagnostics,
        })
    }

    /// Open with diagnostics forwarded to `tracing`
    pub fn with_tracing(schema: &'s Schema, device: D) -> Result<Self> {
        Self::open(schema, device, Arc::new(TracingDiagnostics))
    }

    /// Value of a field, or empty if the key does not resolve
    ///
    /// Never fails. Corrupt or never-written records yield the field default.
    pub fn get<'k>(&self, key: impl Into<FieldKey<'k>>) -> Vec<u8> {
        self.read(key).map(|v| v.bytes).unwrap_or_default()
    }

    /// `get`, decoded as (lossy) UTF-8
    pub fn get_string<'k>(&self, key: impl Into<FieldKey<'k>>) -> String {
        String::from_utf8_lossy(&self.get(key)).into_owned()
    }

    /// Value of a field along with where it came from
    ///
    /// Unknown names and out-of-range indexes are reported to diagnostics
    /// and returned as errors.
    pub fn read<'k>(&self, key: impl Into<FieldKey<'k>>) -> Result<FieldValue> {
        let (index, field) = self.resolve_reported(key.into(), "get")?;
        Ok(self.read_record(index, field))
    }

    /// Store `value` in a field, returning the number of payload bytes kept
    ///
    /// Values longer than the field are silently truncated. The whole record
    /// is rewritten and committed before returning. Bad keys leave the
    /// device untouched. A device error partway through leaves a torn record
    /// behind (and may be flushed later); `get` reads it back as the default.
    pub fn put<'k>(
        &mut self,
        key: impl Into<FieldKey<'k>>,
        value: impl AsRef<[u8]>,
    ) -> Result<usize> {
        let (index, field) = self.resolve_reported(key.into(), "put")?;
        let value = value.as_ref();

        let bytes = record::encode(value, field.max_len);
        let base = self.offsets_start(index);
        for (i, &b) in bytes.iter().enumerate() {
            self.device.write_byte(base + i, b)?;
        }
        self.device.commit()?;

        let stored = bytes.len() - RECORD_OVERHEAD;
        tracing::debug!(
            field = %field.name,
            index,
            len = stored,
            truncated = stored < value.len(),
            "field stored"
        );
        Ok(stored)
    }

    /// Send the hex dump to the diagnostics sink, one message per line
    pub fn dump(&self, prefix: &str) -> Result<()> {
        for line in self.dump_lines(prefix)? {
            self.diagnostics.info(&line);
        }
        Ok(())
    }

    /// Hex dump of the used storage
    ///
    /// ```text
    /// {prefix}0000 |06 4d 79 57 69 66 69 00 a9 ff ... ssid
    /// ```
    /// `|` marks the first byte of each record (and the end of used storage),
    /// `--` fills the last line, field names of records starting on a line
    /// trail it.
    pub fn dump_lines(&self, prefix: &str) -> Result<Vec<String>> {
        let total = self.offsets.total();
        let mut lines = Vec::new();
        let mut line_start = 0;

        while line_start < total {
            let mut line = format!("{}{:04x} ", prefix, line_start);
            let mut names: Vec<&str> = Vec::new();

            for address in line_start..line_start + DUMP_WIDTH {
                let sep = if self.offsets.is_boundary(address) { '|' } else { ' ' };
                line.push(sep);

                if address < total {
                    if let Some(index) = self.offsets.field_starting_at(address) {
                        if let Some(field) = self.schema.field(index) {
                            names.push(&field.name);
                        }
                    }
                    line.push_str(&format!("{:02x}", self.device.read_byte(address)?));
                } else {
                    line.push_str("--");
                }
            }

            if !names.is_empty() {
                line.push(' ');
                line.push_str(&names.join(","));
            }

            lines.push(line);
            line_start += DUMP_WIDTH;
        }

        Ok(lines)
    }

    /// Release the device, flushing anything pending
    pub fn close(self) -> Result<()> {
        self.into_device().map(|_| ())
    }

    /// Close the device and hand it back (e.g. to reopen it later)
    pub fn into_device(mut self) -> Result<D> {
        self.device.close()?;
        Ok(self.device)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Storage the layout occupies
    pub fn required_capacity(&self) -> usize {
        self.offsets.total()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Raw device access, bypassing record encoding
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn resolve(&self, key: FieldKey<'_>) -> Result<(usize, &'s FieldDescriptor)> {
        let schema = self.schema;
        let index = match key {
            FieldKey::Name(name) => schema
                .find(name)
                .ok_or_else(|| NvmError::UnknownField(name.to_string()))?,
            FieldKey::Index(index) => index,
        };
        let field = schema.field(index).ok_or(NvmError::IndexOutOfRange {
            index,
            count: schema.count(),
        })?;
        Ok((index, field))
    }

    fn resolve_reported(
        &self,
        key: FieldKey<'_>,
        op: &str,
    ) -> Result<(usize, &'s FieldDescriptor)> {
        self.resolve(key).map_err(|e| {
            self.diagnostics.warn(&format!("ERROR: {} {}: {}", op, key, e));
            e
        })
    }

    fn offsets_start(&self, index: usize) -> usize {
        self.offsets.as_slice()[index]
    }

    fn read_record(&self, index: usize, field: &FieldDescriptor) -> FieldValue {
        let base = self.offsets_start(index);
        let decoded = record::decode(field.max_len, |rel| self.device.read_byte(base + rel));

        let corruption = match decoded {
            Ok(Decoded::Valid(bytes)) => {
                return FieldValue {
                    bytes,
                    origin: Origin::Stored,
                }
            }
            Ok(Decoded::Invalid(corruption)) => corruption,
            Err(e) => {
                tracing::warn!(field = %field.name, index, "device read failed: {}", e);
                Corruption::Unreadable
            }
        };

        tracing::debug!(field = %field.name, index, "using default: {}", corruption);
        FieldValue {
            bytes: field.default.as_bytes().to_vec(),
            origin: Origin::Default(corruption),
        }
    }
}
