//! In-memory device
//!
//! RAM-backed byte array. Commits are counted, nothing is persisted.

use crate::error::{NvmError, Result};

use super::{Device, ERASED_BYTE};

/// Volatile stand-in for an EEPROM
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    data: Vec<u8>,
    erased_byte: u8,
    is_open: bool,
    commits: u64,
}

impl MemoryDevice {
    /// Empty device; `open` fills it with the erased byte
    pub fn new() -> Self {
        Self::with_erased_byte(ERASED_BYTE)
    }

    pub fn with_erased_byte(erased_byte: u8) -> Self {
        Self {
            data: Vec::new(),
            erased_byte,
            is_open: false,
            commits: 0,
        }
    }

    /// Device preloaded with existing contents (e.g. an image read elsewhere)
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: bytes.into(),
            ..Self::new()
        }
    }

    /// Raw contents, open or not
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of successful commits
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    fn check(&self, address: usize) -> Result<()> {
        if !self.is_open {
            return Err(NvmError::DeviceNotOpen);
        }
        if address >= self.data.len() {
            return Err(NvmError::AddressOutOfRange {
                address,
                capacity: self.data.len(),
            });
        }
        Ok(())
    }
}

impl Default for MemoryDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for MemoryDevice {
    fn open(&mut self, capacity: usize) -> Result<()> {
        if self.data.len() < capacity {
            self.data
                .try_reserve_exact(capacity - self.data.len())
                .map_err(|_| NvmError::CapacityUnavailable { capacity })?;
            self.data.resize(capacity, self.erased_byte);
        }
        self.is_open = true;
        Ok(())
    }

    fn read_byte(&self, address: usize) -> Result<u8> {
        self.check(address)?;
        Ok(self.data[address])
    }

    fn write_byte(&mut self, address: usize, byte: u8) -> Result<()> {
        self.check(address)?;
        self.data[address] = byte;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if !self.is_open {
            return Err(NvmError::DeviceNotOpen);
        }
        self.commits += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.is_open = false;
        Ok(())
    }

    fn capacity(&self) -> usize {
        if self.is_open {
            self.data.len()
        } else {
            0
        }
    }
}
