//! File-backed device
//!
//! Emulates an EEPROM with a file: the whole array is mirrored in RAM on
//! `open`, writes touch the mirror, `commit` rewrites the file and fsyncs.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{NvmError, Result};

use super::{Device, ERASED_BYTE};

/// Persistent byte array stored in a single file
#[derive(Debug)]
pub struct FileDevice {
    /// Backing file path
    path: PathBuf,
    /// Fill value for bytes the file does not have yet
    erased_byte: u8,
    /// Open handle (None until `open`, and again after `close`)
    file: Option<File>,
    /// RAM copy of the file contents
    mirror: Vec<u8>,
    /// Addressable bytes requested by `open`
    capacity: usize,
    /// Mirror has writes not yet on disk
    dirty: bool,
}

impl FileDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            erased_byte: ERASED_BYTE,
            file: None,
            mirror: Vec::new(),
            capacity: 0,
            dirty: false,
        }
    }

    /// Device using the path and erased byte from `config`
    pub fn from_config(config: &Config) -> Self {
        let mut device = Self::new(&config.data_path);
        device.erased_byte = config.erased_byte;
        device
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if writes are pending a commit
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn check(&self, address: usize) -> Result<()> {
        if self.file.is_none() {
            return Err(NvmError::DeviceNotOpen);
        }
        if address >= self.capacity {
            return Err(NvmError::AddressOutOfRange {
                address,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn write_mirror(&mut self) -> Result<()> {
        let file = self.file.as_mut().ok_or(NvmError::DeviceNotOpen)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&self.mirror)?;
        file.sync_all()?;
        self.dirty = false;
        Ok(())
    }
}

impl Device for FileDevice {
    fn open(&mut self, capacity: usize) -> Result<()> {
        if self.file.is_some() && capacity <= self.capacity {
            return Ok(());
        }
        if self.dirty {
            self.write_mirror()?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;

        // Bytes past the stored image read as erased cells
        let grew = contents.len() < capacity;
        if grew {
            contents
                .try_reserve_exact(capacity - contents.len())
                .map_err(|_| NvmError::CapacityUnavailable { capacity })?;
            contents.resize(capacity, self.erased_byte);
        }

        self.file = Some(file);
        self.mirror = contents;
        self.capacity = capacity;
        self.dirty = false;

        if grew {
            self.write_mirror()?;
        }

        tracing::debug!(path = %self.path.display(), capacity, "file device opened");
        Ok(())
    }

    fn read_byte(&self, address: usize) -> Result<u8> {
        self.check(address)?;
        Ok(self.mirror[address])
    }

    fn write_byte(&mut self, address: usize, byte: u8) -> Result<()> {
        self.check(address)?;
        if self.mirror[address] != byte {
            self.mirror[address] = byte;
            self.dirty = true;
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.file.is_none() {
            return Err(NvmError::DeviceNotOpen);
        }
        if self.dirty {
            self.write_mirror()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.file.is_none() {
            return Ok(());
        }
        self.commit()?;
        self.file = None;
        self.capacity = 0;
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Drop for FileDevice {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(path = %self.path.display(), "failed to close file device: {}", e);
        }
    }
}
