//! Device Module
//!
//! The flat, fixed-size persistent byte array under the store.
//!
//! ## Responsibilities
//! - Reserve `capacity` bytes of addressable storage on `open`
//! - Random-access byte reads and (buffered) writes
//! - Make buffered writes durable on `commit`
//!
//! Addresses are `0..capacity`. There is no wraparound; anything outside
//! that range is an `AddressOutOfRange` error.

mod file;
mod memory;

pub use file::FileDevice;
pub use memory::MemoryDevice;

use crate::error::Result;

/// Default fill byte of never-written storage (erased EEPROM)
pub const ERASED_BYTE: u8 = 0xFF;

/// Byte-addressable non-volatile storage
pub trait Device {
    /// Attach at least `capacity` bytes. Calling it again with the same
    /// capacity is harmless.
    fn open(&mut self, capacity: usize) -> Result<()>;

    /// Read the byte at `address`
    fn read_byte(&self, address: usize) -> Result<u8>;

    /// Write the byte at `address`; not durable until `commit`
    fn write_byte(&mut self, address: usize, byte: u8) -> Result<()>;

    /// Flush buffered writes durably
    fn commit(&mut self) -> Result<()>;

    /// Release the device
    fn close(&mut self) -> Result<()>;

    /// Bytes currently addressable (0 when not open)
    fn capacity(&self) -> usize;
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn open(&mut self, capacity: usize) -> Result<()> {
        (**self).open(capacity)
    }

    fn read_byte(&self, address: usize) -> Result<u8> {
        (**self).read_byte(address)
    }

    fn write_byte(&mut self, address: usize, byte: u8) -> Result<()> {
        (**self).write_byte(address, byte)
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }
}
