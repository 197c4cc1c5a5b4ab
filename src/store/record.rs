//! Field record codec
//!
//! ```text
//! ┌─────────┬──────────────────┬────────────┬────────────┬─────────────┐
//! │ Len (1) │ Payload (Len)    │ Zero (1)   │ Sum (1)    │ unused      │
//! └─────────┴──────────────────┴────────────┴────────────┴─────────────┘
//!   <──────────────────── 1 + max_len + 1 + 1 bytes ────────────────────>
//! ```
//!
//! `Sum` is `0xAA ^ Len ^ payload[0] ^ .. ^ payload[Len-1] ^ 0`. The seed keeps
//! all-0x00 and all-0xFF storage from ever holding a valid record.

use std::fmt;

use crate::error::Result;

/// Initial value of the checksum
pub const CHECKSUM_SEED: u8 = 0xAA;

/// Length byte + terminator + checksum
pub const RECORD_OVERHEAD: usize = 3;

/// Bytes reserved on the device for a field of `max_len` (None on overflow)
pub const fn record_size(max_len: usize) -> Option<usize> {
    max_len.checked_add(RECORD_OVERHEAD)
}

/// XOR-fold integrity code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum(u8);

impl Checksum {
    pub fn new() -> Self {
        Self(CHECKSUM_SEED)
    }

    pub fn update(&mut self, byte: u8) {
        self.0 ^= byte;
    }

    pub fn update_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.update(b);
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Checksum {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a stored record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    /// Length byte larger than the field allows (typically erased storage)
    LengthOutOfRange { len: u8, max_len: usize },

    /// Byte after the payload is not zero
    MissingTerminator { found: u8 },

    /// Stored checksum does not match the recomputed one
    ChecksumMismatch { stored: u8, computed: u8 },

    /// Device failed while reading the record
    Unreadable,
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corruption::LengthOutOfRange { len, max_len } => {
                write!(f, "stored len {} exceeds field len {}", len, max_len)
            }
            Corruption::MissingTerminator { found } => {
                write!(f, "terminator is 0x{:02x} instead of 0x00", found)
            }
            Corruption::ChecksumMismatch { stored, computed } => write!(
                f,
                "checksum 0x{:02x} does not match computed 0x{:02x}",
                stored, computed
            ),
            Corruption::Unreadable => write!(f, "record could not be read"),
        }
    }
}

/// Outcome of decoding one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Valid(Vec<u8>),
    Invalid(Corruption),
}

/// Serialize `value` into a record for a field of `max_len`
///
/// Values longer than the field are truncated. The length byte can never
/// hold more than 255, so that is a second cap for oversize fields.
pub fn encode(value: &[u8], max_len: usize) -> Vec<u8> {
    let len = value.len().min(max_len).min(u8::MAX as usize);
    let payload = &value[..len];

    let mut sum = Checksum::new();
    let mut out = Vec::with_capacity(len + RECORD_OVERHEAD);

    out.push(len as u8);
    sum.update(len as u8);

    out.extend_from_slice(payload);
    sum.update_all(payload);

    out.push(0);
    sum.update(0);

    out.push(sum.value());
    out
}

/// Decode the record of a field of `max_len`
///
/// `read` is called with offsets relative to the start of the record. Only
/// device failures are returned as errors; a bad record is `Decoded::Invalid`.
pub fn decode<F>(max_len: usize, mut read: F) -> Result<Decoded>
where
    F: FnMut(usize) -> Result<u8>,
{
    let len = read(0)?;
    if len as usize > max_len {
        return Ok(Decoded::Invalid(Corruption::LengthOutOfRange { len, max_len }));
    }

    let mut sum = Checksum::new();
    sum.update(len);

    let len = len as usize;
    let mut payload = Vec::with_capacity(len);
    for i in 0..len {
        let b = read(1 + i)?;
        sum.update(b);
        payload.push(b);
    }

    let terminator = read(1 + len)?;
    sum.update(terminator);
    if terminator != 0 {
        return Ok(Decoded::Invalid(Corruption::MissingTerminator { found: terminator }));
    }

    let stored = read(2 + len)?;
    if stored != sum.value() {
        return Ok(Decoded::Invalid(Corruption::ChecksumMismatch {
            stored,
            computed: sum.value(),
        }));
    }

    Ok(Decoded::Valid(payload))
}
