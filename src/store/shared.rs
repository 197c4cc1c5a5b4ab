//! Thread-shared store
//!
//! A `RecordStore` behind a mutex. Every call holds the lock for its full
//! duration, so a `put` is never observed half-written by a `get`.

use parking_lot::Mutex;

use crate::device::Device;
use crate::error::Result;

use super::{FieldKey, FieldValue, RecordStore};

/// `RecordStore` usable from several threads
pub struct SharedStore<'s, D: Device> {
    inner: Mutex<RecordStore<'s, D>>,
}

impl<'s, D: Device> SharedStore<'s, D> {
    pub fn new(store: RecordStore<'s, D>) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    pub fn get<'k>(&self, key: impl Into<FieldKey<'k>>) -> Vec<u8> {
        self.inner.lock().get(key)
    }

    pub fn get_string<'k>(&self, key: impl Into<FieldKey<'k>>) -> String {
        self.inner.lock().get_string(key)
    }

    pub fn read<'k>(&self, key: impl Into<FieldKey<'k>>) -> Result<FieldValue> {
        self.inner.lock().read(key)
    }

    pub fn put<'k>(&self, key: impl Into<FieldKey<'k>>, value: impl AsRef<[u8]>) -> Result<usize> {
        self.inner.lock().put(key, value)
    }

    pub fn dump(&self, prefix: &str) -> Result<()> {
        self.inner.lock().dump(prefix)
    }

    pub fn dump_lines(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.lock().dump_lines(prefix)
    }

    /// Run several operations under one lock acquisition
    pub fn with<R>(&self, f: impl FnOnce(&mut RecordStore<'s, D>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> RecordStore<'s, D> {
        self.inner.into_inner()
    }
}
