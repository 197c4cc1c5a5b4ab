//! Tests for SharedStore
//!
//! These tests verify:
//! - Concurrent writers on different fields do not interfere
//! - Readers never observe a torn record
//! - Grouped operations under one lock
//! - Dump goes to the store's diagnostics sink

use std::sync::Arc;
use std::thread;

use nvfields::{CollectingDiagnostics, FieldDescriptor, MemoryDevice, RecordStore, Schema, SharedStore};

// =============================================================================
// Helper Functions
// =============================================================================

fn counters_schema(count: usize) -> Schema {
    let fields = (0..count)
        .map(|i| FieldDescriptor::new(format!("counter{}", i), "0", 8))
        .collect();
    Schema::strict(fields).unwrap()
}

fn shared(schema: &Schema) -> SharedStore<'_, MemoryDevice> {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    SharedStore::new(RecordStore::open(schema, MemoryDevice::new(), diagnostics).unwrap())
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_writers_on_separate_fields() {
    let schema = counters_schema(4);
    let store = shared(&schema);

    thread::scope(|s| {
        for t in 0..4usize {
            let store = &store;
            s.spawn(move || {
                let name = format!("counter{}", t);
                for i in 0..200 {
                    store.put(&name, i.to_string()).unwrap();
                    assert_eq!(store.get_string(&name), i.to_string());
                }
            });
        }
    });

    for t in 0..4usize {
        assert_eq!(store.get_string(t), "199");
    }
}

#[test]
fn test_readers_see_whole_records() {
    let schema = counters_schema(1);
    let store = shared(&schema);
    store.put(0usize, "aaaaaaaa").unwrap();

    thread::scope(|s| {
        let writer = &store;
        s.spawn(move || {
            for i in 0..500 {
                let value = if i % 2 == 0 { "bbbb" } else { "aaaaaaaa" };
                writer.put(0usize, value).unwrap();
            }
        });

        for _ in 0..2 {
            let reader = &store;
            s.spawn(move || {
                for _ in 0..500 {
                    let value = reader.read(0usize).unwrap();
                    assert!(!value.is_default());
                    let text = value.to_string_lossy();
                    assert!(text == "bbbb" || text == "aaaaaaaa", "torn read: {}", text);
                }
            });
        }
    });
}

#[test]
fn test_with_groups_operations() {
    let schema = counters_schema(2);
    let store = shared(&schema);

    let swapped = store.with(|inner| {
        inner.put("counter0", "left").unwrap();
        inner.put("counter1", "right").unwrap();
        let a = inner.get_string("counter0");
        let b = inner.get_string("counter1");
        inner.put("counter0", &b).unwrap();
        inner.put("counter1", &a).unwrap();
        (inner.get_string("counter0"), inner.get_string("counter1"))
    });

    assert_eq!(swapped, ("right".to_string(), "left".to_string()));
    assert_eq!(store.get(1usize), b"left".to_vec());
}

#[test]
fn test_into_inner() {
    let schema = counters_schema(1);
    let store = shared(&schema);
    store.put("counter0", "7").unwrap();
    assert_eq!(store.dump_lines("").unwrap().len(), 1);

    let inner = store.into_inner();
    assert_eq!(inner.get_string("counter0"), "7");
    assert_eq!(inner.device().commit_count(), 1);
}

#[test]
fn test_dump_reports_to_diagnostics() {
    let schema = counters_schema(2);
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let store = SharedStore::new(
        RecordStore::open(&schema, MemoryDevice::new(), diagnostics.clone()).unwrap(),
    );
    store.put("counter1", "42").unwrap();

    store.dump("nvm: ").unwrap();

    let lines = store.dump_lines("nvm: ").unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(diagnostics.infos(), lines);
    assert!(diagnostics.warnings().is_empty());
}
