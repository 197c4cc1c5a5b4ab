//! Tests for the record codec and the offset table
//!
//! These tests verify:
//! - Byte-exact record encoding (length, payload, terminator, checksum)
//! - Rejection of erased, truncated and tampered records
//! - Offset table arithmetic and disjointness

use nvfields::store::{
    decode, encode, record_size, Checksum, Corruption, Decoded, OffsetTable, CHECKSUM_SEED,
};
use nvfields::{CollectingDiagnostics, FieldDescriptor, NvmError, Schema};

// =============================================================================
// Helper Functions
// =============================================================================

fn decode_slice(bytes: &[u8], max_len: usize) -> Decoded {
    decode(max_len, |i| {
        bytes.get(i).copied().ok_or(NvmError::AddressOutOfRange {
            address: i,
            capacity: bytes.len(),
        })
    })
    .unwrap()
}

fn schema_with_lengths(lengths: &[usize]) -> Schema {
    let fields = lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| FieldDescriptor::new(format!("f{}", i), "", len))
        .collect();
    Schema::strict(fields).unwrap()
}

// =============================================================================
// Checksum Tests
// =============================================================================

#[test]
fn test_checksum_starts_at_seed() {
    assert_eq!(Checksum::new().value(), CHECKSUM_SEED);
    assert_eq!(Checksum::default().value(), 0xAA);
}

#[test]
fn test_checksum_xor_fold() {
    let mut sum = Checksum::new();
    sum.update_all(&[0x02, 0x61, 0x62, 0x00]);
    assert_eq!(sum.value(), 0xAA ^ 0x02 ^ 0x61 ^ 0x62);
}

// =============================================================================
// Encode Tests
// =============================================================================

#[test]
fn test_encode_layout() {
    // 0xAA ^ 0x02 ^ 'a' ^ 'b' ^ 0x00 = 0xAB
    assert_eq!(encode(b"ab", 5), vec![0x02, b'a', b'b', 0x00, 0xAB]);
}

#[test]
fn test_encode_empty() {
    assert_eq!(encode(b"", 8), vec![0x00, 0x00, CHECKSUM_SEED]);
}

#[test]
fn test_encode_truncates() {
    let bytes = encode(b"abcdef", 3);
    assert_eq!(bytes.len(), 3 + 3);
    assert_eq!(bytes[0], 3);
    assert_eq!(&bytes[1..4], b"abc");
    assert_eq!(bytes[4], 0);
}

#[test]
fn test_encode_zero_length_field() {
    assert_eq!(encode(b"ignored", 0), vec![0x00, 0x00, CHECKSUM_SEED]);
}

#[test]
fn test_encode_caps_at_one_byte_length() {
    let value = vec![b'x'; 300];
    let bytes = encode(&value, 300);
    assert_eq!(bytes[0], 255);
    assert_eq!(bytes.len(), 255 + 3);
}

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_valid() {
    let mut region = encode(b"MyWifi", 32);
    region.resize(record_size(32).unwrap(), 0xFF);

    assert_eq!(decode_slice(&region, 32), Decoded::Valid(b"MyWifi".to_vec()));
}

#[test]
fn test_decode_empty_value() {
    assert_eq!(decode_slice(&encode(b"", 4), 4), Decoded::Valid(Vec::new()));
}

#[test]
fn test_decode_erased_storage() {
    let region = vec![0xFF; record_size(32).unwrap()];
    assert_eq!(
        decode_slice(&region, 32),
        Decoded::Invalid(Corruption::LengthOutOfRange { len: 0xFF, max_len: 32 })
    );
}

#[test]
fn test_decode_zeroed_storage() {
    // Length 0 and terminator 0 look plausible, only the seed catches it
    let region = vec![0x00; record_size(32).unwrap()];
    assert_eq!(
        decode_slice(&region, 32),
        Decoded::Invalid(Corruption::ChecksumMismatch {
            stored: 0x00,
            computed: CHECKSUM_SEED,
        })
    );
}

#[test]
fn test_decode_missing_terminator() {
    let mut region = encode(b"ab", 5);
    region[3] = b'c';

    assert_eq!(
        decode_slice(&region, 5),
        Decoded::Invalid(Corruption::MissingTerminator { found: b'c' })
    );
}

#[test]
fn test_decode_checksum_mismatch() {
    let mut region = encode(b"ab", 5);
    region[1] = b'z';

    assert!(matches!(
        decode_slice(&region, 5),
        Decoded::Invalid(Corruption::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_decode_length_above_field() {
    // Valid record for a 5-byte field read back as a 2-byte field
    let region = encode(b"abcde", 5);
    assert_eq!(
        decode_slice(&region, 2),
        Decoded::Invalid(Corruption::LengthOutOfRange { len: 5, max_len: 2 })
    );
}

#[test]
fn test_decode_propagates_read_errors() {
    let result = decode(8, |_| Err(NvmError::DeviceNotOpen));
    assert!(matches!(result, Err(NvmError::DeviceNotOpen)));
}

#[test]
fn test_decode_reads_only_the_record() {
    let region = encode(b"abc", 10);
    let mut touched = Vec::new();
    let _ = decode(10, |i| {
        touched.push(i);
        Ok(region[i])
    })
    .unwrap();

    assert_eq!(touched, vec![0, 1, 2, 3, 4, 5]);
}

// =============================================================================
// Offset Table Tests
// =============================================================================

#[test]
fn test_offsets_wifi_layout() {
    let table = OffsetTable::new(&schema_with_lengths(&[32, 32])).unwrap();

    assert_eq!(table.as_slice(), &[0, 35, 70]);
    assert_eq!(table.total(), 70);
    assert_eq!(table.field_count(), 2);
    assert_eq!(table.offset(1), Some(35));
    assert_eq!(table.offset(2), None);
    assert_eq!(table.range(0), Some(0..35));
}

#[test]
fn test_offsets_zero_length_field() {
    let table = OffsetTable::new(&schema_with_lengths(&[0, 4])).unwrap();
    assert_eq!(table.as_slice(), &[0, 3, 10]);
}

#[test]
fn test_offsets_empty_schema() {
    let table = OffsetTable::new(&schema_with_lengths(&[])).unwrap();
    assert_eq!(table.total(), 0);
    assert_eq!(table.field_count(), 0);
    assert_eq!(table.offset(0), None);
}

#[test]
fn test_offsets_are_disjoint_and_cover_storage() {
    let lengths = [0, 1, 7, 64, 16, 3];
    let table = OffsetTable::new(&schema_with_lengths(&lengths)).unwrap();

    let mut covered = vec![0u32; table.total()];
    for i in 0..lengths.len() {
        let range = table.range(i).unwrap();
        assert_eq!(range.len(), record_size(lengths[i]).unwrap());
        for address in range {
            covered[address] += 1;
        }
    }
    assert!(covered.iter().all(|&n| n == 1));

    let offsets = table.as_slice();
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_record_size_overflow() {
    assert_eq!(record_size(0), Some(3));
    assert_eq!(record_size(usize::MAX - 3), Some(usize::MAX));
    assert_eq!(record_size(usize::MAX - 2), None);
}

#[test]
fn test_offsets_overflow_is_an_error() {
    let diagnostics = CollectingDiagnostics::new();
    let schema = Schema::new(
        vec![
            FieldDescriptor::new("a", "", usize::MAX / 2),
            FieldDescriptor::new("b", "", usize::MAX / 2),
        ],
        &diagnostics,
    );

    assert!(matches!(OffsetTable::new(&schema), Err(NvmError::Schema(msg)) if msg.contains("'b'")));
}

#[test]
fn test_boundaries() {
    let table = OffsetTable::new(&schema_with_lengths(&[2, 2])).unwrap();
    // records: 0..5, 5..10

    assert!(table.is_boundary(0));
    assert!(table.is_boundary(5));
    assert!(table.is_boundary(10));
    assert!(!table.is_boundary(3));

    assert_eq!(table.field_starting_at(5), Some(1));
    assert_eq!(table.field_starting_at(10), None);
    assert_eq!(table.field_starting_at(4), None);
}
