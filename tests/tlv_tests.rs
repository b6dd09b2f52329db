//! Tests for the TLV node decoder: list arity, value payload lengths,
//! extended lengths, and clean failure on malformed length fields.

use obis_rs::sml::tlv::{decode_node, Cursor, TlvNode};
use obis_rs::ObisError;
use proptest::prelude::*;

/// Tests that a list node decodes exactly its declared child count, in
/// encoding order.
#[test]
fn test_list_child_order() {
    // List of 3 one-byte uints: 1, 2, 3
    let data = [0x73, 0x62, 0x01, 0x62, 0x02, 0x62, 0x03];
    let mut cursor = Cursor::new(&data);
    let node = decode_node(&mut cursor).unwrap();

    let children = node.children();
    assert_eq!(children.len(), 3);
    for (i, child) in children.iter().enumerate() {
        assert_eq!(child.value_bytes(), &[(i + 1) as u8]);
    }
    assert!(cursor.is_empty());
}

/// Tests that a value node's payload is its declared length minus the
/// header byte.
#[test]
fn test_value_payload_length() {
    let data = [0x05, 0xDE, 0xAD, 0xBE, 0xEF];
    let mut cursor = Cursor::new(&data);
    let node = decode_node(&mut cursor).unwrap();
    assert_eq!(node.value_bytes().len(), 4);
    assert_eq!(node.value_bytes(), &[0xDE, 0xAD, 0xBE, 0xEF]);
}

/// Tests nested lists keep their shape.
#[test]
fn test_nested_lists() {
    // List of 2: [list of 1: [uint 5], octet "AB"]
    let data = [0x72, 0x71, 0x62, 0x05, 0x03, 0x41, 0x42];
    let mut cursor = Cursor::new(&data);
    let node = decode_node(&mut cursor).unwrap();

    assert_eq!(node.children().len(), 2);
    let inner = node.child(0).unwrap();
    assert_eq!(inner.children().len(), 1);
    assert_eq!(inner.child(0).unwrap().value_bytes(), &[0x05]);
    assert_eq!(node.child(1).unwrap().value_bytes(), b"AB");
}

/// Tests the extended-length convention on a value node.
#[test]
fn test_extended_length_value() {
    // 0x81 0x04: length (1 << 4) | 4 = 20, minus 2 header bytes
    let mut data = vec![0x81, 0x04];
    data.extend(std::iter::repeat(0xAA).take(18));
    let mut cursor = Cursor::new(&data);
    let node = decode_node(&mut cursor).unwrap();
    assert_eq!(node.value_bytes().len(), 18);
}

/// Tests that a length claiming more bytes than remain fails with the
/// bounds error, not a panic or partial node.
#[test]
fn test_overrun_is_length_error() {
    let data = [0x72, 0x0F, 0x01];
    let mut cursor = Cursor::new(&data);
    assert!(matches!(
        decode_node(&mut cursor),
        Err(ObisError::UnexpectedEnd { .. })
    ));
}

/// Tests that a truncated list (fewer children than declared) fails.
#[test]
fn test_truncated_list() {
    let data = [0x73, 0x62, 0x01];
    let mut cursor = Cursor::new(&data);
    assert!(decode_node(&mut cursor).is_err());
}

/// Tests the end-of-message marker consumes exactly one byte.
#[test]
fn test_end_of_message_consumes_one_byte() {
    let data = [0x00, 0x62, 0x07];
    let mut cursor = Cursor::new(&data);
    assert_eq!(decode_node(&mut cursor).unwrap(), TlvNode::EndOfMessage);
    assert_eq!(cursor.remaining(), 2);
}

proptest! {
    /// Encoding N small values under a list and decoding recovers exactly
    /// N children with the original payloads.
    #[test]
    fn prop_list_roundtrip(values in proptest::collection::vec(any::<u8>(), 0..15)) {
        let mut data = vec![0x70 | values.len() as u8];
        for &value in &values {
            data.extend_from_slice(&[0x62, value]);
        }

        let mut cursor = Cursor::new(&data);
        let node = decode_node(&mut cursor).unwrap();
        prop_assert_eq!(node.children().len(), values.len());
        for (child, value) in node.children().iter().zip(&values) {
            prop_assert_eq!(child.value_bytes(), &[*value]);
        }
        prop_assert!(cursor.is_empty());
    }

    /// The decoder never reads past the buffer or panics on arbitrary
    /// input; it either produces a node or a typed error.
    #[test]
    fn prop_no_panic_on_garbage(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut cursor = Cursor::new(&data);
        let _ = decode_node(&mut cursor);
        prop_assert!(cursor.position() <= data.len());
    }
}
