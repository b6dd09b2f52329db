//! Tests for the CRC16 engine and SML frame checksum validation: known
//! answers for both variants, the either-variant acceptance policy, and
//! single-byte corruption rejection.

mod common;

use common::{frame_with_checksum, sample_frame, Checksum};
use obis_rs::sml::{check_sml_frame, crc16_kermit, crc16_x25};
use obis_rs::ObisError;
use proptest::prelude::*;

fn with_checksum_slot(data: &[u8]) -> Vec<u8> {
    let mut buffer = data.to_vec();
    buffer.extend_from_slice(&[0x00, 0x00]);
    buffer
}

/// Tests the standard X.25 check value (0x906E, byte-swapped on the wire).
#[test]
fn test_x25_known_answer() {
    assert_eq!(crc16_x25(&with_checksum_slot(b"123456789")), 0x6E90);
}

/// Tests the standard KERMIT check value.
#[test]
fn test_kermit_known_answer() {
    assert_eq!(crc16_kermit(&with_checksum_slot(b"123456789")), 0x2189);
}

/// Tests that the trailing checksum bytes do not contribute to the sum.
#[test]
fn test_checksum_slot_excluded() {
    let mut a = with_checksum_slot(b"telegram");
    let b = a.clone();
    a[9] = 0xAA;
    a[8] = 0x55;
    assert_eq!(crc16_x25(&a), crc16_x25(&b));
    assert_eq!(crc16_kermit(&a), crc16_kermit(&b));
}

/// Tests that a frame checked with X.25 trailing bytes is accepted.
#[test]
fn test_accepts_x25_frame() {
    assert!(check_sml_frame(&frame_with_checksum(Checksum::X25)).is_ok());
}

/// Tests that the same frame with KERMIT trailing bytes is also accepted.
#[test]
fn test_accepts_kermit_frame() {
    assert!(check_sml_frame(&frame_with_checksum(Checksum::Kermit)).is_ok());
}

/// Tests that a frame matching neither convention reports both sums.
#[test]
fn test_rejects_bad_checksum() {
    let mut frame = sample_frame();
    let len = frame.len();
    frame[len - 1] ^= 0xFF;
    match check_sml_frame(&frame) {
        Err(ObisError::InvalidChecksum { expected, x25, kermit }) => {
            assert_ne!(expected, x25);
            assert_ne!(expected, kermit);
        }
        other => panic!("expected checksum error, got {other:?}"),
    }
}

/// Tests that frames below the SML minimum are rejected before any CRC math.
#[test]
fn test_rejects_short_frame() {
    assert!(matches!(
        check_sml_frame(&[0x1B; 8]),
        Err(ObisError::FrameTooShort { .. })
    ));
}

proptest! {
    /// Any buffer whose trailing bytes are its own X.25 sum must verify.
    #[test]
    fn prop_x25_roundtrip(data in proptest::collection::vec(any::<u8>(), 14..200)) {
        let mut buffer = with_checksum_slot(&data);
        let crc = crc16_x25(&buffer);
        let len = buffer.len();
        buffer[len - 2..].copy_from_slice(&crc.to_be_bytes());
        prop_assert!(check_sml_frame(&buffer).is_ok());
    }

    /// Same round-trip property for the KERMIT convention.
    #[test]
    fn prop_kermit_roundtrip(data in proptest::collection::vec(any::<u8>(), 14..200)) {
        let mut buffer = with_checksum_slot(&data);
        let crc = crc16_kermit(&buffer);
        let len = buffer.len();
        buffer[len - 2..].copy_from_slice(&crc.to_be_bytes());
        prop_assert!(check_sml_frame(&buffer).is_ok());
    }

    /// Corrupting any single covered byte of a valid frame must fail both
    /// variants: CRC16 detects every error burst shorter than the checksum.
    #[test]
    fn prop_single_byte_corruption_rejected(
        index in 0usize..100,
        delta in 1u8..=255,
    ) {
        let mut frame = sample_frame();
        let index = index % (frame.len() - 2);
        frame[index] ^= delta;
        prop_assert!(check_sml_frame(&frame).is_err());
    }
}
