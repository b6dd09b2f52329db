//! # SML Frame Checksums
//!
//! SML frames end in a 2-byte CRC16 covering everything before it,
//! including the start sequence. Meters in the field disagree on the CRC
//! convention: most use CRC16/X.25 (seed 0xFFFF, final XOR, byte-swapped
//! result), some use CRC16/KERMIT (seed 0x0000, no finalization). Both run
//! the same table-driven update loop over the reflected 0x8408 polynomial,
//! so a frame is accepted when either variant matches the trailing bytes.

use crate::constants::SML_MIN_FRAME_LEN;
use crate::error::ObisError;
use once_cell::sync::Lazy;

static CRC16_TABLE: Lazy<[u16; 256]> = Lazy::new(|| {
    let mut table = [0u16; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut crc = i as u16;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0x8408
            } else {
                crc >> 1
            };
        }
        *entry = crc;
    }
    table
});

fn crc16_update(mut crc: u16, bytes: &[u8]) -> u16 {
    for &byte in bytes {
        crc = (crc >> 8) ^ CRC16_TABLE[usize::from((crc ^ u16::from(byte)) as u8)];
    }
    crc
}

/// CRC16/X.25 over all bytes except the trailing checksum slot.
///
/// Seed 0xFFFF, final XOR 0xFFFF, result byte-swapped so it compares
/// directly against the big-endian trailing bytes. The caller guarantees
/// `buffer.len() >= 2`.
pub fn crc16_x25(buffer: &[u8]) -> u16 {
    let crc = crc16_update(0xFFFF, &buffer[..buffer.len() - 2]);
    (crc ^ 0xFFFF).swap_bytes()
}

/// CRC16/KERMIT over all bytes except the trailing checksum slot.
///
/// Seed 0x0000, no final XOR or swap. The caller guarantees
/// `buffer.len() >= 2`.
pub fn crc16_kermit(buffer: &[u8]) -> u16 {
    crc16_update(0x0000, &buffer[..buffer.len() - 2])
}

/// Validates the trailing checksum of a complete SML frame.
///
/// Accepts the frame when either CRC variant matches; reports both
/// computed values on failure.
pub fn check_sml_frame(frame: &[u8]) -> Result<(), ObisError> {
    if frame.len() < SML_MIN_FRAME_LEN {
        return Err(ObisError::FrameTooShort {
            min: SML_MIN_FRAME_LEN,
            actual: frame.len(),
        });
    }

    let expected = u16::from_be_bytes([frame[frame.len() - 2], frame[frame.len() - 1]]);
    let x25 = crc16_x25(frame);
    if x25 == expected {
        return Ok(());
    }
    let kermit = crc16_kermit(frame);
    if kermit == expected {
        return Ok(());
    }
    Err(ObisError::InvalidChecksum {
        expected,
        x25,
        kermit,
    })
}
