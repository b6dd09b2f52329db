//! SML and Q3DA Protocol Constants
//!
//! This module defines the wire-level constants used by the SML (Smart
//! Message Language) and Q3DA telegram decoders.

/// SML frame start sequence: escape marker followed by version 1
/// (`1b 1b 1b 1b 01 01 01 01`), matched against an 8-byte sliding window.
pub const SML_START_SEQUENCE: u64 = 0x1b1b_1b1b_0101_0101;

/// SML frame end sequence with the trailing fill count and CRC16 masked out
/// (`1b 1b 1b 1b 1a ?? ?? ??`).
pub const SML_END_SEQUENCE: u64 = 0x1b1b_1b1b_1a00_0000;

/// Mask selecting the fixed 5 bytes of the SML end sequence.
pub const SML_END_MASK: u64 = 0xffff_ffff_ff00_0000;

/// SML escape byte, also the first byte of the end sequence.
pub const SML_ESCAPE_BYTE: u8 = 0x1b;

/// Length of the SML start sequence in bytes.
pub const SML_START_LEN: usize = 8;

/// Shortest possible SML frame: start sequence plus end sequence.
pub const SML_MIN_FRAME_LEN: usize = 16;

// Type nibbles of the SML type/length byte (high nibble, extension bit
// stripped). The low 3 bits select the type; 0b111 marks a list.
pub const SML_TYPE_OCTET_STRING: u8 = 0x00;
pub const SML_TYPE_BOOL: u8 = 0x04;
pub const SML_TYPE_INT: u8 = 0x05;
pub const SML_TYPE_UINT: u8 = 0x06;
pub const SML_TYPE_LIST: u8 = 0x07;

/// Extension bit of the type nibble: low nibble of this byte and the low
/// nibble of the next byte concatenate to an 8-bit length.
pub const SML_TYPE_EXT_LENGTH: u8 = 0x08;

/// End-of-message marker byte at a node boundary.
pub const SML_END_OF_MESSAGE: u8 = 0x00;

/// Message type tag of an SML GetList response body.
pub const SML_MSG_GET_LIST_RES: u64 = 0x0701;

/// Maximum TLV nesting depth accepted by the decoder.
pub const SML_MAX_TLV_DEPTH: usize = 16;

/// Q3DA telegram start marker (`/`).
pub const Q3DA_START_BYTE: u8 = 0x2F;

/// Q3DA telegram end marker (`!`).
pub const Q3DA_END_BYTE: u8 = 0x21;

/// Shortest accepted Q3DA telegram body.
pub const Q3DA_MIN_TELEGRAM_LEN: usize = 2;

/// Default cap on Q3DA telegram accumulation before the partial telegram
/// is abandoned.
pub const Q3DA_DEFAULT_MAX_TELEGRAM_LEN: usize = 4096;
