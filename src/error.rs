//! # Telegram Decoding Error Handling
//!
//! This module defines the ObisError enum, which represents the different
//! error types that can occur in the obis-rs crate.

use thiserror::Error;

/// Represents the different error types that can occur while decoding
/// meter telegrams.
#[derive(Debug, Error)]
pub enum ObisError {
    /// Indicates an error related to the serial port communication.
    #[error("Serial port error: {0}")]
    SerialPortError(String),

    /// Indicates a frame shorter than the format's minimum.
    #[error("Frame too short: {actual} bytes, need at least {min}")]
    FrameTooShort { min: usize, actual: usize },

    /// Indicates a read past the end of the frame buffer.
    #[error("Unexpected end of frame: requested {requested} bytes, {remaining} remaining")]
    UnexpectedEnd { requested: usize, remaining: usize },

    /// Indicates neither CRC16 variant matched the trailing checksum bytes.
    #[error("Invalid checksum: frame carries {expected:#06x}, calculated x25={x25:#06x} kermit={kermit:#06x}")]
    InvalidChecksum { expected: u16, x25: u16, kermit: u16 },

    /// Indicates a malformed TLV structure in an SML frame body.
    #[error("Malformed TLV: {0}")]
    MalformedTlv(String),

    /// Indicates TLV nesting beyond the supported depth.
    #[error("TLV nesting too deep: {0} levels")]
    TlvTooDeep(usize),

    /// Indicates an OBIS data line that did not tokenize.
    #[error("Malformed OBIS line: {0:?}")]
    MalformedLine(String),

    /// Indicates an OBIS code with the wrong shape.
    #[error("Invalid OBIS code: {0:?}")]
    InvalidObisCode(String),

    /// Indicates a telegram body that is not valid text.
    #[error("Telegram is not valid UTF-8")]
    InvalidEncoding,

    /// Indicates a nom parsing error.
    #[error("Nom error: {0}")]
    NomError(String),

    /// A catch-all error for uncategorized cases.
    #[error("Other error: {0}")]
    Other(String),
}
