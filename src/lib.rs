//! # obis-rs - A Rust Crate for SML and Q3DA Meter Telegram Decoding
//!
//! The obis-rs crate decodes the two serial telemetry formats spoken by
//! smart electricity meters with an optical or wired readout head: SML
//! (Smart Message Language, a binary TLV format) and Q3DA (an ASCII
//! line-oriented telegram format). Both decode into the same normalized
//! result, a list of OBIS records.
//!
//! ## Features
//!
//! - Streaming frame synchronization over an unbounded serial byte stream
//! - CRC16 validation of SML frames (X.25 and KERMIT conventions)
//! - Recursive TLV decoding of SML message trees with strict bounds checks
//! - Bounds-checked tokenization of Q3DA OBIS data lines
//! - Listener registry matching records by server id and OBIS code
//! - Serial port sources built on tokio-serial
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```rust
//! use obis_rs::{ListenerRegistry, SmlReceiver};
//!
//! let mut receiver = SmlReceiver::new();
//! let mut registry = ListenerRegistry::new();
//! registry.register_numeric("", "1-0:1.8.0", |value| {
//!     println!("total energy: {value}");
//! });
//!
//! // bytes arrive from the serial port in arbitrary chunks
//! let records = receiver.feed(&[0x1b, 0x1b, 0x1b, 0x1b]);
//! registry.publish_all(&records);
//! ```

pub mod codec;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod q3da;
pub mod record;
pub mod serial;
pub mod sml;
pub mod util;

pub use crate::error::ObisError;
pub use crate::logging::{init_logger, log_info};

// Core decoding types
pub use dispatch::ListenerRegistry;
pub use q3da::{Q3daReceiver, Q3daReceiverStats, Q3daTelegram};
pub use record::{ObisCode, ObisRecord, ObisValue, PublishFormat};
pub use serial::{ByteSource, MemorySource, SerialConfig, TelegramPort};
pub use sml::{SmlFile, SmlReceiver, SmlReceiverStats};

/// Decodes one complete SML frame (start sequence through CRC) into OBIS
/// records.
///
/// # Arguments
/// * `frame` - Raw frame bytes, as handed out by [`SmlReceiver::push_byte`]
///
/// # Returns
/// * `Ok(Vec<ObisRecord>)` - Records of every GetList response in the frame
/// * `Err(ObisError)` - Checksum or TLV decode failure
pub fn decode_sml_frame(frame: &[u8]) -> Result<Vec<ObisRecord>, ObisError> {
    sml::decode_frame(frame)
}

/// Decodes one complete Q3DA telegram (`/` through `!`) into its
/// identification and OBIS records.
///
/// # Arguments
/// * `telegram` - Raw telegram bytes, as handed out by [`Q3daReceiver::push_byte`]
///
/// # Returns
/// * `Ok(Q3daTelegram)` - Identification line plus decoded records
/// * `Err(ObisError)` - Too short or not valid text
pub fn decode_q3da_telegram(telegram: &[u8]) -> Result<Q3daTelegram, ObisError> {
    q3da::decode_telegram(telegram)
}
