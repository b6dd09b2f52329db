//! The sml module contains the decoder for SML (Smart Message Language)
//! meter telegrams: CRC16 frame validation, the recursive TLV node decoder,
//! OBIS record extraction, and the streaming frame synchronizer.

pub mod checksum;
pub mod file;
pub mod receiver;
pub mod tlv;

pub use checksum::{check_sml_frame, crc16_kermit, crc16_x25};
pub use file::SmlFile;
pub use receiver::{SmlReceiver, SmlReceiverStats};
pub use tlv::{Cursor, TlvNode};

use crate::error::ObisError;
use crate::record::ObisRecord;

/// Decodes one complete SML frame (start sequence through CRC) into OBIS
/// records: checksum validation, TLV decode, record extraction.
pub fn decode_frame(frame: &[u8]) -> Result<Vec<ObisRecord>, ObisError> {
    check_sml_frame(frame)?;
    let file = SmlFile::parse(frame)?;
    Ok(file.obis_records())
}
