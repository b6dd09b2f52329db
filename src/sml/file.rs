//! # SML File Decoding and Record Extraction
//!
//! A validated SML frame carries a sequence of top-level messages between
//! the start and end sequences. Every message is a list whose fourth child
//! is the message body: a (type tag, payload) pair. Only `GetList.Res`
//! bodies carry meter readings; their payload holds the server id and a
//! value list whose entries map to OBIS records by fixed child positions.

use crate::codec::{bytes_to_int, bytes_to_uint};
use crate::constants::{
    SML_ESCAPE_BYTE, SML_MIN_FRAME_LEN, SML_MSG_GET_LIST_RES, SML_START_LEN, SML_TYPE_BOOL,
    SML_TYPE_INT, SML_TYPE_UINT,
};
use crate::error::ObisError;
use crate::record::{ObisCode, ObisRecord, ObisValue};
use crate::sml::tlv::{decode_node, Cursor, TlvNode};

// Fixed child positions inside an SML message and a value list entry.
const MSG_BODY: usize = 3;
const BODY_TYPE: usize = 0;
const BODY_PAYLOAD: usize = 1;
const LIST_RES_SERVER_ID: usize = 1;
const LIST_RES_VAL_LIST: usize = 4;
const ENTRY_CODE: usize = 0;
const ENTRY_STATUS: usize = 1;
const ENTRY_UNIT: usize = 3;
const ENTRY_SCALER: usize = 4;
const ENTRY_VALUE: usize = 5;

/// The decoded message tree of one SML frame.
#[derive(Debug)]
pub struct SmlFile {
    pub messages: Vec<TlvNode>,
}

impl SmlFile {
    /// Decodes the TLV message sequence of a complete frame.
    ///
    /// The caller has already validated the checksum. Decoding stops at
    /// the escape byte that opens the end sequence; a malformed node
    /// anywhere aborts the whole frame.
    pub fn parse(frame: &[u8]) -> Result<Self, ObisError> {
        if frame.len() < SML_MIN_FRAME_LEN {
            return Err(ObisError::FrameTooShort {
                min: SML_MIN_FRAME_LEN,
                actual: frame.len(),
            });
        }

        let mut cursor = Cursor::new(&frame[SML_START_LEN..]);
        let mut messages = Vec::new();
        while !cursor.is_empty() {
            if cursor.peek() == Some(SML_ESCAPE_BYTE) {
                break;
            }
            match decode_node(&mut cursor)? {
                // Fill bytes between messages carry no content
                TlvNode::EndOfMessage => continue,
                node => messages.push(node),
            }
        }
        Ok(SmlFile { messages })
    }

    /// Extracts the OBIS records of every `GetList.Res` message.
    ///
    /// Messages of other types are skipped; a value list entry with a
    /// shape the extractor cannot index is dropped with a debug log and
    /// does not affect its siblings.
    pub fn obis_records(&self) -> Vec<ObisRecord> {
        let mut records = Vec::new();
        for message in &self.messages {
            let Some(body) = message.child(MSG_BODY) else {
                continue;
            };
            let message_type = match body.child(BODY_TYPE) {
                Some(node) => bytes_to_uint(node.value_bytes()),
                None => continue,
            };
            if message_type != SML_MSG_GET_LIST_RES {
                continue;
            }
            let Some(payload) = body.child(BODY_PAYLOAD) else {
                continue;
            };
            let server_id = payload
                .child(LIST_RES_SERVER_ID)
                .map(|node| node.value_bytes().to_vec())
                .unwrap_or_default();
            let Some(val_list) = payload.child(LIST_RES_VAL_LIST) else {
                continue;
            };
            for entry in val_list.children() {
                match record_from_entry(&server_id, entry) {
                    Ok(record) => records.push(record),
                    Err(e) => log::debug!("skipping value list entry: {e}"),
                }
            }
        }
        records
    }
}

fn record_from_entry(server_id: &[u8], entry: &TlvNode) -> Result<ObisRecord, ObisError> {
    let code_node = entry
        .child(ENTRY_CODE)
        .ok_or_else(|| ObisError::MalformedTlv("value list entry without code".into()))?;
    let code = ObisCode::from_bytes(code_node.value_bytes())?;

    let status = entry
        .child(ENTRY_STATUS)
        .map(|node| node.value_bytes().to_vec())
        .filter(|bytes| !bytes.is_empty());
    let unit = entry
        .child(ENTRY_UNIT)
        .map(TlvNode::value_bytes)
        .filter(|bytes| !bytes.is_empty())
        .map(|bytes| bytes_to_uint(bytes) as u8);
    let scaler = entry
        .child(ENTRY_SCALER)
        .map(TlvNode::value_bytes)
        .filter(|bytes| !bytes.is_empty())
        .map(|bytes| bytes_to_int(bytes) as i8);

    let value_node = entry
        .child(ENTRY_VALUE)
        .ok_or_else(|| ObisError::MalformedTlv("value list entry without value".into()))?;
    let bytes = value_node.value_bytes();
    let value = match value_node.value_type() {
        Some(SML_TYPE_INT) => ObisValue::Int(bytes_to_int(bytes)),
        Some(SML_TYPE_UINT) => ObisValue::Uint(bytes_to_uint(bytes)),
        Some(SML_TYPE_BOOL) => ObisValue::Bool(bytes_to_uint(bytes) != 0),
        _ => ObisValue::Octet(bytes.to_vec()),
    };

    Ok(ObisRecord {
        server_id: server_id.to_vec(),
        code,
        status,
        value,
        unit,
        unit_text: None,
        scaler,
        text: None,
    })
}
