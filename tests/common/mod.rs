//! Shared test fixtures: hand-encoded SML frames with a known record.
#![allow(dead_code)]

use obis_rs::sml::{crc16_kermit, crc16_x25};

/// TLV body of one SML message carrying a single GetList response:
/// server id `[0x01, 0x02]`, code 1-0:1.8.0, unit 30 (Wh), scaler -1,
/// value 1234 (uint16).
pub fn sample_message_body() -> Vec<u8> {
    vec![
        0x76, // message: list of 6
        0x02, 0x01, // transaction id
        0x62, 0x00, // group no
        0x62, 0x00, // abort on error
        0x72, // message body: list of 2
        0x63, 0x07, 0x01, // message type: GetList.Res
        0x77, // response: list of 7
        0x01, // client id (empty)
        0x03, 0x01, 0x02, // server id
        0x01, // list name
        0x01, // sensor time
        0x71, // value list: 1 entry
        0x77, // entry: list of 7
        0x07, 0x01, 0x00, 0x01, 0x08, 0x00, 0xFF, // code 1-0:1.8.0
        0x01, // status
        0x01, // value time
        0x62, 0x1E, // unit: 30 (Wh)
        0x52, 0xFF, // scaler: -1
        0x63, 0x04, 0xD2, // value: 1234
        0x01, // value signature
        0x01, // list signature
        0x01, // gateway time
        0x63, 0x00, 0x00, // message crc (not validated)
        0x00, // end of message
    ]
}

/// Complete SML frame around [`sample_message_body`], X.25 checksum.
pub fn sample_frame() -> Vec<u8> {
    frame_with_checksum(Checksum::X25)
}

pub enum Checksum {
    X25,
    Kermit,
}

/// Builds the sample frame with either checksum convention.
pub fn frame_with_checksum(variant: Checksum) -> Vec<u8> {
    let mut frame = vec![0x1B, 0x1B, 0x1B, 0x1B, 0x01, 0x01, 0x01, 0x01];
    frame.extend_from_slice(&sample_message_body());
    // End sequence: escape, end marker, zero fill bytes, checksum slot
    frame.extend_from_slice(&[0x1B, 0x1B, 0x1B, 0x1B, 0x1A, 0x00, 0x00, 0x00]);
    let crc = match variant {
        Checksum::X25 => crc16_x25(&frame),
        Checksum::Kermit => crc16_kermit(&frame),
    };
    let len = frame.len();
    frame[len - 2..].copy_from_slice(&crc.to_be_bytes());
    frame
}

/// The sample Q3DA telegram from the wire, start marker through the
/// bytes trailing the end marker.
pub const SAMPLE_TELEGRAM: &[u8] = b"/METER\r\n1-0:1.8.0(001234*kWh)\r\n!\r\n";
