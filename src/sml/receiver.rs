//! # SML Streaming Frame Synchronizer
//!
//! Consumes a live serial byte stream and cuts it into SML frames. An
//! 8-byte sliding window is compared against the start sequence and
//! (masked) end sequence on every byte; between the two markers each byte
//! is appended to the accumulation buffer, so a completed frame carries
//! the start sequence, the message body, the end sequence and the CRC:
//! exactly the region the checksum covers.
//!
//! A start sequence seen while a frame is being recorded restarts
//! accumulation: the partial frame is abandoned, counted in
//! [`SmlReceiverStats`] and reported through a rate-limited warning.

use crate::constants::{SML_END_MASK, SML_END_SEQUENCE, SML_START_SEQUENCE};
use crate::error::ObisError;
use crate::record::ObisRecord;
use crate::sml::decode_frame;
use crate::util::logging::{log_frame_hex, LogThrottle};
use bytes::{BufMut, Bytes, BytesMut};

/// Counters exposed by the SML receiver.
#[derive(Debug, Default, Clone, Copy, serde::Serialize)]
pub struct SmlReceiverStats {
    /// Complete frames handed to the decode pipeline.
    pub frames_received: u64,
    /// Frames that passed checksum and TLV decode.
    pub frames_decoded: u64,
    /// Partial frames dropped because a new start sequence arrived.
    pub frames_abandoned: u64,
    /// Frames rejected because neither CRC variant matched.
    pub crc_errors: u64,
    /// Frames rejected by the TLV decoder or record extractor.
    pub decode_errors: u64,
}

/// Streaming SML frame synchronizer and decode pipeline.
pub struct SmlReceiver {
    window: u64,
    recording: bool,
    frame: BytesMut,
    stats: SmlReceiverStats,
    throttle: LogThrottle,
}

impl SmlReceiver {
    pub fn new() -> Self {
        Self {
            window: 0,
            recording: false,
            frame: BytesMut::with_capacity(512),
            stats: SmlReceiverStats::default(),
            throttle: LogThrottle::new(1000, 5),
        }
    }

    /// Feeds one byte; returns the raw bytes of a completed frame.
    ///
    /// The returned buffer spans start sequence through CRC and has not
    /// been validated yet.
    pub fn push_byte(&mut self, byte: u8) -> Option<Bytes> {
        if self.recording {
            self.frame.put_u8(byte);
        }
        self.window = (self.window << 8) | u64::from(byte);

        if self.window == SML_START_SEQUENCE {
            if self.recording {
                self.stats.frames_abandoned += 1;
                if self.throttle.allow() {
                    log::warn!(
                        "start sequence inside frame, abandoning {} buffered bytes",
                        self.frame.len()
                    );
                }
            }
            self.frame.clear();
            self.frame.extend_from_slice(&SML_START_SEQUENCE.to_be_bytes());
            self.recording = true;
            return None;
        }

        if self.recording && (self.window & SML_END_MASK) == SML_END_SEQUENCE {
            // The window matches three bytes after the end marker byte, so
            // the fill count and CRC are already in the buffer.
            self.recording = false;
            self.stats.frames_received += 1;
            return Some(self.frame.split().freeze());
        }

        None
    }

    /// Drains a byte slice through the whole pipeline: frame sync,
    /// checksum validation, TLV decode, record extraction.
    ///
    /// Failures are local to one frame: they are counted, logged, and the
    /// receiver keeps listening for the next start sequence.
    pub fn feed(&mut self, data: &[u8]) -> Vec<ObisRecord> {
        let mut records = Vec::new();
        for &byte in data {
            let Some(frame) = self.push_byte(byte) else {
                continue;
            };
            match decode_frame(&frame) {
                Ok(mut frame_records) => {
                    self.stats.frames_decoded += 1;
                    records.append(&mut frame_records);
                }
                Err(e @ ObisError::InvalidChecksum { .. }) => {
                    self.stats.crc_errors += 1;
                    if self.throttle.allow() {
                        log::warn!("dropping SML frame: {e}");
                        log_frame_hex("rejected frame", &frame);
                    }
                }
                Err(e) => {
                    self.stats.decode_errors += 1;
                    if self.throttle.allow() {
                        log::warn!("dropping SML frame: {e}");
                        log_frame_hex("rejected frame", &frame);
                    }
                }
            }
        }
        records
    }

    /// True while the receiver is between a start and end sequence.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn stats(&self) -> SmlReceiverStats {
        self.stats
    }
}

impl Default for SmlReceiver {
    fn default() -> Self {
        Self::new()
    }
}
