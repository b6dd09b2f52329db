//! # Q3DA Streaming Telegram Synchronizer
//!
//! Cuts a serial byte stream into Q3DA telegrams using the single-byte
//! markers `/` (start) and `!` (end). While recording, every byte is
//! appended before the marker check, so the terminating `!` is part of
//! the handed-out telegram; a `/` clears the buffer and restarts
//! accumulation, abandoning whatever partial telegram was buffered.
//!
//! Telegrams carry no checksum, so accumulation is bounded by a
//! configurable maximum length instead: exceeding it drops the partial
//! telegram and waits for the next start marker.

use crate::constants::{Q3DA_DEFAULT_MAX_TELEGRAM_LEN, Q3DA_END_BYTE, Q3DA_START_BYTE};
use crate::q3da::decode_telegram;
use crate::record::ObisRecord;
use crate::util::logging::LogThrottle;
use bytes::{BufMut, Bytes, BytesMut};

/// Counters exposed by the Q3DA receiver.
#[derive(Debug, Default, Clone, Copy, serde::Serialize)]
pub struct Q3daReceiverStats {
    /// Complete telegrams handed to the decoder.
    pub telegrams_received: u64,
    /// Telegrams that decoded into a record list.
    pub telegrams_decoded: u64,
    /// Partial telegrams dropped because a new start marker arrived.
    pub telegrams_abandoned: u64,
    /// Partial telegrams dropped for exceeding the length cap.
    pub overruns: u64,
    /// Telegrams rejected by the decoder.
    pub decode_errors: u64,
}

/// Streaming Q3DA telegram synchronizer and decode pipeline.
pub struct Q3daReceiver {
    recording: bool,
    frame: BytesMut,
    max_telegram_len: usize,
    stats: Q3daReceiverStats,
    throttle: LogThrottle,
}

impl Q3daReceiver {
    pub fn new() -> Self {
        Self::with_max_telegram_len(Q3DA_DEFAULT_MAX_TELEGRAM_LEN)
    }

    /// Creates a receiver with a custom accumulation cap.
    pub fn with_max_telegram_len(max_telegram_len: usize) -> Self {
        Self {
            recording: false,
            frame: BytesMut::with_capacity(256),
            max_telegram_len,
            stats: Q3daReceiverStats::default(),
            throttle: LogThrottle::new(1000, 5),
        }
    }

    /// Feeds one byte; returns the raw bytes of a completed telegram,
    /// start marker through `!` inclusive.
    pub fn push_byte(&mut self, byte: u8) -> Option<Bytes> {
        if self.recording {
            if self.frame.len() >= self.max_telegram_len {
                self.stats.overruns += 1;
                self.recording = false;
                self.frame.clear();
                if self.throttle.allow() {
                    log::warn!(
                        "telegram exceeded {} bytes without end marker, dropping",
                        self.max_telegram_len
                    );
                }
            } else {
                self.frame.put_u8(byte);
            }
        }

        match byte {
            Q3DA_START_BYTE => {
                if self.recording && self.frame.len() > 1 {
                    self.stats.telegrams_abandoned += 1;
                    if self.throttle.allow() {
                        log::warn!(
                            "start marker inside telegram, abandoning {} buffered bytes",
                            self.frame.len()
                        );
                    }
                }
                self.frame.clear();
                self.frame.put_u8(Q3DA_START_BYTE);
                self.recording = true;
                None
            }
            Q3DA_END_BYTE if self.recording => {
                self.recording = false;
                self.stats.telegrams_received += 1;
                Some(self.frame.split().freeze())
            }
            _ => None,
        }
    }

    /// Drains a byte slice through the whole pipeline: telegram sync,
    /// length check, line tokenization, record extraction.
    pub fn feed(&mut self, data: &[u8]) -> Vec<ObisRecord> {
        let mut records = Vec::new();
        for &byte in data {
            let Some(frame) = self.push_byte(byte) else {
                continue;
            };
            match decode_telegram(&frame) {
                Ok(telegram) => {
                    self.stats.telegrams_decoded += 1;
                    records.extend(telegram.records);
                }
                Err(e) => {
                    self.stats.decode_errors += 1;
                    if self.throttle.allow() {
                        log::warn!("dropping Q3DA telegram: {e}");
                    }
                }
            }
        }
        records
    }

    /// True while the receiver is between a start and end marker.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn stats(&self) -> Q3daReceiverStats {
        self.stats
    }
}

impl Default for Q3daReceiver {
    fn default() -> Self {
        Self::new()
    }
}
