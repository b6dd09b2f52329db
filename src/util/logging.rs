//! # Rate-Limited Logging Utilities
//!
//! Telegram streams repeat their failure modes at line rate: a meter with a
//! mismatched CRC convention or a noisy optical head produces the same
//! warning for every frame. This module provides a small throttle so those
//! paths stay observable without flooding the log, plus a bounded hex dump
//! helper for rejected frames.

use std::time::Instant;

/// Throttling structure for rate-limiting log messages.
#[derive(Debug)]
pub struct LogThrottle {
    /// Time window for throttling (in milliseconds)
    window_ms: u64,
    /// Maximum messages allowed per window
    cap: u32,
    /// Current message count in window
    count: u32,
    /// Start time of current window
    t0: Instant,
}

impl LogThrottle {
    /// Create new throttle with time window and message cap
    ///
    /// # Arguments
    /// * `window_ms` - Time window in milliseconds
    /// * `cap` - Maximum messages allowed per window
    pub fn new(window_ms: u64, cap: u32) -> Self {
        Self {
            window_ms,
            cap,
            count: 0,
            t0: Instant::now(),
        }
    }

    /// Check if logging is allowed (resets counter after window expires)
    ///
    /// Returns `true` if the message should be logged, `false` if it
    /// should be throttled.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.t0).as_millis() as u64;

        if elapsed_ms > self.window_ms {
            self.t0 = now;
            self.count = 0;
        }

        self.count += 1;
        self.count <= self.cap
    }

    /// Reset the throttle (start new window immediately)
    pub fn reset(&mut self) {
        self.t0 = Instant::now();
        self.count = 0;
    }
}

/// Log frame data in hex format for debugging
///
/// Output is capped so a runaway frame cannot flood the log.
pub fn log_frame_hex(prefix: &str, data: &[u8]) {
    const MAX_LOG_BYTES: usize = 64;

    let display_data = if data.len() > MAX_LOG_BYTES {
        &data[..MAX_LOG_BYTES]
    } else {
        data
    };

    let hex_str = crate::util::hex::format_hex_compact(display_data);
    let suffix = if data.len() > MAX_LOG_BYTES {
        format!(" ... ({} bytes total)", data.len())
    } else {
        String::new()
    };

    log::debug!("{prefix}: {hex_str}{suffix}");
}
