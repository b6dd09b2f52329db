//! # Utility Modules
//!
//! This module provides common utility functions and types used throughout
//! the obis-rs crate: hex encoding/decoding helpers and rate-limited
//! logging patterns.

pub mod hex;
pub mod logging;

// Re-export commonly used types and functions
pub use hex::{decode_hex, encode_hex, format_hex_compact, hex_to_bytes};
pub use logging::{log_frame_hex, LogThrottle};
