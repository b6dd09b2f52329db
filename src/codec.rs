//! # Byte/Number Codec
//!
//! This module converts the big-endian byte payloads carried by SML value
//! nodes into Rust integers and display strings. All conversions are total:
//! empty input decodes to zero or the empty string.

/// Accumulates a big-endian byte sequence into an unsigned integer.
///
/// Supports 1..=8 byte inputs; longer inputs keep only the low 64 bits.
pub fn bytes_to_uint(bytes: &[u8]) -> u64 {
    let mut val: u64 = 0;
    for &byte in bytes {
        val = (val << 8) | u64::from(byte);
    }
    val
}

/// Accumulates a big-endian byte sequence and reinterprets it as a signed
/// integer of the matching width.
///
/// Widths of 1, 2 and 4 bytes sign-extend from their own most significant
/// bit; every other width is taken as a full 64-bit value.
pub fn bytes_to_int(bytes: &[u8]) -> i64 {
    let tmp = bytes_to_uint(bytes);
    match bytes.len() {
        1 => i64::from(tmp as i8),
        2 => i64::from(tmp as i16),
        4 => i64::from(tmp as i32),
        _ => tmp as i64,
    }
}

/// Renders bytes as a lowercase hex string, two digits per byte, no
/// separators. This is the canonical server-id representation used for
/// listener matching.
pub fn bytes_repr(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Renders an octet string payload as text, replacing non-ASCII bytes.
pub fn bytes_to_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_accumulation() {
        assert_eq!(bytes_to_uint(&[]), 0);
        assert_eq!(bytes_to_uint(&[0x12]), 0x12);
        assert_eq!(bytes_to_uint(&[0x80, 0x00]), 0x8000);
        assert_eq!(bytes_to_uint(&[0x01, 0x02, 0x03, 0x04]), 0x0102_0304);
    }

    #[test]
    fn test_sign_extension_widths() {
        assert_eq!(bytes_to_int(&[0xFF]), -1);
        assert_eq!(bytes_to_int(&[0x80, 0x00]), -32768);
        assert_eq!(bytes_to_int(&[0xFF, 0xFF, 0xFF, 0xFF]), -1);
        // 3-byte input takes the 64-bit path, no extension
        assert_eq!(bytes_to_int(&[0xFF, 0xFF, 0xFF]), 0x00FF_FFFF);
    }

    #[test]
    fn test_repr() {
        assert_eq!(bytes_repr(&[]), "");
        assert_eq!(bytes_repr(&[0x01, 0xAB]), "01ab");
    }

    #[test]
    fn test_octet_text() {
        assert_eq!(bytes_to_string(b"ISK"), "ISK");
        assert_eq!(bytes_to_string(&[0x49, 0x00, 0x4B]), "I.K");
    }
}
