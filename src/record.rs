//! # OBIS Records
//!
//! This module defines the normalized result type shared by both telegram
//! decoders: an OBIS code identifying the measured quantity, a typed value,
//! and the format-dependent metadata (status word, DLMS unit code and
//! scaler for SML, textual unit for Q3DA).
//!
//! The string form of an [`ObisCode`] (`"1-0:1.8.0"`) is the public
//! identity of a measured quantity: listener matching and the CLI both key
//! on it, and formatting/parsing round-trips exactly.

use crate::codec::{bytes_repr, bytes_to_string};
use crate::error::ObisError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A 5-part OBIS code: medium-channel:quantity.processing.tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObisCode {
    pub medium: u8,
    pub channel: u8,
    pub quantity: u8,
    pub processing: u8,
    pub tariff: u8,
}

impl ObisCode {
    pub fn new(medium: u8, channel: u8, quantity: u8, processing: u8, tariff: u8) -> Self {
        Self {
            medium,
            channel,
            quantity,
            processing,
            tariff,
        }
    }

    /// Builds a code from the first 5 bytes of an SML code octet string.
    ///
    /// SML carries 6 code bytes; the 6th (billing period) does not take
    /// part in the public identity and is ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ObisError> {
        if bytes.len() < 5 {
            return Err(ObisError::InvalidObisCode(bytes_repr(bytes)));
        }
        Ok(Self::new(bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]))
    }
}

impl fmt::Display for ObisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}:{}.{}.{}",
            self.medium, self.channel, self.quantity, self.processing, self.tariff
        )
    }
}

impl FromStr for ObisCode {
    type Err = ObisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ObisError::InvalidObisCode(s.to_string());
        let (medium, rest) = s.split_once('-').ok_or_else(err)?;
        let (channel, rest) = rest.split_once(':').ok_or_else(err)?;
        let mut parts = rest.split('.');
        let quantity = parts.next().ok_or_else(err)?;
        let processing = parts.next().ok_or_else(err)?;
        let tariff = parts.next().ok_or_else(err)?;
        if parts.next().is_some() {
            return Err(err());
        }
        let field = |p: &str| p.parse::<u8>().map_err(|_| err());
        Ok(Self::new(
            field(medium)?,
            field(channel)?,
            field(quantity)?,
            field(processing)?,
            field(tariff)?,
        ))
    }
}

/// The typed payload of an OBIS record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObisValue {
    /// Signed integer (SML type nibble 0x5)
    Int(i64),
    /// Unsigned integer (SML type nibble 0x6)
    Uint(u64),
    /// Boolean (SML type nibble 0x4)
    Bool(bool),
    /// Octet string (SML type nibble 0x0); rendered as text or hex blob
    Octet(Vec<u8>),
    /// Floating point (Q3DA); NaN marks a textual payload
    Float(f64),
}

/// Per-listener value rendering override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PublishFormat {
    Hex,
    Text,
    Bool,
    Uint,
    Int,
}

/// One decoded OBIS record: the normalized public result of a frame.
#[derive(Debug, Clone, Serialize)]
pub struct ObisRecord {
    /// Identifies the reporting meter; empty for Q3DA telegrams.
    pub server_id: Vec<u8>,
    pub code: ObisCode,
    /// Raw SML status word, when present.
    pub status: Option<Vec<u8>>,
    pub value: ObisValue,
    /// DLMS unit code (SML).
    pub unit: Option<u8>,
    /// Textual unit (Q3DA).
    pub unit_text: Option<String>,
    /// Base-10 exponent applied by the meter (SML).
    pub scaler: Option<i8>,
    /// Raw textual payload of a Q3DA line without a numeric value.
    pub text: Option<String>,
}

impl ObisRecord {
    /// The canonical `"A-B:C.D.E"` identity used for listener matching.
    pub fn code_repr(&self) -> String {
        self.code.to_string()
    }

    /// Lowercase hex form of the server id used for listener matching.
    pub fn server_repr(&self) -> String {
        bytes_repr(&self.server_id)
    }

    /// Raw numeric value as a float, without the scaler applied. Scaling
    /// is the listener's business. Octet strings have no numeric form.
    pub fn as_float(&self) -> Option<f64> {
        match &self.value {
            ObisValue::Int(v) => Some(*v as f64),
            ObisValue::Uint(v) => Some(*v as f64),
            ObisValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            ObisValue::Float(v) => Some(*v),
            ObisValue::Octet(_) => None,
        }
    }

    /// Numeric value with the SML scaler applied as a power of ten.
    pub fn scaled_value(&self) -> Option<f64> {
        let raw = self.as_float()?;
        match self.scaler {
            Some(s) => Some(raw * 10f64.powi(i32::from(s))),
            None => Some(raw),
        }
    }

    /// Display name of the unit: the telegram's own text if it carried
    /// one, otherwise the DLMS unit table.
    pub fn unit_name(&self) -> Option<&str> {
        if let Some(text) = self.unit_text.as_deref() {
            return Some(text);
        }
        self.unit.and_then(unit_text)
    }

    /// Renders the value as a string for text listeners.
    ///
    /// `format` overrides the rendering; without it the record's own value
    /// type decides (octet strings render as a hex blob).
    pub fn format_value(&self, format: Option<PublishFormat>) -> String {
        if matches!(format, None | Some(PublishFormat::Text)) {
            if let Some(text) = &self.text {
                return text.clone();
            }
        }
        match format {
            Some(PublishFormat::Hex) => match &self.value {
                ObisValue::Octet(bytes) => bytes_repr(bytes),
                ObisValue::Int(v) => format!("{v:x}"),
                ObisValue::Uint(v) => format!("{v:x}"),
                ObisValue::Bool(v) => String::from(if *v { "01" } else { "00" }),
                ObisValue::Float(v) => v.to_string(),
            },
            Some(PublishFormat::Text) => match &self.value {
                ObisValue::Octet(bytes) => bytes_to_string(bytes),
                other => render_plain(other),
            },
            Some(PublishFormat::Bool) => match self.as_float() {
                Some(v) => (v != 0.0).to_string(),
                None => String::from("false"),
            },
            Some(PublishFormat::Uint) => match &self.value {
                ObisValue::Uint(v) => v.to_string(),
                ObisValue::Int(v) => (*v as u64).to_string(),
                other => render_plain(other),
            },
            Some(PublishFormat::Int) => match &self.value {
                ObisValue::Int(v) => v.to_string(),
                ObisValue::Uint(v) => (*v as i64).to_string(),
                other => render_plain(other),
            },
            None => render_plain(&self.value),
        }
    }
}

fn render_plain(value: &ObisValue) -> String {
    match value {
        ObisValue::Int(v) => v.to_string(),
        ObisValue::Uint(v) => v.to_string(),
        ObisValue::Bool(v) => v.to_string(),
        ObisValue::Octet(bytes) => bytes_repr(bytes),
        ObisValue::Float(v) => v.to_string(),
    }
}

// DLMS unit codes seen in SML value lists (DLMS "Blue Book" unit enum).
const DLMS_UNITS: &[(u8, &str)] = &[
    (13, "m3"),
    (27, "W"),
    (28, "VA"),
    (29, "var"),
    (30, "Wh"),
    (31, "VAh"),
    (32, "varh"),
    (33, "A"),
    (35, "V"),
    (44, "Hz"),
    (46, "Ah"),
];

/// Display text for a DLMS unit code, when known.
pub fn unit_text(unit: u8) -> Option<&'static str> {
    DLMS_UNITS
        .iter()
        .find(|(code, _)| *code == unit)
        .map(|(_, text)| *text)
}
