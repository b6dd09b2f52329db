//! # Q3DA Telegram Decoding
//!
//! A Q3DA telegram is plain ASCII: a `/`-prefixed identification line,
//! then one data line per reading of the form `A-B:C.D.E(value*unit)`,
//! optionally with a sixth code part (`A-B:C.D.E*F(...)`), and a final `!`
//! line. The payload between the parentheses carries a numeric value and
//! unit when it contains a `*` separator; otherwise it is a textual
//! payload and the record's numeric value is NaN.
//!
//! Lines are tokenized with a bounds-checked `nom` parser; a line that
//! does not match yields an error for that line only.

use crate::constants::Q3DA_MIN_TELEGRAM_LEN;
use crate::error::ObisError;
use crate::record::{ObisCode, ObisRecord, ObisValue};
use nom::{
    bytes::complete::take_while,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt},
    sequence::{delimited, preceded},
    IResult,
};
use serde::Serialize;

/// One decoded Q3DA telegram.
#[derive(Debug, Clone, Serialize)]
pub struct Q3daTelegram {
    /// Identification from the header line, without the leading `/`.
    pub identification: String,
    pub records: Vec<ObisRecord>,
    /// Data lines that failed to tokenize.
    pub skipped_lines: usize,
}

fn code_part(input: &str) -> IResult<&str, u8> {
    map_res(digit1, str::parse)(input)
}

fn obis_line(input: &str) -> IResult<&str, (ObisCode, &str)> {
    let (input, medium) = code_part(input)?;
    let (input, _) = char('-')(input)?;
    let (input, channel) = code_part(input)?;
    let (input, _) = char(':')(input)?;
    let (input, quantity) = code_part(input)?;
    let (input, _) = char('.')(input)?;
    let (input, processing) = code_part(input)?;
    let (input, _) = char('.')(input)?;
    let (input, tariff) = code_part(input)?;
    // Optional billing period part; not part of the public identity
    let (input, _billing) = opt(preceded(char('*'), code_part))(input)?;
    let (input, payload) = delimited(char('('), take_while(|c| c != ')'), char(')'))(input)?;
    Ok((
        input,
        (
            ObisCode::new(medium, channel, quantity, processing, tariff),
            payload,
        ),
    ))
}

/// Parses one `A-B:C.D.E(payload)` data line into an OBIS record.
pub fn parse_line(line: &str) -> Result<ObisRecord, ObisError> {
    let (_, (code, payload)) = all_consuming(obis_line)(line.trim())
        .map_err(|_| ObisError::MalformedLine(line.to_string()))?;

    let (value, unit_text, text) = match payload.split_once('*') {
        Some((value_str, unit)) => {
            let value = value_str
                .trim()
                .parse::<f64>()
                .map_err(|_| ObisError::MalformedLine(line.to_string()))?;
            (value, Some(unit.to_string()), None)
        }
        // No unit separator: textual payload, numeric value undefined
        None => (f64::NAN, None, Some(payload.to_string())),
    };

    Ok(ObisRecord {
        server_id: Vec::new(),
        code,
        status: None,
        value: ObisValue::Float(value),
        unit: None,
        unit_text,
        scaler: None,
        text,
    })
}

/// Decodes one complete telegram body (`/` through `!`).
///
/// Data lines that fail to tokenize are counted and skipped; they do not
/// abort the telegram.
pub fn decode_telegram(frame: &[u8]) -> Result<Q3daTelegram, ObisError> {
    if frame.len() < Q3DA_MIN_TELEGRAM_LEN {
        return Err(ObisError::FrameTooShort {
            min: Q3DA_MIN_TELEGRAM_LEN,
            actual: frame.len(),
        });
    }

    let text = std::str::from_utf8(frame).map_err(|_| ObisError::InvalidEncoding)?;
    let mut lines = text.lines();
    let identification = lines
        .next()
        .map(|line| line.trim_start_matches('/').trim().to_string())
        .unwrap_or_default();

    let mut records = Vec::new();
    let mut skipped_lines = 0;
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }
        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped_lines += 1;
                log::debug!("{e}");
            }
        }
    }

    Ok(Q3daTelegram {
        identification,
        records,
        skipped_lines,
    })
}
