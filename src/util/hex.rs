//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used by the EPC type and the packet codec, plus dump helpers
//! for logging payloads.
//!
//! ## Usage
//!
//! ```rust
//! use epc_lora::util::hex::{encode_hex_upper, decode_hex, format_hex_compact};
//!
//! let data = [0xAA, 0xBB, 0x01];
//! assert_eq!(encode_hex_upper(&data), "AABB01");
//! assert_eq!(decode_hex("aabb01").unwrap(), data);
//! assert_eq!(format_hex_compact(&data), "AA BB 01");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Invalid hex character: {0}")]
    InvalidCharacter(char),

    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decode error: {0}")]
    DecodeError(String),
}

impl From<hex::FromHexError> for HexError {
    fn from(err: hex::FromHexError) -> Self {
        match err {
            hex::FromHexError::InvalidHexCharacter { c, .. } => HexError::InvalidCharacter(c),
            hex::FromHexError::OddLength => HexError::DecodeError(err.to_string()),
            hex::FromHexError::InvalidStringLength => HexError::DecodeError(err.to_string()),
        }
    }
}

/// Encode bytes to uppercase hex string
///
/// EPCs are always rendered upper-case.
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }
    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    Ok(hex::decode(&cleaned)?)
}

/// True when every character is a hex digit (either case)
pub fn is_hex_string(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "AA BB 01" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
