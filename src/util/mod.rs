//! # Utility Modules
//!
//! Common helpers used throughout the epc-lora-rs crate.

pub mod hex;

pub use hex::{decode_hex, encode_hex_upper, format_hex_compact, is_hex_string, HexError};
