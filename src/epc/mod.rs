//! RFID Electronic Product Codes
//!
//! An EPC is a 12-byte tag identifier, handled in its canonical form of 24
//! upper-case hex characters. This module provides the validated [`Epc`] type,
//! the prefix grouping engine, file loading and report output.

pub mod grouping;
pub mod loader;
pub mod report;

use crate::constants::{EPC_HEX_LEN, EPC_SIZE_BYTES};
use crate::error::EpcError;
use crate::util::hex::{encode_hex_upper, is_hex_string};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use grouping::{
    billed_prefix_len, positional_match_count, unanimous_column_count, AnalysisReport,
    AnalysisSummary, EpcGroup, GroupAnalysis, PrefixGrouper,
};
pub use loader::{load_epcs, source_for_path, EpcSource, TextSource, XlsxSource};
pub use report::{render_summary, render_table, save_results};

/// A validated EPC.
///
/// Holds the upper-case hex form together with the raw bytes so that neither
/// grouping (character based) nor packet encoding (byte based) re-parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Epc {
    hex: String,
    raw: [u8; EPC_SIZE_BYTES],
}

impl Epc {
    /// Parse an EPC from text.
    ///
    /// Surrounding whitespace is trimmed; the remainder must be exactly 24 hex
    /// digits in either case.
    pub fn parse(input: &str) -> Result<Self, EpcError> {
        let trimmed = input.trim();
        if trimmed.len() != EPC_HEX_LEN || !is_hex_string(trimmed) {
            return Err(EpcError::InvalidEntry {
                location: "input".to_string(),
                value: trimmed.to_string(),
            });
        }

        let hex = trimmed.to_ascii_uppercase();
        let mut raw = [0u8; EPC_SIZE_BYTES];
        hex::decode_to_slice(&hex, &mut raw).map_err(|_| EpcError::InvalidEntry {
            location: "input".to_string(),
            value: trimmed.to_string(),
        })?;

        Ok(Self { hex, raw })
    }

    /// Build an EPC from its 12 raw bytes.
    pub fn from_bytes(raw: [u8; EPC_SIZE_BYTES]) -> Self {
        Self {
            hex: encode_hex_upper(&raw),
            raw,
        }
    }

    /// Generate a random EPC.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut raw = [0u8; EPC_SIZE_BYTES];
        rng.fill(&mut raw[..]);
        Self::from_bytes(raw)
    }

    /// Canonical upper-case hex form.
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Raw 12-byte form.
    pub fn raw(&self) -> &[u8; EPC_SIZE_BYTES] {
        &self.raw
    }
}

/// Generate `n` random EPCs with the thread-local RNG.
pub fn generate_random_epcs(n: usize) -> Vec<Epc> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| Epc::random(&mut rng)).collect()
}

impl FromStr for Epc {
    type Err = EpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Epc {
    type Error = EpcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Epc> for String {
    fn from(epc: Epc) -> Self {
        epc.hex
    }
}

impl AsRef<str> for Epc {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for Epc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}
