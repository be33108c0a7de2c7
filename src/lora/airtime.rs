//! LoRa time-on-air calculation.
//!
//! ```text
//! T_sym     = 2^SF / BW
//! T_pream   = (8 + 4.25) * T_sym
//! PL_H      = 1 if SF >= 11 else 0
//! N_payload = 8 + max((8*PL - 4*SF + 28 + 16 - 20*PL_H) / (4*(SF - 2)), 0) * (CR + 4)
//! T_frame   = T_pream + N_payload * T_sym
//! ```
//!
//! `N_payload` is kept fractional; nothing is rounded mid-calculation.

use super::params::RadioConfig;
use crate::constants::{PAYLOAD_BASE_SYMBOLS, PREAMBLE_SYMBOLS};
use serde::{Deserialize, Serialize};

/// Airtime breakdown for one frame. Durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirtimeParameters {
    pub symbol_duration_ms: f64,
    pub preamble_duration_ms: f64,
    pub payload_symbol_count: f64,
    pub payload_duration_ms: f64,
    pub frame_duration_ms: f64,
}

/// Compute time-on-air for `payload_bytes`.
///
/// `sf` must be in 7..=12 and `cr` in 1..=4; `sf == 2` divides by zero.
pub fn compute_airtime(payload_bytes: usize, sf: u8, bw_khz: u32, cr: u8) -> AirtimeParameters {
    let sf_f = sf as f64;
    let symbol_s = 2f64.powi(sf as i32) / (bw_khz as f64 * 1000.0);
    let preamble_s = PREAMBLE_SYMBOLS * symbol_s;

    // SF11/SF12 drop 20 bits from the numerator
    let header_flag = if sf >= 11 { 1.0 } else { 0.0 };
    let numerator = 8.0 * payload_bytes as f64 - 4.0 * sf_f + 28.0 + 16.0 - 20.0 * header_flag;
    let symbols_term = numerator / (4.0 * (sf_f - 2.0));
    let payload_symbols = PAYLOAD_BASE_SYMBOLS + symbols_term.max(0.0) * (cr as f64 + 4.0);

    let payload_s = payload_symbols * symbol_s;
    let frame_s = preamble_s + payload_s;

    AirtimeParameters {
        symbol_duration_ms: symbol_s * 1000.0,
        preamble_duration_ms: preamble_s * 1000.0,
        payload_symbol_count: payload_symbols,
        payload_duration_ms: payload_s * 1000.0,
        frame_duration_ms: frame_s * 1000.0,
    }
}

impl RadioConfig {
    /// Airtime of a `payload_bytes` frame with this configuration.
    pub fn airtime(&self, payload_bytes: usize) -> AirtimeParameters {
        compute_airtime(
            payload_bytes,
            self.spreading_factor,
            self.bandwidth.khz(),
            self.coding_rate.code(),
        )
    }
}
