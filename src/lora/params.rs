//! LoRa radio parameters and payload capacity.

use crate::constants::{
    DEFAULT_MAX_PAYLOAD_SIZE, EPC_SIZE_BYTES, MAX_SPREADING_FACTOR, MIN_SPREADING_FACTOR,
    PACKET_HEADER_SIZE,
};
use crate::error::EpcError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Channel bandwidth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoRaBandwidth {
    BW125, // 125 kHz
    BW250, // 250 kHz
    BW500, // 500 kHz
}

impl LoRaBandwidth {
    pub fn khz(self) -> u32 {
        match self {
            LoRaBandwidth::BW125 => 125,
            LoRaBandwidth::BW250 => 250,
            LoRaBandwidth::BW500 => 500,
        }
    }
}

impl TryFrom<u32> for LoRaBandwidth {
    type Error = EpcError;

    fn try_from(khz: u32) -> Result<Self, Self::Error> {
        match khz {
            125 => Ok(LoRaBandwidth::BW125),
            250 => Ok(LoRaBandwidth::BW250),
            500 => Ok(LoRaBandwidth::BW500),
            other => Err(EpcError::InvalidRadioConfig(format!(
                "bandwidth {other} kHz (expected 125, 250 or 500)"
            ))),
        }
    }
}

/// Coding Rate, stored as the code 1-4 used in the airtime formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodingRate {
    CR4_5 = 0x01,
    CR4_6 = 0x02,
    CR4_7 = 0x03,
    CR4_8 = 0x04,
}

impl CodingRate {
    /// Code 1-4
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Denominator of 4/x
    pub fn denominator(self) -> u8 {
        self.code() + 4
    }
}

impl TryFrom<u8> for CodingRate {
    type Error = EpcError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(CodingRate::CR4_5),
            2 => Ok(CodingRate::CR4_6),
            3 => Ok(CodingRate::CR4_7),
            4 => Ok(CodingRate::CR4_8),
            other => Err(EpcError::InvalidRadioConfig(format!(
                "coding rate code {other} (expected 1-4)"
            ))),
        }
    }
}

/// Maximum application payload for a spreading factor.
///
/// Unlisted SFs fall back to 51 bytes.
pub fn max_payload_size(sf: u8) -> usize {
    match sf {
        7 | 8 => 230,
        9 => 123,
        10 | 11 => 59,
        12 => 51,
        _ => DEFAULT_MAX_PAYLOAD_SIZE,
    }
}

/// `(max_payload_size(sf) - header_size) / epc_size`, saturating at zero.
pub fn max_epcs_per_packet(sf: u8, header_size: usize, epc_size: usize) -> usize {
    if epc_size == 0 {
        return 0;
    }
    max_payload_size(sf).saturating_sub(header_size) / epc_size
}

/// Radio configuration for capacity and airtime calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioConfig {
    /// Spreading Factor (7-12)
    pub spreading_factor: u8,

    /// Bandwidth
    pub bandwidth: LoRaBandwidth,

    /// Coding Rate
    pub coding_rate: CodingRate,

    /// Overrides the SF payload lookup when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_size: Option<usize>,
}

impl Default for RadioConfig {
    /// SF12 / 125 kHz / 4/5
    fn default() -> Self {
        Self {
            spreading_factor: 12,
            bandwidth: LoRaBandwidth::BW125,
            coding_rate: CodingRate::CR4_5,
            payload_size: None,
        }
    }
}

impl RadioConfig {
    /// Create a validated configuration.
    pub fn new(
        spreading_factor: u8,
        bandwidth: LoRaBandwidth,
        coding_rate: CodingRate,
    ) -> Result<Self, EpcError> {
        let config = Self {
            spreading_factor,
            bandwidth,
            coding_rate,
            payload_size: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build from plain numbers: SF, bandwidth in kHz and CR code 1-4.
    pub fn from_raw(sf: u8, bw_khz: u32, cr: u8) -> Result<Self, EpcError> {
        Self::new(sf, LoRaBandwidth::try_from(bw_khz)?, CodingRate::try_from(cr)?)
    }

    /// Replace the SF payload lookup with a fixed payload size.
    pub fn with_payload_size(mut self, payload_size: usize) -> Result<Self, EpcError> {
        self.payload_size = Some(payload_size);
        self.validate()?;
        Ok(self)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, EpcError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EpcError::FileNotFound(path.to_path_buf()));
        }
        let config: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks SF range and that at least one EPC fits in a packet.
    pub fn validate(&self) -> Result<(), EpcError> {
        if !(MIN_SPREADING_FACTOR..=MAX_SPREADING_FACTOR).contains(&self.spreading_factor) {
            return Err(EpcError::InvalidRadioConfig(format!(
                "spreading factor {} (expected {MIN_SPREADING_FACTOR}-{MAX_SPREADING_FACTOR})",
                self.spreading_factor
            )));
        }
        if self.max_epcs_per_packet() == 0 {
            return Err(EpcError::InvalidRadioConfig(format!(
                "payload of {} bytes cannot hold a single EPC",
                self.max_payload_size()
            )));
        }
        Ok(())
    }

    pub fn max_payload_size(&self) -> usize {
        self.payload_size
            .unwrap_or_else(|| max_payload_size(self.spreading_factor))
    }

    pub fn max_epcs_per_packet(&self) -> usize {
        self.max_payload_size().saturating_sub(PACKET_HEADER_SIZE) / EPC_SIZE_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_lookup() {
        assert_eq!(max_payload_size(7), 230);
        assert_eq!(max_payload_size(9), 123);
        assert_eq!(max_payload_size(11), 59);
        assert_eq!(max_payload_size(12), 51);
        assert_eq!(max_payload_size(99), 51);
    }

    #[test]
    fn test_max_epcs_per_packet() {
        assert_eq!(max_epcs_per_packet(12, 4, 12), 3);
        assert_eq!(max_epcs_per_packet(7, 4, 12), 18);
        assert_eq!(max_epcs_per_packet(10, 4, 12), 4);
    }

    #[test]
    fn test_config_validation() {
        assert!(RadioConfig::from_raw(6, 125, 1).is_err());
        assert!(RadioConfig::from_raw(13, 125, 1).is_err());
        assert!(RadioConfig::from_raw(7, 200, 1).is_err());
        assert!(RadioConfig::from_raw(7, 125, 5).is_err());
        let cfg = RadioConfig::from_raw(9, 250, 4).unwrap();
        assert_eq!(cfg.bandwidth.khz(), 250);
        assert_eq!(cfg.coding_rate.denominator(), 8);
        assert_eq!(cfg.max_epcs_per_packet(), 9);
    }

    #[test]
    fn test_payload_override() {
        let cfg = RadioConfig::default().with_payload_size(100).unwrap();
        assert_eq!(cfg.max_payload_size(), 100);
        assert_eq!(cfg.max_epcs_per_packet(), 8);
        assert!(RadioConfig::default().with_payload_size(15).is_err());
    }

    #[test]
    fn test_default_config() {
        let cfg = RadioConfig::default();
        assert_eq!(cfg.spreading_factor, 12);
        assert_eq!(cfg.max_payload_size(), 51);
        assert_eq!(cfg.max_epcs_per_packet(), 3);
        assert!(cfg.validate().is_ok());
    }
}
