//! EPC / LoRaWAN Constants
//!
//! This module defines the constants shared by the EPC grouping engine, the
//! packet codec and the LoRaWAN capacity model.

/// EPC length in hex characters
pub const EPC_HEX_LEN: usize = 24;

/// EPC length in raw bytes
pub const EPC_SIZE_BYTES: usize = 12;

/// Packet header size: packet_id(1) + epc_count(1) + timestamp(2)
pub const PACKET_HEADER_SIZE: usize = 4;

/// Default minimum number of matching hex characters for two EPCs to share a group
pub const DEFAULT_MIN_PREFIX_LENGTH: usize = 6;

/// Fixed overhead of a compressed group: header byte + prefix-length byte
pub const GROUP_OVERHEAD_BYTES: usize = 2;

/// Reference frame size for SF7 capacity column
pub const SF7_REFERENCE_FRAME_BYTES: i64 = 51;

/// Reference frame size for SF12 capacity column
pub const SF12_REFERENCE_FRAME_BYTES: i64 = 11;

// ----------------------------------------------------------------------------
// Singleton group row. These are fixed report values, not derived from the
// formulas used for multi-member groups; changing them changes the report.
// ----------------------------------------------------------------------------

/// Suffix bytes reported for a singleton group
pub const SINGLETON_SUFFIX_BYTES: usize = 12;

/// Total payload bytes reported for a singleton group (fixed value)
pub const SINGLETON_TOTAL_PAYLOAD_BYTES: usize = 14;

/// EPCs per 51-byte SF7 frame reported for a singleton group (fixed value)
pub const SINGLETON_EPCS_SF7: i64 = 3;

/// EPCs per 11-byte SF12 frame reported for a singleton group (fixed value)
pub const SINGLETON_EPCS_SF12: i64 = 0;

// ----------------------------------------------------------------------------
// LoRa airtime
// ----------------------------------------------------------------------------

/// Preamble length in symbols (8 programmed + 4.25 sync)
pub const PREAMBLE_SYMBOLS: f64 = 8.0 + 4.25;

/// Fixed payload symbol count added to every frame
pub const PAYLOAD_BASE_SYMBOLS: f64 = 8.0;

/// Lowest spreading factor the capacity model supports
pub const MIN_SPREADING_FACTOR: u8 = 7;

/// Highest spreading factor the capacity model supports
pub const MAX_SPREADING_FACTOR: u8 = 12;

/// Max payload used for any SF missing from the lookup table
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 51;

/// Allowed airtime per 24 h at 1% duty cycle, in milliseconds
pub const DAILY_AIRTIME_BUDGET_MS: f64 = 864_000.0;

/// Report column headers, in output order
pub const REPORT_COLUMNS: [&str; 9] = [
    "Group_ID",
    "Prefix",
    "Prefix_Bytes",
    "Suffix_Bytes",
    "Suffix_Count",
    "Total_Payload_Bytes",
    "EPCs_SF7_51B",
    "EPCs_SF12_11B",
    "Compression_%",
];
