//! # epc-lora-rs - EPC Compression and LoRaWAN Capacity Tooling
//!
//! Offline tooling for sending RFID Electronic Product Codes (EPCs) over
//! LoRaWAN:
//!
//! - Group EPCs by shared prefix and estimate prefix-compressed payload sizes
//! - Compute maximum payload and EPCs per packet for a spreading factor
//! - Compute LoRa time-on-air for a frame
//! - Encode/decode the EPC uplink packet format
//! - Project EPC throughput per day under a 1% duty cycle
//! - Load EPC lists from .txt/.csv/.xlsx and save reports to .xlsx/.json
//!
//! ## Usage
//!
//! ```rust,no_run
//! use epc_lora::{analyze_file, plan_transmission, RadioConfig};
//!
//! let report = analyze_file("epcs.txt", 6).unwrap();
//! println!("{} groups", report.rows.len());
//!
//! let plan = plan_transmission(700, &RadioConfig::default()).unwrap();
//! println!("{} EPCs/day", plan.max_epcs_per_day);
//! ```

pub mod constants;
pub mod epc;
pub mod error;
pub mod logging;
pub mod lora;
pub mod util;

use std::path::{Path, PathBuf};

pub use crate::error::EpcError;
pub use crate::logging::{init_logger, log_info};

pub use epc::{
    load_epcs, render_summary, render_table, save_results, AnalysisReport, AnalysisSummary, Epc,
    EpcGroup, GroupAnalysis, PrefixGrouper,
};
pub use lora::{
    compute_airtime, decode_packet, encode_packet, plan_transmission, render_process_report,
    AirtimeParameters, CodingRate, DecodedPacket, EpcLoRaCalculator, LoRaBandwidth, RadioConfig,
    TransmissionPlan,
};

/// Load EPCs from a file and run the prefix analysis.
///
/// # Arguments
/// * `input` - .txt, .csv or .xlsx file with one EPC per line/row
/// * `min_prefix_length` - grouping threshold in hex characters
///
/// # Returns
/// * `Ok(AnalysisReport)` - groups and report rows
/// * `Err(EpcError)` - the file could not be loaded
pub fn analyze_file<P: AsRef<Path>>(
    input: P,
    min_prefix_length: usize,
) -> Result<AnalysisReport, EpcError> {
    let epcs = load_epcs(input)?;
    PrefixGrouper::new(min_prefix_length).analyze(&epcs)
}

/// Load, analyze and save in one call.
///
/// A failed save does not discard the analysis: the report is returned
/// together with the save result.
///
/// # Arguments
/// * `input` - EPC list file
/// * `output` - .xlsx or .json report path
/// * `min_prefix_length` - grouping threshold in hex characters
pub fn analyze_and_save<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    min_prefix_length: usize,
) -> Result<(AnalysisReport, Result<PathBuf, EpcError>), EpcError> {
    let report = analyze_file(input, min_prefix_length)?;
    let saved = save_results(&report.rows, output);
    Ok((report, saved))
}
