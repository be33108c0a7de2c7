//! # EPC / LoRa Error Handling
//!
//! This module defines the EpcError enum, which represents the different error
//! types that can occur in the epc-lora-rs crate.

use std::path::PathBuf;
use thiserror::Error;

/// Represents the different error types that can occur in the crate.
#[derive(Debug, Error)]
pub enum EpcError {
    /// Indicates the input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Indicates an input extension the loader cannot handle.
    #[error("Unsupported file format: {0}. Use .txt, .csv, or .xlsx")]
    UnsupportedFormat(String),

    /// Indicates an output extension the report writer cannot handle.
    #[error("Unsupported output format: {0}. Use .xlsx or .json")]
    UnsupportedOutputFormat(String),

    /// Indicates the input was parsed but held no valid EPC.
    #[error("No valid EPCs found")]
    NoValidEntries,

    /// Indicates a single malformed EPC entry.
    #[error("Invalid EPC at {location}: {value}")]
    InvalidEntry { location: String, value: String },

    /// Indicates more EPCs than fit in one packet.
    #[error("Too many EPCs for one packet: {requested} (max {max})")]
    CapacityExceeded { requested: usize, max: usize },

    /// Indicates a packet buffer that cannot be decoded.
    #[error("Malformed packet: {0}")]
    Malformed(String),

    /// Indicates the results could not be persisted.
    #[error("Failed to write output: {0}")]
    OutputWriteFailure(String),

    /// Indicates radio parameters outside the supported range.
    #[error("Invalid radio configuration: {0}")]
    InvalidRadioConfig(String),

    /// Indicates a transmission plan was requested for zero EPCs.
    #[error("Cannot plan a transmission of zero EPCs")]
    EmptyBatch,

    /// Indicates a spreadsheet could not be read.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Wraps an I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wraps a JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
