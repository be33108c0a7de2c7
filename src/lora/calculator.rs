//! End-to-end EPC uplink calculation.
//!
//! Packs a list of EPCs into packets, costs each packet at its real length,
//! decodes every packet back and attaches the batch transmission plan.

use super::airtime::AirtimeParameters;
use super::packet::{decode_packet, packetize, DecodedPacket};
use super::params::RadioConfig;
use super::planner::{plan_transmission, TransmissionPlan};
use crate::epc::{generate_random_epcs, Epc};
use crate::error::EpcError;
use crate::util::hex::{encode_hex_upper, format_hex_compact};
use log::{debug, info};
use std::fmt::Write as _;

/// One encoded packet and its airtime
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadDetail {
    pub payload: Vec<u8>,
    pub epcs: Vec<Epc>,
    pub decoded: DecodedPacket,
    pub airtime: AirtimeParameters,
}

/// Result of [`EpcLoRaCalculator::process_epcs`]
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessReport {
    pub epcs: Vec<Epc>,
    pub payloads: Vec<PayloadDetail>,
    pub plan: TransmissionPlan,
}

impl ProcessReport {
    /// Sum of per-packet airtime at actual payload length.
    pub fn actual_airtime_ms(&self) -> f64 {
        self.payloads.iter().map(|p| p.airtime.frame_duration_ms).sum()
    }
}

/// Render the input EPCs followed by one block per payload: hex dump, decoded
/// header and EPCs, per-frame capacity and the airtime breakdown.
pub fn render_process_report(report: &ProcessReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "EPCs ({}):", report.epcs.len());
    for epc in &report.epcs {
        let _ = writeln!(out, "  {epc}");
    }

    for (i, detail) in report.payloads.iter().enumerate() {
        let p = &detail.airtime;
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Payload {}: {} ({} bytes)",
            i + 1,
            encode_hex_upper(&detail.payload),
            detail.payload.len()
        );
        let _ = writeln!(
            out,
            "  Packet ID: {}, EPCs: {}",
            detail.decoded.packet_id, detail.decoded.epc_count
        );
        for epc in &detail.decoded.epcs {
            let _ = writeln!(out, "    {epc}");
        }
        let _ = writeln!(out, "  EPCs per frame: {}", report.plan.epcs_per_frame);
        let _ = writeln!(out, "  T_sym: {:.2} ms", p.symbol_duration_ms);
        let _ = writeln!(out, "  T_pream: {:.2} ms", p.preamble_duration_ms);
        let _ = writeln!(out, "  N_payload: {:.0}", p.payload_symbol_count);
        let _ = writeln!(out, "  T_payload: {:.2} ms", p.payload_duration_ms);
        let _ = write!(out, "  T_frame: {:.2} ms", p.frame_duration_ms);
    }
    out
}

/// Calculator bound to one radio configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpcLoRaCalculator {
    config: RadioConfig,
}

impl Default for EpcLoRaCalculator {
    fn default() -> Self {
        Self {
            config: RadioConfig::default(),
        }
    }
}

impl EpcLoRaCalculator {
    pub fn new(config: RadioConfig) -> Result<Self, EpcError> {
        config.validate()?;
        info!(
            "LoRa config: SF{} BW{} kHz CR 4/{}, max payload {} B, {} EPCs per frame",
            config.spreading_factor,
            config.bandwidth.khz(),
            config.coding_rate.denominator(),
            config.max_payload_size(),
            config.max_epcs_per_packet()
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    /// Packetize, cost and decode `epcs`, then plan the batch.
    pub fn process_epcs(&self, epcs: &[Epc]) -> Result<ProcessReport, EpcError> {
        let per_packet = self.config.max_epcs_per_packet();
        let packets = packetize(epcs, per_packet)?;

        let mut payloads = Vec::with_capacity(packets.len());
        for (payload, chunk) in packets.into_iter().zip(epcs.chunks(per_packet)) {
            let airtime = self.config.airtime(payload.len());
            let decoded = decode_packet(&payload)?;
            debug!(
                "Packet {}: {} EPCs, {} B [{}], T_frame {:.2} ms",
                decoded.packet_id,
                decoded.epc_count,
                payload.len(),
                format_hex_compact(&payload),
                airtime.frame_duration_ms
            );
            payloads.push(PayloadDetail {
                payload,
                epcs: chunk.to_vec(),
                decoded,
                airtime,
            });
        }

        let plan = plan_transmission(epcs.len(), &self.config)?;
        Ok(ProcessReport {
            epcs: epcs.to_vec(),
            payloads,
            plan,
        })
    }

    /// Generate `count` random EPCs and process them.
    pub fn simulate(&self, count: usize) -> Result<ProcessReport, EpcError> {
        self.process_epcs(&generate_random_epcs(count))
    }
}
