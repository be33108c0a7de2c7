//! LoRa capacity model
//!
//! Radio parameters, time-on-air, the EPC packet codec and the daily
//! transmission planner.

pub mod airtime;
pub mod calculator;
pub mod packet;
pub mod params;
pub mod planner;

pub use airtime::{compute_airtime, AirtimeParameters};
pub use calculator::{render_process_report, EpcLoRaCalculator, PayloadDetail, ProcessReport};
pub use packet::{decode_packet, encode_packet, encode_packet_at, packetize, DecodedPacket};
pub use params::{max_epcs_per_packet, max_payload_size, CodingRate, LoRaBandwidth, RadioConfig};
pub use planner::{plan_transmission, TransmissionPlan};
