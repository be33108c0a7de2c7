//! EPC uplink packet codec.
//!
//! # Packet Format
//!
//! ```text
//! +----------------+---------------+------------------+------------------+
//! | packet_id (1)  | epc_count (1) | timestamp (2 BE) | EPC * epc_count  |
//! |                |               | unix secs & FFFF | (12 bytes each)  |
//! +----------------+---------------+------------------+------------------+
//! ```

use crate::constants::{EPC_SIZE_BYTES, PACKET_HEADER_SIZE};
use crate::epc::Epc;
use crate::error::EpcError;
use serde::{Deserialize, Serialize};

/// Decoded packet contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedPacket {
    pub packet_id: u8,
    /// Count announced in the header
    pub epc_count: u8,
    /// Lower 16 bits of the Unix time at encoding
    pub timestamp: u16,
    /// EPCs actually present; may be fewer than `epc_count`
    pub epcs: Vec<Epc>,
}

/// Lower 16 bits of the current Unix time in seconds.
pub fn current_timestamp() -> u16 {
    (chrono::Utc::now().timestamp() & 0xFFFF) as u16
}

/// Build the 4-byte header.
pub fn encode_header(packet_id: usize, epc_count: usize, timestamp: u16) -> [u8; PACKET_HEADER_SIZE] {
    let ts = timestamp.to_be_bytes();
    [(packet_id & 0xFF) as u8, (epc_count & 0xFF) as u8, ts[0], ts[1]]
}

/// Encode `epcs` into one packet stamped with the current time.
///
/// # Errors
/// * `CapacityExceeded` - more than `max_epcs_per_packet` EPCs
pub fn encode_packet(
    epcs: &[Epc],
    packet_id: usize,
    max_epcs_per_packet: usize,
) -> Result<Vec<u8>, EpcError> {
    encode_packet_at(epcs, packet_id, max_epcs_per_packet, current_timestamp())
}

/// Encode `epcs` into one packet with an explicit timestamp.
pub fn encode_packet_at(
    epcs: &[Epc],
    packet_id: usize,
    max_epcs_per_packet: usize,
    timestamp: u16,
) -> Result<Vec<u8>, EpcError> {
    if epcs.len() > max_epcs_per_packet {
        return Err(EpcError::CapacityExceeded {
            requested: epcs.len(),
            max: max_epcs_per_packet,
        });
    }

    let mut payload = Vec::with_capacity(PACKET_HEADER_SIZE + epcs.len() * EPC_SIZE_BYTES);
    payload.extend_from_slice(&encode_header(packet_id, epcs.len(), timestamp));
    for epc in epcs {
        payload.extend_from_slice(epc.raw());
    }
    Ok(payload)
}

/// Decode a packet.
///
/// Reads up to `epc_count` whole 12-byte bodies. A short body is not an
/// error: decoding stops at the last complete EPC.
///
/// # Errors
/// * `Malformed` - fewer than 4 bytes
pub fn decode_packet(payload: &[u8]) -> Result<DecodedPacket, EpcError> {
    if payload.len() < PACKET_HEADER_SIZE {
        return Err(EpcError::Malformed(format!(
            "payload too short: {} bytes (header is {PACKET_HEADER_SIZE})",
            payload.len()
        )));
    }

    let packet_id = payload[0];
    let epc_count = payload[1];
    let timestamp = u16::from_be_bytes([payload[2], payload[3]]);

    let epcs = payload[PACKET_HEADER_SIZE..]
        .chunks_exact(EPC_SIZE_BYTES)
        .take(epc_count as usize)
        .map(|chunk| {
            let mut raw = [0u8; EPC_SIZE_BYTES];
            raw.copy_from_slice(chunk);
            Epc::from_bytes(raw)
        })
        .collect();

    Ok(DecodedPacket {
        packet_id,
        epc_count,
        timestamp,
        epcs,
    })
}

/// Split `epcs` into consecutive packets of at most `max_epcs_per_packet`,
/// numbered from 0.
pub fn packetize(epcs: &[Epc], max_epcs_per_packet: usize) -> Result<Vec<Vec<u8>>, EpcError> {
    if max_epcs_per_packet == 0 {
        return Err(EpcError::CapacityExceeded {
            requested: epcs.len(),
            max: 0,
        });
    }
    let timestamp = current_timestamp();
    epcs.chunks(max_epcs_per_packet)
        .enumerate()
        .map(|(id, chunk)| encode_packet_at(chunk, id, max_epcs_per_packet, timestamp))
        .collect()
}
