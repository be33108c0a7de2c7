//! Transmission planning under a 1% daily duty cycle.
//!
//! Every frame is costed as if it carried the configured maximum payload,
//! whatever the number of EPCs it actually holds.

use super::airtime::AirtimeParameters;
use super::params::RadioConfig;
use crate::constants::DAILY_AIRTIME_BUDGET_MS;
use crate::error::EpcError;
use log::info;
use serde::{Deserialize, Serialize};

/// Plan for sending one batch of EPCs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionPlan {
    pub total_epcs: usize,
    pub frames_needed: usize,
    pub epcs_per_frame: usize,
    pub frame_duration_ms: f64,
    pub batch_duration_ms: f64,
    pub batch_duration_s: f64,
    pub max_batches_per_day: u64,
    /// `max_batches_per_day * total_epcs`
    pub max_epcs_per_day: u64,
    /// Airtime of one full-size frame
    pub parameters: AirtimeParameters,
}

/// Plan the transmission of `total_epcs` EPCs.
///
/// # Errors
/// * `EmptyBatch` - `total_epcs` is zero
/// * `InvalidRadioConfig` - `config` fails validation
pub fn plan_transmission(total_epcs: usize, config: &RadioConfig) -> Result<TransmissionPlan, EpcError> {
    config.validate()?;
    if total_epcs == 0 {
        return Err(EpcError::EmptyBatch);
    }

    let epcs_per_frame = config.max_epcs_per_packet();
    let frames_needed = total_epcs.div_ceil(epcs_per_frame);

    let parameters = config.airtime(config.max_payload_size());
    let frame_duration_ms = parameters.frame_duration_ms;
    let batch_duration_ms = frames_needed as f64 * frame_duration_ms;

    let max_batches_per_day = (DAILY_AIRTIME_BUDGET_MS / batch_duration_ms).floor() as u64;
    // Scales by the batch size, not by frames * capacity.
    let max_epcs_per_day = max_batches_per_day * total_epcs as u64;

    info!(
        "Plan: {total_epcs} EPCs in {frames_needed} frames, {batch_duration_ms:.2} ms per batch, \
         {max_epcs_per_day} EPCs/day"
    );

    Ok(TransmissionPlan {
        total_epcs,
        frames_needed,
        epcs_per_frame,
        frame_duration_ms,
        batch_duration_ms,
        batch_duration_s: batch_duration_ms / 1000.0,
        max_batches_per_day,
        max_epcs_per_day,
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sf12_seven_epcs() {
        let plan = plan_transmission(7, &RadioConfig::default()).unwrap();
        assert_eq!(plan.epcs_per_frame, 3);
        assert_eq!(plan.frames_needed, 3);
        // 68.25 symbols * 32.768 ms
        let frame = 68.25 * 32.768;
        assert!((plan.frame_duration_ms - frame).abs() < 1e-6);
        assert!((plan.batch_duration_ms - 3.0 * frame).abs() < 1e-6);
        // 864000 / 6709.248 = 128.77...
        assert_eq!(plan.max_batches_per_day, 128);
        assert_eq!(plan.max_epcs_per_day, 128 * 7);
    }

    #[test]
    fn test_frames_round_up() {
        let cfg = RadioConfig::from_raw(7, 125, 1).unwrap();
        assert_eq!(plan_transmission(18, &cfg).unwrap().frames_needed, 1);
        assert_eq!(plan_transmission(19, &cfg).unwrap().frames_needed, 2);
    }

    #[test]
    fn test_frame_cost_ignores_fill() {
        let cfg = RadioConfig::default();
        let one = plan_transmission(1, &cfg).unwrap();
        let three = plan_transmission(3, &cfg).unwrap();
        assert_eq!(one.frame_duration_ms, three.frame_duration_ms);
        assert_eq!(one.batch_duration_ms, three.batch_duration_ms);
    }

    #[test]
    fn test_zero_epcs() {
        assert!(matches!(
            plan_transmission(0, &RadioConfig::default()),
            Err(EpcError::EmptyBatch)
        ));
    }
}
