//! Integration tests for the LoRa capacity model, packet codec and planner

use epc_lora::constants::{EPC_SIZE_BYTES, PACKET_HEADER_SIZE};
use epc_lora::lora::{max_epcs_per_packet, max_payload_size};
use epc_lora::{
    compute_airtime, decode_packet, encode_packet, plan_transmission, Epc, EpcError,
    EpcLoRaCalculator, RadioConfig,
};
use proptest::prelude::*;

#[test]
fn test_max_payload_size_table() {
    assert_eq!(max_payload_size(7), 230);
    assert_eq!(max_payload_size(8), 230);
    assert_eq!(max_payload_size(10), 59);
    assert_eq!(max_payload_size(12), 51);
    assert_eq!(max_payload_size(99), 51);
}

#[test]
fn test_max_epcs_per_packet_sf12() {
    assert_eq!(max_epcs_per_packet(12, PACKET_HEADER_SIZE, EPC_SIZE_BYTES), 3);
    assert_eq!(RadioConfig::default().max_epcs_per_packet(), 3);
}

#[test]
fn test_packet_roundtrip_packet_id_5() {
    let epcs: Vec<Epc> = [
        "aaaaaa000000000000000001",
        "BBBBBB000000000000000002",
        "cccccc000000000000000003",
    ]
    .iter()
    .map(|s| Epc::parse(s).unwrap())
    .collect();

    let payload = encode_packet(&epcs, 5, 3).unwrap();
    assert_eq!(payload.len(), 4 + 3 * 12);

    let decoded = decode_packet(&payload).unwrap();
    assert_eq!(decoded.packet_id, 5);
    assert_eq!(decoded.epc_count, 3);
    let strings: Vec<&str> = decoded.epcs.iter().map(|e| e.as_str()).collect();
    assert_eq!(
        strings,
        vec![
            "AAAAAA000000000000000001",
            "BBBBBB000000000000000002",
            "CCCCCC000000000000000003"
        ]
    );
}

#[test]
fn test_encode_over_capacity() {
    let epcs: Vec<Epc> = (0..4)
        .map(|i| Epc::parse(&format!("{i:024X}")).unwrap())
        .collect();
    let err = encode_packet(&epcs, 0, RadioConfig::default().max_epcs_per_packet()).unwrap_err();
    assert!(matches!(err, EpcError::CapacityExceeded { requested: 4, max: 3 }));
}

#[test]
fn test_decode_two_byte_buffer() {
    assert!(matches!(decode_packet(&[0x00, 0x01]), Err(EpcError::Malformed(_))));
}

#[test]
fn test_plan_reference_700_epcs_sf7() {
    let cfg = RadioConfig::from_raw(7, 125, 1).unwrap();
    let plan = plan_transmission(700, &cfg).unwrap();
    // 230 - 4 = 226 / 12 = 18 per frame
    assert_eq!(plan.epcs_per_frame, 18);
    assert_eq!(plan.frames_needed, 39);

    let frame = compute_airtime(230, 7, 125, 1).frame_duration_ms;
    assert!((plan.batch_duration_ms - 39.0 * frame).abs() < 1e-6);
    assert_eq!(
        plan.max_batches_per_day,
        (864_000.0 / (39.0 * frame)).floor() as u64
    );
    assert_eq!(plan.max_epcs_per_day, plan.max_batches_per_day * 700);
}

#[test]
fn test_calculator_from_json_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("radio.json");
    std::fs::write(
        &path,
        r#"{"spreading_factor": 9, "bandwidth": "BW250", "coding_rate": "CR4_6"}"#,
    )
    .unwrap();

    let cfg = RadioConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.max_payload_size(), 123);
    let calc = EpcLoRaCalculator::new(cfg).unwrap();
    let report = calc.simulate(25).unwrap();
    // 119 / 12 = 9 per packet
    assert_eq!(report.payloads.len(), 3);
    assert_eq!(report.plan.frames_needed, 3);
}

#[test]
fn test_invalid_json_config_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("radio.json");
    std::fs::write(
        &path,
        r#"{"spreading_factor": 4, "bandwidth": "BW125", "coding_rate": "CR4_5"}"#,
    )
    .unwrap();
    assert!(matches!(
        RadioConfig::from_json_file(&path),
        Err(EpcError::InvalidRadioConfig(_))
    ));
}

proptest! {
    #[test]
    fn prop_airtime_monotonic(
        sf in 7u8..=12,
        bw in prop::sample::select(vec![125u32, 250, 500]),
        cr in 1u8..=4,
        payload in 0usize..255,
    ) {
        let a = compute_airtime(payload, sf, bw, cr).frame_duration_ms;
        let b = compute_airtime(payload + 1, sf, bw, cr).frame_duration_ms;
        prop_assert!(b >= a);
    }

    #[test]
    fn prop_single_epc_roundtrip(hex in "[0-9A-Fa-f]{24}", id in 0usize..1000) {
        let epc = Epc::parse(&hex).unwrap();
        let decoded = decode_packet(&encode_packet(&[epc.clone()], id, 1).unwrap()).unwrap();
        prop_assert_eq!(&decoded.epcs, &vec![epc]);
        prop_assert_eq!(decoded.epc_count, 1);
        prop_assert_eq!(decoded.packet_id as usize, id % 256);
        prop_assert_eq!(decoded.epcs[0].as_str(), hex.to_ascii_uppercase());
    }
}
