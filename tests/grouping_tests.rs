//! Integration tests for the prefix grouping engine

use epc_lora::epc::{billed_prefix_len, positional_match_count};
use epc_lora::{Epc, GroupAnalysis, PrefixGrouper};
use proptest::prelude::*;

fn epcs(list: &[&str]) -> Vec<Epc> {
    list.iter().map(|s| Epc::parse(s).unwrap()).collect()
}

#[test]
fn test_last_digit_variants_bill_unanimous_columns() {
    // All three agree on 23 columns; the billed prefix is 23 characters.
    let input = epcs(&[
        "AAAAAA000000000000000001",
        "AAAAAA000000000000000002",
        "AAAAAA000000000000000003",
    ]);
    let report = PrefixGrouper::default().analyze(&input).unwrap();
    assert_eq!(report.groups.len(), 1);

    let row = &report.rows[0];
    assert_eq!(row.prefix, "AAAAAA00000000000000000");
    assert_eq!(row.prefix_bytes, 11);
    assert_eq!(row.suffix_bytes, 0);
    assert_eq!(row.total_payload_bytes, 13);
    assert!(row.total_payload_bytes < 12 * row.suffix_count);
    assert_eq!(row.epcs_sf7_51b, 0);
    assert_eq!(row.compression_pct, 63.9);
}

#[test]
fn test_grouping_uses_positional_count_not_prefix() {
    // First character differs, but 23 positions match: still grouped.
    let input = epcs(&["1BCDEF000000000000000000", "2BCDEF000000000000000000"]);
    let groups = PrefixGrouper::default().group(&input);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    // Billed prefix is taken from the base, length from unanimous columns.
    assert_eq!(groups[0].prefix, "1BCDEF00000000000000000");
}

#[test]
fn test_match_against_base_only() {
    // B matches A on 6 positions; C matches B but not A.
    let a = "AAAAAA111111111111111111";
    let b = "AAAAAA222222222222222222";
    let c = "BBBBBB222222222222222222";
    assert!(positional_match_count(a, b) >= 6);
    assert!(positional_match_count(b, c) >= 6);
    assert!(positional_match_count(a, c) < 6);

    let groups = PrefixGrouper::default().group(&epcs(&[a, b, c]));
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].members.len(), 2);
    assert_eq!(groups[1].members[0].as_str(), c);
    assert!(groups[1].is_singleton());
}

#[test]
fn test_min_prefix_length_threshold() {
    let input = epcs(&["AAAAAA111111111111111111", "AAAAAA222222222222222222"]);
    assert_eq!(PrefixGrouper::new(6).group(&input).len(), 1);
    assert_eq!(PrefixGrouper::new(7).group(&input).len(), 2);
}

#[test]
fn test_odd_prefix_length_rounding() {
    let input = epcs(&["AAAAAAA11111111111111111", "AAAAAAA22222222222222222"]);
    let report = PrefixGrouper::default().analyze(&input).unwrap();
    let row = &report.rows[0];
    assert_eq!(row.prefix.len(), 7);
    assert_eq!(row.prefix_bytes, 3);
    assert_eq!(row.suffix_bytes, 8);
    assert_eq!(row.total_payload_bytes, 2 + 3 + 2 * 8);
}

fn epc_strategy() -> impl Strategy<Value = Epc> {
    "[0-9A-Fa-f]{24}".prop_map(|s| Epc::parse(&s).unwrap())
}

proptest! {
    #[test]
    fn prop_grouping_is_partition(input in prop::collection::vec(epc_strategy(), 1..40)) {
        let groups = PrefixGrouper::default().group(&input);

        let total: usize = groups.iter().map(|g| g.len()).sum();
        prop_assert_eq!(total, input.len());

        let mut seen: Vec<Epc> = groups.iter().flat_map(|g| g.members.clone()).collect();
        let mut expected = input.clone();
        seen.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        expected.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        prop_assert_eq!(seen, expected);

        for (i, g) in groups.iter().enumerate() {
            prop_assert_eq!(g.id, i + 1);
        }
    }

    #[test]
    fn prop_group_rows_follow_invariants(input in prop::collection::vec(epc_strategy(), 1..40)) {
        let report = PrefixGrouper::default().analyze(&input).unwrap();
        for (group, row) in report.groups.iter().zip(report.rows.iter()) {
            if group.is_singleton() {
                prop_assert_eq!(row.prefix.as_str(), "");
                prop_assert_eq!(row.total_payload_bytes, 14);
                prop_assert_eq!(row.epcs_sf7_51b, 3);
                prop_assert_eq!(row.epcs_sf12_11b, 0);
                prop_assert_eq!(row.compression_pct, 0.0);
            } else {
                let len = billed_prefix_len(&group.members, 6);
                prop_assert!(len >= 6 && len <= 24);
                prop_assert_eq!(row.prefix.len(), len);
                prop_assert!(group.members[0].as_str().starts_with(&row.prefix));
                prop_assert_eq!(row.clone(), GroupAnalysis::from_group(group));
            }
        }
    }
}
