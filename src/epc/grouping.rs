//! Prefix Grouping Engine
//!
//! Partitions an ordered list of EPCs into groups that can share a common
//! prefix on the air, then estimates the size of a prefix-compressed payload
//! for every group.
//!
//! Two different similarity measures are used and they are kept apart on
//! purpose:
//!
//! - [`positional_match_count`] decides group membership. It counts equal
//!   characters at equal positions over the whole string, so it is not a
//!   contiguous prefix length.
//! - [`billed_prefix_len`] decides how many characters are billed as the
//!   shared prefix once a group exists. It counts columns on which every
//!   member agrees, floored at the minimum prefix length.
//!
//! Compressed group layout:
//!
//! ```text
//! +-----------+------------+-------------+----------------------------+
//! | header(1) | prefix_len | prefix      | suffix * suffix_count      |
//! |           | (1)        | (len/2)     | ((24 - len)/2 each)        |
//! +-----------+------------+-------------+----------------------------+
//! ```

use super::Epc;
use crate::constants::{
    DEFAULT_MIN_PREFIX_LENGTH, EPC_HEX_LEN, EPC_SIZE_BYTES, GROUP_OVERHEAD_BYTES,
    SF12_REFERENCE_FRAME_BYTES, SF7_REFERENCE_FRAME_BYTES, SINGLETON_EPCS_SF12,
    SINGLETON_EPCS_SF7, SINGLETON_SUFFIX_BYTES, SINGLETON_TOTAL_PAYLOAD_BYTES,
};
use crate::error::EpcError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of positions `i` in `0..base.len()` where `base[i] == candidate[i]`.
///
/// Mismatches do not stop the count.
pub fn positional_match_count(base: &str, candidate: &str) -> usize {
    base.bytes()
        .zip(candidate.bytes())
        .filter(|(a, b)| a == b)
        .count()
}

/// Number of column positions on which every member has the same character.
///
/// Columns are compared up to the shortest member.
pub fn unanimous_column_count<S: AsRef<str>>(members: &[S]) -> usize {
    let Some(first) = members.first() else {
        return 0;
    };
    let first = first.as_ref().as_bytes();
    let shortest = members
        .iter()
        .map(|m| m.as_ref().len())
        .min()
        .unwrap_or(0);

    (0..shortest)
        .filter(|&i| members.iter().all(|m| m.as_ref().as_bytes()[i] == first[i]))
        .count()
}

/// Prefix length billed for a multi-member group:
/// `min(shortest member, max(min_prefix_length, unanimous columns))`.
pub fn billed_prefix_len<S: AsRef<str>>(members: &[S], min_prefix_length: usize) -> usize {
    let shortest = members
        .iter()
        .map(|m| m.as_ref().len())
        .min()
        .unwrap_or(0);
    shortest.min(min_prefix_length.max(unanimous_column_count(members)))
}

/// A group of EPCs assigned together in one greedy pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpcGroup {
    /// 1-based, in order of creation
    pub id: usize,
    /// Billed common prefix; empty for singleton groups
    pub prefix: String,
    /// Members in assignment order; the first is the base
    pub members: Vec<Epc>,
}

impl EpcGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// Per-group compression statistics (one report row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAnalysis {
    #[serde(rename = "Group_ID")]
    pub group_id: usize,
    #[serde(rename = "Prefix")]
    pub prefix: String,
    #[serde(rename = "Prefix_Bytes")]
    pub prefix_bytes: usize,
    #[serde(rename = "Suffix_Bytes")]
    pub suffix_bytes: usize,
    #[serde(rename = "Suffix_Count")]
    pub suffix_count: usize,
    #[serde(rename = "Total_Payload_Bytes")]
    pub total_payload_bytes: usize,
    #[serde(rename = "EPCs_SF7_51B")]
    pub epcs_sf7_51b: i64,
    #[serde(rename = "EPCs_SF12_11B")]
    pub epcs_sf12_11b: i64,
    #[serde(rename = "Compression_%")]
    pub compression_pct: f64,
}

impl GroupAnalysis {
    /// Statistics for a group.
    ///
    /// Singleton groups get the fixed row from `constants`.
    pub fn from_group(group: &EpcGroup) -> Self {
        if group.is_singleton() {
            return Self {
                group_id: group.id,
                prefix: String::new(),
                prefix_bytes: 0,
                suffix_bytes: SINGLETON_SUFFIX_BYTES,
                suffix_count: 1,
                total_payload_bytes: SINGLETON_TOTAL_PAYLOAD_BYTES,
                epcs_sf7_51b: SINGLETON_EPCS_SF7,
                epcs_sf12_11b: SINGLETON_EPCS_SF12,
                compression_pct: 0.0,
            };
        }

        let prefix_len = group.prefix.len();
        let prefix_bytes = prefix_len / 2;
        let suffix_bytes = EPC_HEX_LEN.saturating_sub(prefix_len) / 2;
        let suffix_count = group.len();
        let total_payload_bytes = GROUP_OVERHEAD_BYTES + prefix_bytes + suffix_count * suffix_bytes;

        let overhead = (GROUP_OVERHEAD_BYTES + prefix_bytes) as i64;
        let capacity = |frame: i64| -> i64 {
            if suffix_bytes == 0 {
                0
            } else {
                (frame - overhead).div_euclid(suffix_bytes as i64).max(0)
            }
        };

        let uncompressed = (suffix_count * EPC_SIZE_BYTES) as f64;
        let saved = uncompressed - total_payload_bytes as f64;

        Self {
            group_id: group.id,
            prefix: group.prefix.clone(),
            prefix_bytes,
            suffix_bytes,
            suffix_count,
            total_payload_bytes,
            epcs_sf7_51b: capacity(SF7_REFERENCE_FRAME_BYTES),
            epcs_sf12_11b: capacity(SF12_REFERENCE_FRAME_BYTES),
            compression_pct: round1(saved / uncompressed * 100.0),
        }
    }
}

/// Totals over all report rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_epcs: usize,
    pub group_count: usize,
    pub uncompressed_bytes: usize,
    pub compressed_bytes: usize,
    /// Negative when compression costs more than it saves
    pub savings_bytes: i64,
    pub savings_pct: f64,
}

impl AnalysisSummary {
    pub fn from_rows(rows: &[GroupAnalysis]) -> Self {
        let total_epcs: usize = rows.iter().map(|r| r.suffix_count).sum();
        let compressed_bytes: usize = rows.iter().map(|r| r.total_payload_bytes).sum();
        let uncompressed_bytes = total_epcs * EPC_SIZE_BYTES;
        let savings_bytes = uncompressed_bytes as i64 - compressed_bytes as i64;
        let savings_pct = if uncompressed_bytes == 0 {
            0.0
        } else {
            round1(savings_bytes as f64 / uncompressed_bytes as f64 * 100.0)
        };

        Self {
            total_epcs,
            group_count: rows.len(),
            uncompressed_bytes,
            compressed_bytes,
            savings_bytes,
            savings_pct,
        }
    }
}

/// Result of an analysis run: the groups and their report rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub groups: Vec<EpcGroup>,
    pub rows: Vec<GroupAnalysis>,
}

impl AnalysisReport {
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::from_rows(&self.rows)
    }
}

/// Greedy prefix grouper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixGrouper {
    min_prefix_length: usize,
}

impl Default for PrefixGrouper {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PREFIX_LENGTH)
    }
}

impl PrefixGrouper {
    pub fn new(min_prefix_length: usize) -> Self {
        Self { min_prefix_length }
    }

    pub fn min_prefix_length(&self) -> usize {
        self.min_prefix_length
    }

    /// Partition `epcs` into groups.
    ///
    /// The first EPC left in the pool becomes the base of a new group; every
    /// later EPC whose [`positional_match_count`] against the base reaches the
    /// threshold joins it. Order-sensitive, O(n²) worst case.
    pub fn group(&self, epcs: &[Epc]) -> Vec<EpcGroup> {
        let mut pool: VecDeque<&Epc> = epcs.iter().collect();
        let mut groups = Vec::new();

        while let Some(base) = pool.pop_front() {
            let mut members = vec![base.clone()];
            let mut rest = VecDeque::with_capacity(pool.len());

            for candidate in pool.drain(..) {
                if positional_match_count(base.as_str(), candidate.as_str())
                    >= self.min_prefix_length
                {
                    members.push(candidate.clone());
                } else {
                    rest.push_back(candidate);
                }
            }
            pool = rest;

            let prefix = if members.len() > 1 {
                let len = billed_prefix_len(&members, self.min_prefix_length);
                base.as_str()[..len].to_string()
            } else {
                String::new()
            };

            let id = groups.len() + 1;
            debug!("Group {id}: {} member(s), prefix '{prefix}'", members.len());
            groups.push(EpcGroup {
                id,
                prefix,
                members,
            });
        }

        groups
    }

    /// Group `epcs` and compute the report rows.
    ///
    /// Fails with [`EpcError::NoValidEntries`] on empty input.
    pub fn analyze(&self, epcs: &[Epc]) -> Result<AnalysisReport, EpcError> {
        if epcs.is_empty() {
            return Err(EpcError::NoValidEntries);
        }

        let groups = self.group(epcs);
        let rows: Vec<GroupAnalysis> = groups.iter().map(GroupAnalysis::from_group).collect();
        info!("Grouped {} EPCs into {} groups", epcs.len(), groups.len());

        Ok(AnalysisReport { groups, rows })
    }
}

/// Round to one decimal place, ties to even (56.25 -> 56.2).
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
