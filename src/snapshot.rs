//! Run snapshot identity for reproducible tallies.
//!
//! A `ForestSnapshot` fingerprints the input, the policy, and the resulting
//! tally, so two runs can be compared without diffing CSV files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_hash_hex, content_digest};
use crate::policy::QualifyingPolicy;
use crate::types::{ContributionTally, ThreadNode};
use crate::walker::count_nodes;
use crate::TALLY_SCHEMA_VERSION;

/// A deterministic fingerprint of one tally run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSnapshot {
    /// xxh64 over every field except `computed_at`.
    pub snapshot_id: String,
    /// SHA-256 of the raw input bytes.
    pub input_digest: String,
    /// Number of top-level threads.
    pub root_count: u64,
    /// Number of nodes walked.
    pub node_count: u64,
    /// Number of distinct contributors in the tally.
    pub contributor_count: u64,
    /// Sum of all tally counts.
    pub qualifying_total: u64,
    /// Canonical hash of the tally.
    pub tally_fingerprint: String,
    /// Hash of the qualifying policy parameters.
    pub policy_params_hash: String,
    /// Schema version used for types.
    pub schema_version: String,
    /// When this snapshot was computed.
    pub computed_at: DateTime<Utc>,
}

/// Internal struct for computing snapshot_id hash.
#[derive(Serialize)]
struct SnapshotIdInput<'a> {
    input_digest: &'a str,
    root_count: u64,
    node_count: u64,
    contributor_count: u64,
    qualifying_total: u64,
    tally_fingerprint: &'a str,
    policy_params_hash: &'a str,
    schema_version: &'a str,
}

impl ForestSnapshot {
    /// Compute a snapshot from the raw input, parsed forest, policy, and tally.
    pub fn compute(
        raw_input: &[u8],
        forest: &[ThreadNode],
        policy: &QualifyingPolicy,
        tally: &ContributionTally,
    ) -> Self {
        let input_digest = content_digest(raw_input);
        let root_count = forest.len() as u64;
        let node_count = count_nodes(forest) as u64;
        let contributor_count = tally.len() as u64;
        let qualifying_total = tally.total();
        let tally_fingerprint = tally.fingerprint();
        let policy_params_hash = policy.params_hash();

        let snapshot_id = canonical_hash_hex(&SnapshotIdInput {
            input_digest: &input_digest,
            root_count,
            node_count,
            contributor_count,
            qualifying_total,
            tally_fingerprint: &tally_fingerprint,
            policy_params_hash: &policy_params_hash,
            schema_version: TALLY_SCHEMA_VERSION,
        });

        Self {
            snapshot_id,
            input_digest,
            root_count,
            node_count,
            contributor_count,
            qualifying_total,
            tally_fingerprint,
            policy_params_hash,
            schema_version: TALLY_SCHEMA_VERSION.to_string(),
            computed_at: Utc::now(),
        }
    }

    /// Verify that this snapshot matches a recomputation over the same inputs.
    pub fn verify(
        &self,
        raw_input: &[u8],
        forest: &[ThreadNode],
        policy: &QualifyingPolicy,
        tally: &ContributionTally,
    ) -> bool {
        Self::compute(raw_input, forest, policy, tally).snapshot_id == self.snapshot_id
    }
}
