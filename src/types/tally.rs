//! Per-contributor tally of qualifying nodes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::node::ContributorId;
use crate::canonical::canonical_hash_hex;

/// Mapping from contributor to the number of qualifying nodes they authored.
///
/// Counts only grow. Backed by a `BTreeMap` so iteration (and therefore
/// hashing and tie-breaking) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionTally {
    counts: BTreeMap<ContributorId, u64>,
}

impl ContributionTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to a contributor's count, creating the entry at zero first.
    pub fn increment(&mut self, contributor: ContributorId) {
        *self.counts.entry(contributor).or_insert(0) += 1;
    }

    /// Count for a contributor (zero if unseen).
    pub fn get(&self, contributor: &ContributorId) -> u64 {
        self.counts.get(contributor).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct contributors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no contributor has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(contributor, count)` in contributor order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContributorId, u64)> {
        self.counts.iter().map(|(c, n)| (c, *n))
    }

    /// Add every count from `other` into this tally.
    pub fn merge(&mut self, other: &ContributionTally) {
        for (contributor, count) in other.iter() {
            *self.counts.entry(contributor.clone()).or_insert(0) += count;
        }
    }

    /// Stable content fingerprint of the tally.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }
}
