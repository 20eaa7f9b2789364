//! # endorsement-tally
//!
//! Per-contributor counts of verified or endorsed posts in a forum export.
//!
//! The tally answers one question:
//!
//! > How many of each contributor's posts, comments, and answers were
//! > endorsed, or long enough and question-free enough to count anyway?
//!
//! ## Core Contract
//!
//! 1. Load a forest of top-level threads from a JSON export
//! 2. Walk every node depth-first, classifying it with a [`QualifyingPolicy`]
//! 3. Rank contributors by count and export the ranking as CSV
//!
//! ## Architecture
//!
//! ```text
//! JSON export → load_forest → TreeWalker → ContributionTally → Ranking → console / CSV
//!                                  ↓                               ↓
//!                          QualifyingPolicy                  ForestSnapshot
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same forest + same policy → identical tally and tally fingerprint
//! - Ranking order is descending count, then ascending contributor name
//! - Console and CSV output share one ranking

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod policy;
pub mod walker;
pub mod loader;
pub mod report;
pub mod canonical;
pub mod snapshot;
pub mod run;

// Re-exports
pub use types::{ContributionTally, ContributorId, NodeLevel, ThreadNode, UserRecord};
pub use policy::{is_qualifying, QualifyingPolicy, MIN_UNENDORSED_CHARS, QUESTION_MARK};
pub use walker::{count_nodes, tally, TreeWalker, WalkReport, WalkStats};
pub use loader::{load_forest, parse_forest, LoadError, LoadedForest};
pub use report::{group_by_count, render_groups, ExportError, RankedContributor, Ranking};
pub use canonical::{canonical_hash, canonical_hash_hex, content_digest, to_canonical_bytes};
pub use snapshot::ForestSnapshot;
pub use run::{tally_and_export, tally_file, TallyError, TallyRun};

/// Schema version for serialized tally types.
/// Increment on breaking changes to any schema type.
pub const TALLY_SCHEMA_VERSION: &str = "1.0.0";

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "qualifying_policy_v1";

/// Contributor recorded for nodes without an author name.
pub const UNKNOWN_NAME: &str = "unknown name";

/// Export read when `TALLY_INPUT` is not set.
pub const DEFAULT_INPUT_PATH: &str = "cpsc323_ed_fall24.json";

/// CSV written when `TALLY_OUTPUT` is not set.
pub const DEFAULT_OUTPUT_PATH: &str = "cpsc323_ed_fall24_verified_endorsed_counts.csv";
