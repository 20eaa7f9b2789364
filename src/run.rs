//! End-to-end tally of an export file.

use std::path::Path;

use tracing::info;

use crate::loader::{load_forest, LoadError};
use crate::policy::QualifyingPolicy;
use crate::report::{ExportError, Ranking};
use crate::snapshot::ForestSnapshot;
use crate::walker::{TreeWalker, WalkReport};

/// Error type for a full run.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    /// Input could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Output could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Everything produced by tallying one export.
#[derive(Debug, Clone)]
pub struct TallyRun {
    /// Tally and walk counters.
    pub report: WalkReport,
    /// Ranking shared by console and CSV output.
    pub ranking: Ranking,
    /// Provenance fingerprint.
    pub snapshot: ForestSnapshot,
}

/// Load an export, walk it, and rank the contributors.
///
/// Nothing is written; callers export the ranking once this succeeds.
pub fn tally_file(
    path: impl AsRef<Path>,
    policy: &QualifyingPolicy,
) -> Result<TallyRun, TallyError> {
    let loaded = load_forest(path)?;

    let report = TreeWalker::new(policy.clone()).walk(&loaded.roots);
    let ranking = Ranking::from_tally(&report.tally);
    let snapshot = ForestSnapshot::compute(&loaded.raw, &loaded.roots, policy, &report.tally);

    info!(
        snapshot_id = %snapshot.snapshot_id,
        input_digest = %snapshot.input_digest,
        roots = report.stats.roots,
        nodes = report.stats.nodes_visited,
        qualifying = report.stats.qualifying,
        contributors = ranking.len(),
        max_depth = report.stats.max_depth,
        "tally complete"
    );

    Ok(TallyRun {
        report,
        ranking,
        snapshot,
    })
}

/// Tally an export and write the CSV to `output`.
pub fn tally_and_export(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    policy: &QualifyingPolicy,
) -> Result<TallyRun, TallyError> {
    let run = tally_file(input, policy)?;
    run.ranking.write_csv(output)?;
    Ok(run)
}
