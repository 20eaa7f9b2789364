//! Console ranking and CSV export of a finished tally.
//!
//! Both outputs are projections of one [`Ranking`], so they always list
//! contributors in the same order: descending count, then ascending name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{ContributionTally, ContributorId};

/// Heading printed above the console ranking.
pub const CONSOLE_HEADING: &str = "Verified/Endorsed Counts per Contributor:";

/// CSV header columns.
pub const CSV_HEADER: [&str; 2] = ["Contributor", "Verified/Endorsed Count"];

/// Width the contributor column is padded to on the console.
const NAME_COLUMN_WIDTH: usize = 35;

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// One row of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedContributor {
    /// Contributor.
    pub contributor: ContributorId,
    /// Qualifying node count.
    pub count: u64,
}

/// Contributors ordered by descending count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    entries: Vec<RankedContributor>,
}

impl Ranking {
    /// Rank a tally. Ties are broken by ascending contributor name.
    pub fn from_tally(tally: &ContributionTally) -> Self {
        let mut entries: Vec<RankedContributor> = tally
            .iter()
            .map(|(contributor, count)| RankedContributor {
                contributor: contributor.clone(),
                count,
            })
            .collect();

        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.contributor.cmp(&b.contributor))
        });

        Self { entries }
    }

    /// Ranked rows.
    pub fn entries(&self) -> &[RankedContributor] {
        &self.entries
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ranking is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the human-readable ranking, heading included.
    pub fn render_console(&self) -> String {
        let mut out = format!("{}\n", CONSOLE_HEADING);
        for entry in &self.entries {
            out.push_str(&format!(
                "  {:<width$}  -> {}\n",
                entry.contributor.as_str(),
                entry.count,
                width = NAME_COLUMN_WIDTH
            ));
        }
        out
    }

    /// Render the CSV export: header row then one row per contributor.
    ///
    /// Rows end in CRLF. Fields containing a comma, quote, CR or LF are
    /// quoted with inner quotes doubled.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_csv_row(&mut out, &CSV_HEADER);
        for entry in &self.entries {
            let count = entry.count.to_string();
            push_csv_row(&mut out, &[entry.contributor.as_str(), count.as_str()]);
        }
        out
    }

    /// Write the CSV export to a file in a single call.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let csv = self.to_csv();

        std::fs::write(path, csv.as_bytes()).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), rows = self.entries.len(), "wrote csv");
        Ok(())
    }
}

fn push_csv_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_csv_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_csv_field(out: &mut String, field: &str) {
    let needs_quotes = field.contains([',', '"', '\r', '\n']);
    if !needs_quotes {
        out.push_str(field);
        return;
    }

    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

/// Invert a tally into count → contributors (names ascending).
pub fn group_by_count(tally: &ContributionTally) -> BTreeMap<u64, Vec<ContributorId>> {
    let mut groups: BTreeMap<u64, Vec<ContributorId>> = BTreeMap::new();
    for (contributor, count) in tally.iter() {
        groups.entry(count).or_default().push(contributor.clone());
    }
    groups
}

/// Render count groups, highest count first.
pub fn render_groups(groups: &BTreeMap<u64, Vec<ContributorId>>) -> String {
    let mut out = String::from("Grouping by Count:\n");
    for (count, contributors) in groups.iter().rev() {
        out.push_str(&format!("Count = {}:\n", count));
        for contributor in contributors {
            out.push_str(&format!("   {}\n", contributor));
        }
    }
    out
}
