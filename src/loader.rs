//! Forest loading from JSON exports.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::types::ThreadNode;

/// Error type for loading a forest.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Input file missing or unreadable.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Input is not an array of thread objects.
    #[error("Malformed thread data in {path}: {source}")]
    Malformed {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// A forest together with the raw bytes it was parsed from.
#[derive(Debug, Clone)]
pub struct LoadedForest {
    /// Top-level threads.
    pub roots: Vec<ThreadNode>,
    /// Raw input, kept for snapshot digests.
    pub raw: Vec<u8>,
}

/// Parse a forest from JSON bytes.
///
/// Comment chains may nest arbitrarily deep, so serde_json's default
/// nesting limit of 128 is lifted.
pub fn parse_forest(bytes: &[u8]) -> Result<Vec<ThreadNode>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    deserializer.disable_recursion_limit();
    let roots = Vec::<ThreadNode>::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(roots)
}

/// Read and parse a forest from a file.
pub fn load_forest(path: impl AsRef<Path>) -> Result<LoadedForest, LoadError> {
    let path = path.as_ref();

    let raw = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let roots = parse_forest(&raw).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = raw.len(), roots = roots.len(), "loaded forest");

    Ok(LoadedForest { roots, raw })
}
