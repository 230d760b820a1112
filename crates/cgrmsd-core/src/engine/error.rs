use thiserror::Error;

use crate::core::alignment::AlignmentError;
use crate::core::io::pdb::PdbError;
use crate::core::io::results::ResultsError;
use crate::core::metrics::MetricError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to extract coordinates from '{source_name}': {source}")]
    Extraction {
        source_name: String,
        #[source]
        source: PdbError,
    },

    #[error("Alignment failed: {0}")]
    Alignment(#[from] AlignmentError),

    #[error("Scoring failed: {0}")]
    Metric(#[from] MetricError),

    #[error("No atoms matched the selector in native structure '{}'", path.display())]
    EmptySelection { path: PathBuf },

    #[error(
        "Atom name mismatch at position {index}: native has '{reference}', prediction has '{candidate}'"
    )]
    AtomNameMismatch {
        index: usize,
        reference: String,
        candidate: String,
    },

    #[error("Failed to read prediction directory '{}': {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Score table error: {0}")]
    Results(#[from] ResultsError),
}

impl EngineError {
    /// Whether the failure means the pair should be skipped rather than reported as an error.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            EngineError::Alignment(AlignmentError::ShapeMismatch { .. })
        )
    }
}
