use std::path::PathBuf;
use thiserror::Error;

use crate::utils::IoError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error("The number of lines in the normal and simple files do not match ({normal} vs {simple})")]
    LengthMismatch { normal: usize, simple: usize },
}

/// Outcome of a single file pair that did not produce records.
#[derive(Error, Debug)]
pub enum PairError {
    #[error("Corresponding simple file not found for {}: expected {}", normal.display(), expected.display())]
    MissingCounterpart { normal: PathBuf, expected: PathBuf },

    #[error("{}: {source}", path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: AlignError,
    },

    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

impl PairError {
    /// Missing counterparts are warnings; the pair is skipped.
    pub fn is_warning(&self) -> bool {
        matches!(self, PairError::MissingCounterpart { .. })
    }
}
