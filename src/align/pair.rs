use std::path::{Path, PathBuf};

use super::aligner::{align, Record};
use super::error::PairError;
use crate::utils::io;

/// A normal resource and the simple resource that should sit next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub base_name: String,
    pub normal: PathBuf,
    pub simple: PathBuf,
}

impl FilePair {
    /// Derives the counterpart path by swapping the normal extension for the simple one.
    pub fn from_normal(normal: impl Into<PathBuf>, simple_extension: &str) -> Self {
        let normal = normal.into();
        let base_name = normal
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let simple = normal.with_extension(simple_extension);

        Self { base_name, normal, simple }
    }

    /// Locates `<dir>/<base>.<normal_ext>` and `<dir>/<base>.<simple_ext>`.
    pub fn locate(dir: impl AsRef<Path>, base_name: &str, normal_extension: &str, simple_extension: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            base_name: base_name.to_string(),
            normal: dir.join(format!("{base_name}.{normal_extension}")),
            simple: dir.join(format!("{base_name}.{simple_extension}")),
        }
    }
}

/// Reads both sides of a pair and aligns them.
pub fn process_file_pair(pair: &FilePair) -> Result<Vec<Record>, PairError> {
    if !pair.simple.is_file() {
        return Err(PairError::MissingCounterpart {
            normal: pair.normal.clone(),
            expected: pair.simple.clone(),
        });
    }

    let normal_lines = io::read_trimmed_lines(&pair.normal)?;
    let simple_lines = io::read_trimmed_lines(&pair.simple)?;

    align(&normal_lines, &simple_lines).map_err(|source| PairError::Validation {
        path: pair.normal.clone(),
        source,
    })
}
