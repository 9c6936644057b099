//! Loading prepared `original,simplified` tables back into records.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::align::Record;
use crate::prepare::CSV_HEADER;
use crate::utils::csv::{self, CsvError};
use crate::utils::{io, IoError};

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("The folder '{}' does not exist", .0.display())]
    FolderNotFound(PathBuf),

    #[error("No CSV files found in {}", .0.display())]
    NoCsvFiles(PathBuf),

    #[error("{}:{line}: {reason}", path.display())]
    Malformed { path: PathBuf, line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

/// Summary numbers for a loaded corpus
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStats {
    pub records: usize,
    pub mean_original_words: f64,
    pub mean_simplified_words: f64,
}

impl CorpusStats {
    pub fn from_records(records: &[Record]) -> Self {
        let mean_words = |f: fn(&Record) -> &str| {
            if records.is_empty() {
                return 0.0;
            }
            let total: usize = records.iter().map(|r| f(r).split_whitespace().count()).sum();
            total as f64 / records.len() as f64
        };

        Self {
            records: records.len(),
            mean_original_words: mean_words(|r| r.original.as_str()),
            mean_simplified_words: mean_words(|r| r.simplified.as_str()),
        }
    }
}

/// Parses one prepared table; the header must be `original,simplified`.
pub fn parse_records(path: &Path, text: &str) -> Result<Vec<Record>, CorpusError> {
    let malformed = |line: usize, reason: String| CorpusError::Malformed {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let rows = csv::parse(text).map_err(|e: CsvError| malformed(e.line(), e.to_string()))?;

    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| malformed(1, "missing header".to_string()))?;
    if header.fields != CSV_HEADER {
        return Err(malformed(
            header.line,
            format!("expected header {:?}, found {:?}", CSV_HEADER.join(","), header.fields.join(",")),
        ));
    }

    rows.map(|row| match <[String; 2]>::try_from(row.fields) {
        Ok([original, simplified]) => Ok(Record { original, simplified }),
        Err(fields) => Err(malformed(row.line, format!("expected 2 fields, found {}", fields.len()))),
    })
    .collect()
}

/// Reads every `*.csv` table in `folder` (sorted by name) and concatenates the records.
pub fn load_corpus(folder: impl AsRef<Path>) -> Result<Vec<Record>, CorpusError> {
    let folder = folder.as_ref();
    let files = match io::get_files_with_extension(folder, "csv") {
        Ok(files) => files,
        Err(IoError::DirectoryNotFound(dir)) => return Err(CorpusError::FolderNotFound(dir)),
        Err(e) => return Err(e.into()),
    };

    if files.is_empty() {
        return Err(CorpusError::NoCsvFiles(folder.to_path_buf()));
    }

    let mut records = Vec::new();
    for path in &files {
        let text = io::read_to_string(path)?;
        let parsed = parse_records(path, &text)?;
        tracing::debug!("Loaded {} records from {}", parsed.len(), path.display());
        records.extend(parsed);
    }

    tracing::info!("Loaded {} records from {} tables", records.len(), files.len());
    Ok(records)
}
