//! Batch driver: aligns every file pair in a directory and writes one CSV per pair.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::align::{process_file_pair, FilePair, PairError, Record};
use crate::config::PrepareConfig;
use crate::utils::{csv, io, IoError};

pub const CSV_HEADER: [&str; 2] = ["original", "simplified"];

/// Errors that abort the whole batch run
#[derive(Error, Debug)]
pub enum PrepareError {
    #[error("Input directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No .{extension} files found in {}", dir.display())]
    NoInputFiles { dir: PathBuf, extension: String },

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

/// What happened to one file pair
#[derive(Debug)]
pub enum PairOutcome {
    Written { output: PathBuf, records: usize },
    Skipped(PairError),
    Failed(PairError),
}

#[derive(Debug)]
pub struct PairReport {
    pub pair: FilePair,
    pub outcome: PairOutcome,
}

/// Per-pair results of a batch run, in processing order
#[derive(Debug, Default)]
pub struct PrepareReport {
    pub pairs: Vec<PairReport>,
}

impl PrepareReport {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, PairOutcome::Written { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, PairOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, PairOutcome::Failed(_)))
    }

    pub fn total_records(&self) -> usize {
        self.pairs
            .iter()
            .map(|p| match p.outcome {
                PairOutcome::Written { records, .. } => records,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&PairOutcome) -> bool) -> usize {
        self.pairs.iter().filter(|p| pred(&p.outcome)).count()
    }
}

/// Renders records as an `original,simplified` table.
pub fn records_to_csv(records: &[Record]) -> String {
    csv::render(
        &CSV_HEADER,
        records
            .iter()
            .map(|r| [r.original.as_str(), r.simplified.as_str()]),
    )
}

/// Writes records to `path`, creating parent directories.
pub fn save_records_to_csv(records: &[Record], path: impl AsRef<Path>) -> Result<(), IoError> {
    io::write_string(path, records_to_csv(records))
}

/// Runs the batch over `config.input_dir`.
///
/// Only a missing or empty input directory is fatal; every per-pair problem is
/// logged and recorded in the report.
pub fn prepare_dataset(config: &PrepareConfig) -> Result<PrepareReport, PrepareError> {
    let normal_files = match io::get_files_with_extension(&config.input_dir, &config.normal_extension) {
        Ok(files) => files,
        Err(IoError::DirectoryNotFound(dir)) => return Err(PrepareError::DirectoryNotFound(dir)),
        Err(e) => return Err(e.into()),
    };

    if normal_files.is_empty() {
        return Err(PrepareError::NoInputFiles {
            dir: config.input_dir.clone(),
            extension: config.normal_extension.clone(),
        });
    }

    fs::create_dir_all(&config.output_dir).map_err(|source| PrepareError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    tracing::info!(
        "Preparing {} file pairs from {} into {}",
        normal_files.len(),
        config.input_dir.display(),
        config.output_dir.display()
    );

    let mut report = PrepareReport::default();
    for normal in normal_files {
        let pair = FilePair::from_normal(normal, &config.simple_extension);
        let outcome = prepare_pair(&pair, &config.output_dir);
        report.pairs.push(PairReport { pair, outcome });
    }

    tracing::info!(
        "Wrote {} tables ({} records), skipped {}, failed {}",
        report.written(),
        report.total_records(),
        report.skipped(),
        report.failed()
    );

    Ok(report)
}

fn prepare_pair(pair: &FilePair, output_dir: &Path) -> PairOutcome {
    let records = match process_file_pair(pair) {
        Ok(records) => records,
        Err(e) if e.is_warning() => {
            tracing::warn!("{e}, skipping");
            return PairOutcome::Skipped(e);
        }
        Err(e) => {
            tracing::error!("{e}");
            return PairOutcome::Failed(e);
        }
    };

    let output = output_dir.join(format!("{}.csv", pair.base_name));
    match save_records_to_csv(&records, &output) {
        Ok(()) => {
            tracing::info!(
                "Data has been successfully parsed and saved to '{}' ({} records)",
                output.display(),
                records.len()
            );
            PairOutcome::Written { output, records: records.len() }
        }
        Err(e) => {
            tracing::error!("Failed to write {}: {e}", output.display());
            PairOutcome::Failed(PairError::Io(e))
        }
    }
}
