// error.rs
use thiserror::Error;

use crate::align::{AlignError, PairError};
use crate::config::ConfigError;
use crate::corpus::CorpusError;
use crate::prepare::PrepareError;
use crate::training::{DatasetError, ModelError, TrainingError};
use crate::utils::IoError;

#[derive(Error, Debug)]
pub enum SimplifyError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    Pair(#[from] PairError),

    #[error(transparent)]
    Prepare(#[from] PrepareError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Training(#[from] TrainingError),
}

pub type Result<T, E = SimplifyError> = std::result::Result<T, E>;
