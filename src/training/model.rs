use std::path::Path;

use thiserror::Error;

use super::dataset::Batch;
use crate::tokenizer::TokenizerError;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Forward pass error: {0}")]
    ForwardError(String),

    #[error("Backward pass error: {0}")]
    BackwardError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A pretrained causal language model fine-tuned on sentence pairs.
///
/// Architecture, autograd and decoding all live behind this trait.
pub trait Seq2SeqModel {
    /// Runs the batch through the model and returns the loss against `batch.labels`.
    fn forward(&mut self, batch: &Batch) -> Result<f32, ModelError>;

    /// Backpropagates the last loss and applies one optimizer update.
    fn optimize(&mut self, learning_rate: f32) -> Result<(), ModelError>;

    /// Generates up to `max_length` token ids continuing `input_ids`.
    fn generate(&self, input_ids: &[usize], max_length: usize) -> Result<Vec<usize>, ModelError>;

    /// Writes the fine-tuned weights into `dir`.
    fn save(&self, dir: &Path) -> Result<(), ModelError>;
}
