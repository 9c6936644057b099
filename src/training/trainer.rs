use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::dataset::PairDataset;
use super::metrics::{Metrics, TrainingMetrics};
use super::model::{ModelError, Seq2SeqModel};
use crate::config::{ConfigError, TrainingConfig};
use crate::tokenizer::{Tokenizer, TokenizerError};

#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("Invalid training configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),
    #[error("Failed to create model directory {}: {source}", path.display())]
    ModelDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Loss is not finite at epoch {epoch}, step {step}: {loss}")]
    NonFiniteLoss { epoch: usize, step: usize, loss: f32 },
}

/// Outcome of a finished training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub steps: usize,
    pub epoch_losses: Vec<f32>,
}

impl TrainingReport {
    pub fn final_loss(&self) -> Option<f32> {
        self.epoch_losses.last().copied()
    }
}

/// Saves a fine-tuned model and its tokenizer side by side in `dir`.
pub fn save_pretrained<M: Seq2SeqModel + ?Sized>(
    model: &M,
    tokenizer: &dyn Tokenizer,
    dir: &Path,
) -> Result<(), TrainingError> {
    fs::create_dir_all(dir).map_err(|source| TrainingError::ModelDir {
        path: dir.to_path_buf(),
        source,
    })?;
    model.save(dir)?;
    tokenizer.save(dir)?;
    tracing::info!("Model and tokenizer saved to {}", dir.display());
    Ok(())
}

/// Drives the fine-tuning loop over a black-box model
pub struct Trainer {
    config: TrainingConfig,
    metrics: Metrics,
    rng: StdRng,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Result<Self, TrainingError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            metrics: Metrics::new(),
            rng,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Main training loop
    pub fn train<M: Seq2SeqModel + ?Sized>(
        &mut self,
        model: &mut M,
        dataset: &PairDataset,
    ) -> Result<TrainingReport, TrainingError> {
        tracing::info!(
            "Training on {} pairs for {} epochs (batch size {}, lr {})",
            dataset.len(),
            self.config.epochs,
            self.config.batch_size,
            self.config.learning_rate
        );

        let mut step = 0;
        let mut epoch_losses = Vec::with_capacity(self.config.epochs);

        for epoch in 0..self.config.epochs {
            let rng = self.config.shuffle.then_some(&mut self.rng);
            let batches = dataset.batches(self.config.batch_size, rng);

            for batch in batches {
                step += 1;
                let loss = model.forward(&batch)?;
                if !loss.is_finite() {
                    return Err(TrainingError::NonFiniteLoss { epoch, step, loss });
                }
                model.optimize(self.config.learning_rate)?;

                tracing::debug!("Epoch {}, Loss: {}", epoch + 1, loss);
                self.metrics.record(TrainingMetrics {
                    epoch,
                    step,
                    loss,
                    learning_rate: self.config.learning_rate,
                    timestamp: std::time::SystemTime::now(),
                });
            }

            epoch_losses.push(self.metrics.finalize_epoch(epoch));
        }

        Ok(TrainingReport { steps: step, epoch_losses })
    }

    /// Saves the trained model and tokenizer into the configured `model_dir`.
    pub fn save_model<M: Seq2SeqModel + ?Sized>(
        &self,
        model: &M,
        tokenizer: &dyn Tokenizer,
    ) -> Result<(), TrainingError> {
        save_pretrained(model, tokenizer, &self.config.model_dir)
    }
}
