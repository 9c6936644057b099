use std::time::SystemTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TrainingMetrics {
    pub epoch: usize,
    pub step: usize,
    pub loss: f32,
    pub learning_rate: f32,
    pub timestamp: SystemTime,
}

/// Collects step metrics and per-epoch mean losses
#[derive(Debug, Default)]
pub struct Metrics {
    history: Vec<TrainingMetrics>,
    epoch_losses: Vec<f32>,
    pending: Vec<f32>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, metrics: TrainingMetrics) {
        self.pending.push(metrics.loss);
        self.history.push(metrics);
    }

    /// Closes the epoch and returns its mean loss (0 when no step ran).
    pub fn finalize_epoch(&mut self, epoch: usize) -> f32 {
        let mean = if self.pending.is_empty() {
            0.0
        } else {
            self.pending.iter().sum::<f32>() / self.pending.len() as f32
        };
        self.pending.clear();
        self.epoch_losses.push(mean);
        tracing::info!("Epoch {} finished, mean loss {:.4}", epoch + 1, mean);
        mean
    }

    pub fn history(&self) -> &[TrainingMetrics] {
        &self.history
    }

    pub fn epoch_losses(&self) -> &[f32] {
        &self.epoch_losses
    }
}
