//! Fine-tuning infrastructure around an external pretrained model

pub mod dataset;
pub mod evaluate;
pub mod metrics;
pub mod model;
pub mod trainer;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main components
pub use dataset::{Batch, BatchIterator, DatasetError, PairDataset, PairItem};
pub use evaluate::simplify_sentence;
pub use metrics::{Metrics, TrainingMetrics};
pub use model::{ModelError, Seq2SeqModel};
pub use trainer::{save_pretrained, Trainer, TrainingError, TrainingReport};
