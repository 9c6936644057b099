pub mod align;
pub use align::{align, process_file_pair, AlignError, FilePair, PairError, Record};

pub mod config;
pub use config::{Config, ConfigError, PrepareConfig, TrainingConfig};

pub mod corpus;
pub use corpus::{load_corpus, CorpusError, CorpusStats};

pub mod prepare;
pub use prepare::{prepare_dataset, PairOutcome, PrepareError, PrepareReport};

pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerError};

pub mod training;
pub use training::{simplify_sentence, PairDataset, Seq2SeqModel, Trainer};

pub mod utils;

pub mod error;
pub use error::{Result, SimplifyError};
