//! Sentence alignment between parallel normal/simple line files
mod aligner;
mod error;
mod pair;

pub use aligner::{align, Record};
pub use error::{AlignError, PairError};
pub use pair::{process_file_pair, FilePair};
