//! Seam to the external pretrained tokenizer
mod error;
mod tokenizer;

pub use error::TokenizerError;
pub use tokenizer::Tokenizer;
