use std::path::Path;

use crate::tokenizer::TokenizerError;

/// Text <-> token id conversion, provided by a pretrained tokenizer
pub trait Tokenizer {
    /// Encodes text into tokens
    fn encode(&self, text: &str) -> Result<Vec<usize>, TokenizerError>;

    /// Decodes tokens back into text
    fn decode(&self, tokens: &[usize]) -> Result<String, TokenizerError>;

    /// Id used to pad sequences; attention masks treat it as "no token".
    fn pad_id(&self) -> usize {
        0
    }

    /// Saves the tokenizer files into `dir`
    fn save(&self, dir: &Path) -> Result<(), TokenizerError>;
}
