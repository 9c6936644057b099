use super::model::{ModelError, Seq2SeqModel};
use crate::tokenizer::Tokenizer;

/// Generates a simplified rendering of `text`.
///
/// Padding ids are dropped from the generated sequence before decoding.
pub fn simplify_sentence<M: Seq2SeqModel + ?Sized>(
    model: &M,
    tokenizer: &dyn Tokenizer,
    text: &str,
    max_length: usize,
) -> Result<String, ModelError> {
    let input_ids = tokenizer.encode(text)?;
    let output = model.generate(&input_ids, max_length)?;

    let pad_id = tokenizer.pad_id();
    let tokens: Vec<usize> = output.into_iter().filter(|&id| id != pad_id).collect();
    Ok(tokenizer.decode(&tokens)?)
}
