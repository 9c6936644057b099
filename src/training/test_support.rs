//! Stand-ins for the pretrained tokenizer and model used by unit tests
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use super::dataset::Batch;
use super::model::{ModelError, Seq2SeqModel};
use crate::tokenizer::{Tokenizer, TokenizerError};

/// Whitespace tokenizer that assigns ids on first sight; 0 is padding.
#[derive(Debug, Default)]
pub struct WordTokenizer {
    vocab: RefCell<Vec<String>>,
}

impl Tokenizer for WordTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<usize>, TokenizerError> {
        let mut vocab = self.vocab.borrow_mut();
        Ok(text
            .split_whitespace()
            .map(|word| match vocab.iter().position(|w| w == word) {
                Some(pos) => pos + 1,
                None => {
                    vocab.push(word.to_string());
                    vocab.len()
                }
            })
            .collect())
    }

    fn decode(&self, tokens: &[usize]) -> Result<String, TokenizerError> {
        let vocab = self.vocab.borrow();
        let words = tokens
            .iter()
            .map(|&id| {
                id.checked_sub(1)
                    .and_then(|i| vocab.get(i))
                    .cloned()
                    .ok_or(TokenizerError::InvalidTokenId(id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words.join(" "))
    }

    fn save(&self, dir: &Path) -> Result<(), TokenizerError> {
        fs::write(dir.join("vocab.txt"), self.vocab.borrow().join("\n"))?;
        Ok(())
    }
}

/// Model that replays scripted losses and records how it was driven
#[derive(Debug, Default)]
pub struct RecordingModel {
    losses: Vec<f32>,
    generation: Vec<usize>,
    forward_calls: usize,
    pub batch_rows: Vec<usize>,
    pub first_rows: Vec<Vec<usize>>,
    pub optimize_calls: Vec<f32>,
    pub generate_calls: RefCell<Vec<(usize, usize)>>,
    pub saved_to: RefCell<Vec<PathBuf>>,
}

impl RecordingModel {
    pub fn with_losses(losses: Vec<f32>) -> Self {
        Self { losses, ..Self::default() }
    }

    pub fn with_generation(generation: Vec<usize>) -> Self {
        Self { generation, ..Self::default() }
    }
}

impl Seq2SeqModel for RecordingModel {
    fn forward(&mut self, batch: &Batch) -> Result<f32, ModelError> {
        if self.losses.is_empty() {
            return Err(ModelError::ForwardError("no scripted loss".to_string()));
        }
        let loss = self.losses[self.forward_calls % self.losses.len()];
        self.forward_calls += 1;
        self.batch_rows.push(batch.rows);
        self.first_rows.push(batch.input_row(0).to_vec());
        Ok(loss)
    }

    fn optimize(&mut self, learning_rate: f32) -> Result<(), ModelError> {
        self.optimize_calls.push(learning_rate);
        Ok(())
    }

    fn generate(&self, input_ids: &[usize], max_length: usize) -> Result<Vec<usize>, ModelError> {
        self.generate_calls.borrow_mut().push((input_ids.len(), max_length));
        Ok(self.generation.iter().copied().take(max_length).collect())
    }

    fn save(&self, dir: &Path) -> Result<(), ModelError> {
        self.saved_to.borrow_mut().push(dir.to_path_buf());
        Ok(())
    }
}
