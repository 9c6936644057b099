//! Test doubles for the external tokenizer and model.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use simplify_align::training::{Batch, ModelError};
use simplify_align::{Seq2SeqModel, Tokenizer, TokenizerError};

/// Character tokenizer over a fixed alphabet; id 0 is padding.
pub struct CharTokenizer {
    stoi: HashMap<char, usize>,
    itos: Vec<char>,
}

impl CharTokenizer {
    pub fn new(alphabet: &str) -> Self {
        let itos: Vec<char> = alphabet.chars().collect();
        let stoi = itos.iter().enumerate().map(|(i, &c)| (c, i + 1)).collect();
        Self { stoi, itos }
    }
}

impl Tokenizer for CharTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<usize>, TokenizerError> {
        text.chars()
            .map(|c| {
                self.stoi
                    .get(&c)
                    .copied()
                    .ok_or_else(|| TokenizerError::UnknownToken(c.to_string()))
            })
            .collect()
    }

    fn decode(&self, tokens: &[usize]) -> Result<String, TokenizerError> {
        tokens
            .iter()
            .map(|&id| {
                id.checked_sub(1)
                    .and_then(|i| self.itos.get(i))
                    .copied()
                    .ok_or(TokenizerError::InvalidTokenId(id))
            })
            .collect()
    }

    fn save(&self, dir: &Path) -> Result<(), TokenizerError> {
        fs::write(dir.join("alphabet.txt"), self.itos.iter().collect::<String>())?;
        Ok(())
    }
}

/// Model whose loss is the share of masked-in positions whose input id differs
/// from the label; `optimize` makes it copy its input on generation.
#[derive(Default)]
pub struct EchoModel {
    pub steps: usize,
    pub seen_rows: usize,
}

impl Seq2SeqModel for EchoModel {
    fn forward(&mut self, batch: &Batch) -> Result<f32, ModelError> {
        self.seen_rows += batch.rows;
        let active: Vec<_> = batch
            .input_ids
            .iter()
            .zip(&batch.labels)
            .zip(&batch.attention_mask)
            .filter(|(_, mask)| **mask == 1)
            .map(|((input, label), _)| input != label)
            .collect();
        if active.is_empty() {
            return Ok(0.0);
        }
        let wrong = active.iter().filter(|&&w| w).count();
        Ok(wrong as f32 / active.len() as f32 / (self.steps + 1) as f32)
    }

    fn optimize(&mut self, learning_rate: f32) -> Result<(), ModelError> {
        if learning_rate <= 0.0 {
            return Err(ModelError::BackwardError("learning rate must be positive".to_string()));
        }
        self.steps += 1;
        Ok(())
    }

    fn generate(&self, input_ids: &[usize], max_length: usize) -> Result<Vec<usize>, ModelError> {
        if self.steps == 0 {
            return Err(ModelError::GenerationError("model is untrained".to_string()));
        }
        let mut out: Vec<usize> = input_ids.iter().copied().take(max_length).collect();
        out.resize(max_length, 0);
        Ok(out)
    }

    fn save(&self, dir: &Path) -> Result<(), ModelError> {
        fs::write(dir.join("steps.txt"), self.steps.to_string())?;
        Ok(())
    }
}
