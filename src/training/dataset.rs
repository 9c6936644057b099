use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::align::Record;
use crate::tokenizer::{Tokenizer, TokenizerError};
use crate::utils::io::{self, IoError};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset is empty")]
    Empty,
    #[error("Padded inputs and targets must have the same length ({inputs} vs {labels})")]
    WidthMismatch { inputs: usize, labels: usize },
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

/// Tokenized and padded (original, simplified) pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDataset {
    inputs: Vec<Vec<usize>>,
    labels: Vec<Vec<usize>>,
    seq_len: usize,
    pad_id: usize,
}

/// One training example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairItem {
    pub input_ids: Vec<usize>,
    pub attention_mask: Vec<usize>,
    pub labels: Vec<usize>,
}

/// Pads every row to the longest one, then to `max_length` (truncating) when given.
fn pad_rows(rows: &mut [Vec<usize>], max_length: Option<usize>, pad_id: usize) -> usize {
    let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
    let width = max_length.unwrap_or(longest);
    for row in rows.iter_mut() {
        row.resize(width, pad_id);
    }
    width
}

impl PairDataset {
    /// Encodes `original` as input and `simplified` as label for every record.
    pub fn from_records(
        records: &[Record],
        tokenizer: &dyn Tokenizer,
        max_length: Option<usize>,
    ) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut inputs = Vec::with_capacity(records.len());
        let mut labels = Vec::with_capacity(records.len());
        for record in records {
            inputs.push(tokenizer.encode(&record.original)?);
            labels.push(tokenizer.encode(&record.simplified)?);
        }

        let pad_id = tokenizer.pad_id();
        let input_width = pad_rows(&mut inputs, max_length, pad_id);
        let label_width = pad_rows(&mut labels, max_length, pad_id);
        if input_width != label_width {
            return Err(DatasetError::WidthMismatch {
                inputs: input_width,
                labels: label_width,
            });
        }

        Ok(Self {
            inputs,
            labels,
            seq_len: input_width,
            pad_id,
        })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    pub fn pad_id(&self) -> usize {
        self.pad_id
    }

    /// Example `idx` with its attention mask
    pub fn item(&self, idx: usize) -> Option<PairItem> {
        let input_ids = self.inputs.get(idx)?.clone();
        let labels = self.labels.get(idx)?.clone();
        let attention_mask = input_ids
            .iter()
            .map(|&id| usize::from(id != self.pad_id))
            .collect();

        Some(PairItem {
            input_ids,
            attention_mask,
            labels,
        })
    }

    /// Batches in dataset order, or in a shuffled order when `rng` is given.
    pub fn batches<R: Rng + ?Sized>(&self, batch_size: usize, rng: Option<&mut R>) -> BatchIterator<'_> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        if let Some(rng) = rng {
            order.shuffle(rng);
        }
        BatchIterator::new(self, order, batch_size)
    }

    /// Stores the padded dataset so later runs can skip tokenization.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        io::serialize_to_file(path, self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Ok(io::deserialize_from_file(path)?)
    }
}

/// Iterator over training batches
pub struct BatchIterator<'a> {
    dataset: &'a PairDataset,
    order: Vec<usize>,
    batch_size: usize,
    current_pos: usize,
}

impl<'a> BatchIterator<'a> {
    fn new(dataset: &'a PairDataset, order: Vec<usize>, batch_size: usize) -> Self {
        Self {
            dataset,
            order,
            batch_size: batch_size.max(1),
            current_pos: 0,
        }
    }
}

impl<'a> Iterator for BatchIterator<'a> {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_pos >= self.order.len() {
            return None;
        }

        let end = (self.current_pos + self.batch_size).min(self.order.len());
        let rows = end - self.current_pos;
        let seq_len = self.dataset.seq_len;

        let mut batch = Batch {
            input_ids: Vec::with_capacity(rows * seq_len),
            attention_mask: Vec::with_capacity(rows * seq_len),
            labels: Vec::with_capacity(rows * seq_len),
            rows,
            seq_len,
        };

        for &idx in &self.order[self.current_pos..end] {
            let input = &self.dataset.inputs[idx];
            batch.input_ids.extend_from_slice(input);
            batch
                .attention_mask
                .extend(input.iter().map(|&id| usize::from(id != self.dataset.pad_id)));
            batch.labels.extend_from_slice(&self.dataset.labels[idx]);
        }

        self.current_pos = end;
        Some(batch)
    }
}

/// A single training batch, row-major `rows x seq_len`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub input_ids: Vec<usize>,
    pub attention_mask: Vec<usize>,
    pub labels: Vec<usize>,
    pub rows: usize,
    pub seq_len: usize,
}

impl Batch {
    pub fn input_row(&self, row: usize) -> &[usize] {
        &self.input_ids[row * self.seq_len..(row + 1) * self.seq_len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::test_support::WordTokenizer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn records() -> Vec<Record> {
        vec![
            Record::new("der hund bellt laut", "der hund bellt"),
            Record::new("ja", "ja"),
            Record::new("die katze schläft", "die katze"),
        ]
    }

    #[test]
    fn test_pads_to_max_length() {
        let tokenizer = WordTokenizer::default();
        let dataset = PairDataset::from_records(&records(), &tokenizer, Some(6)).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.seq_len(), 6);

        let item = dataset.item(1).unwrap();
        assert_eq!(item.input_ids.len(), 6);
        assert_eq!(item.labels.len(), 6);
        assert_eq!(item.attention_mask, vec![1, 0, 0, 0, 0, 0]);
        assert_eq!(&item.input_ids[1..], &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_truncates_to_max_length() {
        let tokenizer = WordTokenizer::default();
        let dataset = PairDataset::from_records(&records(), &tokenizer, Some(2)).unwrap();

        let item = dataset.item(0).unwrap();
        assert_eq!(item.input_ids, tokenizer.encode("der hund").unwrap());
        assert_eq!(item.attention_mask, vec![1, 1]);
    }

    #[test]
    fn test_unequal_widths_without_max_length() {
        let tokenizer = WordTokenizer::default();
        let err = PairDataset::from_records(&records(), &tokenizer, None).unwrap_err();
        assert!(matches!(err, DatasetError::WidthMismatch { inputs: 4, labels: 3 }));
    }

    #[test]
    fn test_equal_widths_without_max_length() {
        let tokenizer = WordTokenizer::default();
        let records = vec![Record::new("a b", "c"), Record::new("d", "e f")];
        let dataset = PairDataset::from_records(&records, &tokenizer, None).unwrap();
        assert_eq!(dataset.seq_len(), 2);
    }

    #[test]
    fn test_empty_records() {
        let tokenizer = WordTokenizer::default();
        let err = PairDataset::from_records(&[], &tokenizer, Some(4)).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_batches_in_order_with_short_tail() {
        let tokenizer = WordTokenizer::default();
        let dataset = PairDataset::from_records(&records(), &tokenizer, Some(4)).unwrap();

        let batches: Vec<Batch> = dataset.batches::<StdRng>(2, None).collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].rows, 2);
        assert_eq!(batches[1].rows, 1);
        assert_eq!(batches[0].input_ids.len(), 8);
        assert_eq!(batches[1].input_row(0), dataset.item(2).unwrap().input_ids.as_slice());
    }

    #[test]
    fn test_shuffled_batches_cover_every_example_once() {
        let tokenizer = WordTokenizer::default();
        let dataset = PairDataset::from_records(&records(), &tokenizer, Some(4)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let mut seen: Vec<Vec<usize>> = dataset
            .batches(2, Some(&mut rng))
            .flat_map(|b| (0..b.rows).map(move |r| b.input_row(r).to_vec()).collect::<Vec<_>>())
            .collect();
        let mut expected: Vec<Vec<usize>> = (0..3).map(|i| dataset.item(i).unwrap().input_ids).collect();
        seen.sort();
        expected.sort();

        assert_eq!(seen, expected);
    }

    #[test]
    fn test_save_and_load_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache/dataset.bin");
        let tokenizer = WordTokenizer::default();
        let dataset = PairDataset::from_records(&records(), &tokenizer, Some(5)).unwrap();

        dataset.save(&path).unwrap();
        assert_eq!(PairDataset::load(&path).unwrap(), dataset);
    }
}
