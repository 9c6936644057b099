use serde::{Deserialize, Serialize};

use super::error::AlignError;

/// One aligned sentence pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub original: String,
    pub simplified: String,
}

impl Record {
    pub fn new(original: impl Into<String>, simplified: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            simplified: simplified.into(),
        }
    }
}

/// Aligns parallel normal/simple line sequences into records.
///
/// Consecutive identical normal lines form one group; the simple lines at the
/// same positions are joined with single spaces into the group's simplified
/// text. Comparison is exact after trimming. Both sequences must have the same
/// length, which is checked before anything is aligned.
pub fn align<N, S>(normal_lines: &[N], simple_lines: &[S]) -> Result<Vec<Record>, AlignError>
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    if normal_lines.len() != simple_lines.len() {
        return Err(AlignError::LengthMismatch {
            normal: normal_lines.len(),
            simple: simple_lines.len(),
        });
    }

    let mut records = Vec::new();
    let mut last_normal: Option<&str> = None;
    let mut simple_index = 0;
    let mut group_start = 0;

    for line in normal_lines {
        let normal = line.as_ref().trim();

        if last_normal == Some(normal) {
            simple_index += 1;
            continue;
        }

        if let Some(previous) = last_normal {
            records.push(close_group(previous, simple_lines, group_start, simple_index));
        }

        last_normal = Some(normal);
        group_start = simple_index;
        if simple_index < simple_lines.len() {
            simple_index += 1;
        }
    }

    if let Some(previous) = last_normal {
        records.push(close_group(previous, simple_lines, group_start, simple_index));
    }

    Ok(records)
}

// Slice bounds are clamped so the cursor can never read past the end.
fn close_group<S: AsRef<str>>(original: &str, simple_lines: &[S], start: usize, end: usize) -> Record {
    let end = end.min(simple_lines.len());
    let start = start.min(end);
    let simplified = simple_lines[start..end]
        .iter()
        .map(|s| s.as_ref().trim())
        .collect::<Vec<_>>()
        .join(" ");

    Record::new(original, simplified)
}
