// src/process/frame.rs

use crate::error::PipelineError;

/// A small column-labelled table of text cells.
///
/// Every row is exactly as wide as `headers`, and labels are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, PipelineError> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(PipelineError::RaggedRow {
                    row: i,
                    found: row.len(),
                    expected: headers.len(),
                });
            }
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }

    fn require(&self, label: &str) -> Result<usize, PipelineError> {
        self.column_index(label)
            .ok_or_else(|| PipelineError::MissingColumn {
                name: label.to_string(),
            })
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, label: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(label)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Remove the first `n` rows; the frame must have at least `n`.
    pub fn drop_leading_rows(&mut self, n: usize) -> Result<(), PipelineError> {
        if self.rows.len() < n {
            return Err(PipelineError::TooFewRows {
                expected: n,
                found: self.rows.len(),
            });
        }
        self.rows.drain(..n);
        Ok(())
    }

    /// Remove the column at `idx`, returning its label.
    pub fn drop_column_at(&mut self, idx: usize) -> Option<String> {
        if idx >= self.headers.len() {
            return None;
        }
        for row in &mut self.rows {
            row.remove(idx);
        }
        Some(self.headers.remove(idx))
    }

    pub fn drop_column(&mut self, label: &str) -> Result<(), PipelineError> {
        let idx = self.require(label)?;
        self.drop_column_at(idx);
        Ok(())
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), PipelineError> {
        let idx = self.require(from)?;
        self.headers[idx] = to.to_string();
        Ok(())
    }

    /// Stable ascending sort on one column (byte-wise string order).
    pub fn sort_by_column(&mut self, label: &str) -> Result<(), PipelineError> {
        let idx = self.require(label)?;
        self.rows.sort_by(|a, b| a[idx].cmp(&b[idx]));
        Ok(())
    }

    /// Keep rows whose value in `label` satisfies `keep`; returns how many were removed.
    pub fn retain_rows<F>(&mut self, label: &str, mut keep: F) -> Result<usize, PipelineError>
    where
        F: FnMut(&str) -> bool,
    {
        let idx = self.require(label)?;
        let before = self.rows.len();
        self.rows.retain(|r| keep(&r[idx]));
        Ok(before - self.rows.len())
    }

    /// Rewrite every cell of one column in place.
    pub fn map_column<F>(&mut self, label: &str, mut f: F) -> Result<(), PipelineError>
    where
        F: FnMut(&str) -> String,
    {
        let idx = self.require(label)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }
}
