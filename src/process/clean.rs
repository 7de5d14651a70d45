// src/process/clean.rs

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use super::frame::Frame;
use super::record::CleanedDataset;
use super::utils::strip_commas;
use crate::error::PipelineError;
use crate::schema::{SchemaField, CASES_PER_MILLION};
use crate::store;

/// Knobs for each cleaning step. `Default` matches the live Worldometer page.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Leading summary rows (continents) to discard.
    pub skip_rows: usize,
    /// Columns dropped by exact label.
    pub drop_columns: Vec<String>,
    /// Field whose placeholder twin in the page header gets removed.
    pub duplicate_of: SchemaField,
    /// `(from, to)` label renames.
    pub renames: Vec<(String, String)>,
    /// Column holding the country name, after renaming.
    pub key_column: String,
    /// Country names that are aggregates or ships, not countries.
    pub exclude: Vec<String>,
    /// Columns whose thousands separators are stripped.
    pub numeric_columns: Vec<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            skip_rows: 7,
            drop_columns: owned(&["Continent", "TotalTests", "Tests/\n1M pop"]),
            duplicate_of: CASES_PER_MILLION,
            renames: vec![
                ("Country,Other".into(), "Country".into()),
                ("Serious,Critical".into(), "Serious/Critical".into()),
            ],
            key_column: "Country".into(),
            exclude: owned(&["World", "Total:", "Diamond Princess", "MS Zaandam"]),
            numeric_columns: owned(&[
                "TotalDeaths",
                "TotalCases",
                "NewCases",
                "TotalRecovered",
                "NewDeaths",
                "ActiveCases",
            ]),
        }
    }
}

/// Remove any leftover column that spells the cases-per-million label
/// differently from the canonical one.
///
/// Twins are found by tolerant name match. Only when the canonical column is
/// absent as well does it fall back to deleting the column three from the end.
fn drop_duplicate_column(frame: &mut Frame, field: &SchemaField) -> Result<(), PipelineError> {
    let twins: Vec<String> = frame
        .headers()
        .iter()
        .filter(|h| h.as_str() != field.label && field.matches(h))
        .cloned()
        .collect();

    if !twins.is_empty() {
        for twin in &twins {
            debug!(twin = %twin, "dropping duplicate column");
            frame.drop_column(twin)?;
        }
        return Ok(());
    }

    if frame.column_index(field.label).is_some() {
        debug!(label = field.label, "no duplicate column");
        return Ok(());
    }

    let idx = frame
        .width()
        .checked_sub(3)
        .ok_or_else(|| PipelineError::MissingColumn {
            name: format!("duplicate of {}", field.label),
        })?;
    let dropped = frame.drop_column_at(idx).unwrap_or_default();
    warn!(
        label = field.label,
        dropped = %dropped,
        "no column matches by name; dropped by position (degraded)"
    );
    Ok(())
}

/// Steps 1–7: trim summary rows and unwanted columns, normalise labels,
/// sort, drop non-country rows, strip thousands separators.
#[instrument(level = "info", skip_all, fields(rows = frame.len(), columns = frame.width()))]
pub fn clean_frame(mut frame: Frame, opts: &CleanOptions) -> Result<Frame, PipelineError> {
    frame.drop_leading_rows(opts.skip_rows)?;

    for label in &opts.drop_columns {
        frame.drop_column(label)?;
    }

    drop_duplicate_column(&mut frame, &opts.duplicate_of)?;

    for (from, to) in &opts.renames {
        frame.rename_column(from, to)?;
    }

    frame.sort_by_column(&opts.key_column)?;

    let removed = frame.retain_rows(&opts.key_column, |name| {
        !opts.exclude.iter().any(|x| x == name)
    })?;
    debug!(removed, "dropped aggregate and non-country rows");

    for label in &opts.numeric_columns {
        frame.map_column(label, strip_commas)?;
    }

    info!(rows = frame.len(), columns = frame.width(), "cleaned frame");
    Ok(frame)
}

/// Clean `frame`, write it to `output`, and return what reads back from disk.
pub fn clean_data(frame: Frame, opts: &CleanOptions, output: &Path) -> Result<CleanedDataset> {
    let cleaned = clean_frame(frame, opts)?;
    store::write_frame(output, &cleaned)
        .with_context(|| format!("persisting cleaned data to {}", output.display()))?;
    store::load_dataset(output)
        .with_context(|| format!("reloading cleaned data from {}", output.display()))
}
