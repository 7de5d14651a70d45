// src/store/mod.rs

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::{fs, path::Path};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::process::{CleanedDataset, CountryRecord, Frame};

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Write `frame` as comma-delimited text with a header row.
///
/// The file is written next to `path` under a temporary name and renamed
/// into place, so readers never see a half-written file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = frame.len()))]
pub fn write_frame(path: &Path, frame: &Frame) -> Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(tmp.as_file());
        wtr.write_record(frame.headers())
            .context("writing header row")?;
        for (i, row) in frame.rows().iter().enumerate() {
            wtr.write_record(row)
                .with_context(|| format!("writing row {}", i))?;
        }
        wtr.flush().context("flushing CSV writer")?;
    }
    tmp.persist(path)
        .with_context(|| format!("renaming temp file onto {}", path.display()))?;

    debug!(columns = frame.width(), "wrote frame");
    Ok(())
}

/// Read a file written by [`write_frame`] back into a `Frame`, cell for cell.
pub fn read_frame(path: &Path) -> Result<Frame> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(Frame::new(headers, rows)?)
}

/// Reload the cleaned dataset as typed country records.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_dataset(path: &Path) -> Result<CleanedDataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(str::to_owned)
        .collect();

    let records = rdr
        .deserialize::<CountryRecord>()
        .enumerate()
        .map(|(idx, r)| {
            r.with_context(|| format!("decoding record {} of {}", idx, path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(records = records.len(), "loaded dataset");
    Ok(CleanedDataset { headers, records })
}
