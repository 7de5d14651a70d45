// src/pipeline.rs

use anyhow::{Context, Result};
use chrono::Local;
use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::fetch;
use crate::process::{self, CleanOptions, CleanedDataset};
use crate::schema::SourceSchema;
use crate::visual;

/// Fetch → locate → extract → clean (write + reload). Returns the reloaded dataset.
pub async fn build_dataset(client: &Client, config: &Config) -> Result<CleanedDataset> {
    let html = fetch::load_source(client, &config.source).await?;

    let schema = SourceSchema::worldometer().with_table_id(config.table_id.as_str());
    let raw = process::locate_table(&html, &schema.table_id)
        .with_context(|| format!("locating country table in {}", config.source))?;
    let frame = process::extract_rows(&raw, &schema)
        .with_context(|| format!("extracting rows from {}", config.source))?;
    drop(raw);

    let dataset = process::clean_data(frame, &CleanOptions::default(), &config.output)?;
    info!(
        countries = dataset.len(),
        path = %config.output.display(),
        "cleaned dataset ready"
    );
    Ok(dataset)
}

/// The whole run: build the dataset, then render (and optionally open) the maps.
pub async fn run(client: &Client, config: &Config) -> Result<CleanedDataset> {
    let dataset = build_dataset(client, config).await?;

    if let Some(dir) = &config.charts_dir {
        let pages = visual::write_charts(&dataset, dir, Local::now().date_naive())?;
        if config.open {
            for page in &pages {
                visual::open_in_browser(page);
            }
        }
    }
    Ok(dataset)
}
