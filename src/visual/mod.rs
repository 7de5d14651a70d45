// src/visual/mod.rs
pub mod figures;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::{info, warn};

pub use figures::{choropleth, globe, Figure};

use crate::process::CleanedDataset;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Standalone HTML page that draws `figure` (and plays its frames, if any).
pub fn render_page(title: &str, figure: &Figure) -> Result<String> {
    // `</` inside a <script> block would end it early.
    let json = serde_json::to_string(figure)
        .context("serializing figure")?
        .replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:95vh;"></div>
<script>
const figure = {json};
Plotly.newPlot("chart", figure.data, figure.layout).then(function () {{
  if (figure.frames) {{
    Plotly.addFrames("chart", figure.frames);
  }}
}});
</script>
</body>
</html>
"#,
        title = title,
        cdn = PLOTLY_CDN,
        json = json,
    ))
}

/// Render both maps into `dir`, returning the written page paths.
#[tracing::instrument(level = "info", skip(ds), fields(countries = ds.len()))]
pub fn write_charts(ds: &CleanedDataset, dir: &Path, as_of: NaiveDate) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let pages = [
        ("choropleth.html", "COVID-19 deaths", choropleth(ds, as_of)),
        ("globe.html", "COVID-19 cases", globe(ds, as_of)),
    ];

    let mut written = Vec::with_capacity(pages.len());
    for (file, title, figure) in &pages {
        let path = dir.join(file);
        let html = render_page(title, figure)?;
        fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote chart");
        written.push(path);
    }
    Ok(written)
}

/// Hand `path` to the platform's default opener. Failures are logged only.
pub fn open_in_browser(path: &Path) {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    match cmd.arg(path).status() {
        Ok(status) if status.success() => info!(path = %path.display(), "opened chart"),
        Ok(status) => warn!(path = %path.display(), %status, "opener exited unsuccessfully"),
        Err(e) => warn!(path = %path.display(), error = %e, "could not launch opener"),
    }
}
