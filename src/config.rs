// src/config.rs

use clap::Parser;
use std::path::PathBuf;
use url::Url;

use crate::fetch::DEFAULT_URL;
use crate::schema::DEFAULT_TABLE_ID;

pub const DEFAULT_OUTPUT: &str = "covid19_latest.csv";
pub const DEFAULT_CHARTS_DIR: &str = "charts";

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Scrape the Worldometer COVID-19 country table, clean it, and render world maps"
)]
pub struct Args {
    /// Page holding the country statistics table
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: Url,

    /// Read the page from a local HTML file instead of fetching it
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_TABLE_ID)]
    pub table_id: String,

    /// Where the cleaned dataset is written (and reloaded from)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    #[arg(long, default_value = DEFAULT_CHARTS_DIR)]
    pub charts_dir: PathBuf,

    /// Stop after writing the cleaned dataset
    #[arg(long)]
    pub no_charts: bool,

    /// Open the rendered charts with the system's default handler
    #[arg(long)]
    pub open: bool,
}

/// Where the HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    File(PathBuf),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolved run configuration, passed explicitly to each stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub table_id: String,
    pub output: PathBuf,
    /// `None` skips chart rendering.
    pub charts_dir: Option<PathBuf>,
    pub open: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let source = match args.input {
            Some(path) => Source::File(path),
            None => Source::Remote(args.url),
        };
        Config {
            source,
            table_id: args.table_id,
            output: args.output,
            charts_dir: (!args.no_charts).then_some(args.charts_dir),
            open: args.open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_worldometer() {
        let args = Args::parse_from(["covidmap"]);
        let cfg = Config::from(args);
        assert_eq!(cfg.source, Source::Remote(Url::parse(DEFAULT_URL).unwrap()));
        assert_eq!(cfg.table_id, "main_table_countries_today");
        assert_eq!(cfg.output, PathBuf::from("covid19_latest.csv"));
        assert_eq!(cfg.charts_dir, Some(PathBuf::from("charts")));
        assert!(!cfg.open);
    }

    #[test]
    fn input_file_overrides_url() {
        let args = Args::parse_from([
            "covidmap",
            "--input",
            "page.html",
            "--output",
            "/tmp/out.csv",
            "--no-charts",
        ]);
        let cfg = Config::from(args);
        assert_eq!(cfg.source, Source::File(PathBuf::from("page.html")));
        assert_eq!(cfg.output, PathBuf::from("/tmp/out.csv"));
        assert_eq!(cfg.charts_dir, None);
    }
}
