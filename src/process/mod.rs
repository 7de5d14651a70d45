// src/process/mod.rs
pub mod clean;
pub mod frame;
pub mod record;
pub mod utils;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, trace, warn};

pub use clean::{clean_data, clean_frame, CleanOptions};
pub use frame::Frame;
pub use record::{CleanedDataset, CountryRecord};

use crate::error::PipelineError;
use crate::schema::{validate_header, SourceSchema};
use utils::{first_text, full_text_rtrim, PLACEHOLDER};

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("selector should parse"));
static HEADER_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("selector should parse"));
static DATA_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("selector should parse"));

#[derive(Debug)]
pub struct RawTable {
    /// Text of the first row's `<th>` cells, right-trimmed.
    pub headers: Vec<String>,
    /// Every following `<tr>`, as the text of its `<td>` cells.
    pub rows: Vec<Vec<String>>,
}

/// Find `<table id="{table_id}">` in `html` and read out its rows.
#[tracing::instrument(level = "info", skip(html), fields(bytes = html.len()))]
pub fn locate_table(html: &[u8], table_id: &str) -> Result<RawTable> {
    let text = String::from_utf8_lossy(html);
    let document = Html::parse_document(&text);
    let selector_src = format!("table[id=\"{}\"]", table_id);
    let selector = Selector::parse(&selector_src)
        .map_err(|e| anyhow!("invalid table selector {:?}: {:?}", selector_src, e))?;

    let mut matches = document.select(&selector);
    let table = matches.next().ok_or_else(|| PipelineError::TableNotFound {
        id: table_id.to_string(),
    })?;
    if matches.next().is_some() {
        warn!(table_id, "more than one matching table; using the first");
    }

    let mut rows = table.select(&ROW);
    let headers: Vec<String> = rows
        .next()
        .map(|tr| tr.select(&HEADER_CELL).map(full_text_rtrim).collect())
        .unwrap_or_default();

    let rows: Vec<Vec<String>> = rows
        .map(|tr| tr.select(&DATA_CELL).map(first_text).collect())
        .collect();

    debug!(headers = headers.len(), rows = rows.len(), "located table");
    Ok(RawTable { headers, rows })
}

/// Lift the schema's positional cells out of every data row and file them
/// under the header column each field resolved to.
///
/// A row is a data row iff it has exactly `schema.row_width` cells; anything
/// else is skipped. A column matched only tolerantly takes the field's
/// canonical label. Header columns no field targets are filled with `"0"`.
#[tracing::instrument(level = "info", skip_all, fields(rows = raw.rows.len()))]
pub fn extract_rows(raw: &RawTable, schema: &SourceSchema) -> Result<Frame, PipelineError> {
    // Duplicate header labels collapse onto the first occurrence.
    let mut seen = HashSet::new();
    let mut headers: Vec<String> = raw
        .headers
        .iter()
        .filter(|h| seen.insert(h.as_str()))
        .cloned()
        .collect();

    let resolved = validate_header(schema, &headers)?;

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); schema.fields.len()];
    let mut data_rows = 0usize;
    for (i, row) in raw.rows.iter().enumerate() {
        if row.len() != schema.row_width {
            trace!(row = i, cells = row.len(), "skipping non-data row");
            continue;
        }
        for (column, field) in columns.iter_mut().zip(&schema.fields) {
            column.push(row.get(field.position).cloned().unwrap_or_default());
        }
        data_rows += 1;
    }
    if data_rows == 0 {
        warn!(
            row_width = schema.row_width,
            "no data rows of the expected width; the page layout may have changed"
        );
    }

    // For each output column, the extracted field feeding it (if any).
    let mut sources: Vec<Option<usize>> = vec![None; headers.len()];
    for (fi, (field, &ci)) in schema.fields.iter().zip(&resolved).enumerate() {
        if headers[ci] != field.label {
            debug!(from = %headers[ci], to = field.label, "relabelling column");
            headers[ci] = field.label.to_string();
        }
        sources[ci] = Some(fi);
    }

    let rows: Vec<Vec<String>> = (0..data_rows)
        .map(|r| {
            sources
                .iter()
                .map(|src| match src {
                    Some(fi) => columns[*fi][r].clone(),
                    None => PLACEHOLDER.to_string(),
                })
                .collect()
        })
        .collect();

    info!(data_rows, columns = headers.len(), "extracted rows");
    Frame::new(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CASES_PER_MILLION;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,covidmap::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    const HEADER: [&str; 13] = [
        "Country,Other",
        "TotalCases",
        "NewCases",
        "TotalDeaths",
        "NewDeaths",
        "TotalRecovered",
        "ActiveCases",
        "Serious,Critical",
        "Tot&nbsp;Cases/1M pop",
        "Deaths/1M pop",
        "TotalTests",
        "Tests/\n1M pop",
        "Continent",
    ];

    fn row_html(cells: &[String]) -> String {
        let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
        format!("<tr>{}</tr>", tds)
    }

    /// A data row of `width` cells for `country`: cell i holds "<country>-i".
    fn cells(country: &str, width: usize) -> Vec<String> {
        (0..width)
            .map(|i| match i {
                1 => format!("<a href=\"country/x/\">{}</a>", country),
                _ => format!("{}-{}", country, i),
            })
            .collect()
    }

    fn page(rows: &[Vec<String>]) -> String {
        let ths: String = HEADER.iter().map(|h| format!("<th>{} </th>", h)).collect();
        let body: String = rows.iter().map(|r| row_html(r)).collect();
        format!(
            "<html><body><table id=\"other\"><tr><td>x</td></tr></table>\
             <table id=\"main_table_countries_today\"><thead><tr>{}</tr></thead>\
             <tbody>{}</tbody></table></body></html>",
            ths, body
        )
    }

    #[test]
    fn header_labels_are_right_trimmed() -> Result<()> {
        let html = page(&[]);
        let raw = locate_table(html.as_bytes(), "main_table_countries_today")?;
        assert_eq!(raw.headers.len(), 13);
        assert_eq!(raw.headers[0], "Country,Other");
        assert_eq!(raw.headers[8], "Tot\u{a0}Cases/1M pop");
        assert_eq!(raw.headers[11], "Tests/\n1M pop");
        assert!(raw.rows.is_empty());
        Ok(())
    }

    #[test]
    fn missing_table_is_reported() {
        let err = locate_table(b"<html><table id=\"nope\"></table></html>", "main").unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::TableNotFound { id: "main".into() })
        );
    }

    #[test]
    fn extracts_data_rows_in_order() -> Result<()> {
        init_test_logging();
        let countries = ["Peru", "Chad", "Fiji", "Oman"];
        let rows: Vec<Vec<String>> = countries.iter().map(|c| cells(c, 15)).collect();
        let html = page(&rows);

        let raw = locate_table(html.as_bytes(), "main_table_countries_today")?;
        let frame = extract_rows(&raw, &SourceSchema::worldometer())?;

        assert_eq!(frame.len(), countries.len());
        assert_eq!(frame.column("Country,Other").unwrap(), countries);
        assert_eq!(
            frame.column("TotalCases").unwrap(),
            ["Peru-2", "Chad-2", "Fiji-2", "Oman-2"]
        );
        assert_eq!(frame.column("Deaths/1M pop").unwrap()[1], "Chad-10");
        Ok(())
    }

    #[test]
    fn rows_of_other_widths_never_appear() -> Result<()> {
        let rows = vec![
            cells("Short", 14),
            cells("Kept", 15),
            cells("Long", 16),
            vec![],
            cells("AlsoKept", 15),
        ];
        let html = page(&rows);
        let raw = locate_table(html.as_bytes(), "main_table_countries_today")?;
        let frame = extract_rows(&raw, &SourceSchema::worldometer())?;
        assert_eq!(frame.column("Country,Other").unwrap(), ["Kept", "AlsoKept"]);
        Ok(())
    }

    #[test]
    fn unmatched_labels_get_placeholders() -> Result<()> {
        let html = page(&[cells("Chad", 15)]);
        let raw = locate_table(html.as_bytes(), "main_table_countries_today")?;
        let frame = extract_rows(&raw, &SourceSchema::worldometer())?;

        // the page's nbsp spelling is filled in place under the canonical label
        assert_eq!(frame.width(), 13);
        assert_eq!(frame.headers()[8], CASES_PER_MILLION.label);
        assert_eq!(frame.column(CASES_PER_MILLION.label).unwrap(), ["Chad-9"]);
        assert!(frame.column_index("Tot\u{a0}Cases/1M pop").is_none());
        assert_eq!(frame.column("Continent").unwrap(), ["0"]);
        assert_eq!(frame.column("TotalTests").unwrap(), ["0"]);
        Ok(())
    }

    #[test]
    fn loosely_matched_label_is_filled_in_place() -> Result<()> {
        init_test_logging();
        let html = page(&[cells("Chad", 15)]).replace("<th>TotalDeaths ", "<th>Total Deaths ");
        let raw = locate_table(html.as_bytes(), "main_table_countries_today")?;
        assert_eq!(raw.headers[3], "Total Deaths");

        let frame = extract_rows(&raw, &SourceSchema::worldometer())?;
        assert_eq!(frame.width(), 13);
        assert_eq!(frame.headers()[3], "TotalDeaths");
        assert_eq!(frame.column("TotalDeaths").unwrap(), ["Chad-4"]);
        assert!(frame.column_index("Total Deaths").is_none());
        Ok(())
    }

    #[test]
    fn both_spellings_leave_one_placeholder_twin() -> Result<()> {
        let html = page(&[cells("Chad", 15)]).replace(
            "<th>Continent </th>",
            "<th>Continent </th><th>TotalCases/1M pop</th>",
        );
        let raw = locate_table(html.as_bytes(), "main_table_countries_today")?;
        let frame = extract_rows(&raw, &SourceSchema::worldometer())?;

        assert_eq!(frame.width(), 14);
        assert_eq!(frame.column(CASES_PER_MILLION.label).unwrap(), ["Chad-9"]);
        assert_eq!(frame.column("Tot\u{a0}Cases/1M pop").unwrap(), ["0"]);
        Ok(())
    }

    #[test]
    fn drifted_header_fails_extraction() -> Result<()> {
        let html = page(&[cells("Chad", 15)]).replace("TotalDeaths", "Fatalities");
        let raw = locate_table(html.as_bytes(), "main_table_countries_today")?;
        let err = extract_rows(&raw, &SourceSchema::worldometer()).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaDrift { .. }));
        Ok(())
    }
}
