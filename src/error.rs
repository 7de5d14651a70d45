// src/error.rs

use thiserror::Error;

/// Failures that abort a run. Transport problems never show up here directly:
/// the fetcher logs them and hands back `None`, which becomes `NoContent`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("no HTML content received from {origin}")]
    NoContent { origin: String },

    #[error("no <table id=\"{id}\"> in document")]
    TableNotFound { id: String },

    #[error("schema drift: field {field:?} not found in header {header:?}")]
    SchemaDrift { field: String, header: Vec<String> },

    #[error("schema drift: header has {found} labels, expected at least {expected}")]
    HeaderTooShort { expected: usize, found: usize },

    #[error("missing expected column {name:?}")]
    MissingColumn { name: String },

    #[error("expected at least {expected} rows, found {found}")]
    TooFewRows { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}
