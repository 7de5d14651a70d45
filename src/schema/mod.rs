pub mod types;
pub mod validate;

pub use types::{SchemaField, SourceSchema, CASES_PER_MILLION, DEFAULT_TABLE_ID, WORLDOMETER_FIELDS};
pub use validate::{labels_match, normalize_label, validate_header};
