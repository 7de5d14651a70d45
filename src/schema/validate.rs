// src/schema/validate.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::types::SourceSchema;
use crate::error::PipelineError;

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("label regex should parse"));

/// Reduce a header label to lowercase ASCII alphanumerics, so that
/// `"Tot\u{a0}Cases/1M pop"` and `"tot cases 1m pop"` compare equal.
pub fn normalize_label(label: &str) -> String {
    NON_ALNUM.replace_all(label, "").to_ascii_lowercase()
}

pub fn labels_match(a: &str, b: &str) -> bool {
    normalize_label(a) == normalize_label(b)
}

/// Resolve every declared field to a column of `header`.
///
/// Returns, per field in schema order, the index of the header label it
/// matched. An exact label wins over a tolerant match, and each header column
/// is claimed by at most one field.
pub fn validate_header(
    schema: &SourceSchema,
    header: &[String],
) -> Result<Vec<usize>, PipelineError> {
    if header.len() < schema.fields.len() {
        warn!(
            found = header.len(),
            expected = schema.fields.len(),
            "header shorter than schema"
        );
        return Err(PipelineError::HeaderTooShort {
            expected: schema.fields.len(),
            found: header.len(),
        });
    }

    let mut claimed = vec![false; header.len()];
    let mut resolved = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let free = |i: &usize| !claimed[*i];
        let exact = (0..header.len())
            .filter(free)
            .find(|&i| header[i] == field.label);
        let tolerant = || {
            (0..header.len())
                .filter(free)
                .find(|&i| field.matches(&header[i]))
        };
        let idx = match exact.or_else(tolerant) {
            Some(i) => i,
            None => {
                warn!(field = field.label, ?header, "field missing from header");
                return Err(PipelineError::SchemaDrift {
                    field: field.label.to_string(),
                    header: header.to_vec(),
                });
            }
        };
        if header[idx] != field.label {
            debug!(field = field.label, header = %header[idx], "field matched tolerantly");
        }
        claimed[idx] = true;
        resolved.push(idx);
    }
    Ok(resolved)
}
