// src/schema/types.rs

/// `id` attribute of the country table on the Worldometer page.
pub const DEFAULT_TABLE_ID: &str = "main_table_countries_today";

/// Cells in a country row of the live table.
pub const WORLDOMETER_ROW_WIDTH: usize = 15;

/// One positional cell we lift out of every data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    /// Index of the `<td>` within a data row.
    pub position: usize,
    /// Column label the extracted values are filed under.
    pub label: &'static str,
    /// Other spellings the page has used for the same header.
    pub aliases: &'static [&'static str],
}

impl SchemaField {
    /// Tolerant match of a header label against this field's label or aliases.
    pub fn matches(&self, header_label: &str) -> bool {
        super::labels_match(self.label, header_label)
            || self
                .aliases
                .iter()
                .any(|alias| super::labels_match(alias, header_label))
    }
}

pub const CASES_PER_MILLION: SchemaField = SchemaField {
    position: 9,
    label: "TotalCases/1M pop",
    aliases: &["Tot\u{a0}Cases/1M pop", "Tot Cases/1M pop"],
};

pub const WORLDOMETER_FIELDS: [SchemaField; 10] = [
    SchemaField {
        position: 1,
        label: "Country,Other",
        aliases: &[],
    },
    SchemaField {
        position: 2,
        label: "TotalCases",
        aliases: &[],
    },
    SchemaField {
        position: 3,
        label: "NewCases",
        aliases: &[],
    },
    SchemaField {
        position: 4,
        label: "TotalDeaths",
        aliases: &[],
    },
    SchemaField {
        position: 5,
        label: "NewDeaths",
        aliases: &[],
    },
    SchemaField {
        position: 6,
        label: "TotalRecovered",
        aliases: &[],
    },
    SchemaField {
        position: 7,
        label: "ActiveCases",
        aliases: &[],
    },
    SchemaField {
        position: 8,
        label: "Serious,Critical",
        aliases: &[],
    },
    CASES_PER_MILLION,
    SchemaField {
        position: 10,
        label: "Deaths/1M pop",
        aliases: &[],
    },
];

/// The implicit contract with the source page, written down: which table,
/// how wide a data row is, and which cells we read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSchema {
    pub table_id: String,
    pub row_width: usize,
    pub fields: Vec<SchemaField>,
}

impl SourceSchema {
    pub fn worldometer() -> Self {
        Self {
            table_id: DEFAULT_TABLE_ID.to_string(),
            row_width: WORLDOMETER_ROW_WIDTH,
            fields: WORLDOMETER_FIELDS.to_vec(),
        }
    }

    pub fn with_table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = table_id.into();
        self
    }
}

impl Default for SourceSchema {
    fn default() -> Self {
        Self::worldometer()
    }
}
