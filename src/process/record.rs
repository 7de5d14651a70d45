// src/process/record.rs

use serde::{Deserialize, Serialize};

use super::utils::parse_count;

/// One country row of the cleaned dataset. Values stay as the page's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "TotalCases")]
    pub total_cases: String,
    #[serde(rename = "NewCases")]
    pub new_cases: String,
    #[serde(rename = "TotalDeaths")]
    pub total_deaths: String,
    #[serde(rename = "NewDeaths")]
    pub new_deaths: String,
    #[serde(rename = "TotalRecovered")]
    pub total_recovered: String,
    #[serde(rename = "ActiveCases")]
    pub active_cases: String,
    #[serde(rename = "Serious/Critical")]
    pub serious_critical: String,
    #[serde(rename = "TotalCases/1M pop")]
    pub cases_per_million: String,
    #[serde(rename = "Deaths/1M pop")]
    pub deaths_per_million: String,
}

impl CountryRecord {
    pub fn total_cases_value(&self) -> Option<f64> {
        parse_count(&self.total_cases)
    }

    pub fn total_deaths_value(&self) -> Option<f64> {
        parse_count(&self.total_deaths)
    }
}

/// The cleaned, sorted country table as reloaded from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedDataset {
    /// Column labels in file order.
    pub headers: Vec<String>,
    pub records: Vec<CountryRecord>,
}

impl CleanedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.country.as_str())
    }
}
