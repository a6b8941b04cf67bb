use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns dropped from the searchable blob: scraper-internal identifiers
/// that never carry text a user would search for.
pub const DISCARDED_COLUMNS: [&str; 2] = ["card_id", "scrap_date"];

/// Delimiter between raw column values in the searchable blob.
pub const BLOB_DELIMITER: &str = ",";

/// One source row before typed extraction: raw column name -> raw text,
/// in source column order.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    columns: IndexMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        RawRow {
            columns: IndexMap::new(),
        }
    }

    /// Pairs a CSV data record with its header record.
    pub fn from_csv(headers: &csv::StringRecord, record: &csv::StringRecord) -> Self {
        let mut row = RawRow::new();
        for (name, value) in headers.iter().zip(record.iter()) {
            row.insert(name, value);
        }
        row
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.columns.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns.get(name).map(String::as_str)
    }

    /// Every raw column value except the discardable identifiers, joined
    /// in column order. Used only for keyword containment checks.
    pub fn searchable_blob(&self) -> String {
        self.columns
            .iter()
            .filter(|(name, _)| !DISCARDED_COLUMNS.contains(&name.as_str()))
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(BLOB_DELIMITER)
    }
}

/// Whether the seller accepts an exchange.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Exchange {
    #[serde(rename = "yes")]
    Yes,
    #[serde(rename = "no")]
    No,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exchange::Yes => write!(f, "yes"),
            Exchange::No => write!(f, "no"),
        }
    }
}

/// The canonical typed unit of the system, created once per raw row and
/// immutable afterwards. Field order doubles as the cache column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub brand: String,
    pub model: String,
    pub price: u32,
    pub year: u16,
    pub transmission: String,
    /// Engine volume in cm³; 0 for electric vehicles.
    pub engine: u32,
    pub fuel: String,
    pub mileage: u32,
    pub body: String,
    pub exchange: Exchange,
    /// Serialized under the `card` cache column so keyword filtering
    /// still works after a cache hit.
    #[serde(rename = "card")]
    pub searchable_blob: String,
}

impl Record {
    /// Drops the searchable blob once keyword filtering no longer needs it.
    pub fn into_filtered(self) -> FilteredRecord {
        FilteredRecord {
            brand: self.brand,
            model: self.model,
            price: self.price,
            year: self.year,
            transmission: self.transmission,
            engine: self.engine,
            fuel: self.fuel,
            mileage: self.mileage,
            body: self.body,
            exchange: self.exchange,
        }
    }
}

/// A record past the filter pipeline, with the searchable blob stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredRecord {
    pub brand: String,
    pub model: String,
    pub price: u32,
    pub year: u16,
    pub transmission: String,
    pub engine: u32,
    pub fuel: String,
    pub mileage: u32,
    pub body: String,
    pub exchange: Exchange,
}
