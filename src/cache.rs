//! Cache gate: reuse a previously tokenized dataset when one exists next
//! to the source, otherwise tokenize and persist. The cache is a
//! best-effort speedup, never a correctness boundary: anything that does
//! not match the expected schema counts as a miss and forces
//! re-tokenization.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{CacheError, EtlError};
use crate::record::Record;
use crate::tokenize::{tokenize, TokenizeStats};

/// Inserted between the source file stem and its extension.
pub const CACHE_SUFFIX: &str = "_tokenized";

/// Fixed cache schema; matches the `Record` field order.
pub const CACHE_COLUMNS: [&str; 11] = [
    "brand",
    "model",
    "price",
    "year",
    "transmission",
    "engine",
    "fuel",
    "mileage",
    "body",
    "exchange",
    "card",
];

/// What the gate produced and how it got there.
#[derive(Debug)]
pub struct LoadReport {
    pub records: Vec<Record>,
    /// Empty on a cache hit; the cached rows were already validated once.
    pub stats: TokenizeStats,
    pub from_cache: bool,
    pub cache_path: PathBuf,
}

/// Deterministic cache path: same directory, `<stem>_tokenized<ext>`.
pub fn cache_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{}{}.{}", stem, CACHE_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, CACHE_SUFFIX),
    };
    source.with_file_name(name)
}

/// Loads a tokenized dataset, verifying the schema column-for-column.
pub fn load(path: &Path) -> Result<Vec<Record>, CacheError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    if headers.iter().ne(CACHE_COLUMNS) {
        return Err(CacheError::HeaderMismatch {
            expected: CACHE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: headers.iter().map(|h| h.to_string()).collect(),
        });
    }

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.map_err(|e| CacheError::BadRow {
            line: index + 2, // header occupies line 1
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Writes the tokenized dataset with every field quoted, numeric columns
/// included, so a schema change is never mistaken for data.
pub fn save(path: &Path, records: &[Record]) -> Result<(), EtlError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// The gate itself: cache hit -> load; miss or corruption -> tokenize the
/// source and persist the result. A failed cache write must not fail the
/// run.
pub fn load_or_tokenize(source: &Path) -> Result<LoadReport, EtlError> {
    let cache = cache_path(source);

    if cache.is_file() {
        if let Ok(records) = load(&cache) {
            return Ok(LoadReport {
                records,
                stats: TokenizeStats::default(),
                from_cache: true,
                cache_path: cache,
            });
        }
        // corrupted or stale cache: fall through and rebuild it
    }

    let file = File::open(source).map_err(|e| EtlError::SourceUnavailable {
        path: source.to_path_buf(),
        source: e,
    })?;
    let (records, stats) = tokenize(file)?;

    if let Err(err) = save(&cache, &records) {
        eprintln!(
            "carsift: warning: could not write cache '{}': {}",
            cache.display(),
            err
        );
    }

    Ok(LoadReport {
        records,
        stats,
        from_cache: false,
        cache_path: cache,
    })
}
