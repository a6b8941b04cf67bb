use std::path::PathBuf;

/// A single field extractor could not parse its segment. Carries the
/// attribute name and the offending input; the tokenizer collects these
/// as per-row drops instead of aborting the batch.
#[derive(Debug, Clone, thiserror::Error)]
#[error("cannot extract '{field}' from {input:?}: {reason}")]
pub struct ExtractionError {
    pub field: &'static str,
    pub input: String,
    pub reason: String,
}

impl ExtractionError {
    pub fn new(field: &'static str, input: &str, reason: impl Into<String>) -> Self {
        ExtractionError {
            field,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Contradictory filter bounds, surfaced before any filtering runs.
#[derive(Debug, thiserror::Error)]
pub enum CriteriaError {
    #[error("invalid {field} range: lower bound {from} exceeds upper bound {to}")]
    InvertedRange {
        field: &'static str,
        from: u32,
        to: u32,
    },
}

/// Cache file does not match the expected schema. Always handled as a
/// cache miss by the cache gate, never propagated to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("cache row at line {line} does not deserialize: {reason}")]
    BadRow { line: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal conditions of one ETL run.
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("source file '{path}' is not available: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source data has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
