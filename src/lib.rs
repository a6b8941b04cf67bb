// src/lib.rs
pub mod cache;
pub mod criteria;
pub mod error;
pub mod extract;
pub mod filter;
pub mod order;
pub mod record;
pub mod render;
pub mod tokenize;

pub use cache::{cache_path, load_or_tokenize, LoadReport};
pub use criteria::Criteria;
pub use error::{CacheError, CriteriaError, EtlError, ExtractionError};
pub use filter::filter;
pub use order::{limit, order};
pub use record::{Exchange, FilteredRecord, RawRow, Record};
pub use tokenize::{tokenize, tokenize_row, TokenizeStats};
