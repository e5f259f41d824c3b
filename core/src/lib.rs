pub mod analyzer;
pub mod document;
pub mod error;
pub mod search;
pub mod store;
pub mod writer;

pub use analyzer::{Analyzer, Token};
pub use document::{Document, Field, FieldValue};
pub use error::{Error, Result};
pub use search::{search, SearchHit};
pub use store::{IndexMeta, IndexStore, Posting, Span, StoredFields};
pub use writer::IndexWriter;

pub type DocId = u32;
