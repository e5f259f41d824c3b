//! Read side of the index: the term dictionary, postings lists and
//! stored-field table, persisted in a sled key-value store.
//!
//! The storage layout is three namespaces inside one sled database:
//! a `postings` tree keyed by `field NUL term` holding bincode-encoded
//! posting lists, a `stored` tree keyed by big-endian doc id holding the
//! stored field values, and a metadata record in the default tree whose
//! presence marks a committed build.

use crate::document::FieldValue;
use crate::error::{Error, Result};
use crate::DocId;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub(crate) const POSTINGS_TREE: &str = "postings";
pub(crate) const STORED_TREE: &str = "stored";
pub(crate) const META_KEY: &[u8] = b"meta";
pub(crate) const FORMAT_VERSION: u32 = 1;

/// Byte span of one term occurrence in the original field text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

/// Occurrences of one term in one field of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_frequency: u32,
    /// Spans in the order the occurrences were produced by analysis.
    /// Empty for numeric terms.
    pub positions: Vec<Span>,
}

/// Index-wide metadata, written last during commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMeta {
    pub doc_count: u32,
    pub version: u32,
    pub created_at: String,
}

/// Stored field values of one document, in field insertion order.
/// Duplicate names keep every pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFields {
    fields: Vec<(String, FieldValue)>,
}

impl StoredFields {
    pub(crate) fn push(&mut self, name: String, value: FieldValue) {
        self.fields.push((name, value));
    }

    /// First value recorded under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

/// Postings keys are `field NUL term`; field names must not contain NUL.
pub(crate) fn term_key(field: &str, term: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(field.len() + term.len() + 1);
    key.extend_from_slice(field.as_bytes());
    key.push(0);
    key.extend_from_slice(term.as_bytes());
    key
}

/// Open the sled database, translating the held-lock signal into
/// [`Error::AlreadyLocked`]. sled surfaces a lock held by another session
/// as an opaque I/O error ("could not acquire database file lock").
pub(crate) fn open_db(path: &Path) -> Result<sled::Db> {
    match sled::open(path) {
        Ok(db) => Ok(db),
        Err(sled::Error::Io(e))
            if e.kind() == std::io::ErrorKind::WouldBlock || e.to_string().contains("lock") =>
        {
            Err(Error::AlreadyLocked(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Read-only handle over a committed index.
///
/// Opening fails with [`Error::AlreadyLocked`] while a writer session holds
/// the location and with [`Error::Corrupt`] when no commit marker is
/// present, so a build that never reached `close` is indistinguishable from
/// an absent index. The handle is `Sync`; concurrent readers need no
/// coordination and reads never modify the store.
pub struct IndexStore {
    _db: sled::Db,
    postings: sled::Tree,
    stored: sled::Tree,
    meta: IndexMeta,
}

impl IndexStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let db = open_db(path)?;
        let raw = db
            .get(META_KEY)?
            .ok_or_else(|| Error::Corrupt(format!("no committed index at {}", path.display())))?;
        let meta: IndexMeta = serde_json::from_slice(&raw)?;
        if meta.version != FORMAT_VERSION {
            return Err(Error::Corrupt(format!("unsupported index version {}", meta.version)));
        }
        let postings = db.open_tree(POSTINGS_TREE)?;
        let stored = db.open_tree(STORED_TREE)?;
        Ok(Self { _db: db, postings, stored, meta })
    }

    /// Postings for `term` in `field`, ordered by ascending doc id.
    /// An absent term is an empty list, not an error.
    pub fn lookup_term(&self, field: &str, term: &str) -> Result<Vec<Posting>> {
        match self.postings.get(term_key(field, term))? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Stored field values of `doc_id`.
    ///
    /// Fails with [`Error::DocNotFound`] if the id is out of range or the
    /// document stored nothing.
    pub fn stored_fields(&self, doc_id: DocId) -> Result<StoredFields> {
        if doc_id >= self.meta.doc_count {
            return Err(Error::DocNotFound(doc_id));
        }
        match self.stored.get(doc_id.to_be_bytes())? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Err(Error::DocNotFound(doc_id)),
        }
    }

    pub fn doc_count(&self) -> u32 { self.meta.doc_count }

    pub fn meta(&self) -> &IndexMeta { &self.meta }
}
