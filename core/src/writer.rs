//! Build side of the index: assigns doc ids, analyzes indexed fields and
//! buffers postings and stored values until `close` commits everything.

use crate::analyzer::Analyzer;
use crate::document::{Document, FieldValue};
use crate::error::{Error, Result};
use crate::store::{
    open_db, term_key, IndexMeta, Posting, Span, StoredFields, FORMAT_VERSION, META_KEY,
    POSTINGS_TREE, STORED_TREE,
};
use crate::DocId;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Single-writer build session over one index location.
///
/// Exactly one session may be open against a location; the storage file
/// lock rejects a second writer with [`Error::AlreadyLocked`]. The whole
/// build is buffered in memory and nothing becomes visible to readers
/// before [`close`](IndexWriter::close) — a session dropped without
/// closing leaves the previous index generation untouched.
pub struct IndexWriter {
    db: sled::Db,
    path: PathBuf,
    analyzer: Analyzer,
    next_doc_id: DocId,
    postings: BTreeMap<(String, String), Vec<Posting>>,
    stored: Vec<StoredFields>,
}

impl IndexWriter {
    /// Open a build session at `path`, creating the location if absent.
    pub fn open<P: AsRef<Path>>(path: P, analyzer: Analyzer) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let db = open_db(&path)?;
        Ok(Self {
            db,
            path,
            analyzer,
            next_doc_id: 0,
            postings: BTreeMap::new(),
            stored: Vec::new(),
        })
    }

    /// Analyze and buffer one document, returning its assigned id.
    ///
    /// Ids are zero-based and strictly sequential within the session. Every
    /// indexed text field runs through the analyzer; an indexed numeric
    /// field becomes a single exact-match term with no positions; every
    /// stored field value is recorded for retrieval. On error nothing of
    /// the document is kept.
    pub fn add_document(&mut self, doc: Document) -> Result<DocId> {
        for field in doc.fields() {
            if field.name().contains('\0') {
                return Err(Error::InvalidArgument(format!(
                    "field name {:?} contains NUL",
                    field.name()
                )));
            }
        }

        let doc_id = self.next_doc_id;
        // Accumulate per (field, term) so that repeated terms, including
        // ones arriving from duplicate field names, land in one posting.
        let mut terms: HashMap<(String, String), (u32, Vec<Span>)> = HashMap::new();
        let mut stored = StoredFields::default();

        for field in doc.fields() {
            if field.is_indexed() {
                match field.value() {
                    FieldValue::Text(text) => {
                        if text.len() > u32::MAX as usize {
                            return Err(Error::Analysis {
                                field: field.name().to_string(),
                                reason: "text exceeds the representable offset range".into(),
                            });
                        }
                        for token in self.analyzer.analyze(text) {
                            let slot = terms
                                .entry((field.name().to_string(), token.term))
                                .or_insert_with(|| (0, Vec::new()));
                            slot.0 += 1;
                            slot.1.push(Span {
                                start: token.start as u32,
                                end: token.end as u32,
                            });
                        }
                    }
                    FieldValue::Number(n) => {
                        let slot = terms
                            .entry((field.name().to_string(), n.to_string()))
                            .or_insert_with(|| (0, Vec::new()));
                        slot.0 += 1;
                    }
                }
            }
            if field.is_stored() {
                stored.push(field.name().to_string(), field.value().clone());
            }
        }

        for ((field, term), (term_frequency, positions)) in terms {
            self.postings
                .entry((field, term))
                .or_default()
                .push(Posting { doc_id, term_frequency, positions });
        }
        self.stored.push(stored);
        self.next_doc_id += 1;
        tracing::debug!(doc_id, "buffered document");
        Ok(doc_id)
    }

    /// Commit the buffered build and make it durable.
    ///
    /// Removes the previous commit marker, replaces the postings and
    /// stored trees, writes the new marker last and flushes. A crash
    /// mid-commit leaves a location with no marker, which refuses to open
    /// as an index. Zero added documents still commit a valid, empty,
    /// queryable index. The session ends; further writes are impossible.
    pub fn close(self) -> Result<()> {
        let postings_tree = self.db.open_tree(POSTINGS_TREE)?;
        let stored_tree = self.db.open_tree(STORED_TREE)?;

        self.db.remove(META_KEY)?;
        postings_tree.clear()?;
        stored_tree.clear()?;

        let term_count = self.postings.len();
        for ((field, term), postings) in &self.postings {
            postings_tree.insert(term_key(field, term), bincode::serialize(postings)?)?;
        }
        for (doc_id, fields) in self.stored.iter().enumerate() {
            if fields.is_empty() {
                continue;
            }
            stored_tree.insert((doc_id as DocId).to_be_bytes(), bincode::serialize(fields)?)?;
        }

        let meta = IndexMeta {
            doc_count: self.next_doc_id,
            version: FORMAT_VERSION,
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| String::new()),
        };
        self.db.insert(META_KEY, serde_json::to_vec(&meta)?)?;
        self.db.flush()?;
        tracing::info!(
            path = %self.path.display(),
            doc_count = meta.doc_count,
            terms = term_count,
            "index committed"
        );
        Ok(())
    }
}
