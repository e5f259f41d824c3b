//! Single-term query execution over a committed index.

use crate::error::{Error, Result};
use crate::store::{IndexStore, StoredFields};
use crate::DocId;
use std::cmp::Ordering;

/// One ranked result with its retrievable field values.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
    pub fields: StoredFields,
}

/// Look up `term` in `field` and return the `top_k` best documents, ranked
/// by descending score with ties broken by ascending doc id.
///
/// The score is `(1 + ln(tf)) * ln(1 + N/df)` — deterministic and strictly
/// increasing in term frequency. The smoothed idf factor never reaches
/// zero, so the frequency ordering survives even for a term present in
/// every document. An absent term yields an empty list, not an error.
/// Purely a read; a failed search cannot corrupt the store.
pub fn search(store: &IndexStore, field: &str, term: &str, top_k: usize) -> Result<Vec<SearchHit>> {
    if top_k == 0 {
        return Err(Error::InvalidArgument("top_k must be positive".into()));
    }

    let postings = store.lookup_term(field, term)?;
    if postings.is_empty() {
        return Ok(Vec::new());
    }

    let n = store.doc_count().max(1) as f32;
    let df = postings.len() as f32;
    let idf = (1.0 + n / df).ln();

    let mut scored: Vec<(DocId, f32)> = postings
        .iter()
        .map(|p| {
            let tf = 1.0 + (p.term_frequency.max(1) as f32).ln();
            (p.doc_id, tf * idf)
        })
        .collect();
    // Stable sort: postings arrive in ascending doc id order, so equal
    // scores keep that order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_k);

    let mut hits = Vec::with_capacity(scored.len());
    for (doc_id, score) in scored {
        let fields = match store.stored_fields(doc_id) {
            Ok(fields) => fields,
            // A document that stored nothing is still a legitimate hit.
            Err(Error::DocNotFound(_)) => StoredFields::default(),
            Err(e) => return Err(e),
        };
        hits.push(SearchHit { doc_id, score, fields });
    }
    tracing::debug!(field, term, hits = hits.len(), "term query executed");
    Ok(hits)
}
