use crate::error::{Error, Result};
use crate::weighting::WeightingScheme;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub type DocId = u32;

/// Raw occurrence counts: term -> doc -> count.
pub type RawIndex = HashMap<String, HashMap<DocId, u32>>;

/// Weighted postings: term -> doc -> weight.
pub type Postings = HashMap<DocId, f64>;

/// Distinct document ids appearing anywhere in the index.
pub fn document_ids(raw: &RawIndex) -> BTreeSet<DocId> {
    raw.values().flat_map(|docs| docs.keys().copied()).collect()
}

/// Rejects indexes that cannot be weighted: no documents at all, or an
/// entry with a zero count.
pub fn validate(raw: &RawIndex) -> Result<()> {
    for (term, docs) in raw {
        if let Some((&doc_id, _)) = docs.iter().find(|&(_, &count)| count == 0) {
            return Err(Error::ZeroCount { term: term.clone(), doc_id });
        }
    }
    if raw.values().all(|docs| docs.is_empty()) {
        return Err(Error::EmptyIndex);
    }
    Ok(())
}

/// Inverse document frequencies, computed once from the unweighted index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdfTable {
    idfs: HashMap<String, f64>,
}

impl IdfTable {
    pub fn from_raw(raw: &RawIndex, num_docs: usize) -> Self {
        let n = num_docs as f64;
        let idfs = raw
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(term, docs)| (term.clone(), (n / docs.len() as f64).ln()))
            .collect();
        Self { idfs }
    }

    /// Idf of `term`, or 0.0 for terms outside the index.
    pub fn get(&self, term: &str) -> f64 { self.idfs.get(term).copied().unwrap_or(0.0) }

    pub fn len(&self) -> usize { self.idfs.len() }
    pub fn is_empty(&self) -> bool { self.idfs.is_empty() }
}

/// Document -> (term -> raw count). The sparse transpose of the raw index.
#[derive(Debug, Clone, Default)]
pub struct DocTerms {
    docs: HashMap<DocId, HashMap<String, u32>>,
}

impl DocTerms {
    pub fn from_raw(raw: &RawIndex) -> Self {
        let mut docs: HashMap<DocId, HashMap<String, u32>> = HashMap::new();
        for (term, postings) in raw {
            for (&doc_id, &count) in postings {
                docs.entry(doc_id).or_default().insert(term.clone(), count);
            }
        }
        Self { docs }
    }

    /// Terms occurring in `doc_id`, in no particular order.
    pub fn terms(&self, doc_id: DocId) -> impl Iterator<Item = &str> {
        self.docs.get(&doc_id).into_iter().flat_map(|terms| terms.keys().map(String::as_str))
    }

    pub fn count(&self, doc_id: DocId, term: &str) -> Option<u32> {
        self.docs.get(&doc_id)?.get(term).copied()
    }

    pub fn contains(&self, doc_id: DocId) -> bool { self.docs.contains_key(&doc_id) }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ { self.docs.keys().copied() }

    pub fn num_docs(&self) -> usize { self.docs.len() }
}

/// The index after term weighting. Built from the raw index, which is left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct WeightedIndex {
    postings: HashMap<String, Postings>,
}

impl WeightedIndex {
    pub fn from_raw(raw: &RawIndex, scheme: WeightingScheme, idf: &IdfTable) -> Self {
        let postings = raw
            .iter()
            .map(|(term, docs)| {
                let term_idf = idf.get(term);
                let weighted = docs
                    .iter()
                    .map(|(&doc_id, &count)| (doc_id, scheme.index_weight(count, term_idf)))
                    .collect();
                (term.clone(), weighted)
            })
            .collect();
        Self { postings }
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> { self.postings.get(term) }

    pub fn weight(&self, term: &str, doc_id: DocId) -> Option<f64> {
        self.postings.get(term)?.get(&doc_id).copied()
    }

    /// Number of documents containing `term`.
    pub fn df(&self, term: &str) -> usize { self.postings.get(term).map_or(0, HashMap::len) }

    pub fn contains(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &Postings)> {
        self.postings.iter().map(|(term, docs)| (term.as_str(), docs))
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }
}
