//! Cosine scoring of candidate documents against a query vector.
//!
//! Only documents sharing at least one term with the query are candidates.
//! The query norm is left out since it is constant for a given query.

use crate::index::{DocId, WeightedIndex};
use crate::query::QueryVector;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    qd: f64,
    dd: f64,
}

/// Outcome of scoring one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Scored(f64),
    /// Dot product or document norm was not positive.
    Unscored,
}

impl Score {
    fn from_accumulator(acc: Accumulator) -> Self {
        let norm = acc.dd.sqrt();
        if acc.qd > 0.0 && norm > 0.0 {
            Score::Scored(acc.qd / norm)
        } else {
            Score::Unscored
        }
    }

    /// Ranking value; unscored candidates count as 0.0.
    pub fn value(self) -> f64 {
        match self {
            Score::Scored(s) => s,
            Score::Unscored => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: Score,
}

/// Descending by score, then ascending by document id.
pub fn rank_order(a: &ScoredDoc, b: &ScoredDoc) -> Ordering {
    b.score
        .value()
        .partial_cmp(&a.score.value())
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}

pub fn cosine_rank(query: &QueryVector, index: &WeightedIndex) -> Vec<ScoredDoc> {
    let mut accumulators: HashMap<DocId, Accumulator> = HashMap::new();
    for (term, q) in query.iter() {
        let Some(postings) = index.postings(term) else { continue };
        for (&doc_id, &d) in postings {
            let acc = accumulators.entry(doc_id).or_default();
            acc.qd += q * d;
            acc.dd += d * d;
        }
    }

    let mut ranked: Vec<ScoredDoc> = accumulators
        .into_iter()
        .map(|(doc_id, acc)| ScoredDoc { doc_id, score: Score::from_accumulator(acc) })
        .collect();
    ranked.sort_by(rank_order);
    ranked
}
