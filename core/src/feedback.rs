//! Pseudo relevance feedback: expand a query with the strongest terms of the
//! top-ranked documents from a first retrieval pass.

use crate::index::{DocTerms, IdfTable, WeightedIndex};
use crate::score::ScoredDoc;
use crate::weighting::WeightingScheme;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Documents taken from the head of the first-pass ranking.
    pub top_docs: usize,
    /// Terms kept per document.
    pub top_terms: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self { Self { top_docs: 20, top_terms: 5 } }
}

/// Read-only view of the collection needed to pick feedback terms.
#[derive(Clone, Copy)]
pub struct FeedbackSource<'a> {
    pub index: &'a WeightedIndex,
    pub doc_terms: &'a DocTerms,
    pub idf: &'a IdfTable,
    pub scheme: WeightingScheme,
}

impl<'a> FeedbackSource<'a> {
    /// Terms selected from the head of `ranking`: documents in rank order,
    /// each contributing its best `top_terms` terms (ties by ascending term).
    pub fn expansion_terms(&self, ranking: &[ScoredDoc], config: FeedbackConfig) -> Vec<&'a str> {
        let mut selected = Vec::new();
        for doc in ranking.iter().take(config.top_docs) {
            let mut scored: Vec<(&'a str, f64)> = self
                .doc_terms
                .terms(doc.doc_id)
                .filter_map(|term| {
                    let weight = self.index.weight(term, doc.doc_id)?;
                    Some((term, self.scheme.feedback_score(weight, self.idf.get(term))))
                })
                .collect();
            scored.sort_by(|a, b| {
                b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(b.0))
            });
            selected.extend(scored.into_iter().take(config.top_terms).map(|(term, _)| term));
        }
        selected
    }

    /// The expanded query: feedback terms followed by the original query.
    pub fn expand_query<S: AsRef<str>>(
        &self,
        ranking: &[ScoredDoc],
        query: &[S],
        config: FeedbackConfig,
    ) -> Vec<String> {
        let mut expanded: Vec<String> = self
            .expansion_terms(ranking, config)
            .into_iter()
            .map(str::to_string)
            .collect();
        expanded.extend(query.iter().map(|t| t.as_ref().to_string()));
        expanded
    }
}
