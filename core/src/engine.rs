use crate::error::{Error, Result};
use crate::feedback::{FeedbackConfig, FeedbackSource};
use crate::index::{self, DocId, DocTerms, IdfTable, RawIndex, WeightedIndex};
use crate::query::{self, QueryVector};
use crate::score::{self, ScoredDoc};
use crate::weighting::WeightingScheme;
use tracing::{debug, info};

/// Vector-space retrieval over a fixed, pre-weighted index.
///
/// Everything is built once in [`Retriever::new`]; queries only read, so a
/// single retriever can be shared across threads.
#[derive(Debug, Clone)]
pub struct Retriever {
    index: WeightedIndex,
    doc_terms: DocTerms,
    idf: IdfTable,
    scheme: WeightingScheme,
    num_docs: usize,
    feedback: Option<FeedbackConfig>,
}

impl Retriever {
    pub fn new(raw: RawIndex, scheme: WeightingScheme, pseudo_relevance_feedback: bool) -> Result<Self> {
        if pseudo_relevance_feedback && !scheme.supports_feedback() {
            return Err(Error::FeedbackWithBinary);
        }
        index::validate(&raw)?;

        let doc_terms = DocTerms::from_raw(&raw);
        let num_docs = doc_terms.num_docs();
        let idf = IdfTable::from_raw(&raw, num_docs);
        let index = WeightedIndex::from_raw(&raw, scheme, &idf);
        info!(num_docs, num_terms = index.num_terms(), %scheme, pseudo_relevance_feedback, "retriever ready");

        Ok(Self {
            index,
            doc_terms,
            idf,
            scheme,
            num_docs,
            feedback: pseudo_relevance_feedback.then(FeedbackConfig::default),
        })
    }

    /// Overrides the feedback depth. Has no effect when feedback is off.
    pub fn with_feedback_config(mut self, config: FeedbackConfig) -> Self {
        if self.feedback.is_some() {
            self.feedback = Some(config);
        }
        self
    }

    /// Document ids for `query`, best first.
    pub fn for_query<S: AsRef<str>>(&self, query: &[S]) -> Vec<DocId> {
        self.rank(query).into_iter().map(|d| d.doc_id).collect()
    }

    /// Scored ranking for `query`, applying relevance feedback if enabled.
    pub fn rank<S: AsRef<str>>(&self, query: &[S]) -> Vec<ScoredDoc> {
        let ranking = self.score(&self.vectorize(query));
        let Some(config) = self.feedback else { return ranking };

        let expanded = self.feedback_source().expand_query(&ranking, query, config);
        debug!(
            original = query.len(),
            expanded = expanded.len(),
            feedback_docs = ranking.len().min(config.top_docs),
            "expanded query"
        );
        self.score(&self.vectorize(expanded.as_slice()))
    }

    pub fn vectorize<S: AsRef<str>>(&self, terms: &[S]) -> QueryVector {
        query::vectorize(terms, &self.index, &self.idf, self.scheme)
    }

    pub fn score(&self, query: &QueryVector) -> Vec<ScoredDoc> {
        let ranking = score::cosine_rank(query, &self.index);
        debug!(query_terms = query.len(), candidates = ranking.len(), "scored query");
        ranking
    }

    fn feedback_source(&self) -> FeedbackSource<'_> {
        FeedbackSource { index: &self.index, doc_terms: &self.doc_terms, idf: &self.idf, scheme: self.scheme }
    }

    pub fn scheme(&self) -> WeightingScheme { self.scheme }
    pub fn num_docs(&self) -> usize { self.num_docs }
    pub fn feedback(&self) -> Option<FeedbackConfig> { self.feedback }
    pub fn index(&self) -> &WeightedIndex { &self.index }
    pub fn idf(&self) -> &IdfTable { &self.idf }
    pub fn doc_terms(&self) -> &DocTerms { &self.doc_terms }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> RawIndex {
        let mut raw = RawIndex::new();
        raw.insert("cat".into(), [(1, 2), (2, 1)].into_iter().collect());
        raw.insert("dog".into(), [(2, 3)].into_iter().collect());
        raw
    }

    #[test]
    fn binary_rejects_feedback() {
        let err = Retriever::new(pets(), WeightingScheme::Binary, true).unwrap_err();
        assert!(matches!(err, Error::FeedbackWithBinary));
    }

    #[test]
    fn empty_index_fails() {
        let err = Retriever::new(RawIndex::new(), WeightingScheme::Tf, false).unwrap_err();
        assert!(matches!(err, Error::EmptyIndex));
    }

    #[test]
    fn feedback_config_only_applies_when_enabled() {
        let custom = FeedbackConfig { top_docs: 3, top_terms: 1 };
        let off = Retriever::new(pets(), WeightingScheme::Tf, false).unwrap().with_feedback_config(custom);
        assert_eq!(off.feedback(), None);
        let on = Retriever::new(pets(), WeightingScheme::Tf, true).unwrap().with_feedback_config(custom);
        assert_eq!(on.feedback(), Some(custom));
    }

    #[test]
    fn counts_documents_sparsely() {
        let mut raw = pets();
        raw.insert("eel".into(), [(40, 1)].into_iter().collect());
        let r = Retriever::new(raw, WeightingScheme::TfIdf, false).unwrap();
        assert_eq!(r.num_docs(), 3);
        assert!((r.idf().get("eel") - 3f64.ln()).abs() < 1e-12);
    }
}
