//! Query vectorization: a sequence of preprocessed terms becomes a sparse
//! weight vector under the same scheme as the index.

use crate::index::{IdfTable, WeightedIndex};
use crate::weighting::WeightingScheme;
use std::collections::{BTreeMap, HashMap};

/// Term -> weight. Ordered so score accumulation is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryVector {
    weights: BTreeMap<String, f64>,
}

impl QueryVector {
    pub fn get(&self, term: &str) -> Option<f64> { self.weights.get(term).copied() }
    pub fn len(&self) -> usize { self.weights.len() }
    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(term, &w)| (term.as_str(), w))
    }
}

impl FromIterator<(String, f64)> for QueryVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self { weights: iter.into_iter().collect() }
    }
}

/// Builds the query vector for `terms`. Terms the index has never seen are
/// dropped silently.
pub fn vectorize<S: AsRef<str>>(
    terms: &[S],
    index: &WeightedIndex,
    idf: &IdfTable,
    scheme: WeightingScheme,
) -> QueryVector {
    let mut tf_raw: HashMap<&str, u32> = HashMap::new();
    for term in terms {
        let term = term.as_ref();
        if index.contains(term) {
            *tf_raw.entry(term).or_insert(0) += 1;
        }
    }
    tf_raw
        .into_iter()
        .map(|(term, count)| {
            let weight = scheme.query_weight(count, index.df(term), idf.get(term));
            (term.to_string(), weight)
        })
        .collect()
}
