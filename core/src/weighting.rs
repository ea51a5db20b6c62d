//! Term weighting schemes shared by the index, the query vectorizer and
//! relevance feedback.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightingScheme {
    #[default]
    Binary,
    Tf,
    TfIdf,
}

/// Log-scaled term frequency, `1 + ln(count)`.
#[inline]
pub fn log_tf(count: u32) -> f64 { 1.0 + (count as f64).ln() }

impl WeightingScheme {
    pub const ALL: [WeightingScheme; 3] = [Self::Binary, Self::Tf, Self::TfIdf];

    pub fn label(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Tf => "tf",
            Self::TfIdf => "tfidf",
        }
    }

    /// Weight stored in the index for a (term, doc) pair with `count >= 1`.
    ///
    /// Note that `TfIdf` is `1 + ln(count) * idf`, not `(1 + ln(count)) * idf`:
    /// a term seen once in a document keeps weight 1 whatever its idf.
    pub fn index_weight(self, count: u32, idf: f64) -> f64 {
        match self {
            Self::Binary => 1.0,
            Self::Tf => log_tf(count),
            Self::TfIdf => 1.0 + (count as f64).ln() * idf,
        }
    }

    /// Weight of a query term occurring `tf_raw` times in the query and in
    /// `df` documents of the collection.
    pub fn query_weight(self, tf_raw: u32, df: usize, idf: f64) -> f64 {
        let tf = log_tf(tf_raw);
        match self {
            Self::Tf => tf,
            Self::TfIdf => tf * idf,
            Self::Binary => {
                if df > 0 { 1.0 } else { 0.0 }
            }
        }
    }

    /// Score used to rank a document's terms when picking feedback terms.
    /// `weight` is the value already stored in the weighted index.
    pub fn feedback_score(self, weight: f64, idf: f64) -> f64 {
        match self {
            Self::TfIdf => weight,
            Self::Tf | Self::Binary => weight * idf,
        }
    }

    pub fn supports_feedback(self) -> bool { !matches!(self, Self::Binary) }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for WeightingScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.label() == s)
            .ok_or_else(|| Error::UnknownWeighting(s.to_string()))
    }
}
