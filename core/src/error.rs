use crate::index::DocId;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("index contains no documents")]
    EmptyIndex,

    #[error("term '{term}' has a zero occurrence count in document {doc_id}")]
    ZeroCount { term: String, doc_id: DocId },

    #[error("unknown term weighting '{0}' (expected one of: binary, tf, tfidf)")]
    UnknownWeighting(String),

    #[error("pseudo relevance feedback cannot be used with binary weighting")]
    FeedbackWithBinary,
}

pub type Result<T> = core::result::Result<T, Error>;
