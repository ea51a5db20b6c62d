pub mod engine;
pub mod error;
pub mod feedback;
pub mod index;
pub mod persist;
pub mod query;
pub mod results;
pub mod score;
pub mod tokenizer;
pub mod weighting;

pub use engine::Retriever;
pub use error::{Error, Result};
pub use feedback::FeedbackConfig;
pub use index::{DocId, DocTerms, IdfTable, RawIndex, WeightedIndex};
pub use query::QueryVector;
pub use results::{ResultStore, RESULT_LIMIT};
pub use score::{Score, ScoredDoc};
pub use weighting::WeightingScheme;
