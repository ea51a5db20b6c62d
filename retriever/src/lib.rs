use anyhow::Result;
use clap::Parser;
use ir_core::persist::{load_bundle, DataPaths, Variant};
use ir_core::{ResultStore, Retriever, WeightingScheme};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "retriever")]
#[command(about = "Rank documents for every query with vector-space retrieval", long_about = None)]
pub struct Args {
    /// Use the "with stoplist" configuration
    #[arg(short = 's')]
    pub stoplist: bool,
    /// Use the "with stemming" configuration
    #[arg(short = 'p')]
    pub stemming: bool,
    /// Use pseudo relevance feedback
    #[arg(short = 'f')]
    pub feedback: bool,
    /// Term weighting scheme: binary, tf or tfidf (default: binary, or tfidf with -f)
    #[arg(short = 'w', value_name = "LABEL")]
    pub weighting: Option<String>,
    /// Output results to FILE
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Directory holding the data bundle
    #[arg(long, default_value = ".")]
    pub data: PathBuf,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("term weighting label (opt: -w LABEL) cannot be binary if -f is selected")]
    FeedbackWithBinary,

    #[error("term weighting label (opt: -w LABEL): {0}")]
    Weighting(#[from] ir_core::Error),

    #[error("must specify output file (opt: -o FILE)")]
    MissingOutput,
}

/// A validated retrieval run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub variant: Variant,
    pub scheme: WeightingScheme,
    pub feedback: bool,
    pub output: PathBuf,
    pub data: PathBuf,
}

impl RunConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let scheme = match args.weighting.as_deref() {
            Some(label) => label.parse::<WeightingScheme>()?,
            None if args.feedback => WeightingScheme::TfIdf,
            None => WeightingScheme::Binary,
        };
        if args.feedback && !scheme.supports_feedback() {
            return Err(ConfigError::FeedbackWithBinary);
        }
        let output = args.output.ok_or(ConfigError::MissingOutput)?;
        Ok(Self {
            variant: Variant { stoplist: args.stoplist, stemming: args.stemming },
            scheme,
            feedback: args.feedback,
            output,
            data: args.data,
        })
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub queries: usize,
    pub elapsed: Duration,
}

/// Loads the configured variant, ranks every query and writes the result file.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let mut bundle = load_bundle(&DataPaths::new(&config.data))?;
    let (index, queries) = bundle.take(config.variant)?;
    let retriever = Retriever::new(index, config.scheme, config.feedback)?;

    let mut results = ResultStore::new();
    let start = Instant::now();
    for query in &queries {
        let doc_ids = retriever.for_query(query.terms.as_slice());
        tracing::debug!(query_id = %query.id, hits = doc_ids.len(), "retrieved");
        results.store(query.id.clone(), doc_ids);
    }
    let elapsed = start.elapsed();

    results.save(&config.output)?;
    let avg_ms = if queries.is_empty() { 0.0 } else { elapsed.as_secs_f64() * 1000.0 / queries.len() as f64 };
    tracing::info!(
        queries = queries.len(),
        total_s = elapsed.as_secs_f64(),
        avg_ms,
        output = %config.output.display(),
        "run complete"
    );
    Ok(RunSummary { queries: queries.len(), elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<RunConfig, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("retriever").chain(argv.iter().copied())).unwrap();
        RunConfig::from_args(args)
    }

    #[test]
    fn defaults_to_binary() {
        let cfg = parse(&["-o", "out.txt"]).unwrap();
        assert_eq!(cfg.scheme, WeightingScheme::Binary);
        assert!(!cfg.feedback);
        assert_eq!(cfg.variant, Variant::default());
        assert_eq!(cfg.data, PathBuf::from("."));
    }

    #[test]
    fn feedback_defaults_to_tfidf() {
        let cfg = parse(&["-f", "-s", "-p", "-o", "out.txt"]).unwrap();
        assert_eq!(cfg.scheme, WeightingScheme::TfIdf);
        assert_eq!(cfg.variant, Variant { stoplist: true, stemming: true });
    }

    #[test]
    fn rejects_feedback_with_binary() {
        assert!(matches!(parse(&["-f", "-w", "binary", "-o", "x"]), Err(ConfigError::FeedbackWithBinary)));
    }

    #[test]
    fn rejects_unknown_label() {
        assert!(matches!(parse(&["-w", "bm25", "-o", "x"]), Err(ConfigError::Weighting(_))));
    }

    #[test]
    fn requires_output() {
        assert!(matches!(parse(&["-w", "tf"]), Err(ConfigError::MissingOutput)));
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Args::try_parse_from(["retriever", "-o", "x", "stray"]).is_err());
    }
}
