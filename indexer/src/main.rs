use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ir_core::persist::{save_bundle, save_meta, DataBundle, DataPaths, MetaFile, Query, Variant};
use ir_core::tokenizer::{tokenize, TokenizerOptions};
use ir_core::{DocId, RawIndex};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    body: String,
}

#[derive(Debug, Deserialize)]
struct InputQuery {
    id: serde_json::Value,
    text: String,
}

impl InputQuery {
    fn id_string(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the preprocessed index and query bundle used by the retriever", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every stoplist/stemming variant from JSON/JSONL documents and queries
    Build {
        /// Document path (file or directory of .json/.jsonl files)
        #[arg(long)]
        documents: String,
        /// Query file (.json or .jsonl)
        #[arg(long)]
        queries: String,
        /// Output data directory
        #[arg(long, default_value = ".")]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { documents, queries, output } => build_bundle(&documents, &queries, &output),
    }
}

fn build_bundle(documents: &str, queries: &str, output: &str) -> Result<()> {
    let docs: Vec<InputDoc> = read_records(&collect_files(Path::new(documents)))?;
    let raw_queries: Vec<InputQuery> = read_records(&[PathBuf::from(queries)])?;

    let mut seen: HashSet<DocId> = HashSet::new();
    for doc in &docs {
        if !seen.insert(doc.id) {
            bail!("duplicate document id {}", doc.id);
        }
    }
    tracing::info!(num_docs = docs.len(), num_queries = raw_queries.len(), "read input");

    let mut bundle = DataBundle::default();
    for variant in Variant::ALL {
        let options = TokenizerOptions { stoplist: variant.stoplist, stemming: variant.stemming };
        let index = build_index(&docs, options);
        let queries: Vec<Query> = raw_queries
            .iter()
            .map(|q| Query { id: q.id_string(), terms: tokenize(&q.text, options) })
            .collect();
        tracing::info!(key = %variant.index_key(), num_terms = index.len(), "built variant");
        bundle.insert(variant, index, queries);
    }

    let out_paths = DataPaths::new(output);
    save_bundle(&out_paths, &bundle)?;
    let meta = MetaFile {
        num_docs: docs.len() as u32,
        num_queries: raw_queries.len() as u32,
        created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&out_paths, &meta)?;

    tracing::info!(output, "bundle build complete");
    Ok(())
}

fn build_index(docs: &[InputDoc], options: TokenizerOptions) -> RawIndex {
    let mut index = RawIndex::new();
    for doc in docs {
        for term in tokenize(&doc.body, options) {
            *index.entry(term).or_default().entry(doc.id).or_insert(0) += 1;
        }
    }
    index
}

fn collect_files(input_path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }
    files
}

/// Reads records from `.jsonl` files (one per line) or `.json` files holding
/// a single object or an array of objects.
fn read_records<T: serde::de::DeserializeOwned>(files: &[PathBuf]) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for file in files {
        let reader = BufReader::new(File::open(file)?);
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() { continue; }
                records.push(serde_json::from_str(&line)?);
            }
        } else {
            match serde_json::from_reader::<_, serde_json::Value>(reader)? {
                serde_json::Value::Array(arr) => {
                    for v in arr {
                        records.push(serde_json::from_value(v)?);
                    }
                }
                json @ serde_json::Value::Object(_) => records.push(serde_json::from_value(json)?),
                _ => {}
            }
        }
    }
    Ok(records)
}
