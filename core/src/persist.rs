use crate::index::RawIndex;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// A preprocessed query: an opaque id and its terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub id: String,
    pub terms: Vec<String>,
}

/// Which preprocessing variant of the collection to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Variant {
    pub stoplist: bool,
    pub stemming: bool,
}

fn yes_no(flag: bool) -> &'static str { if flag { "yes" } else { "no" } }

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant { stoplist: false, stemming: false },
        Variant { stoplist: false, stemming: true },
        Variant { stoplist: true, stemming: false },
        Variant { stoplist: true, stemming: true },
    ];

    fn suffix(&self) -> String {
        format!("stoplist_{}_stemming_{}", yes_no(self.stoplist), yes_no(self.stemming))
    }
    pub fn index_key(&self) -> String { format!("index_{}", self.suffix()) }
    pub fn queries_key(&self) -> String { format!("queries_{}", self.suffix()) }
}

/// Every preprocessing variant of the index and the queries, keyed by
/// [`Variant::index_key`] and [`Variant::queries_key`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataBundle {
    pub indexes: HashMap<String, RawIndex>,
    pub queries: HashMap<String, Vec<Query>>,
}

impl DataBundle {
    pub fn insert(&mut self, variant: Variant, index: RawIndex, queries: Vec<Query>) {
        self.indexes.insert(variant.index_key(), index);
        self.queries.insert(variant.queries_key(), queries);
    }

    /// Removes and returns the index and queries for `variant`.
    pub fn take(&mut self, variant: Variant) -> Result<(RawIndex, Vec<Query>)> {
        let index_key = variant.index_key();
        let queries_key = variant.queries_key();
        let index = self.indexes.remove(&index_key).ok_or_else(|| anyhow!("data bundle has no '{index_key}'"))?;
        let queries = self.queries.remove(&queries_key).ok_or_else(|| anyhow!("data bundle has no '{queries_key}'"))?;
        Ok((index, queries))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_queries: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct DataPaths {
    pub root: PathBuf,
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn bundle(&self) -> PathBuf { self.root.join("ir_data.bin") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn save_bundle(paths: &DataPaths, bundle: &DataBundle) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.bundle())?;
    let bytes = bincode::serialize(bundle)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_bundle(paths: &DataPaths) -> Result<DataBundle> {
    let mut f = File::open(paths.bundle())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let bundle = bincode::deserialize(&buf)?;
    Ok(bundle)
}

pub fn save_meta(paths: &DataPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &DataPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}
