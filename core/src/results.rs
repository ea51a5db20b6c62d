use crate::index::DocId;
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Documents kept per query in the result file.
pub const RESULT_LIMIT: usize = 10;

/// Ranked results for each processed query, in processing order.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Vec<(String, Vec<DocId>)>,
}

impl ResultStore {
    pub fn new() -> Self { Self::default() }

    pub fn store(&mut self, query_id: impl Into<String>, mut doc_ids: Vec<DocId>) {
        doc_ids.truncate(RESULT_LIMIT);
        self.results.push((query_id.into(), doc_ids));
    }

    pub fn len(&self) -> usize { self.results.len() }
    pub fn is_empty(&self) -> bool { self.results.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.results.iter().map(|(qid, docs)| (qid.as_str(), docs.as_slice()))
    }

    /// One `"{query_id} {doc_id}"` line per stored pair.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        for (qid, doc_ids) in &self.results {
            for doc_id in doc_ids {
                writeln!(out, "{qid} {doc_id}")?;
            }
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_at_most_ten_documents() {
        let mut store = ResultStore::new();
        store.store("1", (1..=25).collect());
        store.store("2", vec![7, 3]);
        let kept: Vec<_> = store.iter().map(|(_, docs)| docs.len()).collect();
        assert_eq!(kept, vec![RESULT_LIMIT, 2]);
    }

    #[test]
    fn writes_one_line_per_pair() {
        let mut store = ResultStore::new();
        store.store("q1", vec![4, 2]);
        store.store("q2", vec![]);
        store.store("q3", vec![9]);
        let mut buf = Vec::new();
        store.write(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "q1 4\nq1 2\nq3 9\n");
    }
}
