//! Index build pipeline.
//!
//! Consumes one or more batches of (token directory, metadata TSV), assigns
//! global document ids in ascending batch-local order, and emits the binary
//! index. Because documents are visited in ascending global id and terms are
//! deduplicated per document before their postings are appended, every
//! posting list comes out strictly increasing without a sort.

pub mod meta;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::binary::{write_index, DocRecord};
use crate::dict::{TermDict, TermIdSet};
use crate::error::Result;
use crate::walk;

use meta::MetaTable;

/// One `--add` pair on the indexer command line.
#[derive(Debug, Clone)]
pub struct BuildBatch {
    pub tok_dir: PathBuf,
    pub meta_tsv: PathBuf,
}

/// Final counters reported after a build.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildSummary {
    pub docs: u64,
    pub terms: u64,
    pub input_bytes: u64,
    pub token_count: u64,
    pub token_bytes: u64,
}

/// Parse a batch-local doc id from the leading digits of a token file name,
/// at most eight of them. 0 means the name carries no id.
fn doc_id_from_name(name: &str) -> u32 {
    let mut v: u32 = 0;
    for (i, b) in name.bytes().enumerate() {
        if i == 8 || !b.is_ascii_digit() {
            break;
        }
        v = v * 10 + u32::from(b - b'0');
    }
    v
}

fn progress_bar(len: u64, prefix: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("━━╸"),
    );
    pb.set_prefix(prefix);
    pb
}

/// Run the whole build and write the index to `out`.
pub fn run_build(batches: &[BuildBatch], out: &Path) -> Result<BuildSummary> {
    let t0 = Instant::now();

    let mut dict = TermDict::with_table_capacity(1 << 20);
    let mut docs: Vec<DocRecord> = Vec::new();
    let mut doc_terms = TermIdSet::with_capacity(4096);
    let mut summary = BuildSummary::default();

    for batch in batches {
        let meta = MetaTable::load(&batch.meta_tsv)?;

        let mut files: Vec<(u32, PathBuf)> = Vec::new();
        for entry in walk::FileWalker::new(&batch.tok_dir, "tok")? {
            let entry = entry?;
            let name = entry
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let local_id = doc_id_from_name(&name);
            if local_id == 0 {
                continue;
            }
            files.push((local_id, entry.path));
        }
        files.sort_unstable_by_key(|&(id, _)| id);

        if files.is_empty() {
            warn!(dir = %batch.tok_dir.display(), "no token files with doc-id names");
            continue;
        }

        let pb = progress_bar(files.len() as u64, "Indexing");
        for (local_id, path) in files {
            pb.inc(1);

            let Some(record) = meta.get(local_id) else {
                continue;
            };
            if record.title.is_empty() {
                continue;
            }

            let data = fs::read(&path)?;
            summary.input_bytes += data.len() as u64;

            doc_terms.clear();
            for line in data.split(|&b| b == b'\n') {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                if line.is_empty() {
                    continue;
                }
                summary.token_bytes += line.len() as u64;
                summary.token_count += 1;
                let term_id = dict.get_or_add(line);
                doc_terms.insert(term_id);
            }

            let global_doc_id = docs.len() as u32 + 1;
            for term_id in doc_terms.iter() {
                dict.append_posting(term_id, global_doc_id);
            }

            docs.push(DocRecord {
                source_id: record.source_id,
                page_id: record.page_id,
                title: record.title.clone(),
            });
        }
        pb.finish_with_message(format!("{} docs so far", docs.len()));
    }

    let scan_secs = t0.elapsed().as_secs_f64();
    summary.docs = docs.len() as u64;
    summary.terms = dict.len() as u64;

    let written = write_index(out, &dict, &docs)?;

    let avg_token_len = if summary.token_count > 0 {
        summary.token_bytes as f64 / summary.token_count as f64
    } else {
        0.0
    };
    let avg_term_len = if dict.len() > 0 {
        written.term_bytes_sum as f64 / dict.len() as f64
    } else {
        0.0
    };
    info!(
        docs = summary.docs,
        terms = summary.terms,
        avg_token_len_bytes = avg_token_len,
        avg_term_len_bytes = avg_term_len,
        scan_sec = scan_secs,
        total_sec = t0.elapsed().as_secs_f64(),
        kb_per_sec = summary.input_bytes as f64 / 1024.0 / scan_secs.max(1e-9),
        dict_bytes = written.dict_bytes,
        postings_bytes = written.postings_bytes,
        docs_bytes = written.docs_bytes,
        "index written"
    );

    Ok(summary)
}
