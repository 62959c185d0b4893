//! Index file emission.
//!
//! Every section length is computable before a byte is written, so the file
//! streams out front to back: header, sorted dictionary, postings, docs.
//! Posting offsets in dictionary records are relative to the postings
//! section, in dictionary (term-byte) order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::dict::TermDict;
use crate::error::Result;

use super::header::{IndexHeader, FLAG_HAS_DOCS, FLAG_HAS_POSTINGS, HEADER_SIZE, VERSION};

/// Metadata of one indexed document; the global doc id is its position + 1
/// in the slice handed to [`write_index`].
#[derive(Debug, Clone)]
pub struct DocRecord {
    pub source_id: u32,
    pub page_id: u32,
    pub title: Vec<u8>,
}

/// Section sizes of the written file, for the build summary.
#[derive(Debug, Clone, Copy)]
pub struct WriteSummary {
    pub dict_bytes: u64,
    pub postings_bytes: u64,
    pub docs_bytes: u64,
    pub term_bytes_sum: u64,
}

const DICT_RECORD_FIXED: u64 = 4 + 8 + 4 + 4;
const DOC_RECORD_FIXED_V2: u64 = 4 + 4 + 4 + 4;

/// Write a version-2 index file from the build-time dictionary and doc table.
pub fn write_index(path: &Path, dict: &TermDict, docs: &[DocRecord]) -> Result<WriteSummary> {
    let order = dict.sorted_term_ids();

    let mut term_bytes_sum = 0u64;
    let mut dict_bytes = 0u64;
    for &id in &order {
        let len = dict.term_bytes(id).len() as u64;
        term_bytes_sum += len;
        dict_bytes += DICT_RECORD_FIXED + len;
    }

    // Relative posting offsets: prefix sums of df * 4 in dictionary order.
    let mut posting_offsets = Vec::with_capacity(order.len());
    let mut cur = 0u64;
    for &id in &order {
        posting_offsets.push(cur);
        cur += u64::from(dict.df(id)) * 4;
    }
    let postings_bytes = cur;

    let docs_bytes = 8
        + 8 * docs.len() as u64
        + docs
            .iter()
            .map(|d| DOC_RECORD_FIXED_V2 + d.title.len() as u64)
            .sum::<u64>();

    let dict_offset = HEADER_SIZE as u64;
    let header = IndexHeader {
        version: VERSION,
        flags: FLAG_HAS_POSTINGS | FLAG_HAS_DOCS,
        docs_count: docs.len() as u64,
        terms_count: order.len() as u64,
        dict_offset,
        dict_bytes,
        postings_offset: dict_offset + dict_bytes,
        postings_bytes,
        docs_offset: dict_offset + dict_bytes + postings_bytes,
        docs_bytes,
    };

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    header.write_to(&mut out)?;

    for (&id, &off) in order.iter().zip(&posting_offsets) {
        let term = dict.term_bytes(id);
        out.write_all(&(term.len() as u32).to_le_bytes())?;
        out.write_all(term)?;
        out.write_all(&off.to_le_bytes())?;
        out.write_all(&dict.df(id).to_le_bytes())?;
        out.write_all(&0u32.to_le_bytes())?;
    }

    for &id in &order {
        for &doc_id in dict.postings(id) {
            out.write_all(&doc_id.to_le_bytes())?;
        }
    }

    out.write_all(&(docs.len() as u64).to_le_bytes())?;
    let mut rel = 0u64;
    for doc in docs {
        out.write_all(&rel.to_le_bytes())?;
        rel += DOC_RECORD_FIXED_V2 + doc.title.len() as u64;
    }
    for (i, doc) in docs.iter().enumerate() {
        out.write_all(&(i as u32 + 1).to_le_bytes())?;
        out.write_all(&doc.source_id.to_le_bytes())?;
        out.write_all(&doc.page_id.to_le_bytes())?;
        out.write_all(&(doc.title.len() as u32).to_le_bytes())?;
        out.write_all(&doc.title)?;
    }

    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;

    Ok(WriteSummary {
        dict_bytes,
        postings_bytes,
        docs_bytes,
        term_bytes_sum,
    })
}
