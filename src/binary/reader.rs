//! Read-only view over a loaded index file.
//!
//! The whole file is pulled into memory once; one linear walk over the
//! variable-length dictionary records yields an offset table that makes term
//! lookup a binary search. The view is immutable and self-contained, so any
//! number of processes can hold the same file.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

use super::header::IndexHeader;
use super::{read_u32, read_u64};

/// Metadata of one document, borrowed from the loaded file.
#[derive(Debug, Clone, Copy)]
pub struct DocMeta<'a> {
    pub doc_id: u32,
    pub source_id: u32,
    pub page_id: u32,
    pub title: &'a [u8],
}

pub struct IndexView {
    data: Vec<u8>,
    header: IndexHeader,
    /// Absolute offset of each dictionary record, in dictionary order.
    term_offsets: Vec<u64>,
}

impl IndexView {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let header = IndexHeader::parse(&data)?;

        // Walk the dictionary once; every record must stay inside the
        // declared section.
        let dict_end = header.dict_offset + header.dict_bytes;
        let mut term_offsets = Vec::with_capacity(header.terms_count as usize);
        let mut off = header.dict_offset;
        for _ in 0..header.terms_count {
            if off + 4 > dict_end {
                return Err(Error::MalformedIndex(
                    "dictionary walk ran past the section".into(),
                ));
            }
            term_offsets.push(off);
            let term_len = u64::from(read_u32(&data, off as usize));
            off += 4 + term_len + 8 + 4 + 4;
            if off > dict_end {
                return Err(Error::MalformedIndex(
                    "dictionary record exceeds the section".into(),
                ));
            }
        }

        if header.docs_count > 0 {
            let table_end = 8 + 8 * header.docs_count;
            if header.docs_bytes < table_end {
                return Err(Error::MalformedIndex(
                    "docs section too small for its offset table".into(),
                ));
            }
        }

        Ok(Self {
            data,
            header,
            term_offsets,
        })
    }

    pub fn version(&self) -> u32 {
        self.header.version
    }

    pub fn flags(&self) -> u32 {
        self.header.flags
    }

    pub fn docs_count(&self) -> u64 {
        self.header.docs_count
    }

    pub fn terms_count(&self) -> u64 {
        self.header.terms_count
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    fn term_record(&self, idx: usize) -> (&[u8], u64, u32) {
        let off = self.term_offsets[idx] as usize;
        let len = read_u32(&self.data, off) as usize;
        let bytes = &self.data[off + 4..off + 4 + len];
        let posting_off = read_u64(&self.data, off + 4 + len);
        let df = read_u32(&self.data, off + 4 + len + 8);
        (bytes, posting_off, df)
    }

    /// Binary-search the dictionary. Returns the term's relative posting
    /// offset and document frequency.
    pub fn find(&self, term: &[u8]) -> Option<(u64, u32)> {
        let mut lo = 0usize;
        let mut hi = self.term_offsets.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            let (bytes, posting_off, df) = self.term_record(mid);
            match term.cmp(bytes) {
                Ordering::Equal => return Some((posting_off, df)),
                Ordering::Less => hi = mid,
                Ordering::Greater => lo = mid + 1,
            }
        }
        None
    }

    /// Materialize a posting list located by [`find`].
    pub fn postings(&self, posting_off: u64, df: u32) -> Result<Vec<u32>> {
        let start = self
            .header
            .postings_offset
            .checked_add(posting_off)
            .ok_or_else(|| Error::MalformedIndex("posting offset overflow".into()))?;
        let end = start + u64::from(df) * 4;
        if end > self.header.postings_offset + self.header.postings_bytes {
            return Err(Error::MalformedIndex(format!(
                "posting list [{start}, {end}) outside the postings section"
            )));
        }
        let mut list = Vec::with_capacity(df as usize);
        let mut off = start as usize;
        for _ in 0..df {
            list.push(read_u32(&self.data, off));
            off += 4;
        }
        Ok(list)
    }

    /// Look up one document record; `None` for ids outside `[1, docs_count]`
    /// or records that do not parse inside the docs section.
    pub fn doc_meta(&self, doc_id: u32) -> Option<DocMeta<'_>> {
        if doc_id == 0 || u64::from(doc_id) > self.header.docs_count {
            return None;
        }
        let docs_off = self.header.docs_offset as usize;
        let docs_end = docs_off + self.header.docs_bytes as usize;
        let records_off = docs_off + 8 + 8 * self.header.docs_count as usize;

        let slot = docs_off + 8 + 8 * (doc_id as usize - 1);
        let rel = read_u64(&self.data, slot) as usize;
        let rec = records_off + rel;

        let fixed = if self.header.version >= 2 { 16 } else { 12 };
        if rec + fixed > docs_end {
            return None;
        }

        let (source_id, page_id, title_len, title_off) = if self.header.version >= 2 {
            (
                read_u32(&self.data, rec + 4),
                read_u32(&self.data, rec + 8),
                read_u32(&self.data, rec + 12) as usize,
                rec + 16,
            )
        } else {
            (
                1,
                read_u32(&self.data, rec + 4),
                read_u32(&self.data, rec + 8) as usize,
                rec + 12,
            )
        };

        if title_off + title_len > docs_end {
            return None;
        }

        Some(DocMeta {
            doc_id,
            source_id,
            page_id,
            title: &self.data[title_off..title_off + title_len],
        })
    }
}
