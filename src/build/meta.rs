//! Corpus metadata tables.
//!
//! One TSV per batch: a header line, then `doc_id\tpage_id\ttitle\t
//! source_name` rows keyed by the batch-local document id. Malformed rows
//! and rows longer than [`MAX_LINE_BYTES`] are skipped, not fatal — the
//! crawler's output is only mostly clean.

use std::fs;
use std::path::Path;

use crate::Result;

/// Longest metadata row accepted.
pub const MAX_LINE_BYTES: usize = 16384;

/// Map a corpus source name onto its stable id. 0 stays reserved.
pub fn source_id_from_name(name: &[u8]) -> u32 {
    match name {
        b"ruwiki" => 1,
        b"ru_wikisource" => 2,
        _ => 3,
    }
}

#[derive(Debug, Clone)]
pub struct MetaRecord {
    pub page_id: u32,
    pub title: Vec<u8>,
    pub source_id: u32,
}

/// Batch metadata indexed by local doc id.
#[derive(Debug, Default)]
pub struct MetaTable {
    records: Vec<Option<MetaRecord>>,
}

fn split_4<'a>(line: &'a [u8]) -> Option<[&'a [u8]; 4]> {
    let mut it = line.splitn(4, |&b| b == b'\t');
    let a = it.next()?;
    let b = it.next()?;
    let c = it.next()?;
    let mut d = it.next()?;
    while let Some(rest) = d.strip_suffix(b"\n").or_else(|| d.strip_suffix(b"\r")) {
        d = rest;
    }
    Some([a, b, c, d])
}

fn parse_u32(field: &[u8]) -> Option<u32> {
    if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(field).ok()?.parse().ok()
}

impl MetaTable {
    /// Parse one metadata TSV. The first line is the header and is skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let mut table = Self::default();

        for line in data.split(|&b| b == b'\n').skip(1) {
            if line.is_empty() || line.len() > MAX_LINE_BYTES {
                continue;
            }
            let Some([doc_id, page_id, title, source]) = split_4(line) else {
                continue;
            };
            let Some(doc_id) = parse_u32(doc_id) else {
                continue;
            };
            let page_id = parse_u32(page_id).unwrap_or(0);

            if doc_id as usize >= table.records.len() {
                table.records.resize(doc_id as usize + 1, None);
            }
            table.records[doc_id as usize] = Some(MetaRecord {
                page_id,
                title: title.to_vec(),
                source_id: source_id_from_name(source),
            });
        }

        Ok(table)
    }

    pub fn get(&self, local_doc_id: u32) -> Option<&MetaRecord> {
        self.records.get(local_doc_id as usize)?.as_ref()
    }

    pub fn max_local_id(&self) -> u32 {
        self.records.len().saturating_sub(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load_str(tsv: &str) -> MetaTable {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.tsv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(tsv.as_bytes())
            .unwrap();
        MetaTable::load(&path).unwrap()
    }

    #[test]
    fn parses_rows_after_header() {
        let t = load_str(
            "doc_id\tpage_id\ttitle\tsource_name\n\
             1\t100\tAlpha\truwiki\n\
             3\t300\tГамма\tru_wikisource\n\
             4\t400\tDelta\tsomething_else\n",
        );
        assert_eq!(t.max_local_id(), 4);
        let r1 = t.get(1).unwrap();
        assert_eq!((r1.page_id, r1.source_id), (100, 1));
        assert_eq!(r1.title, b"Alpha");
        assert!(t.get(2).is_none());
        assert_eq!(t.get(3).unwrap().source_id, 2);
        assert_eq!(t.get(4).unwrap().source_id, 3);
    }

    #[test]
    fn tolerates_crlf_and_garbage() {
        let t = load_str(
            "h\th\th\th\n\
             1\t100\tAlpha\truwiki\r\n\
             not-a-number\t1\tx\truwiki\n\
             2\tonly-two-fields\n\
             3\t300\t\truwiki\n",
        );
        assert_eq!(t.get(1).unwrap().title, b"Alpha");
        assert!(t.get(2).is_none());
        // Empty titles are recorded; the builder skips them.
        assert_eq!(t.get(3).unwrap().title, b"");
    }

    #[test]
    fn source_mapping() {
        assert_eq!(source_id_from_name(b"ruwiki"), 1);
        assert_eq!(source_id_from_name(b"ru_wikisource"), 2);
        assert_eq!(source_id_from_name(b"ruwikinews"), 3);
    }
}
