//! The on-disk index format.
//!
//! One immutable file, all integers little-endian:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ HEADER (128 bytes)                                       │
//! │   magic "MAIIRIDX", version u32, flags u32               │
//! │   docs_count u64, terms_count u64                        │
//! │   dict/postings/docs (offset u64, bytes u64) pairs       │
//! │   reserved zeros to 128                                  │
//! ├──────────────────────────────────────────────────────────┤
//! │ DICTIONARY — terms_count records, ascending term bytes:  │
//! │   term_len u32, term bytes, posting_offset u64 (relative │
//! │   to the postings section), df u32, reserved u32         │
//! ├──────────────────────────────────────────────────────────┤
//! │ POSTINGS — per-term doc-id arrays (u32), dictionary      │
//! │   order; each array strictly ascending                   │
//! ├──────────────────────────────────────────────────────────┤
//! │ DOCS — docs_count u64, record-offset u64 array, then     │
//! │   variable-length records in global-doc-id order:        │
//! │   doc_id u32, source_id u32 (v2 only), page_id u32,      │
//! │   title_len u32, title bytes                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! [`IndexHeader`] is the single source of truth for section placement; the
//! writer and the reader both go through it.

mod header;
mod reader;
mod writer;

pub use header::{IndexHeader, FLAG_HAS_DOCS, FLAG_HAS_POSTINGS, HEADER_SIZE, MAGIC, VERSION};
pub use reader::{DocMeta, IndexView};
pub use writer::{write_index, DocRecord, WriteSummary};

pub(crate) fn read_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(buf[off..off + 4].try_into().unwrap())
}

pub(crate) fn read_u64(buf: &[u8], off: usize) -> u64 {
    u64::from_le_bytes(buf[off..off + 8].try_into().unwrap())
}
