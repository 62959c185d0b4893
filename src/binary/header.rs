//! Fixed 128-byte index header.

use std::io::{self, Write};

use crate::error::{Error, Result};

use super::{read_u32, read_u64};

/// Magic bytes at offset 0.
pub const MAGIC: [u8; 8] = *b"MAIIRIDX";

/// Header size on disk; unused trailing bytes are zero.
pub const HEADER_SIZE: usize = 128;

/// Version written by the current builder. Version 1 files (no `source_id`
/// in doc records) are still readable.
pub const VERSION: u32 = 2;

/// Postings section present.
pub const FLAG_HAS_POSTINGS: u32 = 0x1;
/// Docs section present.
pub const FLAG_HAS_DOCS: u32 = 0x2;

/// Parsed header fields. Offsets are absolute file positions; `*_bytes` are
/// section lengths.
#[derive(Debug, Clone)]
pub struct IndexHeader {
    pub version: u32,
    pub flags: u32,
    pub docs_count: u64,
    pub terms_count: u64,
    pub dict_offset: u64,
    pub dict_bytes: u64,
    pub postings_offset: u64,
    pub postings_bytes: u64,
    pub docs_offset: u64,
    pub docs_bytes: u64,
}

impl IndexHeader {
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..8].copy_from_slice(&MAGIC);
        buf[8..12].copy_from_slice(&self.version.to_le_bytes());
        buf[12..16].copy_from_slice(&self.flags.to_le_bytes());
        buf[16..24].copy_from_slice(&self.docs_count.to_le_bytes());
        buf[24..32].copy_from_slice(&self.terms_count.to_le_bytes());
        buf[32..40].copy_from_slice(&self.dict_offset.to_le_bytes());
        buf[40..48].copy_from_slice(&self.dict_bytes.to_le_bytes());
        buf[48..56].copy_from_slice(&self.postings_offset.to_le_bytes());
        buf[56..64].copy_from_slice(&self.postings_bytes.to_le_bytes());
        buf[64..72].copy_from_slice(&self.docs_offset.to_le_bytes());
        buf[72..80].copy_from_slice(&self.docs_bytes.to_le_bytes());
        // 80..128 reserved, already zero.
        w.write_all(&buf)
    }

    /// Parse and validate a header against the file it came from.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::MalformedIndex(format!(
                "file too small for header: {} bytes",
                bytes.len()
            )));
        }
        if bytes[0..8] != MAGIC {
            return Err(Error::MalformedIndex("bad magic".into()));
        }

        let header = Self {
            version: read_u32(bytes, 8),
            flags: read_u32(bytes, 12),
            docs_count: read_u64(bytes, 16),
            terms_count: read_u64(bytes, 24),
            dict_offset: read_u64(bytes, 32),
            dict_bytes: read_u64(bytes, 40),
            postings_offset: read_u64(bytes, 48),
            postings_bytes: read_u64(bytes, 56),
            docs_offset: read_u64(bytes, 64),
            docs_bytes: read_u64(bytes, 72),
        };

        if header.version != 1 && header.version != 2 {
            return Err(Error::MalformedIndex(format!(
                "unsupported version {}",
                header.version
            )));
        }

        let file_len = bytes.len() as u64;
        for (name, off, len) in [
            ("dictionary", header.dict_offset, header.dict_bytes),
            ("postings", header.postings_offset, header.postings_bytes),
            ("docs", header.docs_offset, header.docs_bytes),
        ] {
            let end = off.checked_add(len).ok_or_else(|| {
                Error::MalformedIndex(format!("{name} section overflows u64"))
            })?;
            if end > file_len {
                return Err(Error::MalformedIndex(format!(
                    "{name} section [{off}, {end}) exceeds file size {file_len}"
                )));
            }
        }

        Ok(header)
    }
}
