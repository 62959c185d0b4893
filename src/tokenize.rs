//! Document tokenization: one input file in, one newline-delimited token
//! file out.
//!
//! The scanner walks the document codepoint by codepoint. Tokenic codepoints
//! are lower-cased, re-encoded and accumulated; anything else — including a
//! malformed byte — flushes the current token. Decode errors advance exactly
//! one byte so a run of garbage cannot swallow the valid tokens around it.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::{stem, utf8};

/// Per-document counters reported by [`tokenize_file`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenizeStats {
    /// Size of the input document in bytes.
    pub bytes_in: u64,
    /// Number of tokens written.
    pub tokens_out: u64,
    /// Sum of pre-stem codepoint lengths over all written tokens.
    pub token_chars_sum: u64,
}

fn flush(
    out: &mut impl Write,
    tok: &mut Vec<u8>,
    chars: &mut u64,
    stats: &mut TokenizeStats,
    do_stem: bool,
) -> io::Result<()> {
    if tok.is_empty() {
        return Ok(());
    }
    if do_stem {
        stem::stem(tok);
    }
    out.write_all(tok)?;
    out.write_all(b"\n")?;
    stats.tokens_out += 1;
    stats.token_chars_sum += *chars;
    tok.clear();
    *chars = 0;
    Ok(())
}

/// Tokenize the bytes of one document into `out`.
pub fn tokenize_bytes(
    data: &[u8],
    out: &mut impl Write,
    stats: &mut TokenizeStats,
    do_stem: bool,
) -> io::Result<()> {
    stats.bytes_in = data.len() as u64;

    let mut tok = Vec::with_capacity(64);
    let mut chars = 0u64;

    let mut i = 0;
    while i < data.len() {
        match utf8::decode_one(&data[i..]) {
            Some((cp, used)) => {
                if utf8::is_token_char(cp) {
                    let mut enc = [0u8; 4];
                    let n = utf8::encode_one(utf8::to_lower(cp), &mut enc);
                    tok.extend_from_slice(&enc[..n]);
                    chars += 1;
                } else {
                    flush(out, &mut tok, &mut chars, stats, do_stem)?;
                }
                i += used;
            }
            None => {
                flush(out, &mut tok, &mut chars, stats, do_stem)?;
                i += 1;
            }
        }
    }

    flush(out, &mut tok, &mut chars, stats, do_stem)
}

/// Read `input` fully and tokenize it into `out`.
pub fn tokenize_file(
    input: &Path,
    out: &mut impl Write,
    stats: &mut TokenizeStats,
    do_stem: bool,
) -> io::Result<()> {
    let data = fs::read(input)?;
    tokenize_bytes(&data, out, stats, do_stem)
}
