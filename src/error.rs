use std::io;

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Tokenizer-level UTF-8 damage never reaches this type: the scanner recovers
/// in place by skipping one byte. Allocation failure aborts the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed index: {0}")]
    MalformedIndex(String),
}

pub type Result<T> = std::result::Result<T, Error>;
