//! Boolean-retrieval inverted index over Russian/Latin text corpora.
//!
//! The pipeline has three on-disk stages plus one ancillary table dump:
//!
//! ```text
//! documents ──▶ tokenize (utf8 + stem) ──▶ *.tok files
//! *.tok + meta.tsv ──▶ build (dict + binary) ──▶ index.bin
//! index.bin + query ──▶ search (lexer → postfix → eval) ──▶ result rows
//! *.tok ──▶ freq ──▶ terms.tsv, zipf.tsv
//! ```
//!
//! The tokenizer and stemmer are shared verbatim between the build stage and
//! the query lexer; the index only works because both sides reduce a word to
//! the same bytes.
//!
//! # Usage
//!
//! ```no_run
//! use maiir::binary::IndexView;
//! use maiir::search::{eval_query, universe};
//!
//! # fn main() -> maiir::Result<()> {
//! let view = IndexView::load("index.bin".as_ref())?;
//! let all = universe(&view);
//! let docs = eval_query(&view, &all, "кот && !собака".as_bytes())?;
//! # Ok(()) }
//! ```

pub mod binary;
pub mod build;
pub mod dict;
pub mod error;
pub mod freq;
pub mod search;
pub mod stem;
pub mod tokenize;
pub mod utf8;
pub mod walk;

pub use binary::{DocMeta, DocRecord, IndexView};
pub use build::{run_build, BuildBatch, BuildSummary};
pub use error::{Error, Result};
pub use tokenize::{tokenize_bytes, tokenize_file, TokenizeStats};
