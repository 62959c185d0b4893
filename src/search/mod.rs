//! Boolean query pipeline: lex → postfix → evaluate → format.
//!
//! Results come back in ascending doc-id order (the only order the merges
//! produce); pagination is a window over that order. Result rows go to the
//! supplied writer, diagnostics to tracing, so the stdout protocol stays
//! machine-readable.

pub mod eval;
pub mod lexer;
pub mod postfix;

use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::debug;

use crate::binary::IndexView;
use crate::error::Result;

pub use eval::{difference, eval_postfix, intersect, union};
pub use lexer::{lex, QueryToken};
pub use postfix::to_postfix;

/// Build the universe list `[1..=docs_count]` used by NOT.
pub fn universe(view: &IndexView) -> Vec<u32> {
    (1..=view.docs_count() as u32).collect()
}

/// Evaluate one query line against the index.
pub fn eval_query(view: &IndexView, all: &[u32], query: &[u8]) -> Result<Vec<u32>> {
    let rpn = to_postfix(lex(query));
    eval_postfix(view, all, &rpn)
}

fn base_url(source_id: u32) -> &'static str {
    match source_id {
        2 => "https://ru.wikisource.org/?curid=",
        _ => "https://ru.wikipedia.org/?curid=",
    }
}

/// Write the result protocol for one query: a status line, then one row per
/// document inside the `[offset, offset + limit)` window.
pub fn write_results(
    view: &IndexView,
    out: &mut impl Write,
    result: &[u32],
    offset: u32,
    limit: u32,
) -> Result<()> {
    let total = result.len() as u32;
    writeln!(out, "OK\ttotal={total}\toffset={offset}\tlimit={limit}")?;

    let start = offset.min(total) as usize;
    let end = offset.saturating_add(limit).min(total) as usize;

    for &doc_id in &result[start..end] {
        let Some(meta) = view.doc_meta(doc_id) else {
            continue;
        };
        write!(out, "{doc_id}\t{}\t", meta.page_id)?;
        out.write_all(meta.title)?;
        writeln!(out, "\t{}{}", base_url(meta.source_id), meta.page_id)?;
    }
    Ok(())
}

/// Interactive search loop: one query per input line, blank lines skipped.
pub fn run_queries(
    view: &IndexView,
    input: &mut impl BufRead,
    out: &mut impl Write,
    offset: u32,
    limit: u32,
) -> Result<()> {
    let all = universe(view);

    // Queries are raw bytes: the lexer already copes with anything, so the
    // loop must not insist on valid UTF-8 either.
    let mut line: Vec<u8> = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        if line
            .iter()
            .all(|&b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        {
            continue;
        }

        let t0 = Instant::now();
        let result = eval_query(view, &all, &line)?;
        let shown = String::from_utf8_lossy(&line);
        debug!(
            query = shown.trim_end(),
            ms = t0.elapsed().as_secs_f64() * 1000.0,
            hits = result.len(),
            "query evaluated"
        );

        write_results(view, out, &result, offset, limit)?;
        out.flush()?;
    }
}
