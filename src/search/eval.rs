//! RPN evaluation over posting lists.
//!
//! Operands are sorted ascending lists of distinct doc ids; every operator is
//! a single linear merge with monotone cursors. NOT is set difference against
//! the caller-supplied universe `[1..=D]`.

use crate::binary::IndexView;
use crate::error::Result;

use super::lexer::QueryToken;

/// `a ∩ b`.
pub fn intersect(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    out
}

/// `a ∪ b`.
pub fn union(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// `all \ a`.
pub fn difference(all: &[u32], a: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(all.len());
    let (mut i, mut j) = (0, 0);
    while i < all.len() && j < a.len() {
        match all[i].cmp(&a[j]) {
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                out.push(all[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    out.extend_from_slice(&all[i..]);
    out
}

fn term_list(view: &IndexView, term: &[u8]) -> Result<Vec<u32>> {
    match view.find(term) {
        Some((off, df)) => view.postings(off, df),
        None => Ok(Vec::new()),
    }
}

/// Evaluate an RPN stream. Malformed streams (operator underflow, or
/// anything but exactly one operand left at the end) yield an empty result
/// rather than an error.
pub fn eval_postfix(view: &IndexView, universe: &[u32], rpn: &[QueryToken]) -> Result<Vec<u32>> {
    let mut stack: Vec<Vec<u32>> = Vec::new();

    for tok in rpn {
        match tok {
            QueryToken::Term(term) => stack.push(term_list(view, term)?),
            QueryToken::Not => {
                let Some(a) = stack.pop() else {
                    return Ok(Vec::new());
                };
                stack.push(difference(universe, &a));
            }
            QueryToken::And | QueryToken::Or => {
                let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                    return Ok(Vec::new());
                };
                let r = if *tok == QueryToken::And {
                    intersect(&a, &b)
                } else {
                    union(&a, &b)
                };
                stack.push(r);
            }
            QueryToken::LParen | QueryToken::RParen => {}
        }
    }

    if stack.len() == 1 {
        Ok(stack.pop().unwrap())
    } else {
        Ok(Vec::new())
    }
}
