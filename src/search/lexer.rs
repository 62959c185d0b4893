//! Query lexing.
//!
//! Operators are `!`, `&&`, `||` and parentheses; everything else that can
//! start a token is consumed as a term, lower-cased and stemmed with exactly
//! the pipeline the index was built with. An AND is inserted wherever two
//! operands merely sit next to each other, so `кот собака` reads as
//! `кот && собака`.

use crate::{stem, utf8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    Term(Vec<u8>),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Consume a maximal run of tokenic codepoints starting at `*i`.
fn read_term(query: &[u8], i: &mut usize) -> Option<Vec<u8>> {
    let mut pos = *i;
    let mut term = Vec::with_capacity(16);

    while pos < query.len() {
        let Some((cp, used)) = utf8::decode_one(&query[pos..]) else {
            break;
        };
        if !utf8::is_token_char(cp) {
            break;
        }
        let mut enc = [0u8; 4];
        let n = utf8::encode_one(utf8::to_lower(cp), &mut enc);
        term.extend_from_slice(&enc[..n]);
        pos += used;
    }

    if term.is_empty() {
        return None;
    }
    stem::stem(&mut term);
    *i = pos;
    Some(term)
}

/// Lex a query line into tokens with implicit ANDs inserted.
pub fn lex(query: &[u8]) -> Vec<QueryToken> {
    let mut out = Vec::new();
    let mut i = 0;

    // True after a TERM or ')': the next operand needs a joining AND.
    let mut after_operand = false;

    while i < query.len() {
        let b = query[i];
        if is_space(b) {
            i += 1;
            continue;
        }

        match b {
            b'(' => {
                if after_operand {
                    out.push(QueryToken::And);
                }
                out.push(QueryToken::LParen);
                after_operand = false;
                i += 1;
            }
            b')' => {
                out.push(QueryToken::RParen);
                after_operand = true;
                i += 1;
            }
            b'!' => {
                if after_operand {
                    out.push(QueryToken::And);
                }
                out.push(QueryToken::Not);
                after_operand = false;
                i += 1;
            }
            b'&' if query.get(i + 1) == Some(&b'&') => {
                out.push(QueryToken::And);
                after_operand = false;
                i += 2;
            }
            b'|' if query.get(i + 1) == Some(&b'|') => {
                out.push(QueryToken::Or);
                after_operand = false;
                i += 2;
            }
            _ => match read_term(query, &mut i) {
                Some(term) => {
                    if after_operand {
                        out.push(QueryToken::And);
                    }
                    out.push(QueryToken::Term(term));
                    after_operand = true;
                }
                // A byte that starts neither an operator nor a token.
                None => i += 1,
            },
        }
    }

    out
}
