//! Light rule-based Russian stemmer.
//!
//! Operates directly on the UTF-8 bytes of an already lower-cased token and
//! only ever truncates. The exact table and pass order are load-bearing: the
//! build stage and the query lexer must reduce a word to the same bytes or
//! queries silently lose recall.
//!
//! Passes, each gated on the result staying at least [`MIN_STEM_BYTES`] long:
//! reflexive `ся`/`сь`, then the first matching entry of the suffix table
//! (longest groups first), then a trailing soft/hard sign.

/// Stems shorter than this many bytes are never produced; tokens shorter
/// than this are left alone entirely.
pub const MIN_STEM_BYTES: usize = 6;

/// Ordered suffix table. One 4-byte-group entry, then the 3-byte groups, then
/// single vowels. Only the first match is applied, whether or not the floor
/// allows trimming it.
const SUFFIXES: &[&str] = &[
    "иями", // 8 bytes
    "ями", "ами", "ыми", "ими", "ого", "его", "ому", "ему", // 6 bytes
    "ых", "их", "ах", "ях", "ов", "ев", "ом", "ем", "ам", "ям", // 4 bytes
    "ую", "юю", "ая", "яя", "ое", "ее", "ый", "ий", "ые", "ие", // 4 bytes
    "а", "я", "о", "е", "ы", "и", "у", "ю", // 2 bytes
];

/// Compute the stemmed length of `tok` without mutating it.
pub fn stemmed_len(tok: &[u8]) -> usize {
    let mut n = tok.len();
    if n < MIN_STEM_BYTES {
        return n;
    }

    // Numeric tokens are identifiers, not words.
    if tok.iter().any(u8::is_ascii_digit) {
        return n;
    }

    // No Cyrillic lead byte among the first n-1 bytes means not Russian.
    if !tok[..n - 1].iter().any(|&b| b == 0xD0 || b == 0xD1) {
        return n;
    }

    // Reflexive "ся" (D1 81 D1 8F) / "сь" (D1 81 D1 8C).
    if n >= 4 {
        let t = &tok[n - 4..n];
        if t[0] == 0xD1
            && t[1] == 0x81
            && t[2] == 0xD1
            && (t[3] == 0x8F || t[3] == 0x8C)
            && n - 4 >= MIN_STEM_BYTES
        {
            n -= 4;
        }
    }

    for suf in SUFFIXES {
        let suf = suf.as_bytes();
        let m = suf.len();
        if m > n {
            continue;
        }
        if &tok[n - m..n] == suf {
            if n - m >= MIN_STEM_BYTES {
                n -= m;
            }
            break;
        }
    }

    // Trailing "ь" (D1 8C) or "ъ" (D1 8A).
    if n >= 2 && tok[n - 2] == 0xD1 && (tok[n - 1] == 0x8C || tok[n - 1] == 0x8A) && n - 2 >= MIN_STEM_BYTES {
        n -= 2;
    }

    n
}

/// Stem `tok` in place by truncation.
pub fn stem(tok: &mut Vec<u8>) {
    let n = stemmed_len(tok);
    tok.truncate(n);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stemmed(word: &str) -> String {
        let mut buf = word.as_bytes().to_vec();
        stem(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn strips_single_vowel_endings() {
        assert_eq!(stemmed("собака"), "собак");
        assert_eq!(stemmed("кошка"), "кошк");
        assert_eq!(stemmed("машина"), "машин");
    }

    #[test]
    fn short_tokens_untouched() {
        // "кот" is 6 bytes but "и" and "он" are under the floor.
        assert_eq!(stemmed("и"), "и");
        assert_eq!(stemmed("он"), "он");
        // 6 bytes ending in a consonant: nothing to strip.
        assert_eq!(stemmed("кот"), "кот");
    }

    #[test]
    fn floor_blocks_trimming() {
        // "мама" is 8 bytes; trimming "а" would leave 6, allowed.
        assert_eq!(stemmed("мама"), "мам");
        // "мам" + "и" = 8 bytes -> 6.
        assert_eq!(stemmed("мами"), "мам");
        // "тая" (6 bytes) ends in "ая" but 6-4 < floor: unchanged.
        assert_eq!(stemmed("тая"), "тая");
    }

    #[test]
    fn digit_guard() {
        assert_eq!(stemmed("март2024года"), "март2024года");
    }

    #[test]
    fn latin_guard() {
        assert_eq!(stemmed("statistics"), "statistics");
        assert_eq!(stemmed("regular"), "regular");
    }

    #[test]
    fn reflexive_then_suffix() {
        // учится -> учит (reflexive trimmed; "т" is not in the table)
        assert_eq!(stemmed("учится"), "учит");
        // улыбаться: "ся" trimmed, then "ь" pass leaves "улыбать" -> wait:
        // bytes: улыбаться(18) -> улыбать(14) by reflexive? "ться" ends in
        // "ся"; reflexive pass removes the final 4 bytes leaving "улыбать",
        // then no table suffix matches and the soft-sign pass trims to
        // "улыбат" (12 bytes).
        assert_eq!(stemmed("улыбаться"), "улыбат");
    }

    #[test]
    fn longest_group_first() {
        // "партиями" ends with "иями" (the 4-codepoint entry), not just "ями".
        assert_eq!(stemmed("партиями"), "парт");
        // "столами" only matches "ами".
        assert_eq!(stemmed("столами"), "стол");
    }

    #[test]
    fn first_match_stops_scan_even_when_floor_blocks() {
        // "линия" -> "лини": "я" matches and trims to 8 bytes; the scan
        // stops there and no shorter suffix is reconsidered.
        assert_eq!(stemmed("линия"), "лини");
    }

    #[test]
    fn trailing_signs() {
        assert_eq!(stemmed("площадь"), "площад");
        assert_eq!(stemmed("объезд"), "объезд");
    }

    #[test]
    fn idempotent_on_vocabulary() {
        for word in [
            "собака",
            "кошка",
            "машина",
            "программами",
            "государство",
            "площадь",
            "учится",
            "кот",
            "статья",
            "московского",
        ] {
            let once = stemmed(word);
            let twice = stemmed(&once);
            assert_eq!(once, twice, "stem not idempotent for {word}");
        }
    }

    #[test]
    fn never_lengthens_and_is_prefix() {
        for word in ["собака", "и", "linux", "ёжиками", "государствами"] {
            let out = stemmed(word);
            assert!(word.starts_with(&out));
            assert!(out.len() >= MIN_STEM_BYTES || out.len() == word.len());
        }
    }
}
