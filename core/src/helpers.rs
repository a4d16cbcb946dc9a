//! String helpers: tokenization, acronym/number detection, casing transfer.
//!
//! The word pattern matches alphanumeric runs (Unicode-aware, excluding `_`)
//! with embedded apostrophes, so "don't" stays one token and CJK text is not
//! split at every character boundary.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SpellError};

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\W_]+['’]*[^\W_]*)").expect("word pattern"));

static ACRONYM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{2,}\b").expect("acronym pattern"));

/// Create a non-unique word list from sample text. Language independent.
pub fn parse_words(phrase: &str, preserve_case: bool) -> Vec<String> {
    let text: String;
    let haystack = if preserve_case {
        phrase
    } else {
        text = phrase.to_lowercase();
        &text
    };
    WORD_PATTERN
        .find_iter(haystack)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whether the word is all caps (and/or digits), e.g. "ABCDE" or "AB12E".
/// With `match_any_term_with_digits`, any word containing a digit also
/// qualifies.
pub fn is_acronym(word: &str, match_any_term_with_digits: bool) -> bool {
    if ACRONYM_PATTERN.is_match(word) {
        return true;
    }
    match_any_term_with_digits && word.chars().any(|c| c.is_numeric())
}

pub fn try_parse_i64(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Normalized similarity in [0, 1], or -1.0 for an out-of-budget distance.
pub fn to_similarity(distance: i64, length: usize) -> f64 {
    if distance < 0 {
        -1.0
    } else {
        1.0 - distance as f64 / length as f64
    }
}

/// Transfer the casing of `text_w_casing` onto `text_wo_casing`,
/// character by character. Both strings must have the same char length.
pub fn transfer_casing_for_matching_text(
    text_w_casing: &str,
    text_wo_casing: &str,
) -> Result<String> {
    if text_w_casing.chars().count() != text_wo_casing.chars().count() {
        return Err(SpellError::InputShape(
            "casing transfer for matching text requires equal lengths".into(),
        ));
    }
    let mut out = String::with_capacity(text_wo_casing.len());
    for (w, wo) in text_w_casing.chars().zip(text_wo_casing.chars()) {
        if w.is_uppercase() {
            out.extend(wo.to_uppercase());
        } else {
            out.extend(wo.to_lowercase());
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditOp {
    Equal,
    Replace,
    Insert,
    Delete,
}

/// Edit script between `a` and `b` as (op, i1, i2, j1, j2) runs, computed from
/// a Levenshtein cost matrix backtrace with adjacent same-op steps merged.
fn edit_opcodes(a: &[char], b: &[char]) -> Vec<(EditOp, usize, usize, usize, usize)> {
    let n = a.len();
    let m = b.len();
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        dp[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let sub = dp[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]);
            let del = dp[i - 1][j] + 1;
            let ins = dp[i][j - 1] + 1;
            dp[i][j] = sub.min(del).min(ins);
        }
    }

    // Walk back from the corner, preferring diagonal steps so equal runs stay
    // contiguous.
    let mut steps: Vec<(EditOp, usize, usize)> = Vec::new();
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && dp[i][j] == dp[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]) {
            let op = if a[i - 1] == b[j - 1] {
                EditOp::Equal
            } else {
                EditOp::Replace
            };
            i -= 1;
            j -= 1;
            steps.push((op, i, j));
        } else if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
            i -= 1;
            steps.push((EditOp::Delete, i, j));
        } else {
            j -= 1;
            steps.push((EditOp::Insert, i, j));
        }
    }
    steps.reverse();

    let mut opcodes: Vec<(EditOp, usize, usize, usize, usize)> = Vec::new();
    for (op, i, j) in steps {
        let (di, dj) = match op {
            EditOp::Equal | EditOp::Replace => (1, 1),
            EditOp::Delete => (1, 0),
            EditOp::Insert => (0, 1),
        };
        match opcodes.last_mut() {
            Some(last) if last.0 == op && last.2 == i && last.4 == j => {
                last.2 = i + di;
                last.4 = j + dj;
            }
            _ => opcodes.push((op, i, i + di, j, j + dj)),
        }
    }
    opcodes
}

/// Transfer the casing of `text_w_casing` onto the similar (but not
/// necessarily equally shaped) `text_wo_casing`, walking an edit script
/// between the lowercased original and the target.
pub fn transfer_casing_for_similar_text(
    text_w_casing: &str,
    text_wo_casing: &str,
) -> Result<String> {
    if text_wo_casing.is_empty() {
        return Ok(String::new());
    }
    if text_w_casing.is_empty() {
        return Err(SpellError::InputShape(
            "casing transfer needs a non-empty cased source".into(),
        ));
    }

    let w: Vec<char> = text_w_casing.chars().collect();
    let w_lower: Vec<char> = w
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    let wo: Vec<char> = text_wo_casing.chars().collect();

    let mut out = String::with_capacity(text_wo_casing.len());
    for (op, i1, i2, j1, j2) in edit_opcodes(&w_lower, &wo) {
        match op {
            EditOp::Equal => out.extend(w[i1..i2].iter()),
            EditOp::Delete => {}
            EditOp::Insert => {
                // No matching source character: borrow the casing of the
                // neighboring one (word-initial inserts look forward).
                let reference = if i1 == 0 || w[i1 - 1] == ' ' {
                    w.get(i1).copied()
                } else {
                    Some(w[i1 - 1])
                };
                let upper = reference.map(|c| c.is_uppercase()).unwrap_or(false);
                for c in &wo[j1..j2] {
                    if upper {
                        out.extend(c.to_uppercase());
                    } else {
                        out.extend(c.to_lowercase());
                    }
                }
            }
            EditOp::Replace => {
                let w_seg = &w[i1..i2];
                let wo_seg = &wo[j1..j2];
                // Transfer char by char; when the cased side runs out, carry
                // the last seen casing over the remainder.
                let mut last_upper = false;
                for (k, c) in wo_seg.iter().enumerate() {
                    if let Some(src) = w_seg.get(k) {
                        last_upper = src.is_uppercase();
                    }
                    if last_upper {
                        out.extend(c.to_uppercase());
                    } else {
                        out.extend(c.to_lowercase());
                    }
                }
            }
        }
    }
    Ok(out)
}
