//! Exhaustive comparison of the optimized comparers against plain full-matrix
//! reference implementations, over every permutation-derived string of a
//! small alphabet and several distance budgets.

use libspell_core::edit_distance::{DamerauOsa, DistanceComparer, Levenshtein};

fn reference_levenshtein(a: &str, b: &str, max_distance: usize) -> i64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut d = vec![vec![0i64; b.len() + 1]; a.len() + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i as i64;
    }
    for j in 0..=b.len() {
        d[0][j] = j as i64;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = i64::from(a[i - 1] != b[j - 1]);
            d[i][j] = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
        }
    }
    let distance = d[a.len()][b.len()];
    if distance <= max_distance as i64 {
        distance
    } else {
        -1
    }
}

fn reference_damerau_osa(a: &str, b: &str, max_distance: usize) -> i64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut d = vec![vec![0i64; b.len() + 1]; a.len() + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i as i64;
    }
    for j in 0..=b.len() {
        d[0][j] = j as i64;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = i64::from(a[i - 1] != b[j - 1]);
            d[i][j] = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d[i][j] = d[i][j].min(d[i - 2][j - 2] + cost);
            }
        }
    }
    let distance = d[a.len()][b.len()];
    if distance <= max_distance as i64 {
        distance
    } else {
        -1
    }
}

/// The empty string plus every ordering of every subset of "abcd".
fn test_strings() -> Vec<String> {
    let alphabet = ['a', 'b', 'c', 'd'];
    let mut strings = vec![String::new()];
    let n = alphabet.len();
    for mask in 1u32..(1 << n) {
        let subset: Vec<char> = (0..n)
            .filter(|&i| mask & (1 << i) != 0)
            .map(|i| alphabet[i])
            .collect();
        permute(&subset, &mut Vec::new(), &mut strings);
    }
    strings
}

fn permute(rest: &[char], prefix: &mut Vec<char>, out: &mut Vec<String>) {
    if rest.is_empty() {
        out.push(prefix.iter().collect());
        return;
    }
    for (i, &c) in rest.iter().enumerate() {
        let mut remaining = rest.to_vec();
        remaining.remove(i);
        prefix.push(c);
        permute(&remaining, prefix, out);
        prefix.pop();
    }
}

#[test]
fn levenshtein_matches_reference() {
    let strings = test_strings();
    let mut comparer = Levenshtein::new();
    for max_distance in [0usize, 1, 3, 1 << 20] {
        for a in &strings {
            for b in &strings {
                assert_eq!(
                    comparer.distance(a, b, max_distance),
                    reference_levenshtein(a, b, max_distance),
                    "levenshtein {a:?} vs {b:?} max {max_distance}"
                );
            }
        }
    }
}

#[test]
fn damerau_osa_matches_reference() {
    let strings = test_strings();
    let mut comparer = DamerauOsa::new();
    for max_distance in [0usize, 1, 3, 1 << 20] {
        for a in &strings {
            for b in &strings {
                assert_eq!(
                    comparer.distance(a, b, max_distance),
                    reference_damerau_osa(a, b, max_distance),
                    "damerau-osa {a:?} vs {b:?} max {max_distance}"
                );
            }
        }
    }
}
