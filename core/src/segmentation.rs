//! Word segmentation of space-stripped text.
//!
//! A string of length n has 2^(n−1) possible compositions; this finds the
//! one maximizing the summed word-occurrence log-probability (under the edit
//! distance constraint) in linear time, by keeping one best partial
//! composition per window offset in a ring buffer of size
//! `max_segmentation_word_length`. Misspelled parts are corrected through
//! single-term lookup as they are considered; pre-existing spaces are
//! allowed and count toward the edit distance when they turn out to be
//! unwanted.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, SpellError};
use crate::suggestion::Verbosity;
use crate::symspell::{LookupOptions, SymSpell, CORPUS_WORD_COUNT};

/// A (partial) segmentation: the reconstructed input, its corrected form,
/// the accumulated edit distance and the accumulated log10 probability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    /// The input with word boundaries inserted, uncorrected.
    pub segmented_string: String,
    /// The segmented and spelling-corrected string.
    pub corrected_string: String,
    /// Edit distance between input and corrected string.
    pub distance_sum: usize,
    /// Sum of word occurrence probabilities in log10 scale; a measure of how
    /// probable the corrected segmentation is.
    pub log_prob_sum: f64,
}

/// Optional behaviors for [`SymSpell::word_segmentation_with_options`].
#[derive(Debug, Clone, Default)]
pub struct SegmentationOptions {
    /// Per-part correction budget; defaults to the index maximum. Zero means
    /// segmentation only, no correction.
    pub max_edit_distance: Option<usize>,
    /// Longest part considered; defaults to the longest dictionary word.
    pub max_segmentation_word_length: Option<usize>,
    /// Parts matching this pattern pass through lookup uncorrected.
    pub ignore_token: Option<Regex>,
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl SymSpell {
    /// Divide a string into words, inserting missing spaces and correcting
    /// misspellings along the way.
    pub fn word_segmentation(&self, phrase: &str) -> Result<Composition> {
        self.word_segmentation_with_options(phrase, &SegmentationOptions::default())
    }

    pub fn word_segmentation_with_options(
        &self,
        phrase: &str,
        options: &SegmentationOptions,
    ) -> Result<Composition> {
        let max_edit_distance = options
            .max_edit_distance
            .unwrap_or(self.max_dictionary_edit_distance);
        if max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SpellError::DistanceBudgetExceeded {
                requested: max_edit_distance,
                maximum: self.max_dictionary_edit_distance,
            });
        }
        let max_segmentation_word_length = options
            .max_segmentation_word_length
            .unwrap_or(self.max_length);

        // normalize ligatures and strip soft hyphens before segmenting
        let phrase_chars: Vec<char> = phrase.nfkc().filter(|&c| c != '\u{00AD}').collect();
        let phrase_len = phrase_chars.len();

        let window = max_segmentation_word_length.min(phrase_len);
        if window == 0 {
            return Ok(Composition::default());
        }

        let lookup_options = LookupOptions {
            max_edit_distance: Some(max_edit_distance),
            ignore_token: options.ignore_token.clone(),
            ..LookupOptions::default()
        };

        let mut compositions: Vec<Composition> = vec![Composition::default(); window];
        let mut idx: isize = -1;

        // outer loop (column): all possible part start positions
        for j in 0..phrase_len {
            // inner loop (row): all possible part lengths from this start;
            // a part can't be longer than the longest dictionary word,
            // other than as a long unknown word
            let imax = (phrase_len - j).min(max_segmentation_word_length);
            for i in 1..=imax {
                let mut part: Vec<char> = phrase_chars[j..j + i].to_vec();
                let mut separator_len = 0;
                let mut top_ed = 0;

                if part[0].is_whitespace() {
                    // remove the space; it is already a boundary
                    part.remove(0);
                } else {
                    // a space did not exist and has to be inserted
                    separator_len = 1;
                }

                // interior spaces are unwanted here; removing them costs one
                // edit each
                top_ed += part.len();
                part.retain(|&c| c != ' ');
                top_ed -= part.len();

                let part_str: String = part.iter().collect();
                let results = self.lookup_with_options(
                    &part_str.to_lowercase(),
                    Verbosity::Top,
                    &lookup_options,
                )?;

                let top_result;
                let top_log_prob;
                if let Some(best) = results.first() {
                    top_result = if part.first().is_some_and(|c| c.is_uppercase()) {
                        capitalize(&best.term)
                    } else {
                        best.term.clone()
                    };
                    top_ed += best.distance;
                    // Naive Bayes: word probabilities are assumed
                    // independent, so the composition probability is their
                    // product - summed here as log10 to avoid underflow
                    top_log_prob = (best.count as f64 / CORPUS_WORD_COUNT as f64).log10();
                } else {
                    top_result = part_str.clone();
                    // penalize unknown words by their length, otherwise one
                    // long unknown word would beat many inserted spaces
                    top_ed += part.len();
                    top_log_prob = (10.0
                        / CORPUS_WORD_COUNT as f64
                        / 10f64.powi(part.len() as i32))
                    .log10();
                }

                let dest = ((i as isize + idx).rem_euclid(window as isize)) as usize;
                if j == 0 {
                    compositions[dest] = Composition {
                        segmented_string: part_str,
                        corrected_string: top_result,
                        distance_sum: top_ed,
                        log_prob_sum: top_log_prob,
                    };
                    continue;
                }

                let source = &compositions[idx as usize];
                let replace = i == max_segmentation_word_length
                    // replace if same edit distance (with or without the
                    // separator) but better probability
                    || ((source.distance_sum + top_ed == compositions[dest].distance_sum
                        || source.distance_sum + separator_len + top_ed
                            == compositions[dest].distance_sum)
                        && compositions[dest].log_prob_sum
                            < source.log_prob_sum + top_log_prob)
                    // replace if smaller edit distance
                    || source.distance_sum + separator_len + top_ed
                        < compositions[dest].distance_sum;
                if replace {
                    // punctuation and apostrophe contractions attach to the
                    // previous word without a space
                    let attach_bare = (part.len() == 1 && !part[0].is_alphanumeric())
                        || (part.len() == 2 && part[0] == '\'');
                    let separator = if attach_bare { "" } else { " " };
                    let source = source.clone();
                    compositions[dest] = Composition {
                        segmented_string: format!(
                            "{}{}{}",
                            source.segmented_string, separator, part_str
                        ),
                        corrected_string: format!(
                            "{}{}{}",
                            source.corrected_string, separator, top_result
                        ),
                        distance_sum: source.distance_sum + separator_len + top_ed,
                        log_prob_sum: source.log_prob_sum + top_log_prob,
                    };
                }
            }
            idx = (idx + 1).rem_euclid(window as isize);
        }
        Ok(compositions[idx as usize].clone())
    }
}
