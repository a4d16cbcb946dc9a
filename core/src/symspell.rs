//! Symmetric-delete index and single-term lookup.
//!
//! The index trades space for speed: for every dictionary term it stores all
//! strings reachable by up to `max_dictionary_edit_distance` character
//! deletions from the term's prefix, each mapping back to the originating
//! terms. Lookup then only has to generate deletions of the query prefix and
//! intersect, invoking the (comparatively expensive) edit-distance comparer
//! on the few survivors.
//!
//! Public API:
//! - `SymSpell` - construction, dictionary ingestion, `lookup`
//! - `LookupOptions` - optional lookup behavior (unknown sentinel, token
//!   passthrough pattern, casing transfer)
//!
//! Compound correction and word segmentation build on `lookup` and live in
//! the `compound` and `segmentation` modules.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use regex::Regex;
use tracing::{debug, warn};

use crate::edit_distance::{DistanceAlgorithm, EditDistance};
use crate::error::{Result, SpellError};
use crate::helpers;
use crate::suggestion::{Suggestion, Verbosity};
use crate::Config;

/// Number of words in the corpus the shipped frequency estimates were drawn
/// from. Word occurrence probability p = count / CORPUS_WORD_COUNT.
pub const CORPUS_WORD_COUNT: u64 = 1_024_908_267_229;

/// Optional behaviors for [`SymSpell::lookup_with_options`].
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Per-call edit-distance budget; defaults to the index maximum.
    pub max_edit_distance: Option<usize>,
    /// Append an unknown-word sentinel (distance = budget + 1, count 0) when
    /// nothing is found.
    pub include_unknown: bool,
    /// Terms matching this pattern (anchored at the start) pass through as
    /// zero-distance suggestions.
    pub ignore_token: Option<Regex>,
    /// Lowercase the phrase for matching and map the casing of the input
    /// back onto each suggestion.
    pub transfer_casing: bool,
}

/// Symmetric-delete index over a frequency dictionary.
pub struct SymSpell {
    pub(crate) words: AHashMap<String, u64>,
    pub(crate) below_threshold_words: AHashMap<String, u64>,
    pub(crate) deletes: AHashMap<String, Vec<String>>,
    pub(crate) bigrams: AHashMap<String, u64>,
    /// Smallest observed bigram count, used as a ceiling when estimating
    /// unseen bigram counts from unigram products.
    pub(crate) bigram_count_min: u64,
    pub(crate) max_dictionary_edit_distance: usize,
    pub(crate) prefix_length: usize,
    pub(crate) count_threshold: u64,
    pub(crate) distance_algorithm: DistanceAlgorithm,
    /// Length (in chars) of the longest word in the dictionary.
    pub(crate) max_length: usize,
}

impl SymSpell {
    /// Create an empty index.
    ///
    /// `prefix_length` must be at least 1 and strictly greater than
    /// `max_dictionary_edit_distance`.
    pub fn new(
        max_dictionary_edit_distance: usize,
        prefix_length: usize,
        count_threshold: u64,
    ) -> Result<Self> {
        if prefix_length < 1 || prefix_length <= max_dictionary_edit_distance {
            return Err(SpellError::Configuration(format!(
                "prefix_length ({prefix_length}) must be at least 1 and greater than \
                 max_dictionary_edit_distance ({max_dictionary_edit_distance})"
            )));
        }
        Ok(Self {
            words: AHashMap::new(),
            below_threshold_words: AHashMap::new(),
            deletes: AHashMap::new(),
            bigrams: AHashMap::new(),
            bigram_count_min: u64::MAX,
            max_dictionary_edit_distance,
            prefix_length,
            count_threshold,
            distance_algorithm: DistanceAlgorithm::DamerauOsa,
            max_length: 0,
        })
    }

    /// Create an index from a validated [`Config`].
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let mut index = Self::new(
            config.max_dictionary_edit_distance,
            config.prefix_length,
            config.count_threshold,
        )?;
        index.distance_algorithm = config.distance_algorithm;
        Ok(index)
    }

    pub fn max_dictionary_edit_distance(&self) -> usize {
        self.max_dictionary_edit_distance
    }

    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    pub fn count_threshold(&self) -> u64 {
        self.count_threshold
    }

    pub fn distance_algorithm(&self) -> DistanceAlgorithm {
        self.distance_algorithm
    }

    /// Length in chars of the longest dictionary word (0 when empty).
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of correctly spelled words in the dictionary.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of delete buckets in the index.
    pub fn delete_count(&self) -> usize {
        self.deletes.len()
    }

    /// Number of loaded bigrams.
    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    /// Frequency of a dictionary word, if present.
    pub fn word_frequency(&self, term: &str) -> Option<u64> {
        self.words.get(term).copied()
    }

    pub fn contains_word(&self, term: &str) -> bool {
        self.words.contains_key(term)
    }

    /// Create or update a dictionary entry.
    ///
    /// Counts accumulate with saturation. An entry below `count_threshold`
    /// is staged separately and promoted (deletes generated) once its
    /// accumulated count reaches the threshold. Returns `true` only when the
    /// term was added as a new correctly spelled word.
    pub fn create_dictionary_entry<T: Into<String>>(&mut self, term: T, count: u64) -> bool {
        let term = term.into();
        let mut count = count;
        if count == 0 && self.count_threshold > 0 {
            return false;
        }

        if let Some(&previous) = self.below_threshold_words.get(&term) {
            count = previous.saturating_add(count);
            if count >= self.count_threshold {
                // reached threshold: promote to the words table below
                self.below_threshold_words.remove(&term);
            } else {
                self.below_threshold_words.insert(term, count);
                return false;
            }
        } else if let Some(existing) = self.words.get_mut(&term) {
            *existing = existing.saturating_add(count);
            return false;
        } else if count < self.count_threshold {
            self.below_threshold_words.insert(term, count);
            return false;
        }

        // A new word above the threshold. Deletes are generated once, no
        // matter how often the word occurs later.
        let term_len = term.chars().count();
        if term_len > self.max_length {
            self.max_length = term_len;
        }
        for delete in self.edits_prefix(&term) {
            self.deletes.entry(delete).or_default().push(term.clone());
        }
        self.words.insert(term, count);
        true
    }

    /// Remove a word and all its delete-bucket references. Returns `false`
    /// if the word was not present.
    pub fn delete_dictionary_entry(&mut self, term: &str) -> bool {
        if self.words.remove(term).is_none() {
            return false;
        }
        let term_len = term.chars().count();
        if term_len == self.max_length {
            self.max_length = self
                .words
                .keys()
                .map(|w| w.chars().count())
                .max()
                .unwrap_or(0);
        }
        for delete in self.edits_prefix(term) {
            let now_empty = match self.deletes.get_mut(&delete) {
                Some(bucket) => {
                    bucket.retain(|s| s != term);
                    bucket.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.deletes.remove(&delete);
            }
        }
        true
    }

    /// Load word/count pairs from a dictionary file, merging with data
    /// already present. Returns `false` (and logs) if the file is missing;
    /// malformed lines are skipped.
    ///
    /// `separator` of `None` splits on runs of whitespace.
    pub fn load_dictionary<P: AsRef<Path>>(
        &mut self,
        path: P,
        term_index: usize,
        count_index: usize,
        separator: Option<char>,
    ) -> bool {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(path = %path.display(), %err, "dictionary file not found");
                return false;
            }
        };
        self.load_dictionary_stream(BufReader::new(file), term_index, count_index, separator)
    }

    /// Stream flavor of [`SymSpell::load_dictionary`].
    pub fn load_dictionary_stream<R: BufRead>(
        &mut self,
        reader: R,
        term_index: usize,
        count_index: usize,
        separator: Option<char>,
    ) -> bool {
        let mut loaded = 0u64;
        for line in reader.lines().map_while(std::io::Result::ok) {
            let parts = split_line(&line, separator);
            if parts.len() < 2 {
                continue;
            }
            let (Some(term), Some(count_text)) = (parts.get(term_index), parts.get(count_index))
            else {
                continue;
            };
            let Ok(count) = count_text.parse::<u64>() else {
                continue;
            };
            self.create_dictionary_entry((*term).to_string(), count);
            loaded += 1;
        }
        debug!(entries = loaded, "dictionary loaded");
        true
    }

    /// Load a bigram frequency file. With the default whitespace separator
    /// the key is `parts[term_index]` and `parts[term_index + 1]` joined by
    /// a single space (minimum three columns); with an explicit separator
    /// the term column already holds the whole bigram.
    pub fn load_bigram_dictionary<P: AsRef<Path>>(
        &mut self,
        path: P,
        term_index: usize,
        count_index: usize,
        separator: Option<char>,
    ) -> bool {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(path = %path.display(), %err, "bigram dictionary file not found");
                return false;
            }
        };
        self.load_bigram_dictionary_stream(BufReader::new(file), term_index, count_index, separator)
    }

    /// Stream flavor of [`SymSpell::load_bigram_dictionary`].
    pub fn load_bigram_dictionary_stream<R: BufRead>(
        &mut self,
        reader: R,
        term_index: usize,
        count_index: usize,
        separator: Option<char>,
    ) -> bool {
        let min_parts = if separator.is_none() { 3 } else { 2 };
        let mut loaded = 0u64;
        for line in reader.lines().map_while(std::io::Result::ok) {
            let parts = split_line(&line, separator);
            if parts.len() < min_parts {
                continue;
            }
            let key = match separator {
                None => match (parts.get(term_index), parts.get(term_index + 1)) {
                    (Some(first), Some(second)) => format!("{first} {second}"),
                    _ => continue,
                },
                Some(_) => match parts.get(term_index) {
                    Some(key) => (*key).to_string(),
                    None => continue,
                },
            };
            let Some(count) = parts.get(count_index).and_then(|c| c.parse::<u64>().ok()) else {
                continue;
            };
            self.bigrams.insert(key, count);
            if count < self.bigram_count_min {
                self.bigram_count_min = count;
            }
            loaded += 1;
        }
        debug!(entries = loaded, "bigram dictionary loaded");
        true
    }

    /// Build the dictionary from plain text: every token matched by the word
    /// pattern is inserted with count 1.
    pub fn create_dictionary<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(path = %path.display(), %err, "corpus file not found");
                return false;
            }
        };
        self.create_dictionary_stream(BufReader::new(file))
    }

    /// Stream flavor of [`SymSpell::create_dictionary`].
    pub fn create_dictionary_stream<R: BufRead>(&mut self, reader: R) -> bool {
        for line in reader.lines().map_while(std::io::Result::ok) {
            for token in helpers::parse_words(&line, false) {
                self.create_dictionary_entry(token, 1);
            }
        }
        true
    }

    /// Find suggested spellings for `phrase`, sorted by edit distance, then
    /// by descending frequency. See [`Verbosity`] for how many are returned.
    pub fn lookup(
        &self,
        phrase: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
    ) -> Result<Vec<Suggestion>> {
        self.lookup_with_options(
            phrase,
            verbosity,
            &LookupOptions {
                max_edit_distance: Some(max_edit_distance),
                ..LookupOptions::default()
            },
        )
    }

    pub fn lookup_with_options(
        &self,
        phrase: &str,
        verbosity: Verbosity,
        options: &LookupOptions,
    ) -> Result<Vec<Suggestion>> {
        let max_edit_distance = options
            .max_edit_distance
            .unwrap_or(self.max_dictionary_edit_distance);
        if max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SpellError::DistanceBudgetExceeded {
                requested: max_edit_distance,
                maximum: self.max_dictionary_edit_distance,
            });
        }

        let original_phrase = phrase;
        let lowered;
        let phrase: &str = if options.transfer_casing {
            lowered = phrase.to_lowercase();
            &lowered
        } else {
            phrase
        };
        let phrase_chars: Vec<char> = phrase.chars().collect();
        let phrase_len = phrase_chars.len();

        let finish = |mut suggestions: Vec<Suggestion>| -> Vec<Suggestion> {
            if suggestions.len() > 1 {
                suggestions.sort();
            }
            if options.transfer_casing {
                for suggestion in suggestions.iter_mut() {
                    if let Ok(cased) =
                        helpers::transfer_casing_for_similar_text(original_phrase, &suggestion.term)
                    {
                        suggestion.term = cased;
                    }
                }
            }
            if options.include_unknown && suggestions.is_empty() {
                suggestions.push(Suggestion::new(phrase, max_edit_distance + 1, 0));
            }
            suggestions
        };

        let mut suggestions: Vec<Suggestion> = Vec::new();

        // early exit - word is too big to possibly match any dictionary word
        if phrase_len > self.max_length + max_edit_distance {
            return Ok(finish(suggestions));
        }

        // quick look for an exact match
        if let Some(&count) = self.words.get(phrase) {
            suggestions.push(Suggestion::new(phrase, 0, count));
            if verbosity != Verbosity::All {
                return Ok(finish(suggestions));
            }
        }

        if let Some(pattern) = &options.ignore_token {
            if pattern.find(phrase).is_some_and(|m| m.start() == 0) {
                suggestions.push(Suggestion::new(phrase, 0, 1));
                if verbosity != Verbosity::All {
                    return Ok(finish(suggestions));
                }
            }
        }

        // with a zero budget the above was all there is to check
        if max_edit_distance == 0 {
            return Ok(finish(suggestions));
        }

        let mut considered_deletes: AHashSet<String> = AHashSet::new();
        let mut considered_suggestions: AHashSet<String> = AHashSet::new();
        // the exact-match check above already covered the phrase itself
        considered_suggestions.insert(phrase.to_string());

        // shrinks as better suggestions are found (except for Verbosity::All)
        let mut max_edit_distance_2 = max_edit_distance;
        let phrase_prefix_len = phrase_len.min(self.prefix_length);
        let mut candidates: Vec<String> = vec![phrase_chars[..phrase_prefix_len].iter().collect()];

        let mut comparer = EditDistance::new(self.distance_algorithm);

        let mut candidate_index = 0;
        while candidate_index < candidates.len() {
            let candidate = candidates[candidate_index].clone();
            candidate_index += 1;
            let candidate_len = candidate.chars().count();
            let len_diff = phrase_prefix_len - candidate_len;

            // Candidates are ordered by delete distance, so once one is
            // beyond the current best there are no better ones coming
            // (unless every suggestion is wanted).
            if len_diff > max_edit_distance_2 {
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            if let Some(bucket) = self.deletes.get(&candidate) {
                for suggestion_term in bucket {
                    if suggestion_term.as_str() == phrase {
                        continue;
                    }
                    let suggestion_chars: Vec<char> = suggestion_term.chars().collect();
                    let suggestion_len = suggestion_chars.len();
                    // A shorter term, or an equal-length different term, can
                    // only share this bucket through a delete of its own that
                    // the phrase cannot reach.
                    if suggestion_len.abs_diff(phrase_len) > max_edit_distance_2
                        || suggestion_len < candidate_len
                        || (suggestion_len == candidate_len && suggestion_term != &candidate)
                    {
                        continue;
                    }
                    let suggestion_prefix_len = suggestion_len.min(self.prefix_length);
                    if suggestion_prefix_len > phrase_prefix_len
                        && suggestion_prefix_len - candidate_len > max_edit_distance_2
                    {
                        continue;
                    }

                    let distance;
                    if candidate_len == 0 {
                        // no common chars: distance is the longer length
                        let shortcut = phrase_len.max(suggestion_len);
                        if shortcut > max_edit_distance_2
                            || !considered_suggestions.insert(suggestion_term.clone())
                        {
                            continue;
                        }
                        distance = shortcut;
                    } else if suggestion_len == 1 {
                        let shortcut = if phrase_chars.contains(&suggestion_chars[0]) {
                            phrase_len - 1
                        } else {
                            phrase_len
                        };
                        if shortcut > max_edit_distance_2
                            || !considered_suggestions.insert(suggestion_term.clone())
                        {
                            continue;
                        }
                        distance = shortcut;
                    } else {
                        // The candidate used up all prefix edits: unless the
                        // trailing characters already agree, the real
                        // distance must exceed the budget and the comparer
                        // call can be skipped.
                        let prefix_edits_exhausted =
                            self.prefix_length - max_edit_distance == candidate_len;
                        let min_distance: isize = if prefix_edits_exhausted {
                            phrase_len.min(suggestion_len) as isize - self.prefix_length as isize
                        } else {
                            0
                        };
                        if (prefix_edits_exhausted
                            && min_distance > 1
                            && phrase_chars[(phrase_len as isize + 1 - min_distance) as usize..]
                                != suggestion_chars
                                    [(suggestion_len as isize + 1 - min_distance) as usize..])
                            || (min_distance > 0
                                && phrase_chars[(phrase_len as isize - min_distance) as usize]
                                    != suggestion_chars
                                        [(suggestion_len as isize - min_distance) as usize]
                                && (phrase_chars
                                    [(phrase_len as isize - min_distance - 1) as usize]
                                    != suggestion_chars
                                        [(suggestion_len as isize - min_distance) as usize]
                                    || phrase_chars
                                        [(phrase_len as isize - min_distance) as usize]
                                        != suggestion_chars
                                            [(suggestion_len as isize - min_distance - 1)
                                                as usize]))
                        {
                            continue;
                        }
                        // delete_in_suggestion_prefix is somewhat expensive
                        // and only pays off when not collecting everything
                        if verbosity != Verbosity::All
                            && !delete_in_suggestion_prefix(
                                &candidate,
                                candidate_len,
                                &suggestion_chars,
                                suggestion_len,
                                self.prefix_length,
                            )
                        {
                            continue;
                        }
                        if !considered_suggestions.insert(suggestion_term.clone()) {
                            continue;
                        }
                        let computed =
                            comparer.compare(phrase, suggestion_term, max_edit_distance_2);
                        if computed < 0 {
                            continue;
                        }
                        distance = computed as usize;
                    }

                    if distance <= max_edit_distance_2 {
                        let suggestion_count =
                            self.words.get(suggestion_term).copied().unwrap_or(0);
                        let item = Suggestion::new(suggestion_term.clone(), distance, suggestion_count);
                        if !suggestions.is_empty() {
                            match verbosity {
                                Verbosity::Closest => {
                                    // only keep the smallest distance found so far
                                    if distance < max_edit_distance_2 {
                                        suggestions.clear();
                                    }
                                }
                                Verbosity::Top => {
                                    if distance < max_edit_distance_2
                                        || suggestion_count > suggestions[0].count
                                    {
                                        max_edit_distance_2 = distance;
                                        suggestions[0] = item;
                                    }
                                    continue;
                                }
                                Verbosity::All => {}
                            }
                        }
                        if verbosity != Verbosity::All {
                            max_edit_distance_2 = distance;
                        }
                        suggestions.push(item);
                    }
                }
            }

            // Derive further deletes from this candidate, until the maximum
            // edit distance is reached.
            if len_diff < max_edit_distance && candidate_len <= self.prefix_length {
                // no point creating edits worse than suggestions already found
                if verbosity != Verbosity::All && len_diff >= max_edit_distance_2 {
                    continue;
                }
                let candidate_chars: Vec<char> = candidate.chars().collect();
                for i in 0..candidate_len {
                    let delete: String = candidate_chars
                        .iter()
                        .enumerate()
                        .filter_map(|(j, c)| (j != i).then_some(*c))
                        .collect();
                    if considered_deletes.insert(delete.clone()) {
                        candidates.push(delete);
                    }
                }
            }
        }

        Ok(finish(suggestions))
    }

    /// All strings reachable from the prefix-truncated `key` by up to
    /// `max_dictionary_edit_distance` character deletions, including the
    /// (truncated) key itself.
    pub(crate) fn edits_prefix(&self, key: &str) -> AHashSet<String> {
        let mut delete_words = AHashSet::new();
        let key_len = key.chars().count();
        if key_len <= self.max_dictionary_edit_distance {
            delete_words.insert(String::new());
        }
        let key: String = if key_len > self.prefix_length {
            key.chars().take(self.prefix_length).collect()
        } else {
            key.to_string()
        };
        delete_words.insert(key.clone());
        self.edits(&key, 0, &mut delete_words);
        delete_words
    }

    /// Inexpensive and language independent: only deletes. Transposes,
    /// replaces and inserts are covered symmetrically by deleting from the
    /// query side.
    fn edits(&self, word: &str, edit_distance: usize, delete_words: &mut AHashSet<String>) {
        let edit_distance = edit_distance + 1;
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= 1 {
            return;
        }
        for i in 0..chars.len() {
            let delete: String = chars
                .iter()
                .enumerate()
                .filter_map(|(j, c)| (j != i).then_some(*c))
                .collect();
            if delete_words.insert(delete.clone())
                && edit_distance < self.max_dictionary_edit_distance
            {
                self.edits(&delete, edit_distance, delete_words);
            }
        }
    }
}

/// Split a dictionary line into columns, on a single character or on runs of
/// whitespace.
fn split_line(line: &str, separator: Option<char>) -> Vec<&str> {
    match separator {
        Some(sep) => line.trim_end_matches(['\r', '\n']).split(sep).collect(),
        None => line.split_whitespace().collect(),
    }
}

/// Check whether all delete chars appear in the suggestion prefix in the
/// right order; otherwise the bucket entry is only a neighbor by collision
/// of unrelated deletes.
fn delete_in_suggestion_prefix(
    delete: &str,
    delete_len: usize,
    suggestion: &[char],
    suggestion_len: usize,
    prefix_length: usize,
) -> bool {
    if delete_len == 0 {
        return true;
    }
    let suggestion_len = prefix_length.min(suggestion_len);
    let mut j = 0;
    for del_char in delete.chars() {
        while j < suggestion_len && del_char != suggestion[j] {
            j += 1;
        }
        if j == suggestion_len {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SymSpell {
        SymSpell::new(2, 7, 1).unwrap()
    }

    #[test]
    fn rejects_prefix_length_not_above_edit_distance() {
        assert!(SymSpell::new(2, 2, 1).is_err());
        assert!(SymSpell::new(2, 0, 1).is_err());
        assert!(SymSpell::new(2, 3, 1).is_ok());
    }

    #[test]
    fn entry_creation_reports_new_words_only() {
        let mut sym = index();
        assert!(sym.create_dictionary_entry("hello", 11));
        assert!(!sym.create_dictionary_entry("hello", 3));
        assert_eq!(sym.word_frequency("hello"), Some(14));
        assert_eq!(sym.word_count(), 1);
    }

    #[test]
    fn zero_count_is_ignored_above_zero_threshold() {
        let mut sym = index();
        assert!(!sym.create_dictionary_entry("word", 0));
        assert_eq!(sym.word_count(), 0);
    }

    #[test]
    fn below_threshold_words_accumulate_and_promote() {
        let mut sym = SymSpell::new(2, 7, 10).unwrap();
        assert!(!sym.create_dictionary_entry("slow", 4));
        assert!(!sym.contains_word("slow"));
        assert!(!sym.create_dictionary_entry("slow", 4));
        // 4 + 4 + 4 crosses the threshold of 10
        assert!(sym.create_dictionary_entry("slow", 4));
        assert_eq!(sym.word_frequency("slow"), Some(12));
        assert!(sym.below_threshold_words.is_empty());
    }

    #[test]
    fn counts_saturate_instead_of_wrapping() {
        let mut sym = index();
        sym.create_dictionary_entry("big", u64::MAX - 1);
        sym.create_dictionary_entry("big", 5);
        assert_eq!(sym.word_frequency("big"), Some(u64::MAX));
    }

    #[test]
    fn edits_prefix_includes_key_and_empty_for_short_keys() {
        let sym = index();
        let deletes = sym.edits_prefix("ab");
        assert!(deletes.contains("ab"));
        assert!(deletes.contains("a"));
        assert!(deletes.contains("b"));
        assert!(deletes.contains(""));
    }

    #[test]
    fn edits_prefix_truncates_long_keys() {
        let sym = index();
        let deletes = sym.edits_prefix("abcdefghij");
        assert!(deletes.contains("abcdefg"));
        assert!(!deletes.iter().any(|d| d.chars().count() > 7));
    }

    #[test]
    fn every_delete_bucket_references_its_terms() {
        let mut sym = index();
        sym.create_dictionary_entry("steam", 10);
        sym.create_dictionary_entry("stream", 5);
        for (delete, bucket) in sym.deletes.iter() {
            for term in bucket {
                assert!(
                    sym.edits_prefix(term).contains(delete),
                    "{delete:?} not a delete of {term:?}"
                );
            }
        }
        for term in sym.words.keys() {
            for delete in sym.edits_prefix(term) {
                assert!(sym.deletes[&delete].contains(term));
            }
        }
    }

    #[test]
    fn deleting_an_entry_clears_buckets_and_max_length() {
        let mut sym = index();
        sym.create_dictionary_entry("steam", 10);
        sym.create_dictionary_entry("longestword", 5);
        assert_eq!(sym.max_length(), 11);
        assert!(sym.delete_dictionary_entry("longestword"));
        assert_eq!(sym.max_length(), 5);
        assert!(!sym.contains_word("longestword"));
        for bucket in sym.deletes.values() {
            assert!(!bucket.iter().any(|t| t == "longestword"));
        }
        assert!(!sym.delete_dictionary_entry("longestword"));
    }

    #[test]
    fn lookup_rejects_budget_above_index_maximum() {
        let mut sym = index();
        sym.create_dictionary_entry("word", 5);
        assert!(matches!(
            sym.lookup("word", Verbosity::Top, 3),
            Err(SpellError::DistanceBudgetExceeded { .. })
        ));
    }

    #[test]
    fn shared_prefix_terms_keep_their_own_counts() {
        let mut sym = index();
        sym.create_dictionary_entry("pipe", 5);
        sym.create_dictionary_entry("pips", 10);
        let results = sym.lookup("pipe", Verbosity::All, 1).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            (results[0].term.as_str(), results[0].distance, results[0].count),
            ("pipe", 0, 5)
        );
        assert_eq!(
            (results[1].term.as_str(), results[1].distance, results[1].count),
            ("pips", 1, 10)
        );
    }

    #[test]
    fn frequency_breaks_ties_at_equal_distance() {
        let mut sym = index();
        sym.create_dictionary_entry("steama", 4);
        sym.create_dictionary_entry("steamb", 6);
        sym.create_dictionary_entry("steamc", 2);
        let results = sym.lookup("stream", Verbosity::Top, 2).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(
            (results[0].term.as_str(), results[0].distance, results[0].count),
            ("steamb", 2, 6)
        );
    }

    #[test]
    fn verbosity_controls_result_breadth() {
        let mut sym = index();
        sym.create_dictionary_entry("steam", 1);
        sym.create_dictionary_entry("steams", 2);
        sym.create_dictionary_entry("steem", 3);
        assert_eq!(sym.lookup("steems", Verbosity::Top, 2).unwrap().len(), 1);
        assert_eq!(sym.lookup("steems", Verbosity::Closest, 2).unwrap().len(), 2);
        assert_eq!(sym.lookup("steems", Verbosity::All, 2).unwrap().len(), 3);
    }

    #[test]
    fn all_returns_each_term_once_sorted() {
        let mut sym = index();
        sym.create_dictionary_entry("abcde", 100);
        sym.create_dictionary_entry("abcd", 50);
        sym.create_dictionary_entry("abc", 10);
        let results = sym.lookup("abcd", Verbosity::All, 2).unwrap();
        assert_eq!(results.len(), 3);
        let mut seen: Vec<&str> = results.iter().map(|s| s.term.as_str()).collect();
        seen.dedup();
        assert_eq!(seen.len(), 3);
        assert!(results.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn exact_match_short_circuits_below_all() {
        let mut sym = index();
        sym.create_dictionary_entry("stream", 10);
        sym.create_dictionary_entry("streams", 20);
        let results = sym.lookup("stream", Verbosity::Closest, 2).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].distance, 0);
    }

    #[test]
    fn include_unknown_appends_sentinel() {
        let mut sym = index();
        sym.create_dictionary_entry("steam", 10);
        let options = LookupOptions {
            max_edit_distance: Some(2),
            include_unknown: true,
            ..LookupOptions::default()
        };
        let results = sym
            .lookup_with_options("qwertyuio", Verbosity::Top, &options)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].term, "qwertyuio");
        assert_eq!(results[0].distance, 3);
        assert_eq!(results[0].count, 0);
    }

    #[test]
    fn ignore_token_pattern_passes_through() {
        let mut sym = index();
        sym.create_dictionary_entry("flood", 10);
        let options = LookupOptions {
            max_edit_distance: Some(2),
            ignore_token: Some(Regex::new(r"\d{2,}").unwrap()),
            ..LookupOptions::default()
        };
        let results = sym
            .lookup_with_options("1234", Verbosity::Top, &options)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].term, "1234");
        assert_eq!(results[0].distance, 0);
    }

    #[test]
    fn transfer_casing_maps_suggestions_back() {
        let mut sym = index();
        sym.create_dictionary_entry("steam", 10);
        let options = LookupOptions {
            max_edit_distance: Some(2),
            transfer_casing: true,
            ..LookupOptions::default()
        };
        let results = sym
            .lookup_with_options("Steaem", Verbosity::Top, &options)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].term, "Steam");
    }

    #[test]
    fn word_longer_than_any_entry_plus_budget_finds_nothing() {
        let mut sym = index();
        sym.create_dictionary_entry("cat", 10);
        let results = sym
            .lookup("unreasonablylong", Verbosity::All, 2)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn zero_budget_lookup_only_checks_membership() {
        let mut sym = index();
        sym.create_dictionary_entry("exact", 7);
        let hit = sym.lookup("exact", Verbosity::Top, 0).unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].distance, 0);
        let miss = sym.lookup("exakt", Verbosity::Top, 0).unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn single_char_dictionary_word_shortcut() {
        let mut sym = index();
        sym.create_dictionary_entry("a", 10);
        let results = sym.lookup("ab", Verbosity::All, 2).unwrap();
        assert!(results.iter().any(|s| s.term == "a" && s.distance == 1));
        let results = sym.lookup("xy", Verbosity::All, 2).unwrap();
        assert!(results.iter().any(|s| s.term == "a" && s.distance == 2));
    }

    #[test]
    fn load_dictionary_stream_skips_malformed_lines() {
        let mut sym = index();
        let data = "the 23135851162\nof 13151942776\nbroken\nbad notanumber\nand 12997637966\n";
        assert!(sym.load_dictionary_stream(data.as_bytes(), 0, 1, None));
        assert_eq!(sym.word_count(), 3);
        assert_eq!(sym.word_frequency("of"), Some(13151942776));
    }

    #[test]
    fn load_dictionary_missing_file_returns_false() {
        let mut sym = index();
        assert!(!sym.load_dictionary("/no/such/dictionary.txt", 0, 1, None));
    }

    #[test]
    fn load_bigram_stream_default_separator_joins_columns() {
        let mut sym = index();
        let data = "abcs aaron 10\nabbott and 30\nshort 1\n";
        assert!(sym.load_bigram_dictionary_stream(data.as_bytes(), 0, 2, None));
        assert_eq!(sym.bigram_count(), 2);
        assert_eq!(sym.bigrams.get("abcs aaron").copied(), Some(10));
        assert_eq!(sym.bigram_count_min, 10);
    }

    #[test]
    fn load_bigram_stream_custom_separator_uses_whole_column() {
        let mut sym = index();
        let data = "per se\t7\nde facto\t9\n";
        assert!(sym.load_bigram_dictionary_stream(data.as_bytes(), 0, 1, Some('\t')));
        assert_eq!(sym.bigrams.get("per se").copied(), Some(7));
        assert_eq!(sym.bigram_count_min, 7);
    }

    #[test]
    fn create_dictionary_stream_counts_tokens() {
        let mut sym = index();
        let text = "a quick brown fox jumps over the lazy dog. A quick dog!";
        assert!(sym.create_dictionary_stream(text.as_bytes()));
        assert_eq!(sym.word_frequency("quick"), Some(2));
        assert_eq!(sym.word_frequency("dog"), Some(2));
        assert_eq!(sym.word_frequency("fox"), Some(1));
    }
}
