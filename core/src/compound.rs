//! Compound-aware correction of multi-word input.
//!
//! Handles three cases in one pass over the tokens:
//! 1. a mistakenly inserted space split a correct word into two bad terms,
//! 2. a mistakenly omitted space fused two correct words into one bad term,
//! 3. ordinary per-token spelling errors.
//!
//! Each token gets its best single-term correction, a merge with the
//! previous token, and every two-way split considered; candidates are ranked
//! by edit distance first, then by a Naive-Bayes frequency estimate with a
//! bigram boost when the split pair is a known bigram.

use crate::edit_distance::EditDistance;
use crate::error::Result;
use crate::helpers;
use crate::suggestion::{Suggestion, Verbosity};
use crate::symspell::{SymSpell, CORPUS_WORD_COUNT};

/// Optional behaviors for [`SymSpell::lookup_compound_with_options`].
#[derive(Debug, Clone, Default)]
pub struct CompoundOptions {
    /// Pass numbers and acronyms through uncorrected.
    pub ignore_non_words: bool,
    /// Split the phrase on whitespace instead of the word pattern.
    pub split_by_space: bool,
    /// With `ignore_non_words`, also pass any term containing a digit
    /// through uncorrected.
    pub ignore_term_with_digits: bool,
    /// Map the casing of the input phrase onto the corrected output.
    pub transfer_casing: bool,
}

/// Estimated occurrence count of an unknown word: 10 / 10^length, as an
/// integer. Zero for anything longer than one character.
fn unknown_word_count(length: usize) -> u64 {
    match length {
        0 => 10,
        1 => 1,
        _ => 0,
    }
}

impl SymSpell {
    /// Correct a multi-word phrase, allowing word splitting and merging.
    /// Returns a single aggregate suggestion.
    pub fn lookup_compound(&self, phrase: &str, max_edit_distance: usize) -> Result<Vec<Suggestion>> {
        self.lookup_compound_with_options(phrase, max_edit_distance, &CompoundOptions::default())
    }

    pub fn lookup_compound_with_options(
        &self,
        phrase: &str,
        max_edit_distance: usize,
        options: &CompoundOptions,
    ) -> Result<Vec<Suggestion>> {
        let terms: Vec<String> = if options.split_by_space {
            phrase.split_whitespace().map(str::to_string).collect()
        } else {
            helpers::parse_words(phrase, false)
        };
        // parallel cased tokens, so acronyms can be recognized
        let cased_terms: Vec<String> = if options.ignore_non_words {
            if options.split_by_space {
                phrase.split_whitespace().map(str::to_string).collect()
            } else {
                helpers::parse_words(phrase, true)
            }
        } else {
            Vec::new()
        };

        let mut suggestion_parts: Vec<Suggestion> = Vec::new();
        let mut comparer = EditDistance::new(self.distance_algorithm());
        let mut is_last_combi = false;

        for (i, term) in terms.iter().enumerate() {
            if options.ignore_non_words {
                if helpers::try_parse_i64(term).is_some() {
                    suggestion_parts.push(Suggestion::new(term.clone(), 0, CORPUS_WORD_COUNT));
                    continue;
                }
                if helpers::is_acronym(&cased_terms[i], options.ignore_term_with_digits) {
                    suggestion_parts.push(Suggestion::new(
                        cased_terms[i].clone(),
                        0,
                        CORPUS_WORD_COUNT,
                    ));
                    continue;
                }
            }

            let suggestions = self.lookup(term, Verbosity::Top, max_edit_distance)?;

            // merge with the previous token, always checked before splitting
            if i > 0 && !is_last_combi {
                let combined_term = format!("{}{}", terms[i - 1], term);
                let combined = self.lookup(&combined_term, Verbosity::Top, max_edit_distance)?;
                if let Some(combined_best) = combined.first() {
                    let previous_best = suggestion_parts
                        .last()
                        .expect("a part exists for every earlier token")
                        .clone();
                    let current_best = suggestions.first().cloned().unwrap_or_else(|| {
                        Suggestion::new(
                            term.clone(),
                            max_edit_distance + 1,
                            unknown_word_count(term.chars().count()),
                        )
                    });
                    let separate_distance = previous_best.distance + current_best.distance;
                    // the merge saves one space, hence the +1
                    if combined_best.distance + 1 < separate_distance
                        || (combined_best.distance + 1 == separate_distance
                            && (combined_best.count as f64)
                                > previous_best.count as f64 / CORPUS_WORD_COUNT as f64
                                    * current_best.count as f64)
                    {
                        let mut adopted = combined_best.clone();
                        adopted.distance += 1;
                        *suggestion_parts.last_mut().expect("non-empty") = adopted;
                        is_last_combi = true;
                        continue;
                    }
                }
            }
            is_last_combi = false;

            let term_chars: Vec<char> = term.chars().collect();
            // never split terms with a perfect suggestion or single chars
            if suggestions
                .first()
                .is_some_and(|s| s.distance == 0 || term_chars.len() == 1)
            {
                suggestion_parts.push(suggestions[0].clone());
                continue;
            }

            // no perfect suggestion: try every two-way split of the token
            let mut split_best: Option<Suggestion> = suggestions.first().cloned();
            if term_chars.len() > 1 {
                for j in 1..term_chars.len() {
                    let part_1: String = term_chars[..j].iter().collect();
                    let part_2: String = term_chars[j..].iter().collect();
                    let suggestions_1 = self.lookup(&part_1, Verbosity::Top, max_edit_distance)?;
                    let Some(best_1) = suggestions_1.first() else {
                        continue;
                    };
                    let suggestions_2 = self.lookup(&part_2, Verbosity::Top, max_edit_distance)?;
                    let Some(best_2) = suggestions_2.first() else {
                        continue;
                    };

                    let split_term = format!("{} {}", best_1.term, best_2.term);
                    let computed = comparer.compare(term, &split_term, max_edit_distance);
                    let split_distance = if computed < 0 {
                        max_edit_distance + 1
                    } else {
                        computed as usize
                    };

                    if let Some(best) = &split_best {
                        if split_distance > best.distance {
                            continue;
                        }
                        if split_distance < best.distance {
                            split_best = None;
                        }
                    }

                    let rejoined = format!("{}{}", best_1.term, best_2.term);
                    let split_count = match self.bigrams.get(&split_term) {
                        Some(&bigram_count) => {
                            // boost known bigrams above the single-term
                            // correction they compete with
                            let mut count = bigram_count;
                            if let Some(single_best) = suggestions.first() {
                                if rejoined == *term {
                                    count = count.max(single_best.count.saturating_add(2));
                                } else if best_1.term == single_best.term
                                    || best_2.term == single_best.term
                                {
                                    count = count.max(single_best.count.saturating_add(1));
                                }
                            } else if rejoined == *term {
                                count = count
                                    .max(best_1.count.max(best_2.count).saturating_add(2));
                            }
                            count
                        }
                        None => {
                            // Naive Bayes: P(AB) = P(A)·P(B), expressed as a
                            // count and capped by the rarest seen bigram
                            let product = best_1.count as f64 / CORPUS_WORD_COUNT as f64
                                * best_2.count as f64;
                            self.bigram_count_min.min(product as u64)
                        }
                    };

                    let candidate = Suggestion::new(split_term, split_distance, split_count);
                    match &split_best {
                        None => split_best = Some(candidate),
                        Some(best) if candidate.count > best.count => split_best = Some(candidate),
                        _ => {}
                    }
                }
            }

            match split_best {
                Some(best) => suggestion_parts.push(best),
                None => suggestion_parts.push(Suggestion::new(
                    term.clone(),
                    max_edit_distance + 1,
                    unknown_word_count(term_chars.len()),
                )),
            }
        }

        let mut joined_term = String::new();
        let mut joined_count = CORPUS_WORD_COUNT as f64;
        for part in &suggestion_parts {
            joined_term.push_str(&part.term);
            joined_term.push(' ');
            joined_count *= part.count as f64 / CORPUS_WORD_COUNT as f64;
        }
        let joined_term = joined_term.trim_end().to_string();
        let distance = comparer
            .compare(phrase, &joined_term, i32::MAX as usize)
            .max(0) as usize;

        let mut aggregate = Suggestion::new(joined_term, distance, joined_count as u64);
        if options.transfer_casing {
            if let Ok(cased) = helpers::transfer_casing_for_similar_text(phrase, &aggregate.term) {
                aggregate.term = cased;
            }
        }
        Ok(vec![aggregate])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase_index() -> SymSpell {
        let mut sym = SymSpell::new(2, 7, 1).unwrap();
        for (term, count) in [
            ("where", 12300),
            ("is", 45600),
            ("the", 78900),
            ("love", 32100),
            ("whereas", 20000),
        ] {
            sym.create_dictionary_entry(term, count);
        }
        sym
    }

    #[test]
    fn unknown_word_count_shrinks_with_length() {
        assert_eq!(unknown_word_count(0), 10);
        assert_eq!(unknown_word_count(1), 1);
        assert_eq!(unknown_word_count(2), 0);
        assert_eq!(unknown_word_count(9), 0);
    }

    #[test]
    fn merges_split_words_back_together() {
        let mut sym = SymSpell::new(2, 7, 1).unwrap();
        sym.create_dictionary_entry("steam", 1);
        sym.create_dictionary_entry("machine", 1);
        let results = sym.lookup_compound("ste am machie", 2).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].term, "steam machine");
    }

    #[test]
    fn leaves_hopeless_phrases_untouched() {
        let mut sym = SymSpell::new(2, 7, 1).unwrap();
        sym.create_dictionary_entry("steam", 1);
        sym.create_dictionary_entry("machine", 1);
        let typo = "qwer erty ytui a";
        let results = sym.lookup_compound(typo, 2).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].term, typo);
    }

    #[test]
    fn bigram_boost_prefers_split_over_single_term() {
        let mut sym = phrase_index();
        sym.bigrams.insert("where is".to_string(), 10);
        sym.bigram_count_min = 10;
        let results = sym.lookup_compound("whereis th elove", 2).unwrap();
        assert_eq!(results[0].term, "where is the love");
        assert_eq!(results[0].distance, 2);
    }

    #[test]
    fn without_bigrams_the_single_term_wins() {
        let sym = phrase_index();
        let results = sym.lookup_compound("whereis th elove", 2).unwrap();
        assert_eq!(results[0].term, "whereas the love");
        assert_eq!(results[0].distance, 2);
    }

    #[test]
    fn numbers_and_acronyms_pass_through() {
        let mut sym = phrase_index();
        sym.create_dictionary_entry("report", 5000);
        let options = CompoundOptions {
            ignore_non_words: true,
            ..CompoundOptions::default()
        };
        let results = sym
            .lookup_compound_with_options("the NASA reprot 2024", 2, &options)
            .unwrap();
        assert_eq!(results[0].term, "the NASA report 2024");
    }

    #[test]
    fn digit_terms_can_be_ignored_too() {
        let mut sym = phrase_index();
        sym.create_dictionary_entry("floor", 5000);
        sym.create_dictionary_entry("office", 4000);
        sym.create_dictionary_entry("on", 60000);
        let options = CompoundOptions {
            ignore_non_words: true,
            split_by_space: true,
            ignore_term_with_digits: true,
            ..CompoundOptions::default()
        };
        let results = sym
            .lookup_compound_with_options("officeon 1st floor", 2, &options)
            .unwrap();
        assert_eq!(results[0].term, "office on 1st floor");
    }

    #[test]
    fn casing_is_transferred_onto_the_correction() {
        let mut sym = SymSpell::new(2, 7, 1).unwrap();
        sym.create_dictionary_entry("steam", 10);
        sym.create_dictionary_entry("machine", 10);
        let options = CompoundOptions {
            transfer_casing: true,
            ..CompoundOptions::default()
        };
        let results = sym
            .lookup_compound_with_options("Steam Machie", 2, &options)
            .unwrap();
        assert_eq!(results[0].term, "Steam Machine");
    }
}
