//! N-gram extraction primitive.
//!
//! Produces candidate phrases of 1..=max_n tokens from cleaned text, with
//! occurrence counting. Per-source extraction wrappers live in the
//! demand-unit builder; this module only knows about text.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::tokens::{is_valid_word, tokenize};

/// One candidate phrase with its window size and occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ngram {
    pub phrase: String,
    pub size: usize,
    pub frequency: u32,
}

/// Extract n-grams of 1..=max_n words from text.
///
/// Tokens failing `is_valid_word` are dropped before the window slides, so
/// phrases are built from the filtered sequence. Phrases below
/// `min_frequency` are discarded; body-text extraction passes 2 here, which
/// is what turns body noise into medium/long-tail candidates. Output order
/// is first-seen order and is fully deterministic.
pub fn extract_ngrams(text: &str, max_n: usize, min_frequency: u32) -> Vec<Ngram> {
    let words: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|w| is_valid_word(w))
        .collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut order: Vec<(String, usize)> = Vec::new();

    for n in 1..=max_n.min(words.len()) {
        for window in words.windows(n) {
            let phrase = window.join(" ");
            if !is_valid_ngram(&phrase) {
                continue;
            }
            match counts.entry(phrase) {
                Entry::Occupied(mut e) => *e.get_mut() += 1,
                Entry::Vacant(e) => {
                    order.push((e.key().clone(), n));
                    e.insert(1);
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|(phrase, size)| {
            let frequency = counts[&phrase];
            (frequency >= min_frequency).then_some(Ngram {
                phrase,
                size,
                frequency,
            })
        })
        .collect()
}

/// Phrase-quality gate. A single word must pass `is_valid_word`; a
/// multi-word phrase needs at least half its constituents to pass, so a
/// function word embedded between content words does not sink the phrase.
pub fn is_valid_ngram(phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    match words.len() {
        0 => false,
        1 => is_valid_word(words[0]),
        n => {
            let meaningful = words.iter().filter(|w| is_valid_word(w)).count();
            meaningful >= (n / 2).max(1)
        }
    }
}
