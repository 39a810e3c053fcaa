//! Word n-grams, word frequencies and type-token ratio.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::mlu::WORDS_TO_IGNORE;

/// Item counts ordered by count, most frequent first. Ties keep the order
/// in which the items were first seen.
pub type Counter<K> = IndexMap<K, usize>;

/// Put a counter in most-common-first order.
pub fn sort_counter<K>(counter: &mut Counter<K>) {
    // IndexMap::sort_by is stable, so ties keep first-seen order.
    counter.sort_by(|_, a, _, b| b.cmp(a));
}

/// Add up counters in order, then sort the sum.
pub fn merge_counters<K: Hash + Eq + Clone>(counters: &[Counter<K>]) -> Counter<K> {
    let mut total = Counter::new();
    for counter in counters {
        for (key, count) in counter {
            *total.entry(key.clone()).or_insert(0) += count;
        }
    }
    sort_counter(&mut total);
    total
}

/// Count the word n-grams of one file, utterance by utterance.
///
/// N-grams never span utterances; an utterance with fewer than `n` words
/// contributes nothing. `n` must be at least 1.
pub fn word_ngrams<'a, U, W>(utterances: U, n: usize, keep_case: bool) -> Counter<Vec<String>>
where
    U: IntoIterator<Item = W>,
    W: IntoIterator<Item = &'a str>,
{
    let mut counter = Counter::new();
    if n == 0 {
        return counter;
    }
    for words in utterances {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| if keep_case { w.to_string() } else { w.to_lowercase() })
            .collect();
        if words.len() < n {
            continue;
        }
        for gram in words.windows(n) {
            *counter.entry(gram.to_vec()).or_insert(0) += 1;
        }
    }
    sort_counter(&mut counter);
    counter
}

/// Count the words of one file.
pub fn word_frequencies<'a, U, W>(utterances: U, keep_case: bool) -> Counter<String>
where
    U: IntoIterator<Item = W>,
    W: IntoIterator<Item = &'a str>,
{
    word_ngrams(utterances, 1, keep_case)
        .into_iter()
        .filter_map(|(mut gram, count)| gram.pop().map(|w| (w, count)))
        .collect()
}

/// Distinct words over total words, punctuation and fillers excluded.
pub fn ttr(frequencies: &Counter<String>) -> f64 {
    let (types, tokens) = frequencies
        .iter()
        .filter(|(word, _)| !WORDS_TO_IGNORE.contains(&word.as_str()))
        .fold((0usize, 0usize), |(types, tokens), (_, count)| {
            (types + 1, tokens + count)
        });
    if tokens == 0 {
        0.0
    } else {
        types as f64 / tokens as f64
    }
}
