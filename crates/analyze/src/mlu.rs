//! Mean length of utterance, in morphemes (MLUm) and in words (MLUw).

use childes_core::{Utterance, POSTCLITIC};

/// Any of these words disqualifies the whole utterance.
pub const WORDS_IGNORE_WHOLE_UTTERANCE: [&str; 3] = ["xxx", "yyy", "www"];

/// Tokens with these tags carry no morpheme.
pub const POS_TO_IGNORE: [&str; 6] = ["", "!", "+...", "0", "?", "BEG"];

/// Punctuation, fillers and clitic placeholders that are not words.
pub const WORDS_TO_IGNORE: [&str; 10] = [
    "", "!", "+...", ".", ",", "?", "\u{2021}", "\u{201e}", "0", POSTCLITIC,
];

fn has_ignored_word<'a>(mut words: impl Iterator<Item = &'a str>) -> bool {
    words.any(|w| WORDS_IGNORE_WHOLE_UTTERANCE.contains(&w))
}

fn is_switched(word: &str, exclude_switch: bool) -> bool {
    exclude_switch && word.ends_with("@s")
}

fn mean(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        0.0
    } else {
        counts.iter().sum::<usize>() as f64 / counts.len() as f64
    }
}

/// Morphemes in one utterance: one per counted token, plus one per `-`,
/// `~` or `$` boundary in its `%mor` descriptor.
fn morpheme_count(utterance: &Utterance, exclude_switch: bool) -> usize {
    utterance
        .tokens
        .iter()
        .filter(|t| !is_switched(&t.word, exclude_switch))
        .filter(|t| match t.pos.as_deref() {
            Some(pos) => !POS_TO_IGNORE.contains(&pos),
            None => true,
        })
        .map(|t| {
            let boundaries = t
                .mor
                .as_deref()
                .map(|m| m.chars().filter(|c| matches!(c, '-' | '~' | '$')).count())
                .unwrap_or(0);
            1 + boundaries
        })
        .sum()
}

/// MLU in morphemes over the utterances of one file.
///
/// Utterances with an unintelligible or untranscribed word, and those that
/// count zero morphemes, are left out of the mean. With `exclude_switch`,
/// code-switched words (`@s`) are not counted.
pub fn mlum<'a>(utterances: impl IntoIterator<Item = &'a Utterance>, exclude_switch: bool) -> f64 {
    let counts: Vec<usize> = utterances
        .into_iter()
        .filter(|u| !has_ignored_word(u.tokens.iter().map(|t| t.word.as_str())))
        .map(|u| morpheme_count(u, exclude_switch))
        .filter(|count| *count > 0)
        .collect();
    mean(&counts)
}

/// MLU in words over the utterances of one file.
pub fn mluw<'a>(utterances: impl IntoIterator<Item = &'a Utterance>, exclude_switch: bool) -> f64 {
    let counts: Vec<usize> = utterances
        .into_iter()
        .filter(|u| !has_ignored_word(u.words()))
        .map(|u| {
            u.words()
                .filter(|w| !WORDS_TO_IGNORE.contains(w) && !is_switched(w, exclude_switch))
                .count()
        })
        .filter(|count| *count > 0)
        .collect();
    mean(&counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use childes_core::parse_chat;

    fn utterances(text: &str) -> Vec<Utterance> {
        parse_chat(text, "t").unwrap().utterances
    }

    #[test]
    fn morphemes_count_bound_morphemes_and_clitics() {
        let us = utterances(
            "*CHI:\tmore cookies .\n\
             %mor:\tqn|more n|cookie-PL .\n\
             *CHI:\tit's mine .\n\
             %mor:\tpro|it~cop|be&3S pro:poss|mine .\n",
        );
        // more + cookie + -PL + `.`; it + 's + mine + `.`
        assert!((mlum(&us, false) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn untagged_tokens_still_count() {
        let us = utterances("*CHI:\tmore cookie .\n");
        assert!((mlum(&us, false) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn code_switched_words_optionally_skipped() {
        let mut us = utterances("*CHI:\tmore gateau .\n%mor:\tqn|more L2|gateau .\n");
        us[0].tokens[1].word = "gateau@s".to_string();
        assert!((mlum(&us, false) - 3.0).abs() < 1e-9);
        assert!((mlum(&us, true) - 2.0).abs() < 1e-9);
        assert!((mluw(&us, false) - 2.0).abs() < 1e-9);
        assert!((mluw(&us, true) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn words_skip_punctuation_and_clitics() {
        let us = utterances(
            "*CHI:\tit's mine .\n\
             %mor:\tpro|it~cop|be&3S pro:poss|mine .\n\
             *CHI:\tno , more !\n",
        );
        assert!((mluw(&us, false) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(mlum(std::iter::empty(), false), 0.0);
        assert_eq!(mluw(std::iter::empty(), false), 0.0);
        let only_punct = utterances("*CHI:\t.\n");
        assert_eq!(mluw(&only_punct, false), 0.0);
    }
}
