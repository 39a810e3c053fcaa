//! Parser invariants checked over generated CHAT fragments.

use std::collections::BTreeSet;

use childes_core::{clean_utterance, parse_chat};
use proptest::prelude::*;

/// A surface word with its `%mor` item and the number of `%mor` slots the
/// item expands to.
const UNITS: &[(&str, &str, usize)] = &[
    ("more", "qn|more", 1),
    ("cookie", "n|cookie", 1),
    ("cookies", "n|cookie-PL", 1),
    ("Eve", "n:prop|Eve", 1),
    ("walked", "v|walk-PAST", 1),
    ("it's", "pro|it~cop|be&3S", 2),
    ("what's", "pro:wh|what~cop|be&3S", 2),
    ("don't", "mod|do&3S~neg|not", 2),
];

fn utterance_block() -> impl Strategy<Value = (String, usize)> {
    (
        prop::collection::vec(prop::sample::select(UNITS), 1..8),
        any::<bool>(),
    )
        .prop_map(|(units, with_gra)| {
            let words: Vec<&str> = units.iter().map(|u| u.0).collect();
            let mors: Vec<&str> = units.iter().map(|u| u.1).collect();
            let slots = units.iter().map(|u| u.2).sum::<usize>() + 1;

            let mut block = format!("*CHI:\t{} .\n%mor:\t{} .\n", words.join(" "), mors.join(" "));
            if with_gra {
                let gra: Vec<String> = (1..=slots)
                    .map(|dep| format!("{}|{}|X", dep, dep - 1))
                    .collect();
                block.push_str(&format!("%gra:\t{}\n", gra.join(" ")));
            }
            (block, slots)
        })
}

const FRAGMENTS: &[&str] = &[
    "foo",
    "bar",
    "bar [/]",
    "goed [: went]",
    "<the dog> [//]",
    "<a doggy> [: the dog]",
    "(.)",
    "&-uh",
    "that?",
    "fine,",
    "cookie [*]",
    "well [!]",
    "[= pointing ]",
    "xxx",
    "0v",
    "\u{2039}bar\u{203a}",
    ".",
];

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

proptest! {
    #[test]
    fn tokens_match_expanded_mor(blocks in prop::collection::vec(utterance_block(), 1..6)) {
        let text: String = blocks.iter().map(|(b, _)| b.as_str()).collect();
        let file = parse_chat(&text, "gen").unwrap();
        prop_assert_eq!(file.utterances.len(), blocks.len());
        for (utterance, (_, slots)) in file.utterances.iter().zip(&blocks) {
            prop_assert_eq!(utterance.tokens.len(), *slots);
        }
    }

    #[test]
    fn gra_dep_is_token_position(blocks in prop::collection::vec(utterance_block(), 1..6)) {
        let text: String = blocks.iter().map(|(b, _)| b.as_str()).collect();
        let file = parse_chat(&text, "gen").unwrap();
        for utterance in file.utterances.iter().filter(|u| u.has_tier("%gra")) {
            for (i, token) in utterance.tokens.iter().enumerate() {
                let gra = token.gra.as_ref();
                prop_assert_eq!(gra.map(|g| g.dep), Some(i + 1));
            }
        }
    }

    #[test]
    fn cleaning_is_idempotent(fragments in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..10)) {
        let raw = fragments.join(" ");
        let once = clean_utterance(&raw);
        prop_assert_eq!(clean_utterance(&once), once);
    }

    #[test]
    fn dates_are_a_set(
        dates in prop::collection::vec((1u8..=28, 0usize..12, 1950i32..2020), 0..6),
        repeats in 1usize..3,
    ) {
        let mut text = String::from("@Begin\n");
        for _ in 0..repeats {
            for (day, month, year) in &dates {
                text.push_str(&format!("@Date:\t{:02}-{}-{}\n", day, MONTHS[*month], year));
            }
        }
        text.push_str("@Date:\tsometime in spring\n@End\n");

        let distinct: BTreeSet<_> = dates.iter().collect();
        let file = parse_chat(&text, "gen").unwrap();
        prop_assert_eq!(file.header.dates.len(), distinct.len());
    }
}
