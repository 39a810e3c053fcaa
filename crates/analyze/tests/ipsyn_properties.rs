//! IPSyn stays within its bounds for arbitrary dependency structures.

use childes_analyze::{ipsyn, DependencyGraph, Item, MAX_POINTS, MAX_SCORE};
use childes_core::{Gra, Token, Utterance};
use proptest::prelude::*;

const WORDS: &[&str] = &[
    "I", "you", "what", "why", "and", "to", "no", "not", "gonna", "let", "could", "?", ".",
    "POSTCLITIC", "okay", "cookie",
];
const TAGS: &[&str] = &[
    "v", "n", "adj", "qn", "det", "pro", "pro:wh", "adv:wh", "adv", "cop", "mod", "aux", "neg",
    "conj", "inf", "prep", "n:gerund", "?", ".",
];
const MORS: &[&str] = &[
    "", "go", "cookie-PL", "walk-PAST", "be&PAST", "do&3S", "play-PRESP", "can", "go-3S",
];
const RELS: &[&str] = &[
    "SUBJ", "OBJ", "ROOT", "PRED", "POBJ", "CONJ", "CMOD", "INF", "NEG", "PUNCT", "JCT",
];

fn utterance() -> impl Strategy<Value = Utterance> {
    (1usize..9).prop_flat_map(|len| {
        prop::collection::vec(
            (
                prop::sample::select(WORDS),
                prop::sample::select(TAGS),
                prop::sample::select(MORS),
                0..=len,
                prop::sample::select(RELS),
            ),
            len,
        )
        .prop_map(|rows| {
            let tokens = rows
                .into_iter()
                .enumerate()
                .map(|(i, (word, pos, mor, head, rel))| {
                    Token::new(word, Some(pos), Some(mor), Some(Gra::new(i + 1, head, rel)))
                })
                .collect();
            Utterance {
                participant: "CHI".to_string(),
                tokens,
                time_marks: None,
                tiers: Default::default(),
            }
        })
    })
}

proptest! {
    #[test]
    fn score_is_bounded(utterances in prop::collection::vec(utterance(), 0..40)) {
        let board = childes_analyze::ipsyn::score(&utterances);
        for item in Item::ALL {
            prop_assert!(board.points(item) <= MAX_POINTS, "{} over cap", item);
        }
        let total = ipsyn(&utterances);
        prop_assert!(total <= MAX_SCORE);
        prop_assert_eq!(total, board.total());
    }

    #[test]
    fn generated_graphs_are_well_formed(u in utterance()) {
        let graph = DependencyGraph::from_tokens(&u.tokens);
        prop_assert!(!graph.is_faulty());
        prop_assert_eq!(graph.n_nodes(), u.tokens.len() + 1);
    }
}

#[test]
fn maximal_file_never_exceeds_112() {
    // Every item fires on every utterance of this file many times over.
    let text = "*CHI:\twhy can't I not go and eat ?\n\
                %mor:\tadv:wh|why mod|can~neg|not pro:sub|I neg|not v|go conj|and v|eat-PAST ?\n\
                %gra:\t1|4|JCT 2|4|AUX 3|2|NEG 4|0|ROOT 5|6|NEG 6|4|SUBJ 7|6|CONJ 8|7|COORD 9|4|PUNCT\n";
    let file = childes_core::parse_chat(&text.repeat(150), "t").unwrap();
    assert!(ipsyn(&file.utterances) <= MAX_SCORE);
}
