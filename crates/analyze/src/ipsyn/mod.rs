//! Index of Productive Syntax (IPSyn).
//!
//! Fifty-six structural items in four groups: noun phrases (N1-N11),
//! verb phrases (V1-V16), questions and negation (Q1-Q10) and sentence
//! structures (S1-S19). Each item earns at most two points, so a file
//! scores between 0 and 112.
//!
//! Items are scored one after another over the same list of dependency
//! graphs. Some rules also credit a point to a related item; a credit is
//! a single direct increment on the board and never re-runs the credited
//! item's own rule.

mod noun;
mod question;
mod sentence;
mod verb;

use childes_core::Utterance;
use indexmap::IndexMap;
use serde::Serialize;

use crate::graph::DependencyGraph;

/// Only the first this many utterances of a file are scored.
pub const MAX_UTTERANCES: usize = 100;

/// Points an item can earn.
pub const MAX_POINTS: u8 = 2;

/// Highest possible total.
pub const MAX_SCORE: u32 = MAX_POINTS as u32 * Item::ALL.len() as u32;

type Rule = fn(&DependencyGraph, &mut Board);

macro_rules! ipsyn_items {
    ($($item:ident => $rule:path),* $(,)?) => {
        /// One scored IPSyn item.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum Item {
            $($item),*
        }

        impl Item {
            /// Every item, in scoring order.
            pub const ALL: [Item; 56] = [$(Item::$item),*];

            pub fn code(self) -> &'static str {
                match self {
                    $(Item::$item => stringify!($item)),*
                }
            }

            fn rule(self) -> Rule {
                match self {
                    $(Item::$item => $rule),*
                }
            }
        }
    };
}

ipsyn_items! {
    N1 => noun::n1,
    N2 => noun::n2,
    N3 => noun::n3,
    N4 => noun::n4,
    N5 => noun::n5,
    N6 => noun::n6,
    N7 => noun::n7,
    N8 => noun::n8,
    N9 => noun::n9,
    N10 => noun::n10,
    N11 => noun::n11,
    V1 => verb::v1,
    V2 => verb::v2,
    V3 => verb::v3,
    V4 => verb::v4,
    V5 => verb::v5,
    V6 => verb::v6,
    V7 => verb::v7,
    V8 => verb::v8,
    V9 => verb::v9,
    V10 => verb::v10,
    V11 => verb::v11,
    V12 => verb::v12,
    V13 => verb::v13,
    V14 => verb::v14,
    V15 => verb::v15,
    V16 => verb::v16,
    Q1 => question::q1,
    Q2 => question::q2,
    Q3 => question::q3,
    Q4 => question::q4,
    Q5 => question::q5,
    Q6 => question::q6,
    Q7 => question::q7,
    Q8 => question::q8,
    Q9 => question::q9,
    Q10 => question::q10,
    S1 => sentence::s1,
    S2 => sentence::s2,
    S3 => sentence::s3,
    S4 => sentence::s4,
    S5 => sentence::s5,
    S6 => sentence::s6,
    S7 => sentence::s7,
    S8 => sentence::s8,
    S9 => sentence::s9,
    S10 => sentence::s10,
    S11 => sentence::s11,
    S12 => sentence::s12,
    S13 => sentence::s13,
    S14 => sentence::s14,
    S15 => sentence::s15,
    S16 => sentence::s16,
    S17 => sentence::s17,
    S18 => sentence::s18,
    S19 => sentence::s19,
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Points per item, plus a stop flag once an item is full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    points: [u8; 56],
    stopped: [bool; 56],
}

impl Default for Board {
    fn default() -> Self {
        Board {
            points: [0; 56],
            stopped: [false; 56],
        }
    }
}

impl Board {
    pub fn points(&self, item: Item) -> u8 {
        self.points[item as usize]
    }

    pub fn is_stopped(&self, item: Item) -> bool {
        self.stopped[item as usize]
    }

    /// Sum over all items.
    pub fn total(&self) -> u32 {
        self.points.iter().map(|p| u32::from(*p)).sum()
    }

    /// `(item, points)` in scoring order.
    pub fn items(&self) -> impl Iterator<Item = (Item, u8)> + '_ {
        Item::ALL.iter().map(move |item| (*item, self.points(*item)))
    }

    /// Item codes mapped to points, in scoring order.
    pub fn to_map(&self) -> IndexMap<String, u8> {
        self.items()
            .map(|(item, points)| (item.code().to_string(), points))
            .collect()
    }

    /// A rule found its own structure. Returns `true` once the item is
    /// full, at which point the rule stops looking.
    fn hit(&mut self, item: Item) -> bool {
        let i = item as usize;
        if self.points[i] < MAX_POINTS {
            self.points[i] += 1;
        }
        if self.points[i] >= MAX_POINTS {
            self.stopped[i] = true;
        }
        self.stopped[i]
    }

    /// Another item's rule also credits `item`. Ignored once `item` is full.
    fn credit(&mut self, item: Item) {
        let i = item as usize;
        if self.stopped[i] {
            return;
        }
        self.points[i] += 1;
        if self.points[i] >= MAX_POINTS {
            self.stopped[i] = true;
        }
    }

    /// Give `item` full points outright.
    fn fill(&mut self, item: Item) {
        let i = item as usize;
        self.points[i] = MAX_POINTS;
        self.stopped[i] = true;
    }
}

/// Score the dependency graphs of one file's utterances.
///
/// Utterances past [`MAX_UTTERANCES`] are ignored, and so are faulty
/// graphs (missing or inconsistent `%gra`).
pub fn score<'a>(utterances: impl IntoIterator<Item = &'a Utterance>) -> Board {
    let graphs: Vec<DependencyGraph> = utterances
        .into_iter()
        .take(MAX_UTTERANCES)
        .map(|u| DependencyGraph::from_tokens(&u.tokens))
        .collect();

    let mut board = Board::default();
    for item in Item::ALL {
        let rule = item.rule();
        for graph in &graphs {
            if board.is_stopped(item) {
                break;
            }
            if graph.is_faulty() {
                continue;
            }
            rule(graph, &mut board);
        }
    }
    board
}

/// IPSyn total of one file.
pub fn ipsyn<'a>(utterances: impl IntoIterator<Item = &'a Utterance>) -> u32 {
    score(utterances).total()
}

// ── Shared vocabulary of the rules ──────────────────────────────────

const MODIFIERS: [&str; 3] = ["pro:poss:det", "adj", "qn"];

/// `%mor` descriptors of punctuation.
const PUNCTUATION_MOR: [&str; 3] = ["", "beg", "end"];

const WH_WORDS: [&str; 6] = ["what", "why", "how", "which", "where", "when"];

fn is_noun(tag: &str) -> bool {
    tag == "n" || tag.starts_with("n:")
}

fn is_modifier(tag: &str) -> bool {
    MODIFIERS.contains(&tag)
}

fn is_cop_mod_aux(tag: &str) -> bool {
    matches!(tag, "cop" | "mod" | "aux")
}

fn is_punctuation_mor(mor: &str) -> bool {
    PUNCTUATION_MOR.contains(&mor)
}

/// Index of the last token; ROOT for an empty graph.
fn last(graph: &DependencyGraph) -> usize {
    graph.n_nodes() - 1
}

fn ends_in_question_mark(graph: &DependencyGraph) -> bool {
    graph.word(last(graph)) == "?"
}

fn starts_with_wh_word(graph: &DependencyGraph) -> bool {
    graph.n_nodes() > 1 && WH_WORDS.contains(&graph.word(1))
}

#[cfg(test)]
pub(crate) mod test_support {
    use childes_core::{Gra, Token};

    use crate::graph::DependencyGraph;

    /// Build a graph from `(word, pos, mor, head, rel)` rows.
    pub fn graph(rows: &[(&str, &str, &str, usize, &str)]) -> DependencyGraph {
        let tokens: Vec<Token> = rows
            .iter()
            .enumerate()
            .map(|(i, (word, pos, mor, head, rel))| {
                Token::new(*word, Some(*pos), Some(*mor), Some(Gra::new(i + 1, *head, *rel)))
            })
            .collect();
        DependencyGraph::from_tokens(&tokens)
    }
}
