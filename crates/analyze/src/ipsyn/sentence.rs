//! Sentence structure items S1-S19.

use childes_core::POSTCLITIC;

use super::{is_punctuation_mor, Board, Item};
use crate::graph::DependencyGraph;

const INTRODUCERS: [&str; 4] = ["let", "make", "help", "watch"];

/// Coordinators that do not make an adverbial conjunction.
const COORDINATORS: [&str; 3] = ["and", "or", "then"];

/// S1: two-word combination.
pub(super) fn s1(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() > 2 {
        board.hit(Item::S1);
    }
}

/// S2: subject before its verb. Also credits S1.
pub(super) fn s2(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 2 {
        return;
    }
    for (dep, head) in graph.edges() {
        if dep < head && graph.rel(dep) == Some("SUBJ") && graph.tag(head) == "v" {
            board.credit(Item::S1);
            if board.hit(Item::S2) {
                return;
            }
        }
    }
}

/// S3: object after its verb. Also credits S1.
pub(super) fn s3(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 2 {
        return;
    }
    for (dep, head) in graph.edges() {
        if dep > head && graph.rel(dep) == Some("OBJ") && graph.tag(head) == "v" {
            board.credit(Item::S1);
            if board.hit(Item::S3) {
                return;
            }
        }
    }
}

/// S4: subject, verb and object in that order. Also credits S2 and S3.
pub(super) fn s4(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    for i in 1..graph.n_nodes() {
        if graph.tag(i) != "v" {
            continue;
        }
        let mut subject = false;
        let mut object = false;
        for (dep, rel) in graph.dependents(i) {
            subject |= dep < i && rel == "SUBJ";
            object |= dep > i && rel == "OBJ";
        }
        if subject && object {
            board.credit(Item::S2);
            board.credit(Item::S3);
            if board.hit(Item::S4) {
                return;
            }
        }
    }
}

/// S5: conjunction.
pub(super) fn s5(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.tag(i) == "conj" && board.hit(Item::S5) {
            return;
        }
    }
}

/// S6: two verb phrases, neither governing the other.
pub(super) fn s6(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 4 {
        return;
    }
    // One entry per dependent, so a verb with two dependents counts twice.
    let verbs: Vec<usize> = graph
        .edges()
        .map(|(_, head)| head)
        .filter(|head| graph.tag(*head) == "v")
        .collect();
    if let [first, second] = verbs[..] {
        if graph.head(first) != Some(second) {
            board.hit(Item::S6);
        }
    }
}

/// S7: conjoined phrases. Also credits S5.
pub(super) fn s7(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 3 {
        return;
    }
    for i in 1..n - 2 {
        if graph.tag(i + 1) == "conj"
            && !is_punctuation_mor(graph.mor(i))
            && !is_punctuation_mor(graph.mor(i + 2))
        {
            board.credit(Item::S5);
            if board.hit(Item::S7) {
                return;
            }
        }
    }
}

/// S8: infinitive marked with "to" on a verb that is not the main verb.
/// Also credits S6 and V5.
pub(super) fn s8(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    for (dep, head) in graph.edges() {
        if graph.tag(dep) != "inf" {
            continue;
        }
        let embedded = graph.rel(head).is_some_and(|rel| !rel.ends_with("ROOT"));
        if embedded {
            board.credit(Item::S6);
            board.credit(Item::V5);
            if board.hit(Item::S8) {
                return;
            }
        }
    }
}

/// S9: let, make, help or watch introducing a verb.
pub(super) fn s9(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 1 || graph.head(1).is_none() || !INTRODUCERS.contains(&graph.word(1)) {
        return;
    }
    if graph.dependents(1).any(|(dep, _)| graph.tag(dep) == "v") {
        board.hit(Item::S9);
    }
}

/// S10: adverbial conjunction. Also credits S5.
pub(super) fn s10(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.tag(i) == "conj" && !COORDINATORS.contains(&graph.word(i)) {
            board.credit(Item::S5);
            if board.hit(Item::S10) {
                return;
            }
        }
    }
}

/// S11: propositional complement, seen as a second subject. Also credits S6.
pub(super) fn s11(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    let mut subjects = 0;
    for (dep, _) in graph.edges() {
        if graph.rel(dep) != Some("SUBJ") || graph.word(dep) == POSTCLITIC {
            continue;
        }
        subjects += 1;
        if subjects > 1 {
            board.credit(Item::S6);
            if board.hit(Item::S11) {
                return;
            }
        }
    }
}

/// S12: conjoined sentences, "and" coordinating verbs. Also credits S6
/// and S5.
pub(super) fn s12(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    for (dep, head) in graph.edges() {
        if graph.word(dep) == "and" && graph.rel(dep) == Some("CONJ") && graph.tag(head) == "v" {
            board.credit(Item::S6);
            board.credit(Item::S5);
            if board.hit(Item::S12) {
                return;
            }
        }
    }
}

/// S13: wh-clause, a wh-word whose head is not the main verb. Also
/// credits S6, plus S8 and S17 when an infinitive follows the wh-word.
pub(super) fn s13(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 3 {
        return;
    }
    for (dep, head) in graph.edges() {
        if !graph.tag(dep).ends_with("wh") {
            continue;
        }
        if graph.rel(head).unwrap_or("") == "ROOT" {
            continue;
        }
        board.credit(Item::S6);
        if dep + 1 < n && graph.tag(dep + 1) == "inf" {
            board.credit(Item::S8);
            board.credit(Item::S17);
        }
        if board.hit(Item::S13) {
            return;
        }
    }
}

/// S14: bitransitive predicate, a head with two objects. Also credits S3.
pub(super) fn s14(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    let mut heads: Vec<usize> = graph
        .edges()
        .filter(|(dep, _)| graph.rel(*dep) == Some("OBJ"))
        .map(|(_, head)| head)
        .collect();
    let objects = heads.len();
    heads.sort_unstable();
    heads.dedup();
    if heads.len() < objects {
        board.credit(Item::S3);
        board.hit(Item::S14);
    }
}

/// S15: three or more verbs. Also credits S6.
pub(super) fn s15(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    let verbs = (1..graph.n_nodes()).filter(|i| graph.tag(*i) == "v").count();
    if verbs > 2 {
        board.credit(Item::S6);
        board.hit(Item::S15);
    }
}

/// S16: relative clause, a CMOD to the right of its head with no "and"
/// in between. Also credits S6.
pub(super) fn s16(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    for (dep, head) in graph.edges() {
        if dep < head || graph.rel(dep) != Some("CMOD") {
            continue;
        }
        if (head + 1..dep).all(|i| graph.word(i) != "and") {
            board.credit(Item::S6);
            if board.hit(Item::S16) {
                return;
            }
        }
    }
}

/// S17: infinitive clause with a new subject, as in "he wants me to go".
/// Also credits S8.
pub(super) fn s17(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    for (dep, infinitive) in graph.edges() {
        if graph.word(dep) != "to" || graph.tag(dep) != "inf" {
            continue;
        }
        let Some(main) = graph.head(infinitive) else {
            continue;
        };
        if graph.dependents(main).any(|(_, rel)| rel == "OBJ") {
            board.credit(Item::S8);
            if board.hit(Item::S17) {
                return;
            }
        }
    }
}

/// S18: gerund. Also credits V7.
pub(super) fn s18(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.tag(i) == "n:gerund" {
            board.credit(Item::V7);
            if board.hit(Item::S18) {
                return;
            }
        }
    }
}

/// S19: fronted subordinate clause, a conjunction before the first of two
/// or more subjects. Also credits S6.
pub(super) fn s19(graph: &DependencyGraph, board: &mut Board) {
    let mut conjunction = graph.n_nodes();
    let mut subjects = Vec::new();
    for (dep, _) in graph.edges() {
        if graph.tag(dep) == "conj" {
            conjunction = conjunction.min(dep);
        }
        if graph.rel(dep) == Some("SUBJ") {
            subjects.push(dep);
        }
    }
    if subjects.len() < 2 {
        return;
    }
    if subjects.iter().all(|subject| conjunction < *subject) {
        board.credit(Item::S6);
        board.hit(Item::S19);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipsyn::test_support::graph;

    fn i_want_cookies() -> DependencyGraph {
        graph(&[
            ("I", "pro:sub", "I", 2, "SUBJ"),
            ("want", "v", "want", 0, "ROOT"),
            ("cookies", "n", "cookie-PL", 2, "OBJ"),
            (".", ".", "", 2, "PUNCT"),
        ])
    }

    #[test]
    fn subject_verb_object() {
        let g = i_want_cookies();
        let mut board = Board::default();
        s4(&g, &mut board);
        assert_eq!(board.points(Item::S4), 1);
        assert_eq!(board.points(Item::S2), 1);
        assert_eq!(board.points(Item::S3), 1);
        s2(&g, &mut board);
        s3(&g, &mut board);
        assert_eq!(board.points(Item::S2), 2);
        assert_eq!(board.points(Item::S3), 2);
        assert_eq!(board.points(Item::S1), 2);
    }

    #[test]
    fn single_word_is_no_combination() {
        let g = graph(&[("hi", "co", "hi", 0, "INCROOT")]);
        let mut board = Board::default();
        s1(&g, &mut board);
        assert_eq!(board.points(Item::S1), 0);
    }

    #[test]
    fn two_independent_verbs() {
        // "I want go play": two verbs heading one dependent each.
        let g = graph(&[
            ("I", "pro:sub", "I", 2, "SUBJ"),
            ("want", "v", "want", 0, "ROOT"),
            ("go", "v", "go", 0, "ROOT"),
            ("play", "v", "play", 3, "XCOMP"),
            (".", ".", "", 0, "PUNCT"),
        ]);
        let mut board = Board::default();
        s6(&g, &mut board);
        assert_eq!(board.points(Item::S6), 1);
    }

    #[test]
    fn governed_second_verb_is_not_two_vps() {
        let g = graph(&[
            ("I", "pro:sub", "I", 2, "SUBJ"),
            ("want", "v", "want", 3, "XCOMP"),
            ("go", "v", "go", 0, "ROOT"),
            ("now", "adv", "now", 0, "JCT"),
            (".", ".", "", 0, "PUNCT"),
        ]);
        let mut board = Board::default();
        s6(&g, &mut board);
        assert_eq!(board.points(Item::S6), 0);
    }

    #[test]
    fn conjoined_phrases_and_adverbial_conjunctions() {
        let g = graph(&[
            ("cats", "n", "cat-PL", 0, "ROOT"),
            ("and", "conj", "and", 1, "CONJ"),
            ("dogs", "n", "dog-PL", 2, "COORD"),
            ("because", "conj", "because", 1, "LINK"),
        ]);
        let mut board = Board::default();
        s7(&g, &mut board);
        assert_eq!(board.points(Item::S7), 1);
        assert_eq!(board.points(Item::S5), 1);
        s10(&g, &mut board);
        assert_eq!(board.points(Item::S10), 1);
        assert_eq!(board.points(Item::S5), 2);
    }

    #[test]
    fn infinitive_with_new_subject() {
        // he wants me to go
        let g = graph(&[
            ("he", "pro:sub", "he", 2, "SUBJ"),
            ("wants", "v", "want-3S", 0, "ROOT"),
            ("me", "pro:obj", "me", 2, "OBJ"),
            ("to", "inf", "to", 5, "INF"),
            ("go", "v", "go", 2, "XCOMP"),
        ]);
        let mut board = Board::default();
        s8(&g, &mut board);
        assert_eq!(board.points(Item::S8), 1);
        assert_eq!(board.points(Item::S6), 1);
        assert_eq!(board.points(Item::V5), 1);
        s17(&g, &mut board);
        assert_eq!(board.points(Item::S17), 1);
        assert_eq!(board.points(Item::S8), 2);
    }

    #[test]
    fn introducer_with_dependent_verb() {
        let g = graph(&[
            ("let", "v", "let", 0, "ROOT"),
            ("me", "pro:obj", "me", 1, "OBJ"),
            ("see", "v", "see", 1, "COMP"),
        ]);
        let mut board = Board::default();
        s9(&g, &mut board);
        assert_eq!(board.points(Item::S9), 1);
    }

    #[test]
    fn propositional_complement_and_fronted_clause() {
        // when I go you cry
        let g = graph(&[
            ("when", "conj", "when", 3, "LINK"),
            ("I", "pro:sub", "I", 3, "SUBJ"),
            ("go", "v", "go", 5, "CJCT"),
            ("you", "pro", "you", 5, "SUBJ"),
            ("cry", "v", "cry", 0, "ROOT"),
        ]);
        let mut board = Board::default();
        s11(&g, &mut board);
        assert_eq!(board.points(Item::S11), 1);
        s19(&g, &mut board);
        assert_eq!(board.points(Item::S19), 1);
        assert_eq!(board.points(Item::S6), 2);
    }

    #[test]
    fn conjoined_sentences() {
        let g = graph(&[
            ("I", "pro:sub", "I", 2, "SUBJ"),
            ("ran", "v", "run&PAST", 0, "ROOT"),
            ("and", "coord", "and", 2, "CONJ"),
            ("fell", "v", "fall&PAST", 3, "COORD"),
        ]);
        let mut board = Board::default();
        s12(&g, &mut board);
        assert_eq!(board.points(Item::S12), 1);
        assert_eq!(board.points(Item::S5), 1);
        assert_eq!(board.points(Item::S6), 1);
    }

    #[test]
    fn wh_clause_with_infinitive() {
        // I know what to do
        let g = graph(&[
            ("I", "pro:sub", "I", 2, "SUBJ"),
            ("know", "v", "know", 0, "ROOT"),
            ("what", "pro:wh", "what", 5, "OBJ"),
            ("to", "inf", "to", 5, "INF"),
            ("do", "v", "do", 2, "COMP"),
        ]);
        let mut board = Board::default();
        s13(&g, &mut board);
        assert_eq!(board.points(Item::S13), 1);
        assert_eq!(board.points(Item::S6), 1);
        assert_eq!(board.points(Item::S8), 1);
        assert_eq!(board.points(Item::S17), 1);
    }

    #[test]
    fn wh_question_is_not_a_wh_clause() {
        let g = graph(&[
            ("what", "pro:wh", "what", 3, "OBJ"),
            ("you", "pro", "you", 3, "SUBJ"),
            ("want", "v", "want", 0, "ROOT"),
            ("?", "?", "", 3, "PUNCT"),
        ]);
        let mut board = Board::default();
        s13(&g, &mut board);
        assert_eq!(board.points(Item::S13), 0);
    }

    #[test]
    fn bitransitive_three_verbs_and_relative_clause() {
        let g = graph(&[
            ("give", "v", "give", 0, "ROOT"),
            ("me", "pro:obj", "me", 1, "OBJ"),
            ("the", "det", "the", 4, "DET"),
            ("toy", "n", "toy", 1, "OBJ"),
            ("you", "pro", "you", 6, "SUBJ"),
            ("like", "v", "like", 4, "CMOD"),
            ("see", "v", "see", 6, "COMP"),
        ]);
        let mut board = Board::default();
        s14(&g, &mut board);
        assert_eq!(board.points(Item::S14), 1);
        assert_eq!(board.points(Item::S3), 1);
        s15(&g, &mut board);
        assert_eq!(board.points(Item::S15), 1);
        s16(&g, &mut board);
        assert_eq!(board.points(Item::S16), 1);
        assert_eq!(board.points(Item::S6), 2);
    }

    #[test]
    fn gerund_credits_progressive() {
        let g = graph(&[("swimming", "n:gerund", "swim-PRESP", 0, "ROOT")]);
        let mut board = Board::default();
        s18(&g, &mut board);
        assert_eq!(board.points(Item::S18), 1);
        assert_eq!(board.points(Item::V7), 1);
    }
}
