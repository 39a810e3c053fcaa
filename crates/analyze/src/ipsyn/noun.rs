//! Noun phrase items N1-N11.

use super::{is_modifier, is_noun, Board, Item};
use crate::graph::DependencyGraph;

/// N1: proper, mass or count noun.
pub(super) fn n1(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if is_noun(graph.tag(i)) && board.hit(Item::N1) {
            return;
        }
    }
}

/// N2: pronoun or prolocative, excluding possessive determiners.
pub(super) fn n2(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        let tag = graph.tag(i);
        if tag.starts_with("pro") && tag != "pro:poss:det" && board.hit(Item::N2) {
            return;
        }
    }
}

/// N3: modifier (adjective, possessive, quantifier).
pub(super) fn n3(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if is_modifier(graph.tag(i)) && board.hit(Item::N3) {
            return;
        }
    }
}

/// N4: two-word NP, a nominal after an article or modifier.
pub(super) fn n4(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 2 {
        return;
    }
    for i in 1..n - 1 {
        if is_modifier(graph.tag(i)) && is_noun(graph.tag(i + 1)) && board.hit(Item::N4) {
            return;
        }
    }
}

/// N5: article before a noun. Also credits N4.
pub(super) fn n5(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 2 {
        return;
    }
    for i in 1..n - 1 {
        if graph.tag(i) == "det" && is_noun(graph.tag(i + 1)) {
            board.credit(Item::N4);
            if board.hit(Item::N5) {
                return;
            }
        }
    }
}

/// N6: two-word NP right after a verb or preposition. Also credits N4.
pub(super) fn n6(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 3 {
        return;
    }
    for i in 1..n - 2 {
        if matches!(graph.tag(i), "v" | "prep")
            && is_modifier(graph.tag(i + 1))
            && is_noun(graph.tag(i + 2))
        {
            board.credit(Item::N4);
            if board.hit(Item::N6) {
                return;
            }
        }
    }
}

/// N7: plural suffix.
pub(super) fn n7(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.mor(i).contains("-PL") && board.hit(Item::N7) {
            return;
        }
    }
}

/// N8: two-word NP right before a verb. Also credits N4.
pub(super) fn n8(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 3 {
        return;
    }
    for i in 1..n - 2 {
        if is_modifier(graph.tag(i)) && is_noun(graph.tag(i + 1)) && graph.tag(i + 2) == "v" {
            board.credit(Item::N4);
            if board.hit(Item::N8) {
                return;
            }
        }
    }
}

/// N9: three-word NP, determiner or modifier + modifier + noun. Also
/// credits N4.
pub(super) fn n9(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 3 {
        return;
    }
    for i in 1..n - 2 {
        if is_modifier(graph.tag(i))
            && matches!(graph.tag(i + 1), "adj" | "qn")
            && is_noun(graph.tag(i + 2))
        {
            board.credit(Item::N4);
            if board.hit(Item::N9) {
                return;
            }
        }
    }
}

/// N10: adverb modifying an adjective or noun. Also credits V8.
pub(super) fn n10(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 2 {
        return;
    }
    for i in 1..n {
        if graph.tag(i) != "adv" {
            continue;
        }
        let Some(head) = graph.head(i) else {
            continue;
        };
        if matches!(graph.tag(head), "adj" | "n") {
            board.credit(Item::V8);
            if board.hit(Item::N10) {
                return;
            }
        }
    }
}

/// N11: any other bound morpheme on a noun or adjective.
pub(super) fn n11(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        let tag = graph.tag(i);
        if !(tag == "n" || tag == "adj" || tag.starts_with("n:")) {
            continue;
        }
        if graph.mor(i).replace("-PL", "").contains('-') && board.hit(Item::N11) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipsyn::test_support::graph;

    #[test]
    fn nouns_pronouns_and_modifiers() {
        let g = graph(&[
            ("my", "pro:poss:det", "my", 2, "DET"),
            ("big", "adj", "big", 3, "MOD"),
            ("dog", "n", "dog", 0, "ROOT"),
        ]);
        let mut board = Board::default();
        n1(&g, &mut board);
        n2(&g, &mut board);
        n3(&g, &mut board);
        assert_eq!(board.points(Item::N1), 1);
        assert_eq!(board.points(Item::N2), 0);
        assert_eq!(board.points(Item::N3), 2);
    }

    #[test]
    fn article_noun_credits_two_word_np() {
        let g = graph(&[
            ("the", "det", "the", 2, "DET"),
            ("ball", "n", "ball", 0, "ROOT"),
            (".", ".", "", 2, "PUNCT"),
        ]);
        let mut board = Board::default();
        n5(&g, &mut board);
        assert_eq!(board.points(Item::N5), 1);
        assert_eq!(board.points(Item::N4), 1);
    }

    #[test]
    fn noun_phrase_after_verb_and_three_word_np() {
        let g = graph(&[
            ("want", "v", "want", 0, "ROOT"),
            ("more", "qn", "more", 4, "QUANT"),
            ("red", "adj", "red", 4, "MOD"),
            ("cookie", "n", "cookie", 1, "OBJ"),
        ]);
        let mut board = Board::default();
        n6(&g, &mut board);
        assert_eq!(board.points(Item::N6), 0);
        n9(&g, &mut board);
        assert_eq!(board.points(Item::N9), 1);
        assert_eq!(board.points(Item::N4), 1);
    }

    #[test]
    fn np_before_verb() {
        let g = graph(&[
            ("big", "adj", "big", 2, "MOD"),
            ("dogs", "n", "dog-PL", 3, "SUBJ"),
            ("bark", "v", "bark", 0, "ROOT"),
        ]);
        let mut board = Board::default();
        n8(&g, &mut board);
        n7(&g, &mut board);
        n11(&g, &mut board);
        assert_eq!(board.points(Item::N8), 1);
        assert_eq!(board.points(Item::N7), 1);
        assert_eq!(board.points(Item::N11), 0);
    }

    #[test]
    fn adverb_on_adjective_credits_adverbs() {
        let g = graph(&[
            ("very", "adv", "very", 2, "JCT"),
            ("big", "adj", "big", 0, "ROOT"),
            (".", ".", "", 2, "PUNCT"),
        ]);
        let mut board = Board::default();
        n10(&g, &mut board);
        assert_eq!(board.points(Item::N10), 1);
        assert_eq!(board.points(Item::V8), 1);
    }

    #[test]
    fn other_bound_morphemes() {
        let g = graph(&[("bigger", "adj", "big-CP", 0, "ROOT")]);
        let mut board = Board::default();
        n11(&g, &mut board);
        assert_eq!(board.points(Item::N11), 1);
    }

    #[test]
    fn tags_compare_case_insensitively() {
        let g = graph(&[("Eve", "N:PROP", "Eve", 0, "ROOT")]);
        let mut board = Board::default();
        n1(&g, &mut board);
        assert_eq!(board.points(Item::N1), 1);
    }
}
