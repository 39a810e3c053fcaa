//! Question and negation items Q1-Q10.

use super::{
    ends_in_question_mark, is_cop_mod_aux, is_punctuation_mor, last, starts_with_wh_word, Board,
    Item,
};
use crate::graph::DependencyGraph;

const NEGATORS: [&str; 4] = ["no", "not", "can't", "don't"];

const CLAUSE_WH_WORDS: [&str; 4] = ["why", "when", "which", "whose"];

const TAG_WORDS: [&str; 3] = ["okay", "ok", "right"];

/// Tag sequences of a "normal" tag question, e.g. "isn't it ?".
const TAG_PATTERNS: [&str; 2] = ["cop neg pro ?", "cop pro ?"];

/// A full Q4 or Q8 implies full marks on both intonation and routine
/// questions.
fn fill_simple_questions(board: &mut Board) {
    board.fill(Item::Q1);
    board.fill(Item::Q2);
}

/// Q1: intonationally marked question.
pub(super) fn q1(graph: &DependencyGraph, board: &mut Board) {
    if ends_in_question_mark(graph) && !starts_with_wh_word(graph) {
        board.hit(Item::Q1);
    }
}

/// Q2: wh-word question (routine question or wh-pronoun alone).
pub(super) fn q2(graph: &DependencyGraph, board: &mut Board) {
    if ends_in_question_mark(graph) && starts_with_wh_word(graph) && graph.n_nodes() > 2 {
        board.hit(Item::Q2);
    }
}

/// Q3: simple negation, a negator before a non-punctuation word.
pub(super) fn q3(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 2 {
        return;
    }
    for i in 1..n - 1 {
        if NEGATORS.contains(&graph.word(i))
            && !is_punctuation_mor(graph.mor(i + 1))
            && board.hit(Item::Q3)
        {
            return;
        }
    }
}

/// Q4: initial wh-word attached to a verb.
pub(super) fn q4(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 2 || !ends_in_question_mark(graph) || !starts_with_wh_word(graph) {
        return;
    }
    let Some(head) = graph.head(1) else {
        return;
    };
    if graph.tag(head) == "v" && board.hit(Item::Q4) {
        fill_simple_questions(board);
    }
}

/// Q5: negation between subject and verb. Also credits Q3.
pub(super) fn q5(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    for (dep, head) in graph.edges() {
        if dep > head || graph.rel(dep) != Some("SUBJ") || graph.tag(head) != "v" {
            continue;
        }
        if (dep + 1..head).any(|i| graph.tag(i) == "neg") {
            board.credit(Item::Q3);
            if board.hit(Item::Q5) {
                return;
            }
        }
    }
}

/// Q6: wh-question with an inverted copula, modal or auxiliary.
pub(super) fn q6(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 2 {
        return;
    }
    for i in 1..graph.n_nodes() {
        if !is_cop_mod_aux(graph.tag(i)) {
            continue;
        }
        for (dep, _) in graph.dependents(i) {
            if dep < i && graph.tag(dep) == "adv:wh" && board.hit(Item::Q6) {
                return;
            }
        }
    }
}

/// Q7: negated copula, modal or auxiliary. Also credits Q5.
pub(super) fn q7(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 2 {
        return;
    }
    for i in 1..graph.n_nodes() {
        if !is_cop_mod_aux(graph.tag(i)) {
            continue;
        }
        for (dep, _) in graph.dependents(i) {
            if graph.tag(dep) == "neg" {
                board.credit(Item::Q5);
                if board.hit(Item::Q7) {
                    return;
                }
            }
        }
    }
}

/// Q8: yes/no question with an inverted copula, modal or auxiliary.
pub(super) fn q8(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 2 || !ends_in_question_mark(graph) {
        return;
    }
    for i in 1..n - 1 {
        let previous = if i == 1 { "" } else { graph.tag(i - 1) };
        if previous.ends_with("wh") || !is_cop_mod_aux(graph.tag(i)) {
            continue;
        }
        if graph.rel(i + 1) == Some("SUBJ") && board.hit(Item::Q8) {
            fill_simple_questions(board);
            return;
        }
    }
}

/// Q9: why, when, which or whose.
pub(super) fn q9(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if CLAUSE_WH_WORDS.contains(&graph.word(i)) && board.hit(Item::Q9) {
            return;
        }
    }
}

/// Q10: tag question.
pub(super) fn q10(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 2 || !ends_in_question_mark(graph) {
        return;
    }
    if TAG_WORDS.contains(&graph.word(last(graph) - 1)) && board.hit(Item::Q10) {
        return;
    }
    let tags = (1..graph.n_nodes())
        .map(|i| graph.tag(i))
        .collect::<Vec<_>>()
        .join(" ");
    for pattern in TAG_PATTERNS {
        if tags.contains(pattern) && board.hit(Item::Q10) {
            return;
        }
    }
}
