//! Verb phrase items V1-V16.

use childes_core::POSTCLITIC;

use super::{is_cop_mod_aux, is_punctuation_mor, Board, Item};
use crate::graph::DependencyGraph;

/// Catenatives counted as pseudo-auxiliaries, as transcribed.
const PSEUDO_AUXILIARIES: [&str; 14] = [
    "hafta",
    "haf(ta)",
    "s'pose(da)",
    "s'poseda",
    "gonna",
    "gon(na)",
    "wanna",
    "wanta",
    "wan(t)(a)",
    "want(a)",
    "wan(na)",
    "gotta",
    "got(ta)",
    "better",
];

const PAST_TENSE_MODALS: [&str; 5] = ["could", "did", "might", "would", "woudn't"];

/// The stem of a `%mor` descriptor: everything before the first suffix
/// (`-`) or fusional marker (`&`).
fn lemma(mor: &str) -> &str {
    let stem = mor.split('-').next().unwrap_or(mor);
    stem.split('&').next().unwrap_or(stem)
}

fn tagged(graph: &DependencyGraph, board: &mut Board, item: Item, tag: &str) {
    for i in 1..graph.n_nodes() {
        if graph.tag(i) == tag && board.hit(item) {
            return;
        }
    }
}

/// V1: verb.
pub(super) fn v1(graph: &DependencyGraph, board: &mut Board) {
    tagged(graph, board, Item::V1, "v");
}

/// V2: particle or preposition.
pub(super) fn v2(graph: &DependencyGraph, board: &mut Board) {
    tagged(graph, board, Item::V2, "prep");
}

/// V3: prepositional phrase. Also credits V2.
pub(super) fn v3(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.rel(i) == Some("POBJ") {
            board.credit(Item::V2);
            if board.hit(Item::V3) {
                return;
            }
        }
    }
}

/// V4: copula linking two nominals. Also credits V1.
pub(super) fn v4(graph: &DependencyGraph, board: &mut Board) {
    if graph.n_nodes() <= 3 {
        return;
    }
    for i in 1..graph.n_nodes() {
        if graph.tag(i) != "cop" {
            continue;
        }
        let mut subject = false;
        let mut predicate = false;
        for (dep, rel) in graph.dependents(i) {
            if rel == "SUBJ" && !graph.tag(dep).ends_with("wh") {
                subject = true;
            } else if rel == "PRED" {
                predicate = true;
            }
        }
        if subject && predicate {
            board.credit(Item::V1);
            if board.hit(Item::V4) {
                return;
            }
        }
    }
}

/// V5: catenative (pseudo-auxiliary) before a verb.
pub(super) fn v5(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 2 {
        return;
    }
    for i in 1..n - 1 {
        if graph.tag(i + 1) == "v"
            && PSEUDO_AUXILIARIES.contains(&graph.word(i))
            && board.hit(Item::V5)
        {
            return;
        }
    }
}

/// V6: auxiliary be, do or have. Also credits V5.
pub(super) fn v6(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        let tag = graph.tag(i);
        let mor = graph.mor(i);
        if (tag == "aux" && !mor.starts_with("wi")) || (tag == "mod" && lemma(mor) == "do") {
            board.credit(Item::V5);
            if board.hit(Item::V6) {
                return;
            }
        }
    }
}

/// V7: progressive suffix.
pub(super) fn v7(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.mor(i).ends_with("PRESP") && board.hit(Item::V7) {
            return;
        }
    }
}

/// V8: adverb.
pub(super) fn v8(graph: &DependencyGraph, board: &mut Board) {
    tagged(graph, board, Item::V8, "adv");
}

/// V9: modal before a verb. Also credits V5.
pub(super) fn v9(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 2 {
        return;
    }
    for i in 1..n - 1 {
        if graph.tag(i).starts_with("mod")
            && graph.tag(i + 1) == "v"
            && graph.word(i) != POSTCLITIC
        {
            board.credit(Item::V5);
            if board.hit(Item::V9) {
                return;
            }
        }
    }
}

/// V10: third person singular present suffix.
pub(super) fn v10(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.mor(i).contains("-3S") && board.hit(Item::V10) {
            return;
        }
    }
}

/// V11: past tense modal. Also credits V9.
pub(super) fn v11(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.tag(i) == "mod" && PAST_TENSE_MODALS.contains(&graph.word(i)) {
            board.credit(Item::V9);
            if board.hit(Item::V11) {
                return;
            }
        }
    }
}

/// V12: regular past tense suffix.
pub(super) fn v12(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        let mor = graph.mor(i);
        if mor.contains("-PAST") && !mor.contains("-PASTP") && board.hit(Item::V12) {
            return;
        }
    }
}

/// V13: past tense auxiliary. Also credits V6.
pub(super) fn v13(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.mor(i).contains("&PAST") && matches!(graph.tag(i), "aux" | "mod") {
            board.credit(Item::V6);
            if board.hit(Item::V13) {
                return;
            }
        }
    }
}

/// V14: medial adverb, neither first nor last. Also credits V8.
pub(super) fn v14(graph: &DependencyGraph, board: &mut Board) {
    for i in 2..graph.n_nodes().saturating_sub(1) {
        if graph.tag(i) == "adv" {
            board.credit(Item::V8);
            if board.hit(Item::V14) {
                return;
            }
        }
    }
}

/// V15: copula, modal or auxiliary right before punctuation (emphasis or
/// ellipsis). Also credits V4, V6, V9, V11, V13 and V16.
pub(super) fn v15(graph: &DependencyGraph, board: &mut Board) {
    let n = graph.n_nodes();
    if n <= 2 {
        return;
    }
    for i in 1..n - 1 {
        if is_cop_mod_aux(graph.tag(i)) && is_punctuation_mor(graph.mor(i + 1)) {
            for item in [Item::V4, Item::V6, Item::V9, Item::V11, Item::V13, Item::V16] {
                board.credit(item);
            }
            if board.hit(Item::V15) {
                return;
            }
        }
    }
}

/// V16: past tense copula. Also credits V4.
pub(super) fn v16(graph: &DependencyGraph, board: &mut Board) {
    for i in 1..graph.n_nodes() {
        if graph.tag(i).starts_with("cop") && graph.mor(i).contains("PAST") {
            board.credit(Item::V4);
            if board.hit(Item::V16) {
                return;
            }
        }
    }
}
