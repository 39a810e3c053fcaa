//! Dependency graph over one utterance's `%gra` relations.
//!
//! Nodes live in an arena indexed `0..=N`: node 0 is the synthetic ROOT
//! and node `i` is the `i`-th token. Every dependent has at most one head,
//! so the edge list is simply one optional `(head, rel)` per node.

use childes_core::Token;
use serde::Serialize;

/// Relation label given to a token whose `%gra` item was unusable.
pub const ERROR_REL: &str = "**ERROR**";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub word: String,
    pub pos: String,
    pub mor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub head: usize,
    pub rel: String,
}

#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<Node>,
    /// Lower-cased `pos` of each node, for tag comparisons.
    tags: Vec<String>,
    /// `edges[dep]`; always `None` for the ROOT slot.
    edges: Vec<Option<Edge>>,
    faulty: bool,
}

impl DependencyGraph {
    /// Build the graph of one utterance.
    ///
    /// A token without a `%gra` relation, a relation whose `dep` is not the
    /// token's own 1-based position, or a head past the last token marks
    /// the graph as faulty. Faulty graphs are still built so they can be
    /// displayed, but measures skip them.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut nodes = Vec::with_capacity(tokens.len() + 1);
        let mut edges = Vec::with_capacity(tokens.len() + 1);
        let mut faulty = false;

        nodes.push(Node {
            word: "ROOT".to_string(),
            pos: "ROOT".to_string(),
            mor: "ROOT".to_string(),
        });
        edges.push(None);

        for (i, token) in tokens.iter().enumerate() {
            let index = i + 1;
            nodes.push(Node {
                word: token.word.clone(),
                pos: token.pos.clone().unwrap_or_default(),
                mor: token.mor.clone().unwrap_or_default(),
            });
            match &token.gra {
                Some(gra) if gra.dep == index && gra.head <= tokens.len() => {
                    edges.push(Some(Edge {
                        head: gra.head,
                        rel: gra.rel.clone(),
                    }));
                }
                _ => {
                    faulty = true;
                    edges.push(None);
                }
            }
        }

        let tags = nodes.iter().map(|n| n.pos.to_lowercase()).collect();
        DependencyGraph {
            nodes,
            tags,
            edges,
            faulty,
        }
    }

    /// Node count, ROOT included.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn is_faulty(&self) -> bool {
        self.faulty
    }

    /// Lower-cased part-of-speech tag of a node.
    pub fn tag(&self, index: usize) -> &str {
        &self.tags[index]
    }

    pub fn word(&self, index: usize) -> &str {
        &self.nodes[index].word
    }

    pub fn mor(&self, index: usize) -> &str {
        &self.nodes[index].mor
    }

    pub fn head(&self, dep: usize) -> Option<usize> {
        self.edges.get(dep)?.as_ref().map(|e| e.head)
    }

    pub fn rel(&self, dep: usize) -> Option<&str> {
        self.edges.get(dep)?.as_ref().map(|e| e.rel.as_str())
    }

    /// `(dep, head)` pairs in dependent order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(dep, edge)| edge.as_ref().map(|e| (dep, e.head)))
    }

    /// `(dep, rel)` pairs of every dependent of `head`.
    pub fn dependents(&self, head: usize) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(move |(dep, edge)| match edge {
                Some(e) if e.head == head => Some((dep, e.rel.as_str())),
                _ => None,
            })
    }

    /// One `word pos head rel` line per token.
    pub fn to_conll(&self) -> String {
        (1..self.n_nodes())
            .map(|dep| {
                let node = &self.nodes[dep];
                match &self.edges[dep] {
                    Some(e) => format!("{} {} {} {}", node.word, node.pos, e.head, e.rel),
                    None => format!("{} {} -1 {}", node.word, node.pos, ERROR_REL),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// LaTeX source for the `tikz-dependency` package.
    pub fn to_tikz(&self) -> String {
        let words: Vec<&str> = self.nodes[1..].iter().map(|n| n.word.as_str()).collect();

        let mut body = String::new();
        body.push_str("    \\begin{deptext}[column sep=1em]\n");
        body.push_str(&format!("        {} \\\\ \n", words.join(" \\& ")));
        body.push_str("    \\end{deptext}\n");

        let (root_dep, root_rel) = (1..self.n_nodes())
            .find_map(|dep| match &self.edges[dep] {
                Some(e) if e.head == 0 => Some((dep, e.rel.as_str())),
                _ => None,
            })
            .unwrap_or((0, ""));
        body.push_str(&format!("    \\deproot{{{}}}{{{}}}\n", root_dep, root_rel));

        for dep in 1..self.n_nodes() {
            match &self.edges[dep] {
                Some(e) => body.push_str(&format!(
                    "    \\depedge{{{}}}{{{}}}{{{}}}\n",
                    dep, e.head, e.rel
                )),
                None => body.push_str(&format!(
                    "    \\depedge{{{}}}{{-1}}{{{}}}\n",
                    dep, ERROR_REL
                )),
            }
        }

        format!("\\begin{{dependency}}[theme = simple]\n{}\\end{{dependency}}", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use childes_core::Gra;

    fn sample() -> Vec<Token> {
        [
            ("but", "CONJ", "but", 1, 3, "LINK"),
            ("I", "PRO:SUB", "I", 2, 3, "SUBJ"),
            ("thought", "V", "think&PAST", 3, 0, "ROOT"),
            ("you", "PRO", "you", 4, 3, "OBJ"),
            ("wanted", "V", "want-PAST", 5, 3, "JCT"),
            ("me", "PRO:OBJ", "me", 6, 5, "POBJ"),
            ("to", "INF", "to", 7, 8, "INF"),
            ("turn", "V", "turn", 8, 3, "XCOMP"),
            ("it", "PRO", "it", 9, 8, "OBJ"),
            (".", ".", "", 10, 3, "PUNCT"),
        ]
        .iter()
        .map(|(w, p, m, d, h, r)| Token::new(*w, Some(*p), Some(*m), Some(Gra::new(*d, *h, *r))))
        .collect()
    }

    #[test]
    fn builds_nodes_and_edges() {
        let g = DependencyGraph::from_tokens(&sample());
        assert_eq!(g.n_nodes(), 11);
        assert!(!g.is_faulty());
        assert_eq!(g.node(0).word, "ROOT");
        assert_eq!(g.tag(2), "pro:sub");
        assert_eq!(g.head(3), Some(0));
        assert_eq!(g.rel(7), Some("INF"));
        assert_eq!(g.edges().count(), 10);
        let deps_of_turn: Vec<_> = g.dependents(8).collect();
        assert_eq!(deps_of_turn, vec![(7, "INF"), (9, "OBJ")]);
    }

    #[test]
    fn conll_output() {
        let g = DependencyGraph::from_tokens(&sample());
        assert_eq!(
            g.to_conll(),
            "but CONJ 3 LINK\n\
             I PRO:SUB 3 SUBJ\n\
             thought V 0 ROOT\n\
             you PRO 3 OBJ\n\
             wanted V 3 JCT\n\
             me PRO:OBJ 5 POBJ\n\
             to INF 8 INF\n\
             turn V 3 XCOMP\n\
             it PRO 8 OBJ\n\
             . . 3 PUNCT"
        );
    }

    #[test]
    fn tikz_output() {
        let g = DependencyGraph::from_tokens(&sample());
        let expected = "\\begin{dependency}[theme = simple]\n\
\x20   \\begin{deptext}[column sep=1em]\n\
\x20       but \\& I \\& thought \\& you \\& wanted \\& me \\& to \\& turn \\& it \\& . \\\\ \n\
\x20   \\end{deptext}\n\
\x20   \\deproot{3}{ROOT}\n\
\x20   \\depedge{1}{3}{LINK}\n\
\x20   \\depedge{2}{3}{SUBJ}\n\
\x20   \\depedge{3}{0}{ROOT}\n\
\x20   \\depedge{4}{3}{OBJ}\n\
\x20   \\depedge{5}{3}{JCT}\n\
\x20   \\depedge{6}{5}{POBJ}\n\
\x20   \\depedge{7}{8}{INF}\n\
\x20   \\depedge{8}{3}{XCOMP}\n\
\x20   \\depedge{9}{8}{OBJ}\n\
\x20   \\depedge{10}{3}{PUNCT}\n\
\\end{dependency}";
        assert_eq!(g.to_tikz(), expected);
    }

    #[test]
    fn missing_relation_is_faulty() {
        let tokens = vec![
            Token::new("a", Some("n"), Some("a"), Some(Gra::new(1, 0, "ROOT"))),
            Token::new("b", Some("n"), Some("b"), None),
        ];
        let g = DependencyGraph::from_tokens(&tokens);
        assert!(g.is_faulty());
        assert_eq!(g.edges().count(), 1);
        assert_eq!(g.to_conll(), "a n 0 ROOT\nb n -1 **ERROR**");
    }

    #[test]
    fn misnumbered_or_dangling_relation_is_faulty() {
        let shifted = vec![Token::new("a", Some("n"), Some("a"), Some(Gra::new(2, 0, "ROOT")))];
        assert!(DependencyGraph::from_tokens(&shifted).is_faulty());

        let dangling = vec![Token::new("a", Some("n"), Some("a"), Some(Gra::new(1, 5, "MOD")))];
        assert!(DependencyGraph::from_tokens(&dangling).is_faulty());
    }

    #[test]
    fn tokens_without_tiers_are_faulty() {
        let tokens = vec![Token::new("hi", None, None, None)];
        let g = DependencyGraph::from_tokens(&tokens);
        assert!(g.is_faulty());
        assert_eq!(g.node(1).pos, "");
    }
}
