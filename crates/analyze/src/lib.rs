//! Developmental measures over parsed CHAT utterances.
//!
//! Each measure works on the utterances of one file and returns one
//! number: MLU in morphemes and in words, type-token ratio, and the Index
//! of Productive Syntax. IPSyn reads the `%gra` tier through a
//! [`DependencyGraph`] per utterance. [`MeasureReport`] bundles every
//! measure of a file.

pub mod graph;
pub mod ipsyn;
pub mod lexical;
pub mod mlu;
pub mod report;

pub use graph::{DependencyGraph, Edge, Node, ERROR_REL};
pub use ipsyn::{ipsyn, Board, Item, MAX_POINTS, MAX_SCORE, MAX_UTTERANCES};
pub use lexical::{merge_counters, sort_counter, ttr, word_frequencies, word_ngrams, Counter};
pub use mlu::{mlum, mluw};
pub use report::MeasureReport;
