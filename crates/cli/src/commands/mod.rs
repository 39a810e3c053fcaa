pub(crate) mod cache;
pub(crate) mod export;
pub(crate) mod freq;
pub(crate) mod graph;
pub(crate) mod info;
pub(crate) mod measures;
pub(crate) mod utterances;
