//! Data model shared by every pipeline stage.
//!
//! Everything here is produced once by [`crate::parse`] and never mutated
//! afterwards. Tier maps and header fields keep insertion order because the
//! CHAT serializer reproduces that order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// Surface form given to a slot generated by a `$`-joined preclitic.
pub const PRECLITIC: &str = "PRECLITIC";
/// Surface form given to a slot generated by a `~`-joined postclitic.
pub const POSTCLITIC: &str = "POSTCLITIC";

/// Whether `word` is one of the clitic placeholders.
pub fn is_clitic(word: &str) -> bool {
    word == PRECLITIC || word == POSTCLITIC
}

// ──────────────────────────────────────────────
// Tokens
// ──────────────────────────────────────────────

/// Grammatical relation of one token, read from a `dep|head|rel` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gra {
    /// 1-based position of the token itself.
    pub dep: usize,
    /// Position of the head; 0 is ROOT.
    pub head: usize,
    pub rel: String,
}

impl Gra {
    pub fn new(dep: usize, head: usize, rel: impl Into<String>) -> Self {
        Gra {
            dep,
            head,
            rel: rel.into(),
        }
    }

    /// Parse a raw `%gra` item. Anything that is not three `|`-separated
    /// fields with integer positions yields `None`.
    pub fn parse(raw: &str) -> Option<Gra> {
        let mut parts = raw.trim().splitn(3, '|');
        let dep = parts.next()?.parse().ok()?;
        let head = parts.next()?.parse().ok()?;
        let rel = parts.next()?;
        Some(Gra::new(dep, head, rel))
    }
}

/// One aligned position of an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub pos: Option<String>,
    pub mor: Option<String>,
    pub gra: Option<Gra>,
}

impl Token {
    pub fn new(
        word: impl Into<String>,
        pos: Option<&str>,
        mor: Option<&str>,
        gra: Option<Gra>,
    ) -> Self {
        Token {
            word: word.into(),
            pos: pos.map(str::to_owned),
            mor: mor.map(str::to_owned),
            gra,
        }
    }

    /// Whether this token is a clitic placeholder rather than a word.
    pub fn is_clitic(&self) -> bool {
        is_clitic(&self.word)
    }

    /// The `%mor` item this token was read from.
    ///
    /// Bare items such as `.` or `?` carry no `|` and come back unchanged.
    pub fn to_mor_item(&self) -> String {
        let pos = self.pos.as_deref().unwrap_or("");
        match self.mor.as_deref() {
            None | Some("") => pos.to_string(),
            Some(mor) => format!("{}|{}", pos, mor),
        }
    }

    /// The `%gra` item this token was read from, or `_` when it had none.
    pub fn to_gra_item(&self) -> String {
        match &self.gra {
            Some(g) => format!("{}|{}|{}", g.dep, g.head, g.rel),
            None => "_".to_string(),
        }
    }
}

// ──────────────────────────────────────────────
// Utterances and files
// ──────────────────────────────────────────────

/// Raw tiers of one utterance: the main tier keyed by the speaker code,
/// then each dependent tier keyed by its `%` marker.
pub type Tiers = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub participant: String,
    pub tokens: Vec<Token>,
    /// Media offsets in milliseconds, from a `\x15start_end\x15` bullet.
    pub time_marks: Option<(u64, u64)>,
    pub tiers: Tiers,
}

impl Utterance {
    /// Surface words, skipping clitic placeholders.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| !t.is_clitic())
            .map(|t| t.word.as_str())
    }

    pub fn has_tier(&self, marker: &str) -> bool {
        self.tiers.contains_key(marker)
    }
}

/// Demographics of one participant, from `@Participants`, `@ID` and
/// `@Birth of CODE`. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub language: String,
    pub corpus: String,
    pub age: String,
    pub sex: String,
    pub group: String,
    pub ses: String,
    pub role: String,
    pub education: String,
    pub custom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<Date>,
}

impl Participant {
    /// True for a record that only exists because the speaker talked.
    pub fn is_blank(&self) -> bool {
        *self == Participant::default()
    }
}

/// File-level metadata from the `@` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Language codes, dominant first.
    pub languages: Vec<String>,
    pub participants: IndexMap<String, Participant>,
    /// Distinct recording dates.
    pub dates: BTreeSet<Date>,
    /// Every other `@KEY` in first-seen order, last value wins. Flags such
    /// as `@UTF8` map to the empty string.
    pub fields: IndexMap<String, String>,
}

impl Header {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
            && self.participants.is_empty()
            && self.dates.is_empty()
            && self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// One parsed CHAT file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFile {
    /// Local path, URL-relative path, or a random id for in-memory text.
    pub file_path: String,
    pub header: Header,
    pub utterances: Vec<Utterance>,
}
