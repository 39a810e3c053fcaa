//! Stage 5: tier alignment.
//!
//! Fuses the cleaned main tier, the `%mor` tier and the `%gra` tier of one
//! utterance into a token sequence. Clitic groups on `%mor` (`a$b`,
//! `b~c`) occupy several slots but only one surface word, so the surface
//! words are spread over the non-clitic slots and the clitic slots get a
//! placeholder word.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::clean::{clean_utterance, clean_word};
use crate::error::ParseError;
use crate::model::{Gra, Tiers, Token, Utterance, POSTCLITIC, PRECLITIC};

static CLITIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"((.+)\$)?([^$~]+)(~(.+))?").expect("valid clitic regex"));

static TIME_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x15-?(\d+)_(\d+)-?\x15").expect("valid time mark regex"));

/// What a `%mor` slot was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Host,
    Preclitic,
    Postclitic,
}

/// The `%mor` tier after clitic expansion.
#[derive(Debug, Default)]
struct ExpandedMor {
    items: Vec<String>,
    slots: Vec<Slot>,
}

impl ExpandedMor {
    fn push(&mut self, item: &str, slot: Slot) {
        self.items.push(item.to_string());
        self.slots.push(slot);
    }

    fn clitic_count(&self) -> usize {
        self.slots.iter().filter(|s| **s != Slot::Host).count()
    }
}

fn expand_mor(tier: &str) -> ExpandedMor {
    let mut expanded = ExpandedMor::default();

    for item in tier.split_whitespace() {
        let Some(caps) = CLITIC.captures(item) else {
            // A bare `$` or `~` has no core; keep it as one slot.
            expanded.push(item, Slot::Host);
            continue;
        };
        if let Some(pre) = caps.get(2) {
            for morph in pre.as_str().split('$') {
                expanded.push(morph, Slot::Preclitic);
            }
        }
        expanded.push(&caps[3], Slot::Host);
        if let Some(post) = caps.get(5) {
            for morph in post.as_str().split('~') {
                expanded.push(morph, Slot::Postclitic);
            }
        }
    }

    expanded
}

/// Read the first `\x15start_end\x15` bullet of a main tier.
pub fn time_marks(line: &str) -> Option<(u64, u64)> {
    let caps = TIME_MARKS.captures(line)?;
    let start = caps[1].parse().ok()?;
    let end = caps[2].parse().ok()?;
    Some((start, end))
}

/// The speaker code of a tier group: its first key not starting with `%`.
pub fn participant_code(tiers: &Tiers) -> Option<&str> {
    tiers
        .keys()
        .map(String::as_str)
        .find(|marker| !marker.starts_with('%'))
}

/// Align one tier group into an utterance.
///
/// Returns `Ok(None)` for a group without a main tier. A `%mor` tier whose
/// slot count disagrees with the main tier, or a `%gra` tier whose length
/// disagrees with `%mor`, is an error for the whole file.
pub fn align(tiers: &Tiers, file: &str) -> Result<Option<Utterance>, ParseError> {
    let Some(participant) = participant_code(tiers) else {
        return Ok(None);
    };
    let main = &tiers[participant];
    let cleaned = clean_utterance(main);
    let forms: Vec<&str> = cleaned.split_whitespace().collect();

    let mor = tiers.get("%mor").map(|t| expand_mor(t)).unwrap_or_default();

    if !mor.items.is_empty() && forms.len() + mor.clitic_count() != mor.items.len() {
        return Err(ParseError::MorAlignment {
            file: file.to_string(),
            tiers: tiers.clone(),
            cleaned,
            mor: mor.items,
        });
    }

    let gra_items: Vec<&str> = tiers
        .get("%gra")
        .map(|t| t.split_whitespace().collect())
        .unwrap_or_default();

    if !mor.items.is_empty() && !gra_items.is_empty() && mor.items.len() != gra_items.len() {
        return Err(ParseError::GraAlignment {
            file: file.to_string(),
            tiers: tiers.clone(),
            mor: mor.items,
            gra: gra_items.into_iter().map(str::to_owned).collect(),
        });
    }

    let words: Vec<&str> = if mor.clitic_count() > 0 {
        let mut surface = forms.iter();
        mor.slots
            .iter()
            .map(|slot| match slot {
                Slot::Preclitic => PRECLITIC,
                Slot::Postclitic => POSTCLITIC,
                Slot::Host => surface.next().copied().unwrap_or(""),
            })
            .collect()
    } else {
        forms
    };

    let mut tokens = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        let (pos, descriptor) = if mor.items.is_empty() {
            (None, None)
        } else {
            let item = &mor.items[i];
            let (pos, rest) = item.split_once('|').unwrap_or((item.as_str(), ""));
            (Some(pos), Some(rest))
        };
        let gra = if gra_items.is_empty() {
            None
        } else {
            // Without %mor nothing bounds %gra; extra items are ignored.
            match gra_items.get(i) {
                Some(raw) => Gra::parse(raw),
                None => break,
            }
        };
        tokens.push(Token::new(clean_word(word), pos, descriptor, gra));
    }

    Ok(Some(Utterance {
        participant: participant.to_string(),
        tokens,
        time_marks: time_marks(main),
        tiers: tiers.clone(),
    }))
}
