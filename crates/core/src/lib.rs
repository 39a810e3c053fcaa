//! childes-core: CHAT transcript parsing.
//!
//! Turns the text of one CHAT file into a [`ChatFile`] through five
//! stages, each in its own module:
//!
//! 1. [`lines`] -- join continuation lines into logical lines
//! 2. [`header`] -- read `@` lines into a [`Header`]
//! 3. [`tiers`] -- group `*SPK:` and `%tier:` lines per utterance
//! 4. [`clean`] -- strip in-line annotation from the main tier
//! 5. [`align`] -- fuse main tier, `%mor` and `%gra` into [`Token`]s
//!
//! [`parse_chat()`] runs the whole pipeline; [`serialize`] writes parsed
//! files back out as CHAT text.

pub mod align;
pub mod clean;
pub mod error;
pub mod header;
pub mod lines;
pub mod model;
pub mod parse;
pub mod serialize;
pub mod tiers;

// ── Convenience re-exports: data model ───────────────────────────────

pub use error::ParseError;
pub use model::{
    is_clitic, ChatFile, Gra, Header, Participant, Tiers, Token, Utterance, POSTCLITIC, PRECLITIC,
};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use clean::{clean_utterance, clean_word};
pub use header::parse_date;
pub use parse::parse_chat;
pub use serialize::{to_chat_string, utterance_to_chat};
