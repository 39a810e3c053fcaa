use serde::Serialize;

use crate::model::Tiers;

/// A fatal CHAT parse error.
///
/// Alignment failures abort the whole file: a silently shifted `%mor` or
/// `%gra` tier would corrupt every token after it. The variants carry the
/// raw tiers and the intermediate forms so the offending utterance can be
/// found and fixed in the source transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    #[error(
        "{file}: cannot align the utterance and %mor tiers:\n\
         Tiers --\n{}\nCleaned-up utterance --\n{cleaned}\nParsed %mor tier --\n{mor:?}",
        format_tiers(.tiers)
    )]
    MorAlignment {
        file: String,
        tiers: Tiers,
        cleaned: String,
        mor: Vec<String>,
    },

    #[error(
        "{file}: cannot align the %mor and %gra tiers:\n\
         Tiers --\n{}\nParsed %mor tier --\n{mor:?}\nParsed %gra tier --\n{gra:?}",
        format_tiers(.tiers)
    )]
    GraAlignment {
        file: String,
        tiers: Tiers,
        mor: Vec<String>,
        gra: Vec<String>,
    },

    #[error("{file}: line {line}: continuation line with no preceding tier: {text:?}")]
    OrphanContinuation { file: String, line: usize, text: String },
}

impl ParseError {
    /// The file id the error was raised for.
    pub fn file(&self) -> &str {
        match self {
            ParseError::MorAlignment { file, .. }
            | ParseError::GraAlignment { file, .. }
            | ParseError::OrphanContinuation { file, .. } => file,
        }
    }

    /// Serialize for `--output json` style reporting.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({
                "kind": "unknown",
                "message": self.to_string(),
            })
        })
    }
}

fn format_tiers(tiers: &Tiers) -> String {
    tiers
        .iter()
        .map(|(marker, text)| format!("  {}: {}", marker, text))
        .collect::<Vec<_>>()
        .join("\n")
}
