//! Stage 1: logical line reconstruction.
//!
//! CHAT wraps long tiers onto indented continuation lines. Every logical
//! line starts with `@` (header), `*` (main tier) or `%` (dependent tier);
//! anything else is glued onto the line before it.

use crate::error::ParseError;

const LINE_INDICATORS: [char; 3] = ['@', '*', '%'];

/// Legacy tier names rewritten at read time.
const LEGACY_TIERS: [(&str, &str); 2] = [("%xpho", "%pho"), ("%xmod", "%mod")];

/// Join continuation lines and drop blank ones.
///
/// Each physical line is trimmed before inspection, so a continuation is
/// appended after exactly one space.
pub fn reconstruct_lines(text: &str, file: &str) -> Result<Vec<String>, ParseError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut lines: Vec<String> = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line = rename_legacy_tier(line);

        if line.starts_with(LINE_INDICATORS) {
            lines.push(line);
            continue;
        }

        match lines.last_mut() {
            Some(previous) => {
                previous.push(' ');
                previous.push_str(&line);
            }
            None => {
                return Err(ParseError::OrphanContinuation {
                    file: file.to_string(),
                    line: number + 1,
                    text: line,
                })
            }
        }
    }

    Ok(lines)
}

fn rename_legacy_tier(line: &str) -> String {
    for (legacy, current) in LEGACY_TIERS {
        if let Some(rest) = line.strip_prefix(legacy) {
            if rest.starts_with(':') {
                return format!("{}{}", current, rest);
            }
        }
    }
    line.to_string()
}
