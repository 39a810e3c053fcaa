//! CHAT text output.
//!
//! Only parsed state is written back, so the output is a normalized
//! transcript rather than a byte copy of the source: a header field seen
//! several times keeps its last value, only the earliest `@Date` is kept,
//! and in tabular mode the main tier shows the cleaned words.

use time::macros::format_description;

use crate::model::{ChatFile, Header, Token, Utterance, POSTCLITIC, PRECLITIC};

/// Header keys written before all others, in this order.
const HEADER_FIRST: [&str; 6] = ["UTF8", "PID", "Languages", "Participants", "Date", "Types"];

/// Render a whole file.
pub fn to_chat_string(file: &ChatFile, tabular: bool) -> String {
    let mut out = header_to_chat(&file.header);
    for utterance in &file.utterances {
        out.push_str(&utterance_to_chat(utterance, tabular));
    }
    out
}

/// Render the header lines of a file.
pub fn header_to_chat(header: &Header) -> String {
    let mut out = String::new();

    for key in HEADER_FIRST {
        match key {
            "Languages" if !header.languages.is_empty() => {
                out.push_str(&format!("@Languages:\t{}\n", header.languages.join(" , ")));
            }
            "Participants" => write_participants(&mut out, header),
            "Date" => {
                if let Some(date) = header.dates.iter().next() {
                    let format = format_description!("[day]-[month repr:short]-[year]");
                    if let Ok(text) = date.format(&format) {
                        out.push_str(&format!("@Date:\t{}\n", text.to_uppercase()));
                    }
                }
            }
            _ => {
                if let Some(value) = header.get(key) {
                    write_field(&mut out, key, value);
                }
            }
        }
    }

    for (key, value) in &header.fields {
        if !HEADER_FIRST.contains(&key.as_str()) {
            write_field(&mut out, key, value);
        }
    }

    out
}

fn write_field(out: &mut String, key: &str, value: &str) {
    if value.is_empty() {
        out.push_str(&format!("@{}\n", key));
    } else {
        out.push_str(&format!("@{}:\t{}\n", key, value));
    }
}

/// Participants and their `@ID` lines. Records created only because a
/// speaker talked without being declared are not written.
fn write_participants(out: &mut String, header: &Header) {
    let declared: Vec<_> = header
        .participants
        .iter()
        .filter(|(_, p)| !p.is_blank())
        .collect();
    if declared.is_empty() {
        return;
    }

    let parts: Vec<String> = declared
        .iter()
        .map(|(code, p)| format!("{} {} {}", code, p.name, p.role).trim_end().to_string())
        .collect();
    out.push_str(&format!("@Participants:\t{}\n", parts.join(" , ")));

    for (code, p) in declared {
        out.push_str(&format!(
            "@ID:\t{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|\n",
            p.language, p.corpus, code, p.age, p.sex, p.group, p.ses, p.role, p.education, p.custom
        ));
    }
}

/// Render one utterance: main tier, `%mor`, `%gra`, then every other tier
/// in its original order.
pub fn utterance_to_chat(utterance: &Utterance, tabular: bool) -> String {
    let aligned: Vec<&str> = ["%mor", "%gra"]
        .into_iter()
        .filter(|key| utterance.has_tier(key))
        .collect();

    let mut out = String::new();
    if tabular && !aligned.is_empty() {
        out.push_str(&tabulate(utterance, &aligned));
    } else {
        let main = utterance
            .tiers
            .get(&utterance.participant)
            .map(String::as_str)
            .unwrap_or("");
        out.push_str(&format!("*{}:\t{}\n", utterance.participant, main));
        for key in &aligned {
            out.push_str(&format!("{}:\t{}\n", key, utterance.tiers[*key]));
        }
    }

    for (key, value) in &utterance.tiers {
        if key == &utterance.participant || key == "%mor" || key == "%gra" {
            continue;
        }
        out.push_str(&format!("{}:\t{}\n", key, value));
    }

    out
}

/// One table column: a surface word and what `%mor`/`%gra` say about it.
struct Column {
    word: String,
    mor: String,
    gra: String,
}

impl Column {
    fn of(token: &Token) -> Self {
        Column {
            word: token.word.clone(),
            mor: token.to_mor_item(),
            gra: token.to_gra_item(),
        }
    }
}

/// Lay the main, `%mor` and `%gra` tiers out as left-aligned columns.
///
/// Clitic slots are folded into their host word's column: `pre$host`,
/// `host~post` on `%mor`, space-separated items on `%gra`.
fn tabulate(utterance: &Utterance, aligned: &[&str]) -> String {
    let mut columns: Vec<Column> = Vec::new();
    let mut pending: Vec<&Token> = Vec::new();

    for token in &utterance.tokens {
        if token.word == PRECLITIC {
            pending.push(token);
            continue;
        }
        if token.word == POSTCLITIC {
            if let Some(host) = columns.last_mut() {
                host.mor = format!("{}~{}", host.mor, token.to_mor_item());
                host.gra = format!("{} {}", host.gra, token.to_gra_item());
                continue;
            }
        }
        let mut column = Column::of(token);
        if !pending.is_empty() {
            let mut mor: Vec<String> = pending.iter().map(|t| t.to_mor_item()).collect();
            let mut gra: Vec<String> = pending.iter().map(|t| t.to_gra_item()).collect();
            mor.push(column.mor);
            gra.push(column.gra);
            column.mor = mor.join("$");
            column.gra = gra.join(" ");
            pending.clear();
        }
        columns.push(column);
    }
    // A preclitic with no host keeps a column of its own.
    columns.extend(pending.into_iter().map(Column::of));

    let mut rows: Vec<Vec<String>> = vec![std::iter::once(format!("*{}:", utterance.participant))
        .chain(columns.iter().map(|c| c.word.clone()))
        .collect()];
    for key in aligned {
        let cells = columns.iter().map(|c| {
            if *key == "%mor" {
                c.mor.clone()
            } else {
                c.gra.clone()
            }
        });
        rows.push(std::iter::once(format!("{}:", key)).chain(cells).collect());
    }

    let widths: Vec<usize> = (0..=columns.len())
        .map(|i| rows.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
