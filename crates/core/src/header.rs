//! Stage 2: header parsing.
//!
//! Only `@` lines are considered. `@Begin` and `@End` carry no data.
//! Malformed fields are skipped rather than reported.

use once_cell::sync::Lazy;
use regex::Regex;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::model::{Header, Participant};

static HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A@([^@:]+)(?::\s+(\S[\S\s]*))?\z").expect("valid header regex"));

/// Accepted spellings of a calendar date, tried in order. CHAT itself uses
/// the first one (`15-OCT-1962`).
const DATE_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[day padding:none]-[month repr:short case_sensitive:false]-[year]"),
    format_description!("[day padding:none]-[month repr:long case_sensitive:false]-[year]"),
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[day padding:none] [month repr:short case_sensitive:false] [year]"),
    format_description!("[day padding:none] [month repr:long case_sensitive:false] [year]"),
    format_description!("[month repr:short case_sensitive:false] [day padding:none], [year]"),
    format_description!("[month repr:long case_sensitive:false] [day padding:none], [year]"),
    format_description!("[month padding:none]/[day padding:none]/[year]"),
];

/// Field order of an `@ID` record once the speaker code is removed.
const ID_FIELDS: usize = 9;

/// Parse a calendar date written in any of the accepted spellings.
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(text, format).ok())
}

/// Build the header from reconstructed lines.
pub fn parse_header(lines: &[String]) -> Header {
    let mut header = Header::default();

    for line in lines {
        let Some(caps) = HEADER_LINE.captures(line) else {
            continue;
        };
        if line.starts_with("@Begin") || line.starts_with("@End") {
            continue;
        }
        let key = &caps[1];
        let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

        match key {
            "Participants" => add_participants(&mut header, value),
            "ID" => add_id(&mut header, value),
            "Date" => match parse_date(value) {
                Some(date) => {
                    header.dates.insert(date);
                }
                None => tracing::warn!(value, "skipping unparseable @Date"),
            },
            "Languages" => {
                header.languages = value
                    .split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_owned)
                    .collect();
            }
            _ => {
                if let Some(code) = key.strip_prefix("Birth of ") {
                    match parse_date(value) {
                        Some(date) => {
                            header
                                .participants
                                .entry(code.trim().to_string())
                                .or_default()
                                .dob = Some(date);
                        }
                        None => tracing::warn!(value, code, "skipping unparseable birth date"),
                    }
                } else {
                    header.fields.insert(key.to_string(), value.to_string());
                }
            }
        }
    }

    if header_has_content(&header) {
        header
    } else {
        Header::default()
    }
}

fn header_has_content(header: &Header) -> bool {
    !header.languages.is_empty()
        || !header.participants.is_empty()
        || !header.dates.is_empty()
        || header.fields.values().any(|v| !v.is_empty())
}

/// `CODE NAME ROLE, CODE NAME ROLE, ...`
fn add_participants(header: &mut Header, value: &str) {
    for element in value.split(',') {
        let element = element.trim();
        let (code, rest) = element.split_once(' ').unwrap_or((element, ""));
        if code.is_empty() {
            continue;
        }
        let (name, role) = rest.split_once(' ').unwrap_or((rest, ""));
        let record = header.participants.entry(code.to_string()).or_default();
        record.name = name.to_string();
        record.role = role.to_string();
    }
}

/// `lang|corpus|code|age|sex|group|ses|role|education|custom|`
fn add_id(header: &mut Header, value: &str) {
    let mut fields: Vec<&str> = value.split('|').collect();
    // The record ends with a `|`, leaving one empty field behind.
    fields.pop();
    if fields.len() < 3 {
        tracing::warn!(value, "skipping @ID with too few fields");
        return;
    }
    let code = fields.remove(2).trim().to_string();
    let record = header.participants.entry(code).or_default();
    for (index, field) in fields.into_iter().take(ID_FIELDS).enumerate() {
        let slot = match index {
            0 => &mut record.language,
            1 => &mut record.corpus,
            2 => &mut record.age,
            3 => &mut record.sex,
            4 => &mut record.group,
            5 => &mut record.ses,
            6 => &mut record.role,
            7 => &mut record.education,
            _ => &mut record.custom,
        };
        *slot = field.to_string();
    }
}

/// Add a blank record for every speaker that is not declared in the header.
pub(crate) fn add_undeclared_speakers<'a>(
    header: &mut Header,
    speakers: impl IntoIterator<Item = &'a str>,
) {
    for code in speakers {
        if !header.participants.contains_key(code) {
            header
                .participants
                .insert(code.to_string(), Participant::default());
        }
    }
}
