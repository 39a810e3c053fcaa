//! Stage 4: utterance and word cleaning.
//!
//! The main tier of a CHAT utterance interleaves the spoken words with
//! editorial markup: explanations, retracings, error codes, pauses, overlap
//! markers and so on. [`clean_utterance`] rewrites a raw main tier into a
//! whitespace-separated string whose items line up one-to-one with the
//! non-clitic items of `%mor`. [`clean_word`] then normalizes each item.
//!
//! The cleaner runs five stages in order, collapsing runs of whitespace
//! after each one:
//!
//! 1. drop scoped annotations and stray markers,
//! 2. pad brackets, quotes, commas and question marks with spaces,
//! 3. resolve replacements (`[: x]`, `[:: x]`) and retracings (`[/]` etc),
//! 4. remove curly quotes,
//! 5. keep or drop each remaining item by exact form, prefix and suffix.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid cleaner regex"))
        .collect()
}

// ── Stage 1 ──────────────────────────────────────────────────────────

static DROP_SCOPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\[= [^\[]+?\]",
        r"\[x \d+?\]",
        r"\[\+ [^\[]+?\]",
        r"\[\* [^\[]+?\]",
        r"\[=\? [^\[]+?\]",
        r"\[=! [^\[]+?\]",
        r"\[% [^\[]+?\]",
        r"\[- [^\[]+?\]",
        r"\[\^ [^\[]+?\]",
        r"\x15[^\x15]+?\x15",
        r"\[<\d?\]",
        r"\[>\d?\]",
        r"\((\d+?:)?\d+?\.?\d*?\)",
        r"\[%act: [^\[]+?\]",
    ])
});

/// Literal rewrites, applied in order. The later entries pad brackets,
/// quotes and commas; the `+ <` and `+ ,` entries undo the padding inside
/// the `+<` and `+,` linkers.
const LITERAL_REWRITES: &[(&str, &str)] = &[
    ("[?]", " "),
    ("[!]", " "),
    ("[!!]", " "),
    ("[^c]", " "),
    ("\u{2039}", " "),
    ("\u{203a}", " "),
    ("\u{2308}", ""),
    ("\u{2309}", ""),
    ("\u{230a}", ""),
    ("\u{230b}", ""),
    ("[*] [/", " [/"),
    ("] [*]", "] "),
    ("[*]", " "),
    ("[//] [//]", "[//]"),
    ("[/] [//]", "[//]"),
    ("[/?] [/]", "[//]"),
    ("[//] [/]", "[/]"),
    ("<", " < "),
    ("+ <", "+<"),
    (">", " > "),
    ("[", " ["),
    ("]", "] "),
    ("\u{201c}", " \u{201c} "),
    ("\u{201d}", " \u{201d} "),
    (",", " , "),
    ("+ ,", "+,"),
];

// ── Stage 2 ──────────────────────────────────────────────────────────

static SPACING_REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let patterns = compile(&[r"([^\[\./!])\?", r"\(\.\)", r"([a-z])\.\z"]);
    patterns.into_iter().zip(["$1 ? ", " (.) ", "$1 ."]).collect()
});

// ── Stage 3 ──────────────────────────────────────────────────────────

/// `X [:: Y]` keeps X; `X [: Y]` keeps Y. Angle-bracketed scopes first.
static REPLACEMENTS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let patterns = compile(&[
        r"(<[^>]+?>) \[:: ([^\]]+?)\]",
        r"(\S+?) \[:: ([^\]]+?)\]",
        r"(<[^>]+?>) \[: ([^\]]+?)\]",
        r"(\S+?) \[: ([^\]]+?)\]",
    ]);
    patterns
        .into_iter()
        .zip(["$1", "$1", "<$2>", "<$2>"])
        .collect()
});

/// Retracing markers closing an angle-bracketed scope.
const SCOPED_RETRACINGS: [&str; 5] = ["> [///]", "> [//]", "> [/]", "> [/?]", "> [/-]"];

/// Retracing markers applying to the single item before them.
static SINGLE_RETRACINGS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\S+? \[///\]",
        r"\S+? \[//\]",
        r"\S+? \[/\]",
        r"\S+? \[/\?\]",
        r"\S+? \[/-\]",
    ])
});

// ── Stage 4 ──────────────────────────────────────────────────────────

const QUOTES: [char; 2] = ['\u{201c}', '\u{201d}'];

// ── Stage 5 ──────────────────────────────────────────────────────────

const DROP_WORDS: &[&str] = &[
    "",
    "0",
    "++",
    "+<",
    "+^",
    "(.)",
    "(..)",
    "(...)",
    ":",
    ";",
    ";;",
    "<",
    ">",
    "xx",
    "yy",
    "xxx",
    "yyy",
    "www",
    "www:",
    "xxx:",
    "xxx;",
    "xxx;;",
    "xxx\u{2192}",
    "xxx\u{2191}",
    "xxx@si",
    "yyy:",
    "\u{2192}",
];

const DROP_PREFIXES: &[&str] = &["[?", "[/", "[<", "[>", "[:", "[!", "[*", "+\"", "+,", "<&", "&"];

const DROP_SUFFIXES: &[&str] = &["\u{21ab}xxx"];

/// Linkers that would otherwise fall under a drop prefix.
const KEEP_PREFIXES: &[&str] = &["+\"/", "+,/", "+\"."];

/// Collapse every run of whitespace into one space and trim both ends.
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean a raw main tier. See the module docs for the stages.
pub fn clean_utterance(raw: &str) -> String {
    let mut utterance = raw.to_string();

    // Stage 1: scoped annotations, then literal markers and padding.
    for regex in DROP_SCOPES.iter() {
        utterance = regex.replace_all(&utterance, "").into_owned();
    }
    for (from, to) in LITERAL_REWRITES {
        utterance = utterance.replace(from, to);
    }
    utterance = collapse(&utterance);

    // Stage 2: spacing around question marks, short pauses, final periods.
    for (regex, replacement) in SPACING_REWRITES.iter() {
        utterance = regex.replace_all(&utterance, *replacement).into_owned();
    }
    utterance = collapse(&utterance);

    // Stage 3: replacements, then retracings.
    for (regex, replacement) in REPLACEMENTS.iter() {
        utterance = rewrite_to_fixpoint(utterance, regex, replacement);
        utterance = collapse(&utterance);
    }
    utterance = drop_scoped_retracings(utterance);
    for regex in SINGLE_RETRACINGS.iter() {
        utterance = regex.replace_all(&utterance, "").into_owned();
        utterance = collapse(&utterance);
    }

    // Stage 4: curly quotes.
    utterance = utterance.replace(QUOTES, "");
    utterance = collapse(&utterance);

    // Stage 5: item by item.
    utterance
        .split_whitespace()
        .filter_map(keep_item)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Apply `regex` until it no longer matches. Every rewrite consumes one
/// bracketed annotation, so the number of rounds is bounded by the length.
fn rewrite_to_fixpoint(mut utterance: String, regex: &Regex, replacement: &str) -> String {
    let mut budget = utterance.len();
    while budget > 0 && regex.is_match(&utterance) {
        utterance = regex.replace_all(&utterance, replacement).into_owned();
        budget -= 1;
    }
    utterance
}

/// Remove `< ... > [/]`-style scopes together with their marker, honouring
/// nested angle brackets. Runs until nothing changes.
fn drop_scoped_retracings(mut utterance: String) -> String {
    loop {
        let before = utterance.clone();
        for marker in SCOPED_RETRACINGS {
            utterance = drop_angle_scope(&utterance, marker);
        }
        utterance = collapse(&utterance);
        if utterance == before {
            return utterance;
        }
    }
}

fn drop_angle_scope(utterance: &str, marker: &str) -> String {
    let mut from = 0;
    while let Some(offset) = utterance[from..].find(marker) {
        let close = from + offset;
        if let Some(open) = matching_open_angle(&utterance[..close]) {
            return collapse(&format!(
                "{} {}",
                &utterance[..open],
                &utterance[close + marker.len()..]
            ));
        }
        tracing::warn!(utterance, marker, "retracing scope has no opening angle bracket");
        from = close + marker.len();
    }
    utterance.to_string()
}

/// Index of the `<` that opens the scope ending just before `prefix` ends.
fn matching_open_angle(prefix: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in prefix.char_indices().rev() {
        match c {
            '>' => depth += 1,
            '<' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn keep_item(item: &str) -> Option<&str> {
    let item = item.strip_prefix('<').unwrap_or(item);
    let item = item.strip_suffix('>').unwrap_or(item);
    let item = item.strip_suffix(']').unwrap_or(item);

    if KEEP_PREFIXES.iter().any(|p| item.starts_with(p)) {
        return Some(item);
    }
    let dropped = DROP_WORDS.contains(&item)
        || DROP_PREFIXES.iter().any(|p| item.starts_with(p))
        || DROP_SUFFIXES.iter().any(|s| item.ends_with(s));
    (!dropped).then_some(item)
}

/// Normalize one surface form: remove `( ) : ; +`, cut at the first `@`
/// (language and special-form markers) and strip one leading `&`.
pub fn clean_word(word: &str) -> String {
    let mut cleaned: String = word
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ':' | ';' | '+'))
        .collect();
    if let Some(at) = cleaned.find('@') {
        cleaned.truncate(at);
    }
    match cleaned.strip_prefix('&') {
        Some(rest) => rest.to_string(),
        None => cleaned,
    }
}
