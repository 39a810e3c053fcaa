//! Reader -- an ordered collection of parsed CHAT files and the queries
//! over it.
//!
//! A Reader never exposes its files for mutation by position; files are
//! added and removed only at either end, or by concatenating readers.

use std::collections::{BTreeSet, VecDeque};
use std::ops::{Add, Range};

use childes_analyze::{
    ipsyn, merge_counters, mlum, mluw, ttr, word_frequencies, word_ngrams, Counter, MeasureReport,
};
use childes_core::{ChatFile, Header, Token, Utterance};
use serde::Serialize;
use time::Date;

use crate::error::ReaderError;
use crate::filter::ParticipantFilter;
use crate::options::filter_paths;

/// Speaker the measures default to: the target child.
pub const DEFAULT_PARTICIPANT: &str = "CHI";

/// How per-utterance results are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grouping {
    /// Keep one list per utterance.
    pub by_utterances: bool,
    /// Keep one list per file.
    pub by_files: bool,
}

impl Grouping {
    pub const FLAT: Grouping = Grouping {
        by_utterances: false,
        by_files: false,
    };
}

/// Results shaped by a [`Grouping`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Grouped<T> {
    /// Neither by files nor by utterances.
    Flat(Vec<T>),
    /// Either by files or by utterances.
    Nested(Vec<Vec<T>>),
    /// By files, then by utterances.
    Deep(Vec<Vec<Vec<T>>>),
}

impl<T> Grouped<T> {
    fn shape(per_file: Vec<Vec<Vec<T>>>, grouping: Grouping) -> Self {
        match (grouping.by_files, grouping.by_utterances) {
            (true, true) => Grouped::Deep(per_file),
            (true, false) => Grouped::Nested(
                per_file
                    .into_iter()
                    .map(|utterances| utterances.into_iter().flatten().collect())
                    .collect(),
            ),
            (false, true) => Grouped::Nested(per_file.into_iter().flatten().collect()),
            (false, false) => Grouped::Flat(per_file.into_iter().flatten().flatten().collect()),
        }
    }

    /// Every item in order, whatever the grouping.
    pub fn into_flat(self) -> Vec<T> {
        match self {
            Grouped::Flat(items) => items,
            Grouped::Nested(groups) => groups.into_iter().flatten().collect(),
            Grouped::Deep(groups) => groups.into_iter().flatten().flatten().collect(),
        }
    }
}

/// Age as written in CHAT, `years;months.days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Age {
    /// Parse `1;06.00`. Non-numeric parts read as 0; an empty string is no
    /// age at all.
    pub fn parse(text: &str) -> Option<Age> {
        if text.is_empty() {
            return None;
        }
        let number = |s: &str| -> u32 {
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse().unwrap_or(0)
            } else {
                0
            }
        };
        let (years, rest) = text.split_once(';').unwrap_or((text, ""));
        let (months, days) = rest.split_once('.').unwrap_or((rest, ""));
        Some(Age {
            years: number(years),
            months: number(months),
            days: number(days),
        })
    }

    /// Age in months, counting a month as 30 days.
    pub fn in_months(&self) -> f64 {
        f64::from(self.years * 12 + self.months) + f64::from(self.days) / 30.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reader {
    files: VecDeque<ChatFile>,
}

impl FromIterator<ChatFile> for Reader {
    fn from_iter<I: IntoIterator<Item = ChatFile>>(iter: I) -> Self {
        Reader {
            files: iter.into_iter().collect(),
        }
    }
}

impl Add for Reader {
    type Output = Reader;

    fn add(mut self, other: Reader) -> Reader {
        self.files.extend(other.files);
        self
    }
}

impl Add<&Reader> for &Reader {
    type Output = Reader;

    fn add(self, other: &Reader) -> Reader {
        self.files.iter().chain(&other.files).cloned().collect()
    }
}

impl Reader {
    pub fn new() -> Self {
        Reader::default()
    }

    // ── Files ────────────────────────────────────────────────────────

    pub fn n_files(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &ChatFile> {
        self.files.iter()
    }

    pub fn file_paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.file_path.as_str()).collect()
    }

    pub fn headers(&self) -> Vec<&Header> {
        self.files.iter().map(|f| &f.header).collect()
    }

    /// One single-file reader per file, in order.
    pub fn iter(&self) -> impl Iterator<Item = Reader> + '_ {
        self.files.iter().map(|f| std::iter::once(f.clone()).collect())
    }

    /// The file at `index` as its own reader.
    pub fn get(&self, index: usize) -> Option<Reader> {
        self.files
            .get(index)
            .map(|f| std::iter::once(f.clone()).collect())
    }

    /// Files in `range`, clamped to the files present.
    pub fn slice(&self, range: Range<usize>) -> Reader {
        let end = range.end.min(self.files.len());
        let start = range.start.min(end);
        self.files.range(start..end).cloned().collect()
    }

    pub(crate) fn into_files(self) -> impl Iterator<Item = ChatFile> {
        self.files.into_iter()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Add the files of `other` after this reader's files, duplicates
    /// included.
    pub fn append(&mut self, other: &Reader) {
        self.files.extend(other.files.iter().cloned());
    }

    /// Add the files of `other` before this reader's files, keeping their
    /// order.
    pub fn append_left(&mut self, other: &Reader) {
        for file in other.files.iter().rev() {
            self.files.push_front(file.clone());
        }
    }

    pub fn extend<'a>(&mut self, readers: impl IntoIterator<Item = &'a Reader>) {
        for reader in readers {
            self.append(reader);
        }
    }

    /// Add the files of `readers`, in order, before this reader's files.
    pub fn extend_left<'a>(&mut self, readers: impl IntoIterator<Item = &'a Reader>) {
        let incoming: Vec<&ChatFile> = readers.into_iter().flat_map(|r| r.files.iter()).collect();
        for file in incoming.into_iter().rev() {
            self.files.push_front(file.clone());
        }
    }

    /// Remove the last file and return it as a reader.
    pub fn pop(&mut self) -> Option<Reader> {
        self.files.pop_back().map(|f| std::iter::once(f).collect())
    }

    /// Remove the first file and return it as a reader.
    pub fn pop_left(&mut self) -> Option<Reader> {
        self.files.pop_front().map(|f| std::iter::once(f).collect())
    }

    /// A new reader with the files whose paths `match_pattern` finds and
    /// `exclude_pattern` does not. At least one pattern is required.
    pub fn filter(
        &self,
        match_pattern: Option<&str>,
        exclude_pattern: Option<&str>,
    ) -> Result<Reader, ReaderError> {
        if match_pattern.map_or(true, str::is_empty) && exclude_pattern.map_or(true, str::is_empty)
        {
            return Err(ReaderError::EmptyFilter);
        }
        let paths = self.files.iter().map(|f| f.file_path.clone()).collect();
        let kept: BTreeSet<String> = filter_paths(paths, match_pattern, exclude_pattern)?
            .into_iter()
            .collect();
        Ok(self
            .files
            .iter()
            .filter(|f| kept.contains(&f.file_path))
            .cloned()
            .collect())
    }

    // ── Header queries ───────────────────────────────────────────────

    /// Speakers who have at least one utterance, per file.
    pub fn participants_by_files(&self) -> Vec<BTreeSet<String>> {
        self.files
            .iter()
            .map(|f| f.utterances.iter().map(|u| u.participant.clone()).collect())
            .collect()
    }

    pub fn participants(&self) -> BTreeSet<String> {
        self.participants_by_files().into_iter().flatten().collect()
    }

    /// Languages per file, dominant first.
    pub fn languages_by_files(&self) -> Vec<Vec<String>> {
        self.files.iter().map(|f| f.header.languages.clone()).collect()
    }

    pub fn languages(&self) -> BTreeSet<String> {
        self.languages_by_files().into_iter().flatten().collect()
    }

    pub fn dates_of_recording_by_files(&self) -> Vec<BTreeSet<Date>> {
        self.files.iter().map(|f| f.header.dates.clone()).collect()
    }

    pub fn dates_of_recording(&self) -> BTreeSet<Date> {
        self.dates_of_recording_by_files()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Age of `participant` per file; `None` where the participant or its
    /// age is not declared.
    pub fn ages(&self, participant: &str) -> Vec<Option<Age>> {
        self.files
            .iter()
            .map(|f| {
                f.header
                    .participants
                    .get(participant)
                    .and_then(|p| Age::parse(&p.age))
            })
            .collect()
    }

    // ── Utterance queries ────────────────────────────────────────────

    fn filtered(&self, filter: &ParticipantFilter) -> Vec<Vec<&Utterance>> {
        self.files
            .iter()
            .map(|f| {
                f.utterances
                    .iter()
                    .filter(|u| filter.accepts(&u.participant))
                    .collect()
            })
            .collect()
    }

    pub fn utterances(&self, filter: &ParticipantFilter) -> Vec<&Utterance> {
        self.filtered(filter).into_iter().flatten().collect()
    }

    pub fn utterances_by_files(&self, filter: &ParticipantFilter) -> Vec<Vec<&Utterance>> {
        self.filtered(filter)
    }

    pub fn tokens(&self, filter: &ParticipantFilter, grouping: Grouping) -> Grouped<&Token> {
        let per_file = self
            .filtered(filter)
            .into_iter()
            .map(|us| us.into_iter().map(|u| u.tokens.iter().collect()).collect())
            .collect();
        Grouped::shape(per_file, grouping)
    }

    /// Surface words, without clitic placeholders.
    pub fn words(&self, filter: &ParticipantFilter, grouping: Grouping) -> Grouped<&str> {
        let per_file = self
            .filtered(filter)
            .into_iter()
            .map(|us| us.into_iter().map(|u| u.words().collect()).collect())
            .collect();
        Grouped::shape(per_file, grouping)
    }

    /// The first `n` utterances across all files.
    pub fn head(&self, n: usize, filter: &ParticipantFilter) -> Vec<&Utterance> {
        self.utterances(filter).into_iter().take(n).collect()
    }

    /// The last `n` utterances across all files.
    pub fn tail(&self, n: usize, filter: &ParticipantFilter) -> Vec<&Utterance> {
        let all = self.utterances(filter);
        let skip = all.len().saturating_sub(n);
        all.into_iter().skip(skip).collect()
    }

    // ── Counts ───────────────────────────────────────────────────────

    pub fn word_ngrams_by_files(
        &self,
        n: usize,
        keep_case: bool,
        filter: &ParticipantFilter,
    ) -> Result<Vec<Counter<Vec<String>>>, ReaderError> {
        if n == 0 {
            return Err(ReaderError::InvalidNgram(n));
        }
        Ok(self
            .filtered(filter)
            .into_iter()
            .map(|us| word_ngrams(us.iter().map(|u| u.words()), n, keep_case))
            .collect())
    }

    /// N-gram counts over all files, most common first.
    pub fn word_ngrams(
        &self,
        n: usize,
        keep_case: bool,
        filter: &ParticipantFilter,
    ) -> Result<Counter<Vec<String>>, ReaderError> {
        Ok(merge_counters(&self.word_ngrams_by_files(n, keep_case, filter)?))
    }

    pub fn word_frequencies_by_files(
        &self,
        keep_case: bool,
        filter: &ParticipantFilter,
    ) -> Vec<Counter<String>> {
        self.filtered(filter)
            .into_iter()
            .map(|us| word_frequencies(us.iter().map(|u| u.words()), keep_case))
            .collect()
    }

    pub fn word_frequencies(&self, keep_case: bool, filter: &ParticipantFilter) -> Counter<String> {
        merge_counters(&self.word_frequencies_by_files(keep_case, filter))
    }

    // ── Measures, one value per file ─────────────────────────────────

    pub fn mlum(&self, participant: &str, exclude_switch: bool) -> Vec<f64> {
        self.filtered(&participant.into())
            .into_iter()
            .map(|us| mlum(us, exclude_switch))
            .collect()
    }

    /// Same as [`Reader::mlum`].
    pub fn mlu(&self, participant: &str, exclude_switch: bool) -> Vec<f64> {
        self.mlum(participant, exclude_switch)
    }

    pub fn mluw(&self, participant: &str, exclude_switch: bool) -> Vec<f64> {
        self.filtered(&participant.into())
            .into_iter()
            .map(|us| mluw(us, exclude_switch))
            .collect()
    }

    pub fn ttr(&self, keep_case: bool, participant: &str) -> Vec<f64> {
        self.word_frequencies_by_files(keep_case, &participant.into())
            .iter()
            .map(ttr)
            .collect()
    }

    pub fn ipsyn(&self, participant: &str) -> Vec<u32> {
        self.filtered(&participant.into())
            .into_iter()
            .map(ipsyn)
            .collect()
    }

    /// Every measure per file, for one participant.
    pub fn measure_reports(&self, participant: &str, exclude_switch: bool) -> Vec<MeasureReport> {
        self.files
            .iter()
            .map(|f| MeasureReport::new(&f.file_path, participant, &f.utterances, exclude_switch))
            .collect()
    }

    // ── Summary ──────────────────────────────────────────────────────

    /// File, utterance and word counts, with per-file details for the
    /// first few files (all of them when `verbose`).
    pub fn info(&self, verbose: bool) -> Info {
        Info::of(self, verbose)
    }
}

/// Files shown by [`Reader::info`] unless verbose.
const INFO_FILES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub utterances: usize,
    pub words: usize,
    /// `None` for in-memory text with a generated id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Info {
    pub files: usize,
    pub utterances: usize,
    pub words: usize,
    /// Empty for a single file.
    pub details: Vec<FileInfo>,
    /// More files exist than are listed in `details`.
    pub truncated: bool,
}

impl Info {
    fn of(reader: &Reader, verbose: bool) -> Info {
        // Token counts, as the summary has always reported them.
        let words_in = |f: &ChatFile| f.utterances.iter().map(|u| u.tokens.len()).sum::<usize>();

        let mut details: Vec<FileInfo> = if reader.n_files() < 2 {
            Vec::new()
        } else {
            reader
                .files
                .iter()
                .map(|f| FileInfo {
                    utterances: f.utterances.len(),
                    words: words_in(f),
                    file_path: (!is_generated_id(&f.file_path)).then(|| f.file_path.clone()),
                })
                .collect()
        };
        let truncated = !verbose && details.len() > INFO_FILES;
        if truncated {
            details.truncate(INFO_FILES);
        }

        Info {
            files: reader.n_files(),
            utterances: reader.files.iter().map(|f| f.utterances.len()).sum(),
            words: reader.files.iter().map(words_in).sum(),
            details,
            truncated,
        }
    }
}

impl std::fmt::Display for Info {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} files", self.files)?;
        writeln!(f, "{} utterances", self.utterances)?;
        write!(f, "{} words", self.words)?;
        if self.details.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "{:<6}{:>17}{:>12}  File Path", "", "Utterance Count", "Word Count")?;
        for (i, d) in self.details.iter().enumerate() {
            let index = format!("#{}", i + 1);
            write!(f, "{:<6}{:>17}{:>12}", index, d.utterances, d.words)?;
            if let Some(path) = &d.file_path {
                write!(f, "  {}", path)?;
            }
            writeln!(f)?;
        }
        if self.truncated {
            write!(f, "...\n(use verbose output for all the files)")?;
        }
        Ok(())
    }
}

/// Ids given to in-memory text are random version-4 UUIDs.
pub(crate) fn is_generated_id(file_path: &str) -> bool {
    uuid::Uuid::parse_str(file_path)
        .map(|id| id.get_version_num() == 4 && id.hyphenated().to_string() == file_path)
        .unwrap_or(false)
}
