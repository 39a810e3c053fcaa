use childes_reader::{ParticipantFilter, Reader};
use serde::Serialize;

use crate::{print_json, CliError, OutputFormat};

#[derive(Serialize)]
struct Entry {
    words: String,
    count: usize,
}

pub(crate) fn cmd_freq(
    reader: &Reader,
    filter: &ParticipantFilter,
    ngram: usize,
    keep_case: bool,
    top: Option<usize>,
    output: OutputFormat,
) -> Result<(), CliError> {
    let counts = reader.word_ngrams(ngram, keep_case, filter)?;
    let entries: Vec<Entry> = counts
        .into_iter()
        .take(top.unwrap_or(usize::MAX))
        .map(|(gram, count)| Entry {
            words: gram.join(" "),
            count,
        })
        .collect();

    match output {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Text => {
            for entry in &entries {
                println!("{:>7}  {}", entry.count, entry.words);
            }
        }
    }
    Ok(())
}
