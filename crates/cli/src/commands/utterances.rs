use childes_core::utterance_to_chat;
use childes_reader::{Grouped, Grouping, ParticipantFilter, Reader};

use crate::{print_json, OutputFormat};

pub(crate) fn cmd_utterances(
    reader: &Reader,
    filter: &ParticipantFilter,
    limit: Option<usize>,
    output: OutputFormat,
) {
    let utterances = match limit {
        Some(n) => reader.head(n, filter),
        None => reader.utterances(filter),
    };
    match output {
        OutputFormat::Json => print_json(&utterances),
        OutputFormat::Text => {
            for utterance in utterances {
                print!("{}", utterance_to_chat(utterance, false));
            }
        }
    }
}

pub(crate) fn cmd_words(
    reader: &Reader,
    filter: &ParticipantFilter,
    by_utterances: bool,
    output: OutputFormat,
) {
    let grouping = Grouping {
        by_utterances,
        by_files: false,
    };
    let words = reader.words(filter, grouping);
    match output {
        OutputFormat::Json => print_json(&words),
        OutputFormat::Text => match words {
            Grouped::Nested(utterances) => {
                for words in utterances {
                    println!("{}", words.join(" "));
                }
            }
            flat => {
                for word in flat.into_flat() {
                    println!("{}", word);
                }
            }
        },
    }
}
