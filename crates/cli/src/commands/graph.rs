use childes_analyze::DependencyGraph;
use childes_reader::{ParticipantFilter, Reader};

use crate::{print_json, CliError, GraphFormat, OutputFormat};

pub(crate) fn cmd_graph(
    reader: &Reader,
    filter: &ParticipantFilter,
    index: usize,
    format: GraphFormat,
    output: OutputFormat,
) -> Result<(), CliError> {
    let utterances = reader.utterances(filter);
    let utterance = index
        .checked_sub(1)
        .and_then(|i| utterances.get(i))
        .ok_or(CliError::UtteranceOutOfRange {
            index,
            count: utterances.len(),
        })?;

    let graph = DependencyGraph::from_tokens(&utterance.tokens);
    let rendered = match format {
        GraphFormat::Conll => graph.to_conll(),
        GraphFormat::Tikz => graph.to_tikz(),
    };
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "participant": utterance.participant,
            "faulty": graph.is_faulty(),
            "graph": rendered,
        })),
        OutputFormat::Text => println!("{}", rendered),
    }
    Ok(())
}
