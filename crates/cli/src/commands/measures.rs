use childes_reader::Reader;

use crate::{print_json, OutputFormat};

pub(crate) fn cmd_measures(
    reader: &Reader,
    participant: &str,
    exclude_switch: bool,
    output: OutputFormat,
) {
    let reports = reader.measure_reports(participant, exclude_switch);
    match output {
        OutputFormat::Json => print_json(&reports),
        OutputFormat::Text => {
            println!(
                "{:>10} {:>7} {:>7} {:>7} {:>6}  File Path",
                "Utterances", "MLUm", "MLUw", "TTR", "IPSyn"
            );
            for r in &reports {
                println!(
                    "{:>10} {:>7.3} {:>7.3} {:>7.3} {:>6}  {}",
                    r.utterances, r.mlum, r.mluw, r.ttr, r.ipsyn, r.file_path
                );
            }
        }
    }
}
