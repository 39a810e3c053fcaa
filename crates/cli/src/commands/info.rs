use childes_reader::Reader;

use crate::{print_json, OutputFormat};

pub(crate) fn cmd_info(reader: &Reader, verbose_files: bool, output: OutputFormat) {
    let info = reader.info(verbose_files);
    match output {
        OutputFormat::Json => print_json(&info),
        OutputFormat::Text => println!("{}", info),
    }
}
