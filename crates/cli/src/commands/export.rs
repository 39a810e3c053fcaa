use std::path::Path;

use childes_reader::Reader;

use crate::{print_json, CliError, OutputFormat};

pub(crate) fn cmd_export(
    reader: &Reader,
    path: &Path,
    is_dir: bool,
    tabular: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    reader.to_chat(path, is_dir, None, tabular)?;
    if !quiet {
        match output {
            OutputFormat::Json => print_json(&serde_json::json!({
                "files": reader.n_files(),
                "path": path.display().to_string(),
            })),
            OutputFormat::Text => {
                println!("wrote {} file(s) to {}", reader.n_files(), path.display())
            }
        }
    }
    Ok(())
}
