use std::path::Path;

use childes_reader::Cache;

use crate::{print_json, CliError, OutputFormat};

pub(crate) fn cmd_cache_list(dir: Option<&Path>, output: OutputFormat) -> Result<(), CliError> {
    let urls = Cache::resolve(dir)?.cached_urls()?;
    match output {
        OutputFormat::Json => print_json(&urls),
        OutputFormat::Text => {
            for url in &urls {
                println!("{}", url);
            }
        }
    }
    Ok(())
}

/// Remove `url` from the cache, or everything when `url` is `None`.
pub(crate) fn cmd_cache_remove(
    dir: Option<&Path>,
    url: Option<&str>,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let cache = Cache::resolve(dir)?;
    cache.remove(url)?;
    if !quiet {
        match output {
            OutputFormat::Json => print_json(&serde_json::json!({ "removed": url.unwrap_or("all") })),
            OutputFormat::Text => match url {
                Some(url) => println!("removed {}", url),
                None => println!("removed all cached data"),
            },
        }
    }
    Ok(())
}
