mod commands;

use std::path::{Path, PathBuf};
use std::process;

use childes_reader::{read_chat, ParticipantFilter, ReadOptions, Reader, ReaderError};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Rendering of a dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum GraphFormat {
    Conll,
    Tikz,
}

/// Read CHAT transcripts and compute developmental measures.
#[derive(Parser)]
#[command(
    name = "childes",
    version,
    about = "Read CHAT transcripts and compute developmental measures"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Cache directory for downloaded corpora (default: ~/.pylangacq)
    #[arg(long, global = true, env = "CHILDES_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the transcripts come from and which files to keep.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// A .cha file, a directory, a .zip file, or a URL to a .zip file
    source: String,

    /// Keep only files whose path matches this regex
    #[arg(long)]
    match_path: Option<String>,

    /// Drop files whose path matches this regex
    #[arg(long)]
    exclude_path: Option<String>,

    /// Download a remote archive again even if it is cached
    #[arg(long)]
    no_cache: bool,

    /// Read and parse files on a single thread
    #[arg(long)]
    sequential: bool,
}

/// Which speakers to look at.
#[derive(Args)]
pub(crate) struct SpeakerArgs {
    /// Only these participant codes (repeatable)
    #[arg(long = "participant", short = 'p')]
    participants: Vec<String>,

    /// Every participant except these codes (repeatable)
    #[arg(long)]
    exclude: Vec<String>,
}

impl SpeakerArgs {
    pub(crate) fn filter(&self) -> Result<ParticipantFilter, ReaderError> {
        ParticipantFilter::new(Some(self.participants.clone()), Some(self.exclude.clone()))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize files, utterances and words
    Info {
        #[command(flatten)]
        source: SourceArgs,
        /// List every file, not just the first five
        #[arg(long)]
        verbose_files: bool,
    },

    /// Print utterances with their tiers
    Utterances {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        speakers: SpeakerArgs,
        /// Print at most this many utterances
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print words, without clitic placeholders
    Words {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        speakers: SpeakerArgs,
        /// One line per utterance
        #[arg(long)]
        by_utterances: bool,
    },

    /// Count words or word n-grams, most frequent first
    Freq {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        speakers: SpeakerArgs,
        /// N-gram length
        #[arg(long, default_value = "1")]
        ngram: usize,
        /// Fold words to lowercase before counting
        #[arg(long)]
        ignore_case: bool,
        /// Show only the most frequent entries
        #[arg(long)]
        top: Option<usize>,
    },

    /// MLUm, MLUw, TTR and IPSyn per file
    Measures {
        #[command(flatten)]
        source: SourceArgs,
        /// Participant to measure
        #[arg(long, default_value = childes_reader::DEFAULT_PARTICIPANT)]
        participant: String,
        /// Do not count code-switched words (@s)
        #[arg(long)]
        exclude_switch: bool,
    },

    /// Print the dependency graph of one utterance
    Graph {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        speakers: SpeakerArgs,
        /// 1-based position of the utterance among the selected ones
        #[arg(long)]
        utterance: usize,
        /// Rendering (conll or tikz)
        #[arg(long, default_value = "conll", value_enum)]
        format: GraphFormat,
    },

    /// Write the transcripts back out as CHAT
    Export {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file, or directory with --dir
        path: PathBuf,
        /// Write one file per transcript into the directory PATH
        #[arg(long)]
        dir: bool,
        /// Keep the main tier as transcribed instead of aligning tiers in columns
        #[arg(long)]
        no_tabular: bool,
    },

    /// Manage the cache of downloaded corpora
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// List the cached URLs
    List,
    /// Remove one cached URL, or everything with --all
    Remove {
        /// URL to remove
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        url: Option<String>,
        /// Remove every cached corpus
        #[arg(long)]
        all: bool,
    },
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error("utterance {index} is out of range: {count} utterance(s) selected")]
    UtteranceOutOfRange { index: usize, count: usize },
}

impl CliError {
    fn to_json_value(&self) -> serde_json::Value {
        match self {
            CliError::Reader(e) => e.to_json_value(),
            CliError::UtteranceOutOfRange { .. } => serde_json::json!({
                "kind": "utterance_out_of_range",
                "message": self.to_string(),
            }),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output;
    let quiet = cli.quiet;
    if let Err(e) = run(cli) {
        report_error(&e, output, quiet);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let output = cli.output;
    let cache_dir = cli.cache_dir.as_deref();

    match cli.command {
        Commands::Info {
            source,
            verbose_files,
        } => {
            let reader = load(&source, cache_dir)?;
            commands::info::cmd_info(&reader, verbose_files, output);
        }
        Commands::Utterances {
            source,
            speakers,
            limit,
        } => {
            let filter = speakers.filter()?;
            let reader = load(&source, cache_dir)?;
            commands::utterances::cmd_utterances(&reader, &filter, limit, output);
        }
        Commands::Words {
            source,
            speakers,
            by_utterances,
        } => {
            let filter = speakers.filter()?;
            let reader = load(&source, cache_dir)?;
            commands::utterances::cmd_words(&reader, &filter, by_utterances, output);
        }
        Commands::Freq {
            source,
            speakers,
            ngram,
            ignore_case,
            top,
        } => {
            let filter = speakers.filter()?;
            let reader = load(&source, cache_dir)?;
            commands::freq::cmd_freq(&reader, &filter, ngram, !ignore_case, top, output)?;
        }
        Commands::Measures {
            source,
            participant,
            exclude_switch,
        } => {
            let reader = load(&source, cache_dir)?;
            commands::measures::cmd_measures(&reader, &participant, exclude_switch, output);
        }
        Commands::Graph {
            source,
            speakers,
            utterance,
            format,
        } => {
            let filter = speakers.filter()?;
            let reader = load(&source, cache_dir)?;
            commands::graph::cmd_graph(&reader, &filter, utterance, format, output)?;
        }
        Commands::Export {
            source,
            path,
            dir,
            no_tabular,
        } => {
            let reader = load(&source, cache_dir)?;
            commands::export::cmd_export(&reader, &path, dir, !no_tabular, output, cli.quiet)?;
        }
        Commands::Cache { command } => match command {
            CacheCommands::List => commands::cache::cmd_cache_list(cache_dir, output)?,
            CacheCommands::Remove { url, all: _ } => {
                commands::cache::cmd_cache_remove(cache_dir, url.as_deref(), output, cli.quiet)?
            }
        },
    }
    Ok(())
}

/// Log to stderr. `-v` flags win over `CHILDES_LOG`; the default is `warn`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("CHILDES_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(args: &SourceArgs, cache_dir: Option<&Path>) -> Result<Reader, ReaderError> {
    let mut options = ReadOptions::default()
        .parallel(!args.sequential)
        .use_cached(!args.no_cache);
    options.match_pattern = args.match_path.clone();
    options.exclude_pattern = args.exclude_path.clone();
    if let Some(dir) = cache_dir {
        options = options.cache_dir(dir);
    }
    read_chat(&args.source, &options)
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", json);
}

pub(crate) fn report_error(err: &CliError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&err.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err));
            eprintln!("{}", json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", err);
            }
        }
    }
}
