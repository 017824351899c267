/// AMC command-line tool: inspect, validate, summarise and export Ant
/// Movie Catalog (`.amc`) files.
///
/// # Command overview
///
/// ```text
/// amc <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print header, owner, custom fields and one line per movie
///   validate   Decode a catalog and report whether it reads cleanly
///   stats      Print decode counters and picture totals
///   export     Dump the decoded catalog as JSON
///   help       Print help information
///
/// Global options:
///   -v, --verbose...       More log output (-v info, -vv debug, -vvv trace)
///   -q, --quiet...         Less log output
///   --validate-strings     Reject strings that look like binary data
///   --max-extras <N>       Largest extras count accepted per movie
///   -h, --help             Print help
///   -V, --version          Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                          |
/// |------|--------------------------------------------------|
/// | 0    | Success                                          |
/// | 1    | Error (I/O failure, not a catalog, etc.)         |
///
/// Reports go to stdout, logs and errors to stderr.
use std::path::{Path, PathBuf};
use std::process;

use amc_decoder::{DecodedCatalog, DecoderConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

mod cmd_export;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The Ant Movie Catalog command-line tool.
#[derive(Parser)]
#[command(name = "amc", version, about = "Ant Movie Catalog decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(flatten)]
    decode: DecodeArgs,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print header, owner, custom fields and one line per movie.
    Inspect(InspectArgs),
    /// Decode a catalog and report whether it reads cleanly.
    Validate(ValidateArgs),
    /// Print decode counters and picture totals.
    Stats(StatsArgs),
    /// Dump the decoded catalog as JSON.
    Export(ExportArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Decoder settings shared by every command.
///
/// ```text
/// ┌────────────────────┬─────────────────────────────────────────────┐
/// │ Flag               │ Effect                                      │
/// ├────────────────────┼─────────────────────────────────────────────┤
/// │ --validate-strings │ fail strings under 70% printable (>20 chars)│
/// │ --max-extras N     │ extras counts above N are treated as junk   │
/// └────────────────────┴─────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Reject strings that look like binary data. Useful for finding the
    /// point where a damaged catalog stops making sense.
    #[arg(long, global = true)]
    pub validate_strings: bool,

    /// Largest extras count accepted for a single movie.
    #[arg(long, global = true, default_value_t = amc_decoder::DEFAULT_MAX_EXTRAS)]
    pub max_extras: u32,
}

impl DecodeArgs {
    fn config(&self) -> DecoderConfig {
        DecoderConfig {
            validate_strings: self.validate_strings,
            max_extras: self.max_extras,
            ..DecoderConfig::default()
        }
    }
}

/// Arguments for `amc inspect`.
///
/// ```text
/// ┌───────────────┬───────────────────────────────────────────────┐
/// │ Flag          │ Effect                                        │
/// ├───────────────┼───────────────────────────────────────────────┤
/// │ --movie N     │ Show only movies numbered N                   │
/// │ --custom      │ Print each movie's custom field values        │
/// │ --extras      │ Print each movie's extras                     │
/// └───────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the `.amc` file to inspect.
    pub file: PathBuf,

    /// Show only movies with this number.
    #[arg(long)]
    pub movie: Option<i32>,

    /// Print custom field values under each movie.
    #[arg(long)]
    pub custom: bool,

    /// Print extras under each movie.
    #[arg(long)]
    pub extras: bool,
}

/// Arguments for `amc validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the `.amc` file to validate.
    pub file: PathBuf,

    /// Also fail when the movie stream ends before the end of the file.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `amc stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the `.amc` file to analyse.
    pub file: PathBuf,
}

/// Arguments for `amc export`.
///
/// Picture payloads are not exported; each picture appears with its path,
/// extension and size.
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Path to the `.amc` file to export.
    pub file: PathBuf,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Decode `path`, attaching the file name to any error.
pub(crate) fn decode_catalog(path: &Path, config: DecoderConfig) -> Result<DecodedCatalog> {
    amc_decoder::decode_file(path, config)
        .with_context(|| format!("failed to decode {}", path.display()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = cli.decode.config();
    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, config),
        Commands::Validate(args) => cmd_validate::run(&args, config),
        Commands::Stats(args) => cmd_stats::run(&args, config),
        Commands::Export(args) => cmd_export::run(&args, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
