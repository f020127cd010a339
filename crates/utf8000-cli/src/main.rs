/// UTF8000 command-line tool — inspect, validate, decode, and summarise
/// UTF8000-encoded byte streams.
///
/// # Command overview
///
/// ```text
/// utf8000 <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print every value with its classified bytes
///   validate   Check a stream against the UTF8000 grammar
///   decode     Print the decoded integers, one per line
///   stats      Print length distribution and size statistics
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Raise log verbosity (-v debug, -vv trace)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// Every command takes an input path; `-` reads stdin.
///
/// # Exit codes
///
/// | Code | Meaning                                       |
/// |------|-----------------------------------------------|
/// | 0    | Success                                       |
/// | 1    | Error (I/O failure, invalid stream, etc.)     |
///
/// All diagnostics are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

mod cmd_decode;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The UTF8000 command-line tool.
#[derive(Parser)]
#[command(name = "utf8000", version, about = "UTF8000 variable-length integer decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity (repeat for more detail).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print every value with its classified bytes.
    Inspect(InspectArgs),
    /// Check a stream against the UTF8000 grammar.
    Validate(ValidateArgs),
    /// Print the decoded integers, one per line.
    Decode(DecodeArgs),
    /// Print length distribution and size statistics.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `utf8000 inspect`.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                               │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ --show-bytes │ List each byte with its bit split and role flags     │
/// │ --value N    │ Show only the value at index N                       │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the encoded stream (`-` for stdin).
    pub file: PathBuf,

    /// List each byte with its bit split and role flags.
    #[arg(long)]
    pub show_bytes: bool,

    /// Inspect only the value at this zero-based index.
    #[arg(long)]
    pub value: Option<usize>,
}

/// Arguments for `utf8000 validate`.
///
/// Decodes the whole stream and reports success, or the first grammar
/// error with its byte offset. Exits with code 1 on any error.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the encoded stream (`-` for stdin).
    pub file: PathBuf,
}

/// Arguments for `utf8000 decode`.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Flag         │ Values / default                                     │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ --format     │ dec (default) | hex                                  │
/// │ --chunk-size │ feed the decoder N bytes at a time (default: all)    │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the encoded stream (`-` for stdin).
    pub file: PathBuf,

    /// Output format: `dec` or `hex`.
    #[arg(long, default_value = "dec")]
    pub format: String,

    /// Feed the decoder this many bytes per call instead of all at once.
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

/// Arguments for `utf8000 stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the encoded stream (`-` for stdin).
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// `warn` by default; each `-v` raises one level. `RUST_LOG` still wins.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}
