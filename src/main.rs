//! brlparam CLI - list device parameters or show the value of one.

use brlparam::{
    ClientError, ErrorKind, OutputFormat, Snapshot, execute_query, logging, resolve_arguments,
    resolve_settings, write_outcome,
};
use clap::Parser;
use colored::Colorize;
use serde_json::json;
use std::env;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::debug;

const EXIT_FAILURE: i32 = 1;
const EXIT_SYNTAX: i32 = 2;
const EXIT_SEMANTIC: i32 = 3;
const EXIT_REGISTRY: i32 = 4;

#[derive(Parser)]
#[command(name = "brlparam")]
#[command(about = "List device parameters, or show the value of one")]
#[command(version)]
struct Cli {
    /// Parameter snapshot file (.yaml, .yml or .json)
    #[arg(short, long, env = "BRLPARAM_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Output format (defaults to the config file setting, then text)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Parameter name, optionally followed by a subparam index
    #[arg(value_name = "PARAMETER [SUBPARAM]", allow_negative_numbers = true)]
    parameters: Vec<String>,
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Syntax => EXIT_SYNTAX,
        ErrorKind::Semantic => EXIT_SEMANTIC,
        ErrorKind::Registry => EXIT_REGISTRY,
        ErrorKind::Io => EXIT_FAILURE,
    }
}

fn emit_error(format: OutputFormat, code: &str, detail: &str, status: i32) -> ! {
    match format {
        OutputFormat::Json => eprintln!("{}", json!({"error": code, "detail": detail})),
        OutputFormat::Text => eprintln!("{}", format!("Error: {}", detail).red()),
    }
    process::exit(status);
}

fn fail(format: OutputFormat, err: &ClientError) -> ! {
    emit_error(format, err.code(), &err.to_string(), exit_code(err.kind()))
}

fn main() {
    let cli = Cli::parse();
    logging::init_stderr_logging(cli.verbose);

    let requested_format = cli.format.unwrap_or_default();
    let cwd = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => fail(requested_format, &ClientError::Io(e)),
    };
    let settings = match resolve_settings(&cwd, cli.snapshot, cli.format) {
        Ok(settings) => settings,
        Err(e) => emit_error(requested_format, "config", &e.to_string(), EXIT_FAILURE),
    };
    let format = settings.format;

    // Arguments are checked before the snapshot is read.
    let query = match resolve_arguments(&cli.parameters) {
        Ok(query) => query,
        Err(e) => fail(format, &e),
    };

    debug!(snapshot = %settings.snapshot.display(), "loading parameters");
    let snapshot = match Snapshot::load(&settings.snapshot) {
        Ok(snapshot) => snapshot,
        Err(e) => fail(format, &ClientError::registry(e)),
    };

    let result = execute_query(&snapshot, query)
        .and_then(|outcome| write_outcome(&outcome, format, &mut io::stdout().lock()));
    if let Err(e) = result {
        fail(format, &e);
    }
}
