//! aug CLI

use aug::error::{Error, report_error};
use aug::interp::io::{self as ports, ReaderInput};
use aug::interp::Interpreter;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Environment variable holding the tracing filter directives
const LOG_ENV: &str = "AUG_LOG";

#[derive(Parser)]
#[command(name = "aug", version, about = "aug - a small imperative scripting language")]
struct Cli {
    /// Log interpreter activity at debug level (overridden by AUG_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an aug program
    Run {
        /// Source file to run
        file: PathBuf,
        /// Read `readint()`/`readstr()` lines from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Parse and dump AST as JSON (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
    /// Start an interactive session
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Run { file, input } => with_source(file, |source| run_file(source, input.as_deref())),
        Command::Parse { file } => with_source(file, parse_file),
        Command::Tokens { file } => with_source(file, tokenize_file),
        Command::Repl => start_repl(),
    }
}

/// Install the stderr subscriber so program output on stdout stays clean
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

/// Read `path` and hand its contents to `action`, reporting any failure
/// against the source text.
fn with_source(path: &Path, action: impl FnOnce(&str) -> aug::Result<()>) -> ExitCode {
    let filename = path.display().to_string();
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read {filename}: {e}");
            return ExitCode::FAILURE;
        }
    };

    match action(&source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&filename, &source, &err);
            ExitCode::FAILURE
        }
    }
}

fn run_file(source: &str, input: Option<&Path>) -> aug::Result<()> {
    let program = aug::parser::parse_source(source)?;

    let outcome = match input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| Error::io_error(format!("cannot open {}: {e}", path.display())))?;
            let mut interp = Interpreter::with_io(ReaderInput::new(BufReader::new(file)), ports::stdout());
            interp.run(&program)?
        }
        None => Interpreter::new().run(&program)?,
    };

    tracing::debug!(?outcome, "program finished");
    Ok(())
}

fn parse_file(source: &str) -> aug::Result<()> {
    let ast = aug::parser::parse_source(source)?;
    let json = serde_json::to_string_pretty(&ast).map_err(|e| Error::io_error(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn tokenize_file(source: &str) -> aug::Result<()> {
    let tokens = aug::lexer::tokenize(source)?;
    for (tok, span) in &tokens {
        println!("{:?} @ {}..{}", tok, span.start, span.end);
    }
    Ok(())
}

fn start_repl() -> ExitCode {
    let result = aug::repl::Repl::new().and_then(|mut repl| repl.run());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
