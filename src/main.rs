//! luafront CLI entry point
//!
//! Scans and parses a Lua source file, printing each diagnostic with the line
//! it points at. The exit status is 0 for a clean parse, 1 when diagnostics
//! were reported and 2 when the file could not be read.

use std::{
    fs::File,
    io::{self, BufRead, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use luafront::{
    display_diagnostic,
    lexer::{lexer::Lexer, source::ReaderSource},
    parser::parser::parse_program,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scan and parse Lua source files
#[derive(Parser, Debug)]
#[command(name = "luafront", version, about, long_about = None)]
struct Cli {
    /// Source file to parse
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Print the parsed program in bracketed form
    #[arg(long)]
    ast: bool,

    /// Name shown in diagnostics (defaults to the file name)
    #[arg(long, value_name = "NAME")]
    source_name: Option<String>,
}

#[derive(Error, Debug)]
enum DriverError {
    #[error("could not open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

type DriverResult<T> = Result<T, DriverError>;

/// Reads the whole file once; the text feeds the scanner and the diagnostic renderer.
fn read_source(path: &Path) -> DriverResult<String> {
    let mut file = File::open(path).map_err(|source| DriverError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|source| DriverError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(text)
}

fn check_read<R: BufRead>(path: &Path, source: &mut ReaderSource<R>) -> DriverResult<()> {
    match source.take_error() {
        Some(source) => Err(DriverError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(()),
    }
}

fn source_name(cli: &Cli) -> Option<String> {
    cli.source_name.clone().or_else(|| {
        cli.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    })
}

/// Returns whether the file parsed without diagnostics.
fn run(cli: &Cli) -> DriverResult<bool> {
    let name = source_name(cli);

    let text = read_source(&cli.file)?;

    if cli.tokens {
        let mut source = ReaderSource::new(text.as_bytes());
        for token in Lexer::new(Box::new(&mut source), name.clone()) {
            token.debug();
        }
        check_read(&cli.file, &mut source)?;
    }

    let mut source = ReaderSource::new(text.as_bytes());
    let (program, diagnostics) = parse_program(Lexer::new(Box::new(&mut source), name));
    check_read(&cli.file, &mut source)?;

    info!(
        statements = program.len(),
        diagnostics = diagnostics.len(),
        "parsed {}",
        cli.file.display()
    );

    if cli.ast {
        println!("{}", program);
    }

    if diagnostics.is_empty() {
        return Ok(true);
    }

    for diagnostic in &diagnostics {
        eprintln!("{}", display_diagnostic(diagnostic, &text));
    }

    Ok(false)
}

fn main() -> ExitCode {
    // Initialize structured logging with env-based filter, defaulting to warn
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}
