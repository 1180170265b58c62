// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front end for the `hexini` crate.
//!
//! ```bash
//! hexini check app.ini other.ini
//! hexini fmt app.ini -o app.formatted.ini
//! hexini get app.ini port -s server
//! cat app.ini | hexini get - name
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use hexini::prelude::*;
use tracing::Level;

/// Path that stands for standard input.
const STDIN: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "hexini", version, about = "Check, format and query INI files")]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse each file and report the first syntax error, if any
    Check {
        /// Files to check, `-` for standard input
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Re-render a file in canonical form
    Fmt {
        /// File to format, `-` for standard input
        file: PathBuf,
        /// Write the result here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the raw value of one key
    Get {
        /// File to read, `-` for standard input
        file: PathBuf,
        /// Key to look up
        key: String,
        /// Section holding the key; the global section when omitted
        #[arg(short, long, default_value = GLOBAL_SECTION)]
        section: String,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read(path: &Path) -> Result<Configuration> {
    if path.as_os_str() == STDIN {
        hexini::parse(io::stdin().lock())
    } else {
        hexini::load(path)
    }
}

fn check(files: &[PathBuf]) -> bool {
    let mut ok = true;
    for file in files {
        match read(file) {
            Ok(config) => {
                tracing::debug!(file = %file.display(), sections = config.len(), "valid");
            }
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                ok = false;
            }
        }
    }
    ok
}

fn fmt(file: &Path, output: Option<&Path>) -> Result<()> {
    let config = read(file)?;
    let formatter = IniFormatter::new();
    match output {
        Some(path) => {
            let mut out = File::create(path)?;
            formatter.write_config(&config, &mut out)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            formatter.write_config(&config, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn get(file: &Path, section: &str, key: &str) -> Result<bool> {
    let config = read(file)?;
    match config.get(section, key) {
        Some(value) => {
            println!("{value}");
            Ok(true)
        }
        None => Ok(false),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match &cli.command {
        Command::Check { files } => Ok(check(files)),
        Command::Fmt { file, output } => fmt(file, output.as_deref()).map(|_| true),
        Command::Get { file, key, section } => get(file, section, key),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
