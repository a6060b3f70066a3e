//! # weft CLI
//!
//! Reads one document from a file or stdin, parses it under the configured format and either
//! re-emits it (`weft fmt`) or reports that it is well-formed (`weft check`).

pub mod args;
mod error;
pub mod settings;

pub use crate::error::{CliError, CliErrorExt};

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::args::{Cli, Command};

/// Executes one command, reading stdin only when no input file is given.
///
/// # Errors
///
/// Returns the first settings, IO or codec error encountered.
pub fn run(cli: &Cli, stdin: impl Read, mut stdout: impl Write) -> Result<(), CliError> {
    let format = settings::build_format(&cli.options)?;
    let text = read_input(cli.command.input(), stdin)?;
    debug!(bytes = text.len(), "Input read");

    let element = format.parse_to_element(&text)?;
    match &cli.command {
        Command::Fmt { .. } => {
            let output = format.to_text(&element)?;
            writeln!(stdout, "{output}").context("Failed to write output")?;
        },
        Command::Check { .. } => {
            info!(kind = element.kind_name(), "Document is well-formed");
            writeln!(stdout, "ok").context("Failed to write output")?;
        },
    }
    stdout.flush().context("Failed to flush output")
}

fn read_input(path: Option<&std::path::Path>, mut stdin: impl Read) -> Result<String, CliError> {
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()));
    }
    let mut text = String::new();
    stdin.read_to_string(&mut text).context("Failed to read stdin")?;
    Ok(text)
}
