//! Command-line surface of the `weft` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "weft")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Reformat and validate structured text documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: FormatArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a document and print it with the configured layout
    Fmt {
        /// Input file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
    },
    /// Parse a document and report whether it is well-formed
    Check {
        /// Input file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
    },
}

impl Command {
    #[must_use]
    pub fn input(&self) -> Option<&std::path::Path> {
        match self {
            Self::Fmt { file } | Self::Check { file } => {
                file.as_deref().filter(|path| path.as_os_str() != "-")
            },
        }
    }
}

/// Options layered over the settings file and `WEFT__*` environment variables.
#[derive(Debug, Default, Args)]
pub struct FormatArgs {
    /// Settings file (TOML, JSON or YAML, by extension)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Multi-line output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Indent string for pretty output
    #[arg(long, global = true, value_name = "STRING")]
    pub indent: Option<String>,

    /// Accept unquoted keys and strings, and quoted numbers
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Omit quotes around keys and strings where unambiguous
    #[arg(long, global = true)]
    pub unquoted: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
