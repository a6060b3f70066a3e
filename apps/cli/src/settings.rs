//! Layered loading of the codec configuration.
//!
//! Precedence, lowest first: built-in defaults, the settings file, `WEFT__*` environment
//! variables (e.g. `WEFT__PRETTY_PRINT=true`), command-line flags.

use std::path::Path;

use config::{Config, Environment, File};
use tracing::debug;
use weft::{Configuration, Format};

use crate::args::FormatArgs;
use crate::error::{CliError, CliErrorExt};

pub const ENV_PREFIX: &str = "WEFT";

/// Reads the settings file (if any) and environment overrides.
///
/// # Errors
///
/// Returns [`CliError::Settings`] if the file is missing or unreadable, or if a setting is
/// unknown or has the wrong type.
pub fn load_configuration(path: Option<&Path>) -> Result<Configuration, CliError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        debug!(path = %path.display(), "Loading settings file");
        builder = builder.add_source(File::from(path).required(true));
    }
    builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true),
        )
        .build()
        .context("Failed to read settings")?
        .try_deserialize::<Configuration>()
        .context("Failed to deserialize settings")
}

/// Builds the format from loaded settings with command-line flags on top.
///
/// # Errors
///
/// Returns [`CliError::Settings`] from loading, or [`CliError::Codec`] when the resulting
/// options contradict each other.
pub fn build_format(args: &FormatArgs) -> Result<Format, CliError> {
    let configuration = load_configuration(args.config.as_deref())?;

    let mut builder = Format::builder().configuration(configuration);
    if args.pretty {
        builder = builder.pretty_print(true);
    }
    if args.lenient {
        builder = builder.is_lenient(true);
    }
    if args.unquoted {
        builder = builder.unquoted_print(true);
    }
    if let Some(indent) = &args.indent {
        builder = builder.indent(indent.clone());
    }
    Ok(builder.build()?)
}
