use std::borrow::Cow;

#[weft_derive::weft_error]
pub enum CliError {
    #[error("Settings error{}: {source}", format_context(.context))]
    Settings { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("{source}{}", format_context(.context))]
    Codec { source: weft::WeftError, context: Option<Cow<'static, str>> },

    #[error("Internal CLI error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CliError {
    /// Code of the underlying codec error, or of this error otherwise.
    #[must_use]
    pub const fn diagnostic_code(&self) -> &'static str {
        match self {
            Self::Codec { source, .. } => source.code(),
            other => other.code(),
        }
    }
}
