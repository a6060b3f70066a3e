use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use weft_element::{DEFAULT_INDENT, ReaderOptions, WriterOptions};

use crate::error::WeftError;

/// Default key of the inline class discriminator.
pub const DEFAULT_CLASS_DISCRIMINATOR: &str = "type";

/// Immutable options of a [`Format`](crate::Format).
///
/// Built through [`FormatBuilder`](crate::FormatBuilder) or deserialized from a settings source;
/// never mutated after the facade is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub(crate) encode_defaults: bool,
    pub(crate) ignore_unknown_keys: bool,
    pub(crate) is_lenient: bool,
    pub(crate) serialize_special_floating_point_values: bool,
    pub(crate) allow_structured_map_keys: bool,
    pub(crate) pretty_print: bool,
    pub(crate) unquoted_print: bool,
    pub(crate) indent: Cow<'static, str>,
    pub(crate) coerce_input_values: bool,
    pub(crate) use_array_polymorphism: bool,
    pub(crate) class_discriminator: Cow<'static, str>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            encode_defaults: true,
            ignore_unknown_keys: false,
            is_lenient: false,
            serialize_special_floating_point_values: false,
            allow_structured_map_keys: false,
            pretty_print: false,
            unquoted_print: false,
            indent: Cow::Borrowed(DEFAULT_INDENT),
            coerce_input_values: false,
            use_array_polymorphism: false,
            class_discriminator: Cow::Borrowed(DEFAULT_CLASS_DISCRIMINATOR),
        }
    }
}

impl Configuration {
    #[must_use]
    pub const fn encode_defaults(&self) -> bool {
        self.encode_defaults
    }

    #[must_use]
    pub const fn ignore_unknown_keys(&self) -> bool {
        self.ignore_unknown_keys
    }

    #[must_use]
    pub const fn is_lenient(&self) -> bool {
        self.is_lenient
    }

    /// Whether input may carry bare strings and keys.
    ///
    /// True in lenient mode, and whenever this configuration prints unquoted, so a format always
    /// reads back what it writes.
    #[must_use]
    pub const fn accepts_unquoted(&self) -> bool {
        self.is_lenient || self.unquoted_print
    }

    #[must_use]
    pub const fn serialize_special_floating_point_values(&self) -> bool {
        self.serialize_special_floating_point_values
    }

    #[must_use]
    pub const fn allow_structured_map_keys(&self) -> bool {
        self.allow_structured_map_keys
    }

    #[must_use]
    pub const fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    #[must_use]
    pub const fn unquoted_print(&self) -> bool {
        self.unquoted_print
    }

    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    #[must_use]
    pub const fn coerce_input_values(&self) -> bool {
        self.coerce_input_values
    }

    #[must_use]
    pub const fn use_array_polymorphism(&self) -> bool {
        self.use_array_polymorphism
    }

    #[must_use]
    pub fn class_discriminator(&self) -> &str {
        &self.class_discriminator
    }

    /// Rejects option combinations that contradict each other.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::InvalidConfiguration`] naming the first offending option.
    pub fn check(&self) -> Result<(), WeftError> {
        if self.class_discriminator.is_empty() {
            return Err(invalid("Class discriminator must not be empty"));
        }
        if self.use_array_polymorphism
            && self.class_discriminator != DEFAULT_CLASS_DISCRIMINATOR
        {
            return Err(invalid(
                "Class discriminator should not be specified when array polymorphism is specified",
            ));
        }
        if !self.pretty_print && self.indent != DEFAULT_INDENT {
            return Err(invalid("Indent should not be specified when default printing mode is used"));
        }
        if self.pretty_print && !self.indent.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n')) {
            return Err(invalid(format!(
                "Only whitespace, tab, newline and carriage return are allowed as pretty print \
                 symbols. Had {:?}",
                self.indent
            )));
        }
        Ok(())
    }

    pub(crate) fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            pretty: self.pretty_print,
            indent: self.indent.clone(),
            unquoted: self.unquoted_print,
        }
    }

    pub(crate) const fn reader_options(&self) -> ReaderOptions {
        ReaderOptions { lenient: self.accepts_unquoted() }
    }
}

fn invalid(message: impl Into<Cow<'static, str>>) -> WeftError {
    WeftError::InvalidConfiguration { message: message.into(), context: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_the_check() {
        let configuration = Configuration::default();
        assert!(configuration.check().is_ok());
        assert!(configuration.encode_defaults());
        assert_eq!(configuration.class_discriminator(), "type");
        assert_eq!(configuration.indent(), "    ");
    }

    #[test]
    fn custom_discriminator_conflicts_with_array_polymorphism() {
        let configuration = Configuration {
            use_array_polymorphism: true,
            class_discriminator: Cow::Borrowed("kind"),
            ..Configuration::default()
        };
        let err = configuration.check().unwrap_err();
        assert_eq!(err.code(), "invalid_configuration");
    }

    #[test]
    fn indent_requires_pretty_print() {
        let compact = Configuration { indent: Cow::Borrowed("  "), ..Configuration::default() };
        assert!(compact.check().is_err());

        let pretty = Configuration { pretty_print: true, ..compact };
        assert!(pretty.check().is_ok());
    }

    #[test]
    fn indent_must_be_whitespace() {
        let configuration = Configuration {
            pretty_print: true,
            indent: Cow::Borrowed("--"),
            ..Configuration::default()
        };
        assert!(configuration.check().is_err());
    }

    #[test]
    fn unquoted_print_reads_leniently() {
        let configuration = Configuration { unquoted_print: true, ..Configuration::default() };
        assert!(!configuration.is_lenient());
        assert!(configuration.accepts_unquoted());
        assert!(configuration.reader_options().lenient);
        assert!(!Configuration::default().reader_options().lenient);
    }

    #[test]
    fn deserializes_partial_settings() {
        let configuration: Configuration =
            serde_json::from_str(r#"{"pretty_print": true, "indent": "\t"}"#).unwrap();
        assert!(configuration.pretty_print());
        assert_eq!(configuration.indent(), "\t");
        assert!(configuration.encode_defaults());
    }

    #[test]
    fn rejects_unknown_settings() {
        let result = serde_json::from_str::<Configuration>(r#"{"prety_print": true}"#);
        assert!(result.is_err());
    }
}
