//! # Codec Errors
//!
//! This module defines [`WeftError`], the single error type surfaced by the facade.
//! Construction-time defects, resolution failures, input defects and encoding defects are
//! distinct variants so callers can match on them instead of parsing messages.

use std::borrow::Cow;
use weft_element::ElementError;

/// A specialized [`WeftError`] enum for codec failures.
#[weft_derive::weft_error]
pub enum WeftError {
    /// Two subtypes of one polymorphic hierarchy would emit the same discriminator tag.
    #[error(
        "Ambiguous discriminator '{tag}' in hierarchy '{hierarchy}'{}: claimed by {}",
        format_context(.context),
        .subtypes.join(", ")
    )]
    AmbiguousDiscriminator {
        hierarchy: Cow<'static, str>,
        tag: String,
        subtypes: Vec<Cow<'static, str>>,
        context: Option<Cow<'static, str>>,
    },

    /// A subtype declares a field with the same name as the class discriminator.
    #[error(
        "Class discriminator '{key}' conflicts with a field of '{subtype}' in hierarchy '{hierarchy}'{}",
        format_context(.context)
    )]
    DiscriminatorConflict {
        hierarchy: Cow<'static, str>,
        subtype: Cow<'static, str>,
        key: String,
        context: Option<Cow<'static, str>>,
    },

    /// Options that contradict each other.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The registry holds no converter for the requested type.
    #[error("No converter found for '{type_name}'{}", format_context(.context))]
    NoConverterFound { type_name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The value cannot be represented under the active configuration.
    #[error("Encoding error{}: {message}", format_context(.context))]
    Encoding { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The input is not well-formed or does not match the converter's shape.
    #[error("Malformed input{}: {message}", format_context(.context))]
    MalformedInput {
        message: Cow<'static, str>,
        offset: Option<usize>,
        context: Option<Cow<'static, str>>,
    },

    /// Input continues after the decoded value.
    #[error(
        "Trailing data at offset {offset}{}: the input must hold exactly one value",
        format_context(.context)
    )]
    TrailingData { offset: usize, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal codec error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl WeftError {
    /// Shorthand for a [`WeftError::MalformedInput`] without position.
    pub(crate) fn malformed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedInput { message: message.into(), offset: None, context: None }
    }

    pub(crate) fn encoding(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Encoding { message: message.into(), context: None }
    }

    /// `true` for defects detected while building a [`Format`](crate::Format).
    #[must_use]
    pub const fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousDiscriminator { .. }
                | Self::DiscriminatorConflict { .. }
                | Self::InvalidConfiguration { .. }
        )
    }
}

impl From<ElementError> for WeftError {
    fn from(err: ElementError) -> Self {
        match err {
            ElementError::Syntax { message, offset, context } => {
                Self::MalformedInput { message, offset: Some(offset), context }
            },
            ElementError::TrailingData { offset, context } => Self::TrailingData { offset, context },
            ElementError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
