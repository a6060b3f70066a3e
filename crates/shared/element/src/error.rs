//! # Element Errors
//!
//! Failures raised while reading text into the tree model.

use std::borrow::Cow;

/// Errors produced by the text [`Reader`](crate::Reader).
#[weft_derive::weft_error]
pub enum ElementError {
    /// The input is not well-formed under the active reader options.
    #[error("Syntax error at offset {offset}{}: {message}", format_context(.context))]
    Syntax { message: Cow<'static, str>, offset: usize, context: Option<Cow<'static, str>> },

    /// Non-whitespace input remains after a complete value.
    #[error("Trailing data at offset {offset}{}", format_context(.context))]
    TrailingData { offset: usize, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal element error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
