use std::borrow::Cow;
use weft_derive::weft_error;

#[weft_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unexpected token '{token}' at offset {offset}{}", format_context(.context))]
    UnexpectedToken { token: char, offset: usize, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = DemoError::from("boom");
    assert_eq!(err.code(), "internal");
}
