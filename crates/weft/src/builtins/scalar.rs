use std::fmt;
use std::marker::PhantomData;

use weft_element::{Element, Literal};

use crate::converter::Converter;
use crate::descriptor::Descriptor;
use crate::engine::{Decoder, Encoder};
use crate::error::WeftError;

#[allow(unreachable_pub)]
mod sealed {
    pub trait Sealed {}
}

/// A type with a single-literal representation.
pub trait Scalar: sealed::Sealed + Sized + Send + Sync + 'static {
    const NAME: &'static str;
    /// Strings are quoted in strict mode; numbers and booleans are not.
    const QUOTED: bool;

    /// # Errors
    ///
    /// Returns [`WeftError::Encoding`] when the value has no representation.
    fn to_literal(&self, encoder: &Encoder<'_>) -> Result<Literal, WeftError>;

    /// # Errors
    ///
    /// Returns [`WeftError::MalformedInput`] when the content does not parse.
    fn from_literal(literal: &Literal, decoder: &Decoder<'_>) -> Result<Self, WeftError>;
}

/// Converter for any [`Scalar`] type.
pub struct ScalarConverter<T> {
    descriptor: Descriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Scalar> ScalarConverter<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { descriptor: Descriptor::scalar(T::NAME), _marker: PhantomData }
    }
}

impl<T: Scalar> Default for ScalarConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ScalarConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScalarConverter").field(&self.descriptor.serial_name()).finish()
    }
}

impl<T: Scalar> Converter for ScalarConverter<T> {
    type Value = T;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn encode(&self, value: &T, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        value.to_literal(encoder).map(Element::Literal)
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<T, WeftError> {
        let literal = decoder.literal(element, T::NAME)?;
        if !decoder.relaxed_quoting() {
            if T::QUOTED && !literal.is_quoted() {
                return Err(WeftError::malformed(format!(
                    "Expected a quoted string for '{}', found unquoted '{}'. \
                     Use 'is_lenient = true' to accept unquoted strings",
                    T::NAME,
                    literal.content()
                )));
            }
            if !T::QUOTED && literal.is_quoted() {
                return Err(WeftError::malformed(format!(
                    "Unexpected quoted literal \"{}\" for '{}'. \
                     Use 'is_lenient = true' to accept quoted values",
                    literal.content(),
                    T::NAME
                )));
            }
        }
        T::from_literal(literal, decoder)
    }
}

fn unparsable(literal: &Literal, name: &str) -> WeftError {
    WeftError::malformed(format!("Failed to parse '{}' as {name}", literal.content()))
}

macro_rules! integer_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const NAME: &'static str = stringify!($ty);
                const QUOTED: bool = false;

                fn to_literal(&self, _: &Encoder<'_>) -> Result<Literal, WeftError> {
                    Ok(Literal::raw(self.to_string()))
                }

                fn from_literal(literal: &Literal, _: &Decoder<'_>) -> Result<Self, WeftError> {
                    literal.content().parse().map_err(|_| unparsable(literal, Self::NAME))
                }
            }
        )*
    };
}

integer_scalar!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

macro_rules! float_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const NAME: &'static str = stringify!($ty);
                const QUOTED: bool = false;

                fn to_literal(&self, encoder: &Encoder<'_>) -> Result<Literal, WeftError> {
                    if self.is_finite() {
                        return Ok(Literal::raw(format!("{self:?}")));
                    }
                    if !encoder.configuration().serialize_special_floating_point_values() {
                        return Err(WeftError::encoding(format!(
                            "Unexpected special floating-point value {}. \
                             Use 'serialize_special_floating_point_values = true' to allow it",
                            special_float_token(self.is_nan(), self.is_sign_negative())
                        )));
                    }
                    Ok(Literal::raw(special_float_token(self.is_nan(), self.is_sign_negative())))
                }

                fn from_literal(literal: &Literal, decoder: &Decoder<'_>) -> Result<Self, WeftError> {
                    let value: Self = match literal.content() {
                        "NaN" => Self::NAN,
                        "Infinity" => Self::INFINITY,
                        "-Infinity" => Self::NEG_INFINITY,
                        content => content.parse().map_err(|_| unparsable(literal, Self::NAME))?,
                    };
                    if !value.is_finite()
                        && !decoder.configuration().serialize_special_floating_point_values()
                    {
                        return Err(WeftError::malformed(format!(
                            "Unexpected special floating-point value '{}'. \
                             Use 'serialize_special_floating_point_values = true' to allow it",
                            literal.content()
                        )));
                    }
                    Ok(value)
                }
            }
        )*
    };
}

float_scalar!(f32, f64);

const fn special_float_token(nan: bool, negative: bool) -> &'static str {
    match (nan, negative) {
        (true, _) => "NaN",
        (false, false) => "Infinity",
        (false, true) => "-Infinity",
    }
}

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const NAME: &'static str = "bool";
    const QUOTED: bool = false;

    fn to_literal(&self, _: &Encoder<'_>) -> Result<Literal, WeftError> {
        Ok(Literal::bool(*self))
    }

    fn from_literal(literal: &Literal, _: &Decoder<'_>) -> Result<Self, WeftError> {
        literal.as_bool().ok_or_else(|| unparsable(literal, Self::NAME))
    }
}

impl sealed::Sealed for String {}

impl Scalar for String {
    const NAME: &'static str = "String";
    const QUOTED: bool = true;

    fn to_literal(&self, _: &Encoder<'_>) -> Result<Literal, WeftError> {
        Ok(Literal::string(self.as_str()))
    }

    fn from_literal(literal: &Literal, _: &Decoder<'_>) -> Result<Self, WeftError> {
        Ok(literal.content().to_owned())
    }
}

impl sealed::Sealed for char {}

impl Scalar for char {
    const NAME: &'static str = "char";
    const QUOTED: bool = true;

    fn to_literal(&self, _: &Encoder<'_>) -> Result<Literal, WeftError> {
        Ok(Literal::string(self.to_string()))
    }

    fn from_literal(literal: &Literal, _: &Decoder<'_>) -> Result<Self, WeftError> {
        let mut chars = literal.content().chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(unparsable(literal, Self::NAME)),
        }
    }
}
