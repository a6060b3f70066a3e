use std::borrow::Cow;
use std::fmt;

use weft_element::{Element, Literal};

use crate::converter::Converter;
use crate::descriptor::{ConverterKind, Descriptor};
use crate::engine::{Decoder, Encoder};
use crate::error::WeftError;

/// Converter for a fieldless enum, encoded as the serial name of its variant.
///
/// ```
/// use weft::EnumConverter;
///
/// #[derive(Clone, Copy, PartialEq)]
/// enum Level { Low, High }
///
/// let levels = EnumConverter::new("Level").variant("low", Level::Low).variant("high", Level::High);
/// assert_eq!(levels.names().collect::<Vec<_>>(), ["low", "high"]);
/// ```
pub struct EnumConverter<T> {
    descriptor: Descriptor,
    variants: Vec<(Cow<'static, str>, T)>,
}

impl<T> EnumConverter<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(serial_name: impl Into<Cow<'static, str>>) -> Self {
        Self { descriptor: Descriptor::named(serial_name, ConverterKind::Enum), variants: Vec::new() }
    }

    /// Adds a variant; a repeated name replaces the earlier value.
    #[must_use]
    pub fn variant(mut self, name: impl Into<Cow<'static, str>>, value: T) -> Self {
        let name = name.into();
        self.variants.retain(|(existing, _)| *existing != name);
        self.variants.push((name, value));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(name, _)| name.as_ref())
    }
}

impl<T> fmt::Debug for EnumConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumConverter")
            .field("serial_name", &self.descriptor.serial_name())
            .field("variants", &self.variants.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Converter for EnumConverter<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    type Value = T;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn encode(&self, value: &T, _: &Encoder<'_>) -> Result<Element, WeftError> {
        self.variants
            .iter()
            .find(|(_, candidate)| candidate == value)
            .map(|(name, _)| Element::Literal(Literal::string(name.as_ref())))
            .ok_or_else(|| {
                WeftError::encoding(format!(
                    "Value is not a registered variant of enum '{}'",
                    self.descriptor.serial_name()
                ))
            })
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<T, WeftError> {
        let literal = decoder.literal(element, self.descriptor.serial_name())?;
        if !literal.is_quoted() && !decoder.relaxed_quoting() {
            return Err(WeftError::malformed(format!(
                "Expected a quoted variant name for enum '{}', found '{}'",
                self.descriptor.serial_name(),
                literal.content()
            )));
        }
        self.variants
            .iter()
            .find(|(name, _)| name == literal.content())
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                WeftError::malformed(format!(
                    "Enum '{}' does not contain a variant named '{}'",
                    self.descriptor.serial_name(),
                    literal.content()
                ))
            })
    }
}
