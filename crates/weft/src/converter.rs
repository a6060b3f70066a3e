use std::sync::Arc;

use weft_element::Element;

use crate::descriptor::Descriptor;
use crate::engine::{Decoder, Encoder};
use crate::error::WeftError;
use crate::polymorphic::Hierarchy;

/// Encodes and decodes one Rust type to and from the tree model.
///
/// Implementations are stateless with respect to a single call: everything that varies per
/// call arrives through the [`Encoder`] or [`Decoder`], which carry the active configuration
/// and registry. A converter is therefore shareable across threads.
pub trait Converter: Send + Sync + 'static {
    type Value: 'static;

    fn descriptor(&self) -> &Descriptor;

    /// # Errors
    ///
    /// Returns [`WeftError::Encoding`] when the value cannot be represented under the active
    /// configuration.
    fn encode(&self, value: &Self::Value, encoder: &Encoder<'_>) -> Result<Element, WeftError>;

    /// # Errors
    ///
    /// Returns [`WeftError::MalformedInput`] when `element` does not have the expected shape.
    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Self::Value, WeftError>;

    /// Subtype table for converters that dispatch on a class discriminator.
    fn hierarchy(&self) -> Option<Hierarchy> {
        None
    }
}

impl<C: Converter + ?Sized> Converter for Arc<C> {
    type Value = C::Value;

    fn descriptor(&self) -> &Descriptor {
        (**self).descriptor()
    }

    fn encode(&self, value: &Self::Value, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        (**self).encode(value, encoder)
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Self::Value, WeftError> {
        (**self).decode(element, decoder)
    }

    fn hierarchy(&self) -> Option<Hierarchy> {
        (**self).hierarchy()
    }
}
