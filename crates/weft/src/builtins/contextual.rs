use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use weft_element::Element;

use crate::converter::Converter;
use crate::descriptor::{ConverterKind, Descriptor};
use crate::engine::{Decoder, Encoder};
use crate::error::WeftError;
use crate::registry::Registry;
use crate::type_key::TypeKey;

/// Defers to whatever converter the active registry holds for `T`.
///
/// Lets a composite converter name a field type whose converter is supplied by the facade's
/// registry, so the same composite works with different registrations.
pub struct ContextualConverter<T> {
    descriptor: Descriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> ContextualConverter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: Descriptor::named(TypeKey::of::<T>().short_name(), ConverterKind::Contextual),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> Default for ContextualConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ContextualConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextualConverter").field(&self.descriptor.serial_name()).finish()
    }
}

fn resolve<T: 'static>(registry: &Registry) -> Result<Arc<dyn Converter<Value = T>>, WeftError> {
    let converter = registry.resolve_contextual_or_default::<T>()?;
    if converter.descriptor().kind() == ConverterKind::Contextual {
        return Err(WeftError::Internal {
            message: format!(
                "Contextual converter for '{}' resolves to another contextual converter",
                TypeKey::of::<T>().name()
            )
            .into(),
            context: None,
        });
    }
    Ok(converter)
}

impl<T: 'static> Converter for ContextualConverter<T> {
    type Value = T;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn encode(&self, value: &T, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        resolve::<T>(encoder.registry())?.encode(value, encoder)
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<T, WeftError> {
        resolve::<T>(decoder.registry())?.decode(element, decoder)
    }
}
