//! Per-call traversal state handed to converters.
//!
//! [`Encoder`] and [`Decoder`] are cheap `Copy` views over the facade's configuration and
//! merged registry. Composite converters build and read objects through [`ObjectEncoder`] and
//! [`ObjectDecoder`], which apply `encode_defaults`, `ignore_unknown_keys` and
//! `coerce_input_values` uniformly.

use weft_element::{Element, Literal, Object};

use crate::config::Configuration;
use crate::converter::Converter;
use crate::descriptor::{ConverterKind, Descriptor};
use crate::error::WeftError;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy)]
pub struct Encoder<'f> {
    configuration: &'f Configuration,
    registry: &'f Registry,
}

impl<'f> Encoder<'f> {
    pub(crate) const fn new(configuration: &'f Configuration, registry: &'f Registry) -> Self {
        Self { configuration, registry }
    }

    #[must_use]
    pub const fn configuration(&self) -> &'f Configuration {
        self.configuration
    }

    #[must_use]
    pub const fn registry(&self) -> &'f Registry {
        self.registry
    }

    /// Encodes a nested value.
    ///
    /// # Errors
    ///
    /// Propagates the nested converter's error.
    pub fn encode<C: Converter + ?Sized>(
        &self,
        converter: &C,
        value: &C::Value,
    ) -> Result<Element, WeftError> {
        converter.encode(value, self)
    }

    /// Starts an object for a composite value.
    #[must_use]
    pub fn object(&self, descriptor: &Descriptor) -> ObjectEncoder<'f> {
        ObjectEncoder {
            encoder: *self,
            object: Object::with_capacity(descriptor.elements().len()),
        }
    }
}

/// Builds the object of one composite value.
#[derive(Debug)]
pub struct ObjectEncoder<'f> {
    encoder: Encoder<'f>,
    object: Object,
}

impl ObjectEncoder<'_> {
    /// Writes `name` unconditionally.
    ///
    /// # Errors
    ///
    /// Propagates the field converter's error.
    pub fn field<C: Converter + ?Sized>(
        &mut self,
        name: &str,
        converter: &C,
        value: &C::Value,
    ) -> Result<&mut Self, WeftError> {
        let element = converter.encode(value, &self.encoder)?;
        self.object.insert(name, element);
        Ok(self)
    }

    /// Writes `name` unless `value` equals `default` and `encode_defaults` is off.
    ///
    /// # Errors
    ///
    /// Propagates the field converter's error.
    pub fn field_with_default<C>(
        &mut self,
        name: &str,
        converter: &C,
        value: &C::Value,
        default: &C::Value,
    ) -> Result<&mut Self, WeftError>
    where
        C: Converter + ?Sized,
        C::Value: PartialEq,
    {
        if !self.encoder.configuration.encode_defaults() && value == default {
            return Ok(self);
        }
        self.field(name, converter, value)
    }

    /// Appends an already encoded element.
    pub fn raw(&mut self, name: &str, element: impl Into<Element>) -> &mut Self {
        self.object.insert(name, element);
        self
    }

    #[must_use]
    pub fn finish(self) -> Element {
        Element::Object(self.object)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Decoder<'f> {
    configuration: &'f Configuration,
    registry: &'f Registry,
    map_key: bool,
}

impl<'f> Decoder<'f> {
    pub(crate) const fn new(configuration: &'f Configuration, registry: &'f Registry) -> Self {
        Self { configuration, registry, map_key: false }
    }

    #[must_use]
    pub const fn configuration(&self) -> &'f Configuration {
        self.configuration
    }

    #[must_use]
    pub const fn registry(&self) -> &'f Registry {
        self.registry
    }

    /// Decoder for object keys, where every key arrives as a string.
    #[must_use]
    pub const fn for_map_key(&self) -> Self {
        Self { map_key: true, ..*self }
    }

    /// Whether quoting may differ from what the target scalar expects.
    #[must_use]
    pub const fn relaxed_quoting(&self) -> bool {
        self.map_key || self.configuration.accepts_unquoted()
    }

    /// Decodes a nested value.
    ///
    /// # Errors
    ///
    /// Propagates the nested converter's error.
    pub fn decode<C: Converter + ?Sized>(
        &self,
        converter: &C,
        element: &Element,
    ) -> Result<C::Value, WeftError> {
        converter.decode(element, self)
    }

    /// Requires `element` to be a literal.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::MalformedInput`] for null and container elements.
    pub fn literal<'el>(
        &self,
        element: &'el Element,
        expected: &str,
    ) -> Result<&'el Literal, WeftError> {
        element.as_literal().ok_or_else(|| {
            WeftError::malformed(format!(
                "Expected a literal for '{expected}', found {}",
                element.kind_name()
            ))
        })
    }

    /// Opens `element` as the object of a composite described by `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::MalformedInput`] if `element` is not an object, or if it carries a
    /// key the descriptor does not declare while `ignore_unknown_keys` is off.
    pub fn object<'el>(
        &self,
        element: &'el Element,
        descriptor: &'el Descriptor,
    ) -> Result<ObjectDecoder<'el, 'f>, WeftError> {
        let Some(object) = element.as_object() else {
            return Err(WeftError::malformed(format!(
                "Expected an object for '{}', found {}",
                descriptor.serial_name(),
                element.kind_name()
            )));
        };
        if !self.configuration.ignore_unknown_keys()
            && let Some(key) = object.keys().find(|key| !descriptor.has_element(key))
        {
            return Err(WeftError::malformed(format!(
                "Encountered an unknown key '{key}' in '{}'. \
                 Use 'ignore_unknown_keys = true' to skip unknown keys",
                descriptor.serial_name()
            )));
        }
        Ok(ObjectDecoder { decoder: *self, object, descriptor })
    }
}

/// Reads the fields of one composite value.
#[derive(Debug)]
pub struct ObjectDecoder<'el, 'f> {
    decoder: Decoder<'f>,
    object: &'el Object,
    descriptor: &'el Descriptor,
}

impl<'el> ObjectDecoder<'el, '_> {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'el Element> {
        self.object.get(name)
    }

    /// Decodes a field that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::MalformedInput`] if the field is missing, or the field converter's
    /// error.
    pub fn required<C: Converter + ?Sized>(
        &self,
        name: &str,
        converter: &C,
    ) -> Result<C::Value, WeftError> {
        let Some(element) = self.object.get(name) else {
            return Err(WeftError::malformed(format!(
                "Field '{name}' is required for '{}', but it was missing",
                self.descriptor.serial_name()
            )));
        };
        converter.decode(element, &self.decoder)
    }

    /// Decodes a field that falls back to `default` when absent.
    ///
    /// With `coerce_input_values`, an explicit `null` for a non-nullable field and an unknown
    /// enum name also fall back to `default`.
    ///
    /// # Errors
    ///
    /// Propagates the field converter's error when no coercion applies.
    pub fn optional<C, F>(&self, name: &str, converter: &C, default: F) -> Result<C::Value, WeftError>
    where
        C: Converter + ?Sized,
        F: FnOnce() -> C::Value,
    {
        let Some(element) = self.object.get(name) else {
            return Ok(default());
        };
        if !self.decoder.configuration.coerce_input_values() {
            return converter.decode(element, &self.decoder);
        }
        let descriptor = converter.descriptor();
        if element.is_null() && !descriptor.is_nullable() {
            return Ok(default());
        }
        match converter.decode(element, &self.decoder) {
            Err(WeftError::MalformedInput { .. })
                if descriptor.kind() == ConverterKind::Enum && element.as_literal().is_some() =>
            {
                Ok(default())
            },
            other => other,
        }
    }
}
