//! # Format Facade
//!
//! [`Format`] binds one immutable [`Configuration`] to one merged [`Registry`] and exposes the
//! encode/decode entry points. A format is validated once when built and is then shared by
//! cloning the handle.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use tracing::debug;
use weft_element::{Element, Reader, write_to_string};

use crate::config::Configuration;
use crate::converter::Converter;
use crate::defaults::default_registry;
use crate::engine::{Decoder, Encoder};
use crate::error::WeftError;
use crate::registry::Registry;
use crate::validator;

static DEFAULT_FORMAT: LazyLock<Format> = LazyLock::new(|| Format {
    inner: Arc::new(FormatInner {
        configuration: Configuration::default(),
        registry: default_registry(),
        custom: Registry::new(),
    }),
});

#[derive(Debug)]
struct FormatInner {
    configuration: Configuration,
    /// Built-ins merged with `custom`.
    registry: Registry,
    custom: Registry,
}

/// A configured codec.
///
/// ```
/// use weft::{Format, ScalarConverter};
///
/// let format = Format::builder().is_lenient(true).build()?;
/// let value: i64 = format.decode_from_str(&ScalarConverter::new(), r#""42""#)?;
/// assert_eq!(value, 42);
/// # Ok::<(), weft::WeftError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Format {
    inner: Arc<FormatInner>,
}

impl Default for Format {
    fn default() -> Self {
        Self::default_instance().clone()
    }
}

impl Format {
    #[must_use]
    pub fn builder() -> FormatBuilder {
        FormatBuilder::default()
    }

    /// Builder seeded with this format's options and custom registrations.
    #[must_use]
    pub fn to_builder(&self) -> FormatBuilder {
        FormatBuilder {
            configuration: self.inner.configuration.clone(),
            registry: self.inner.custom.clone(),
        }
    }

    /// Process-wide format with default options and the built-in registry.
    ///
    /// Initialized on first use; every call returns the same instance.
    #[must_use]
    pub fn default_instance() -> &'static Self {
        &DEFAULT_FORMAT
    }

    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.inner.configuration
    }

    /// Built-in converters merged with the custom registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.inner.configuration, &self.inner.registry)
    }

    fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.inner.configuration, &self.inner.registry)
    }

    /// # Errors
    ///
    /// Returns the converter's [`WeftError::Encoding`] error, if any.
    pub fn encode_to_element<C: Converter + ?Sized>(
        &self,
        converter: &C,
        value: &C::Value,
    ) -> Result<Element, WeftError> {
        converter.encode(value, &self.encoder())
    }

    /// # Errors
    ///
    /// Returns [`WeftError::MalformedInput`] when the tree does not match the converter.
    pub fn decode_from_element<C: Converter + ?Sized>(
        &self,
        converter: &C,
        element: &Element,
    ) -> Result<C::Value, WeftError> {
        converter.decode(element, &self.decoder())
    }

    /// Encodes `value` and renders it with the configured printing options.
    ///
    /// # Errors
    ///
    /// Returns the converter's [`WeftError::Encoding`] error, if any.
    pub fn encode_to_string<C: Converter + ?Sized>(
        &self,
        converter: &C,
        value: &C::Value,
    ) -> Result<String, WeftError> {
        let element = self.encode_to_element(converter, value)?;
        Ok(write_to_string(&element, &self.inner.configuration.writer_options()))
    }

    /// Decodes exactly one value from `text`.
    ///
    /// # Errors
    ///
    /// * [`WeftError::MalformedInput`] on syntax errors or a shape mismatch.
    /// * [`WeftError::TrailingData`] when anything but whitespace follows the value.
    pub fn decode_from_str<C: Converter + ?Sized>(
        &self,
        converter: &C,
        text: &str,
    ) -> Result<C::Value, WeftError> {
        let mut reader = Reader::new(text, self.inner.configuration.reader_options());
        let element = reader.read_element()?;
        let value = self.decode_from_element(converter, &element)?;
        if let Some(offset) = reader.trailing_offset() {
            return Err(WeftError::TrailingData { offset, context: None });
        }
        Ok(value)
    }

    /// Parses `text` into the tree model under the configured reader options.
    ///
    /// # Errors
    ///
    /// Same as [`Format::decode_from_str`].
    pub fn parse_to_element(&self, text: &str) -> Result<Element, WeftError> {
        let mut reader = Reader::new(text, self.inner.configuration.reader_options());
        let element = reader.read_element()?;
        if let Some(offset) = reader.trailing_offset() {
            return Err(WeftError::TrailingData { offset, context: None });
        }
        Ok(element)
    }

    /// Encodes with the converter registered for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::NoConverterFound`] if the registry has no converter for `T`.
    pub fn to_text<T: 'static>(&self, value: &T) -> Result<String, WeftError> {
        let converter = self.inner.registry.resolve_contextual_or_default::<T>()?;
        self.encode_to_string(&*converter, value)
    }

    /// Decodes with the converter registered for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::NoConverterFound`] if the registry has no converter for `T`.
    pub fn from_text<T: 'static>(&self, text: &str) -> Result<T, WeftError> {
        let converter = self.inner.registry.resolve_contextual_or_default::<T>()?;
        self.decode_from_str(&*converter, text)
    }
}

/// Collects options and registrations for a [`Format`].
///
/// Consumed by [`FormatBuilder::build`], which checks the options, merges the built-in registry
/// with the custom one and validates polymorphic hierarchies.
#[derive(Debug, Default)]
pub struct FormatBuilder {
    configuration: Configuration,
    registry: Registry,
}

impl FormatBuilder {
    /// Replaces every option at once, keeping registrations.
    #[must_use]
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Merges `registry` over the registrations collected so far.
    #[must_use]
    pub fn registry(mut self, registry: &Registry) -> Self {
        self.registry = self.registry.merge(registry);
        self
    }

    /// Registers one converter.
    #[must_use]
    pub fn register<C: Converter>(mut self, converter: C) -> Self {
        self.registry = self.registry.register(converter);
        self
    }

    #[must_use]
    pub const fn encode_defaults(mut self, enabled: bool) -> Self {
        self.configuration.encode_defaults = enabled;
        self
    }

    #[must_use]
    pub const fn ignore_unknown_keys(mut self, enabled: bool) -> Self {
        self.configuration.ignore_unknown_keys = enabled;
        self
    }

    #[must_use]
    pub const fn is_lenient(mut self, enabled: bool) -> Self {
        self.configuration.is_lenient = enabled;
        self
    }

    #[must_use]
    pub const fn serialize_special_floating_point_values(mut self, enabled: bool) -> Self {
        self.configuration.serialize_special_floating_point_values = enabled;
        self
    }

    #[must_use]
    pub const fn allow_structured_map_keys(mut self, enabled: bool) -> Self {
        self.configuration.allow_structured_map_keys = enabled;
        self
    }

    #[must_use]
    pub const fn pretty_print(mut self, enabled: bool) -> Self {
        self.configuration.pretty_print = enabled;
        self
    }

    #[must_use]
    pub const fn unquoted_print(mut self, enabled: bool) -> Self {
        self.configuration.unquoted_print = enabled;
        self
    }

    #[must_use]
    pub fn indent(mut self, indent: impl Into<Cow<'static, str>>) -> Self {
        self.configuration.indent = indent.into();
        self
    }

    #[must_use]
    pub const fn coerce_input_values(mut self, enabled: bool) -> Self {
        self.configuration.coerce_input_values = enabled;
        self
    }

    #[must_use]
    pub const fn use_array_polymorphism(mut self, enabled: bool) -> Self {
        self.configuration.use_array_polymorphism = enabled;
        self
    }

    #[must_use]
    pub fn class_discriminator(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.configuration.class_discriminator = key.into();
        self
    }

    /// # Errors
    ///
    /// * [`WeftError::InvalidConfiguration`] for contradicting options.
    /// * [`WeftError::AmbiguousDiscriminator`] or [`WeftError::DiscriminatorConflict`] when a
    ///   registered hierarchy cannot be encoded unambiguously.
    pub fn build(self) -> Result<Format, WeftError> {
        let Self { configuration, registry: custom } = self;
        configuration.check()?;

        let registry = default_registry().merge(&custom);
        validator::validate(&configuration, &registry)?;

        debug!(
            converters = registry.len(),
            custom = custom.len(),
            pretty_print = configuration.pretty_print(),
            lenient = configuration.is_lenient(),
            "Format constructed"
        );
        Ok(Format { inner: Arc::new(FormatInner { configuration, registry, custom }) })
    }
}
