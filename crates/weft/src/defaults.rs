//! Built-in registry: the tree model types and the primitive scalars.
//!
//! The registry is assembled once per process and shared; every [`Format`](crate::Format)
//! merges its own registry on top of it.

use std::sync::LazyLock;

use weft_element::{Array, Element, Literal, Null, Object, Primitive};

use crate::builtins::ScalarConverter;
use crate::converter::Converter;
use crate::descriptor::{ConverterKind, Descriptor};
use crate::engine::{Decoder, Encoder};
use crate::error::WeftError;
use crate::registry::Registry;

static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::new()
        .register(ElementConverter)
        .register(NullConverter)
        .register(PrimitiveConverter)
        .register(LiteralConverter)
        .register(ObjectConverter)
        .register(ArrayConverter)
        .register(ScalarConverter::<bool>::new())
        .register(ScalarConverter::<char>::new())
        .register(ScalarConverter::<String>::new())
        .register(ScalarConverter::<i8>::new())
        .register(ScalarConverter::<i16>::new())
        .register(ScalarConverter::<i32>::new())
        .register(ScalarConverter::<i64>::new())
        .register(ScalarConverter::<i128>::new())
        .register(ScalarConverter::<u8>::new())
        .register(ScalarConverter::<u16>::new())
        .register(ScalarConverter::<u32>::new())
        .register(ScalarConverter::<u64>::new())
        .register(ScalarConverter::<u128>::new())
        .register(ScalarConverter::<f32>::new())
        .register(ScalarConverter::<f64>::new())
});

/// The shared built-in registry.
#[must_use]
pub fn default_registry() -> Registry {
    DEFAULT_REGISTRY.clone()
}

fn unexpected(expected: &str, element: &Element) -> WeftError {
    WeftError::malformed(format!("Expected {expected}, found {}", element.kind_name()))
}

static ELEMENT: Descriptor = Descriptor::new("Element", ConverterKind::Composite);
static NULL: Descriptor = Descriptor::new("Null", ConverterKind::Scalar).into_nullable();
static PRIMITIVE: Descriptor = Descriptor::new("Primitive", ConverterKind::Scalar).into_nullable();
static LITERAL: Descriptor = Descriptor::new("Literal", ConverterKind::Scalar);
static OBJECT: Descriptor = Descriptor::new("Object", ConverterKind::Map);
static ARRAY: Descriptor = Descriptor::new("Array", ConverterKind::List);

/// Any tree element, passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementConverter;

impl Converter for ElementConverter {
    type Value = Element;

    fn descriptor(&self) -> &Descriptor {
        &ELEMENT
    }

    fn encode(&self, value: &Element, _: &Encoder<'_>) -> Result<Element, WeftError> {
        Ok(value.clone())
    }

    fn decode(&self, element: &Element, _: &Decoder<'_>) -> Result<Element, WeftError> {
        Ok(element.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullConverter;

impl Converter for NullConverter {
    type Value = Null;

    fn descriptor(&self) -> &Descriptor {
        &NULL
    }

    fn encode(&self, _: &Null, _: &Encoder<'_>) -> Result<Element, WeftError> {
        Ok(Element::Null)
    }

    fn decode(&self, element: &Element, _: &Decoder<'_>) -> Result<Null, WeftError> {
        if element.is_null() { Ok(Null) } else { Err(unexpected("null", element)) }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveConverter;

impl Converter for PrimitiveConverter {
    type Value = Primitive;

    fn descriptor(&self) -> &Descriptor {
        &PRIMITIVE
    }

    fn encode(&self, value: &Primitive, _: &Encoder<'_>) -> Result<Element, WeftError> {
        Ok(Element::from(value.clone()))
    }

    fn decode(&self, element: &Element, _: &Decoder<'_>) -> Result<Primitive, WeftError> {
        element.as_primitive().ok_or_else(|| unexpected("a primitive", element))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralConverter;

impl Converter for LiteralConverter {
    type Value = Literal;

    fn descriptor(&self) -> &Descriptor {
        &LITERAL
    }

    fn encode(&self, value: &Literal, _: &Encoder<'_>) -> Result<Element, WeftError> {
        Ok(Element::Literal(value.clone()))
    }

    fn decode(&self, element: &Element, _: &Decoder<'_>) -> Result<Literal, WeftError> {
        element.as_literal().cloned().ok_or_else(|| unexpected("a literal", element))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectConverter;

impl Converter for ObjectConverter {
    type Value = Object;

    fn descriptor(&self) -> &Descriptor {
        &OBJECT
    }

    fn encode(&self, value: &Object, _: &Encoder<'_>) -> Result<Element, WeftError> {
        Ok(Element::Object(value.clone()))
    }

    fn decode(&self, element: &Element, _: &Decoder<'_>) -> Result<Object, WeftError> {
        element.as_object().cloned().ok_or_else(|| unexpected("an object", element))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayConverter;

impl Converter for ArrayConverter {
    type Value = Array;

    fn descriptor(&self) -> &Descriptor {
        &ARRAY
    }

    fn encode(&self, value: &Array, _: &Encoder<'_>) -> Result<Element, WeftError> {
        Ok(Element::Array(value.clone()))
    }

    fn decode(&self, element: &Element, _: &Decoder<'_>) -> Result<Array, WeftError> {
        element.as_array().cloned().ok_or_else(|| unexpected("an array", element))
    }
}
