//! # Polymorphic Hierarchies
//!
//! A [`PolymorphicConverter`] encodes a closed set of subtypes behind one base type. Each
//! subtype is identified on the wire by a tag: either inline, as the value of the class
//! discriminator key inside the subtype's object, or as the first element of a
//! `[tag, value]` pair when `use_array_polymorphism` is on.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

use weft_element::{Array, Element, Literal, Object};

use crate::converter::Converter;
use crate::descriptor::{ConverterKind, Descriptor};
use crate::engine::{Decoder, Encoder};
use crate::error::WeftError;
use crate::type_key::TypeKey;

/// A base type whose values know their concrete subtype.
///
/// For an enum over subtype structs, return the `TypeId` of the struct held by each variant.
/// For a boxed trait object, forward to the concrete value through `&dyn Any`.
pub trait Polymorphic: Send + Sync + 'static {
    fn runtime_type(&self) -> TypeId;
}

/// Subtype table of one hierarchy, as seen by the configuration validator.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    base: TypeKey,
    serial_name: Cow<'static, str>,
    subtypes: Vec<SubtypeInfo>,
}

impl Hierarchy {
    #[must_use]
    pub const fn base(&self) -> TypeKey {
        self.base
    }

    #[must_use]
    pub fn serial_name(&self) -> &str {
        &self.serial_name
    }

    #[must_use]
    pub fn subtypes(&self) -> &[SubtypeInfo] {
        &self.subtypes
    }
}

#[derive(Debug, Clone)]
pub struct SubtypeInfo {
    key: TypeKey,
    tag: Cow<'static, str>,
    kind: ConverterKind,
    elements: &'static [&'static str],
}

impl SubtypeInfo {
    #[must_use]
    pub const fn key(&self) -> TypeKey {
        self.key
    }

    /// Discriminator value emitted for this subtype.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub const fn kind(&self) -> ConverterKind {
        self.kind
    }

    /// Field names the subtype's converter declares.
    #[must_use]
    pub const fn elements(&self) -> &'static [&'static str] {
        self.elements
    }
}

trait Binding<B>: Send + Sync {
    fn info(&self) -> SubtypeInfo;
    fn encode(&self, value: &B, encoder: &Encoder<'_>) -> Result<Element, WeftError>;
    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<B, WeftError>;
}

struct SubtypeBinding<B, C: Converter> {
    converter: C,
    tag: Cow<'static, str>,
    wrap: fn(C::Value) -> B,
    project: fn(&B) -> Option<&C::Value>,
}

impl<B: 'static, C: Converter> Binding<B> for SubtypeBinding<B, C> {
    fn info(&self) -> SubtypeInfo {
        SubtypeInfo {
            key: TypeKey::of::<C::Value>(),
            tag: self.tag.clone(),
            kind: self.converter.descriptor().kind(),
            elements: self.converter.descriptor().elements(),
        }
    }

    fn encode(&self, value: &B, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let Some(inner) = (self.project)(value) else {
            return Err(WeftError::Internal {
                message: format!(
                    "Value reported runtime type '{}' but did not project to it",
                    TypeKey::of::<C::Value>().name()
                )
                .into(),
                context: None,
            });
        };
        self.converter.encode(inner, encoder)
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<B, WeftError> {
        self.converter.decode(element, decoder).map(self.wrap)
    }
}

struct Subtype<B> {
    id: TypeId,
    tag: Cow<'static, str>,
    binding: Box<dyn Binding<B>>,
}

/// Converter for a base type `B` over a closed set of subtypes.
///
/// ```
/// use std::any::TypeId;
/// use weft::{Polymorphic, PolymorphicConverter, ScalarConverter};
///
/// enum Id { Number(i64), Name(String) }
///
/// impl Polymorphic for Id {
///     fn runtime_type(&self) -> TypeId {
///         match self {
///             Id::Number(_) => TypeId::of::<i64>(),
///             Id::Name(_) => TypeId::of::<String>(),
///         }
///     }
/// }
///
/// let ids = PolymorphicConverter::<Id>::builder("Id")
///     .subtype(ScalarConverter::<i64>::new(), Id::Number, |id| match id {
///         Id::Number(n) => Some(n),
///         Id::Name(_) => None,
///     })
///     .subtype(ScalarConverter::<String>::new(), Id::Name, |id| match id {
///         Id::Name(name) => Some(name),
///         Id::Number(_) => None,
///     })
///     .build();
/// assert_eq!(ids.tags().collect::<Vec<_>>(), ["i64", "String"]);
/// ```
pub struct PolymorphicConverter<B> {
    descriptor: Descriptor,
    subtypes: Vec<Subtype<B>>,
}

impl<B: Polymorphic> PolymorphicConverter<B> {
    pub fn builder(serial_name: impl Into<Cow<'static, str>>) -> PolymorphicBuilder<B> {
        PolymorphicBuilder { serial_name: serial_name.into(), subtypes: Vec::new() }
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.subtypes.iter().map(|s| s.tag.as_ref())
    }

    fn by_tag(&self, tag: &str) -> Result<&Subtype<B>, WeftError> {
        self.subtypes.iter().find(|s| s.tag == tag).ok_or_else(|| {
            WeftError::malformed(format!(
                "Subtype '{tag}' is not registered in the polymorphic scope of '{}'",
                self.descriptor.serial_name()
            ))
        })
    }

    fn tag_of(&self, element: &Element, decoder: &Decoder<'_>) -> Result<String, WeftError> {
        let literal = decoder.literal(element, "class discriminator")?;
        if !literal.is_quoted() && !decoder.relaxed_quoting() {
            return Err(WeftError::malformed(format!(
                "Expected a quoted class discriminator for '{}', found '{}'",
                self.descriptor.serial_name(),
                literal.content()
            )));
        }
        Ok(literal.content().to_owned())
    }

    fn decode_array(&self, element: &Element, decoder: &Decoder<'_>) -> Result<B, WeftError> {
        let pair = element.as_array().filter(|array| array.len() == 2).ok_or_else(|| {
            WeftError::malformed(format!(
                "Expected a [tag, value] array for '{}', found {}",
                self.descriptor.serial_name(),
                element.kind_name()
            ))
        })?;
        let (Some(tag), Some(body)) = (pair.get(0), pair.get(1)) else {
            return Err("Array of length two lost an element".into());
        };
        let tag = self.tag_of(tag, decoder)?;
        self.by_tag(&tag)?.binding.decode(body, decoder)
    }

    fn decode_inline(&self, element: &Element, decoder: &Decoder<'_>) -> Result<B, WeftError> {
        let discriminator = decoder.configuration().class_discriminator();
        let Some(object) = element.as_object() else {
            return Err(WeftError::malformed(format!(
                "Expected an object for polymorphic '{}', found {}",
                self.descriptor.serial_name(),
                element.kind_name()
            )));
        };
        let Some(tag) = object.get(discriminator) else {
            return Err(WeftError::malformed(format!(
                "Class discriminator '{discriminator}' is missing for polymorphic '{}'",
                self.descriptor.serial_name()
            )));
        };
        let subtype = self.by_tag(&self.tag_of(tag, decoder)?)?;

        let mut body = object.clone();
        body.remove(discriminator);
        subtype.binding.decode(&Element::Object(body), decoder)
    }
}

impl<B> fmt::Debug for PolymorphicConverter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolymorphicConverter")
            .field("serial_name", &self.descriptor.serial_name())
            .field("tags", &self.subtypes.iter().map(|s| &s.tag).collect::<Vec<_>>())
            .finish()
    }
}

impl<B: Polymorphic> Converter for PolymorphicConverter<B> {
    type Value = B;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn encode(&self, value: &B, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let runtime = value.runtime_type();
        let Some(subtype) = self.subtypes.iter().find(|s| s.id == runtime) else {
            return Err(WeftError::encoding(format!(
                "Runtime subtype is not registered for polymorphic encoding in the scope of '{}'",
                self.descriptor.serial_name()
            )));
        };
        let body = subtype.binding.encode(value, encoder)?;
        let tag = Literal::string(subtype.tag.as_ref());

        if encoder.configuration().use_array_polymorphism() {
            return Ok(Element::Array(Array::from(vec![Element::Literal(tag), body])));
        }

        let discriminator = encoder.configuration().class_discriminator();
        let Element::Object(fields) = body else {
            return Err(WeftError::encoding(format!(
                "Subtype '{}' of '{}' encodes to {}, which cannot carry an inline class \
                 discriminator. Use 'use_array_polymorphism = true'",
                subtype.tag,
                self.descriptor.serial_name(),
                body.kind_name()
            )));
        };
        if fields.contains_key(discriminator) {
            return Err(WeftError::encoding(format!(
                "Subtype '{}' of '{}' has a field '{discriminator}' that conflicts with the \
                 class discriminator",
                subtype.tag,
                self.descriptor.serial_name()
            )));
        }
        let mut object = Object::with_capacity(fields.len() + 1);
        object.insert(discriminator, tag);
        for (key, value) in fields {
            object.insert(key, value);
        }
        Ok(Element::Object(object))
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<B, WeftError> {
        if decoder.configuration().use_array_polymorphism() {
            self.decode_array(element, decoder)
        } else {
            self.decode_inline(element, decoder)
        }
    }

    fn hierarchy(&self) -> Option<Hierarchy> {
        Some(Hierarchy {
            base: TypeKey::of::<B>(),
            serial_name: Cow::Owned(self.descriptor.serial_name().to_owned()),
            subtypes: self.subtypes.iter().map(|s| s.binding.info()).collect(),
        })
    }
}

/// Collects the subtypes of a [`PolymorphicConverter`].
pub struct PolymorphicBuilder<B> {
    serial_name: Cow<'static, str>,
    subtypes: Vec<Subtype<B>>,
}

impl<B: Polymorphic> PolymorphicBuilder<B> {
    /// Adds a subtype tagged with its converter's serial name.
    ///
    /// `wrap` lifts a decoded subtype value into the base type; `project` extracts it again and
    /// must return `Some` whenever [`Polymorphic::runtime_type`] reports `C::Value`.
    #[must_use]
    pub fn subtype<C: Converter>(
        self,
        converter: C,
        wrap: fn(C::Value) -> B,
        project: fn(&B) -> Option<&C::Value>,
    ) -> Self {
        let tag = Cow::Owned(converter.descriptor().serial_name().to_owned());
        self.tagged_subtype(tag, converter, wrap, project)
    }

    /// Adds a subtype with an explicit discriminator tag.
    #[must_use]
    pub fn tagged_subtype<C: Converter>(
        mut self,
        tag: impl Into<Cow<'static, str>>,
        converter: C,
        wrap: fn(C::Value) -> B,
        project: fn(&B) -> Option<&C::Value>,
    ) -> Self {
        let id = TypeId::of::<C::Value>();
        let tag = tag.into();
        self.subtypes.retain(|s| s.id != id);
        self.subtypes.push(Subtype {
            id,
            tag: tag.clone(),
            binding: Box::new(SubtypeBinding { converter, tag, wrap, project }),
        });
        self
    }

    #[must_use]
    pub fn build(self) -> PolymorphicConverter<B> {
        PolymorphicConverter {
            descriptor: Descriptor::named(self.serial_name, ConverterKind::Polymorphic),
            subtypes: self.subtypes,
        }
    }
}

impl<B> fmt::Debug for PolymorphicBuilder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolymorphicBuilder")
            .field("serial_name", &self.serial_name)
            .field("subtypes", &self.subtypes.len())
            .finish()
    }
}
