use std::collections::BTreeMap;
use std::fmt;

use weft_element::{Array, Element, Literal, Object};

use crate::converter::Converter;
use crate::descriptor::{ConverterKind, Descriptor};
use crate::engine::{Decoder, Encoder};
use crate::error::WeftError;

/// Wraps a converter to accept and produce `null` as `None`.
#[derive(Debug)]
pub struct Nullable<C> {
    inner: C,
    descriptor: Descriptor,
}

impl<C: Converter> Nullable<C> {
    pub fn new(inner: C) -> Self {
        let descriptor = inner.descriptor().clone().into_nullable();
        Self { inner, descriptor }
    }
}

impl<C: Converter> Converter for Nullable<C> {
    type Value = Option<C::Value>;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn encode(&self, value: &Self::Value, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        value.as_ref().map_or(Ok(Element::Null), |inner| self.inner.encode(inner, encoder))
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Self::Value, WeftError> {
        if element.is_null() {
            return Ok(None);
        }
        self.inner.decode(element, decoder).map(Some)
    }
}

/// Encodes a `Vec` as an array.
#[derive(Debug)]
pub struct ListConverter<C> {
    item: C,
    descriptor: Descriptor,
}

impl<C: Converter> ListConverter<C> {
    pub fn new(item: C) -> Self {
        let name = format!("List<{}>", item.descriptor().serial_name());
        Self { item, descriptor: Descriptor::named(name, ConverterKind::List) }
    }
}

impl<C: Converter> Converter for ListConverter<C> {
    type Value = Vec<C::Value>;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn encode(&self, value: &Self::Value, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        value
            .iter()
            .map(|item| self.item.encode(item, encoder))
            .collect::<Result<Array, _>>()
            .map(Element::Array)
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Self::Value, WeftError> {
        let Some(array) = element.as_array() else {
            return Err(WeftError::malformed(format!(
                "Expected an array for '{}', found {}",
                self.descriptor.serial_name(),
                element.kind_name()
            )));
        };
        array.iter().map(|item| self.item.decode(item, decoder)).collect()
    }
}

/// Encodes a `BTreeMap` as an object keyed by the encoded keys.
///
/// Keys that encode to containers are written as a flat `[key, value, ...]` array, which
/// requires `allow_structured_map_keys`.
pub struct MapConverter<K, V> {
    key: K,
    value: V,
    descriptor: Descriptor,
}

impl<K: Converter, V: Converter> MapConverter<K, V>
where
    K::Value: Ord,
{
    pub fn new(key: K, value: V) -> Self {
        let name = format!(
            "Map<{}, {}>",
            key.descriptor().serial_name(),
            value.descriptor().serial_name()
        );
        Self { key, value, descriptor: Descriptor::named(name, ConverterKind::Map) }
    }

    fn decode_pair(
        &self,
        key: &Element,
        value: &Element,
        decoder: &Decoder<'_>,
        map: &mut BTreeMap<K::Value, V::Value>,
    ) -> Result<(), WeftError> {
        let key = self.key.decode(key, &decoder.for_map_key())?;
        let value = self.value.decode(value, decoder)?;
        map.insert(key, value);
        Ok(())
    }
}

impl<K, V> fmt::Debug for MapConverter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MapConverter").field(&self.descriptor.serial_name()).finish()
    }
}

impl<K: Converter, V: Converter> Converter for MapConverter<K, V>
where
    K::Value: Ord,
{
    type Value = BTreeMap<K::Value, V::Value>;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn encode(&self, map: &Self::Value, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let mut pairs = Vec::with_capacity(map.len());
        let mut structured = false;
        for (key, value) in map {
            let key = self.key.encode(key, encoder)?;
            structured |= !key.is_primitive();
            pairs.push((key, self.value.encode(value, encoder)?));
        }

        if structured {
            if !encoder.configuration().allow_structured_map_keys() {
                return Err(WeftError::encoding(format!(
                    "Key of '{}' encodes to a container and cannot be an object key. \
                     Use 'allow_structured_map_keys = true' to write the map as an array",
                    self.descriptor.serial_name()
                )));
            }
            return Ok(Element::Array(pairs.into_iter().flat_map(|(k, v)| [k, v]).collect()));
        }

        let object: Object = pairs
            .into_iter()
            .map(|(key, value)| {
                let key = match key {
                    Element::Literal(literal) => literal.into_content(),
                    _ => "null".to_owned(),
                };
                (key, value)
            })
            .collect();
        Ok(Element::Object(object))
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Self::Value, WeftError> {
        let mut map = BTreeMap::new();
        match element {
            Element::Object(object) => {
                let nullable_key = self.key.descriptor().is_nullable();
                for (key, value) in object.iter() {
                    let key = if nullable_key && key == "null" {
                        Element::Null
                    } else {
                        Element::Literal(Literal::string(key))
                    };
                    self.decode_pair(&key, value, decoder, &mut map)?;
                }
            },
            Element::Array(array) if decoder.configuration().allow_structured_map_keys() => {
                if array.len() % 2 != 0 {
                    return Err(WeftError::malformed(format!(
                        "Array form of '{}' must hold key/value pairs, found {} elements",
                        self.descriptor.serial_name(),
                        array.len()
                    )));
                }
                let items: Vec<&Element> = array.iter().collect();
                for pair in items.chunks_exact(2) {
                    self.decode_pair(pair[0], pair[1], decoder, &mut map)?;
                }
            },
            other => {
                return Err(WeftError::malformed(format!(
                    "Expected an object for '{}', found {}",
                    self.descriptor.serial_name(),
                    other.kind_name()
                )));
            },
        }
        Ok(map)
    }
}
