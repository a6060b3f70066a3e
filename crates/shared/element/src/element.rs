use std::collections::hash_map::Entry;
use std::fmt;
use std::str::FromStr;

use fxhash::FxHashMap;

use crate::error::ElementError;
use crate::reader::{Reader, ReaderOptions};
use crate::writer::{WriterOptions, write_to_string};

/// A parsed structured document, independent of its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Element {
    #[default]
    Null,
    Literal(Literal),
    Object(Object),
    Array(Array),
}

impl Element {
    /// Short variant name used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Literal(_) => "literal",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `true` for scalars (null and literals), `false` for containers.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Null | Self::Literal(_))
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Scalar view of this element, `None` for containers.
    #[must_use]
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Null => Some(Primitive::Null),
            Self::Literal(literal) => Some(Primitive::Literal(literal.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&write_to_string(self, &WriterOptions::default()))
    }
}

/// Strict parse of exactly one value.
impl FromStr for Element {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = Reader::new(s, ReaderOptions::default());
        let element = reader.read_element()?;
        if let Some(offset) = reader.trailing_offset() {
            return Err(ElementError::TrailingData { offset, context: None });
        }
        Ok(element)
    }
}

impl From<Null> for Element {
    fn from(_: Null) -> Self {
        Self::Null
    }
}

impl From<Literal> for Element {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Object> for Element {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Array> for Element {
    fn from(array: Array) -> Self {
        Self::Array(array)
    }
}

impl From<Primitive> for Element {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Null => Self::Null,
            Primitive::Literal(literal) => Self::Literal(literal),
        }
    }
}

/// The `null` element as a standalone value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Null;

/// A non-null scalar kept in its lexical form.
///
/// Numbers are stored as written, so `1.10` and `1.1` stay distinct and big integers survive
/// a round trip untouched. `quoted` records whether the value is a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    content: String,
    quoted: bool,
}

impl Literal {
    /// A string literal.
    pub fn string(content: impl Into<String>) -> Self {
        Self { content: content.into(), quoted: true }
    }

    /// An unquoted token such as a number or boolean.
    pub fn raw(content: impl Into<String>) -> Self {
        Self { content: content.into(), quoted: false }
    }

    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::raw(if value { "true" } else { "false" })
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> String {
        self.content
    }

    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        self.quoted
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.content.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.content.parse().ok()
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.content.parse().ok()
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.content.parse().ok()
    }
}

/// Scalar view over the tree model: either `null` or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Literal(Literal),
}

impl Primitive {
    /// Textual content, `"null"` for the null primitive.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Literal(literal) => literal.content(),
        }
    }
}

impl From<Literal> for Primitive {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Null> for Primitive {
    fn from(_: Null) -> Self {
        Self::Null
    }
}

/// An object that keeps keys in insertion order.
///
/// Inserting an existing key replaces its value in place, so the first position wins and the
/// last value wins. Lookups go through a key index and stay constant time.
#[derive(Clone, Default)]
pub struct Object {
    entries: Vec<(String, Element)>,
    index: FxHashMap<String, usize>,
}

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Element>) -> Option<Element> {
        let key = key.into();
        let value = value.into();
        match self.index.entry(key) {
            Entry::Occupied(slot) => {
                Some(std::mem::replace(&mut self.entries[*slot.get()].1, value))
            },
            Entry::Vacant(slot) => {
                let key = slot.key().clone();
                slot.insert(self.entries.len());
                self.entries.push((key, value));
                None
            },
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Element> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (_, slot) in self.index.iter_mut().filter(|(_, slot)| **slot > position) {
            *slot -= 1;
        }
        Some(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

// The index mirrors `entries`, so comparing the ordered entries is enough.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Object {}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl IntoIterator for Object {
    type Item = (String, Element);
    type IntoIter = std::vec::IntoIter<(String, Element)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Element>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Self::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

/// An ordered sequence of elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array {
    items: Vec<Element>,
}

impl Array {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.items.push(element.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Element> {
        self.items
    }
}

impl From<Vec<Element>> for Array {
    fn from(items: Vec<Element>) -> Self {
        Self { items }
    }
}

impl<E: Into<Element>> FromIterator<E> for Array {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self { items: iter.into_iter().map(Into::into).collect() }
    }
}

impl IntoIterator for Array {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
