use std::borrow::Cow;

/// Broad shape of the values a converter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    Scalar,
    Enum,
    /// A record with named fields, encoded as an object.
    Composite,
    List,
    Map,
    /// Resolved from the registry when used.
    Contextual,
    /// A closed hierarchy dispatched on a discriminator tag.
    Polymorphic,
}

/// Static description of a converter's output.
///
/// Descriptors are `const`-constructible so hand-written converters can keep one in a `static`:
///
/// ```
/// use weft::Descriptor;
///
/// static POINT: Descriptor = Descriptor::composite("Point").with_elements(&["x", "y"]);
/// assert!(POINT.has_element("y"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    serial_name: Cow<'static, str>,
    kind: ConverterKind,
    nullable: bool,
    elements: &'static [&'static str],
}

impl Descriptor {
    #[must_use]
    pub const fn new(serial_name: &'static str, kind: ConverterKind) -> Self {
        Self { serial_name: Cow::Borrowed(serial_name), kind, nullable: false, elements: &[] }
    }

    /// Descriptor with a name computed at runtime.
    pub fn named(serial_name: impl Into<Cow<'static, str>>, kind: ConverterKind) -> Self {
        Self { serial_name: serial_name.into(), kind, nullable: false, elements: &[] }
    }

    #[must_use]
    pub const fn scalar(serial_name: &'static str) -> Self {
        Self::new(serial_name, ConverterKind::Scalar)
    }

    #[must_use]
    pub const fn composite(serial_name: &'static str) -> Self {
        Self::new(serial_name, ConverterKind::Composite)
    }

    /// Declares the field names a composite converter reads and writes.
    #[must_use]
    pub const fn with_elements(mut self, elements: &'static [&'static str]) -> Self {
        self.elements = elements;
        self
    }

    #[must_use]
    pub const fn into_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn serial_name(&self) -> &str {
        &self.serial_name
    }

    #[must_use]
    pub const fn kind(&self) -> ConverterKind {
        self.kind
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn elements(&self) -> &'static [&'static str] {
        self.elements
    }

    #[must_use]
    pub fn has_element(&self, name: &str) -> bool {
        self.elements.contains(&name)
    }
}
