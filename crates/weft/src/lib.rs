//! A configurable structured-text codec built around explicit converters.
//!
//! A [`Format`] owns one immutable [`Configuration`] and one [`Registry`] of converters. The
//! registry is the built-in one (tree model types and primitive scalars) merged with whatever the
//! caller registers; polymorphic hierarchies in it are validated once, when the format is built,
//! so an ambiguous discriminator is reported before any data is processed.
//!
//! ## Composite Values
//!
//! Converters are plain values. A record is written by hand against [`ObjectEncoder`] and
//! [`ObjectDecoder`], which apply `encode_defaults`, `ignore_unknown_keys` and
//! `coerce_input_values` for it:
//!
//! ```rust
//! use weft::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! static POINT: Descriptor = Descriptor::composite("Point").with_elements(&["x", "y"]);
//!
//! struct PointConverter;
//!
//! impl Converter for PointConverter {
//!     type Value = Point;
//!
//!     fn descriptor(&self) -> &Descriptor {
//!         &POINT
//!     }
//!
//!     fn encode(&self, value: &Point, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
//!         let int = ScalarConverter::<i32>::new();
//!         let mut object = encoder.object(&POINT);
//!         object.field("x", &int, &value.x)?.field_with_default("y", &int, &value.y, &0)?;
//!         Ok(object.finish())
//!     }
//!
//!     fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Point, WeftError> {
//!         let int = ScalarConverter::<i32>::new();
//!         let object = decoder.object(element, &POINT)?;
//!         Ok(Point { x: object.required("x", &int)?, y: object.optional("y", &int, || 0)? })
//!     }
//! }
//!
//! # fn main() -> Result<(), WeftError> {
//! let format = Format::builder().encode_defaults(false).register(PointConverter).build()?;
//!
//! let text = format.to_text(&Point { x: 3, y: 0 })?;
//! assert_eq!(text, r#"{"x":3}"#);
//!
//! let point: Point = format.from_text(r#"{"x": 1, "y": 2}"#)?;
//! assert_eq!(point, Point { x: 1, y: 2 });
//!
//! let err = format.from_text::<Point>(r#"{"x": 1} tail"#).unwrap_err();
//! assert_eq!(err.code(), "trailing_data");
//! # Ok(())
//! # }
//! ```

mod builtins;
mod config;
mod converter;
mod defaults;
mod descriptor;
mod engine;
mod error;
mod format;
mod polymorphic;
mod registry;
mod type_key;
mod validator;

pub use builtins::{
    ContextualConverter, EnumConverter, ListConverter, MapConverter, Nullable, Scalar,
    ScalarConverter,
};
pub use config::{Configuration, DEFAULT_CLASS_DISCRIMINATOR};
pub use converter::Converter;
pub use defaults::{
    ArrayConverter, ElementConverter, LiteralConverter, NullConverter, ObjectConverter,
    PrimitiveConverter, default_registry,
};
pub use descriptor::{ConverterKind, Descriptor};
pub use engine::{Decoder, Encoder, ObjectDecoder, ObjectEncoder};
pub use error::{WeftError, WeftErrorExt};
pub use format::{Format, FormatBuilder};
pub use polymorphic::{Hierarchy, Polymorphic, PolymorphicBuilder, PolymorphicConverter, SubtypeInfo};
pub use registry::{ErasedConverter, Registry};
pub use type_key::TypeKey;
pub use validator::validate;
pub use weft_element::{Array, Element, Literal, Null, Object, Primitive};

pub mod prelude {
    pub use crate::builtins::{
        ContextualConverter, EnumConverter, ListConverter, MapConverter, Nullable, ScalarConverter,
    };
    pub use crate::converter::Converter;
    pub use crate::descriptor::Descriptor;
    pub use crate::engine::{Decoder, Encoder};
    pub use crate::error::{WeftError, WeftErrorExt};
    pub use crate::format::Format;
    pub use crate::polymorphic::{Polymorphic, PolymorphicConverter};
    pub use crate::registry::Registry;
    pub use weft_element::Element;
}
