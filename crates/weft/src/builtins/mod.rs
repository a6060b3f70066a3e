//! Converters for standard Rust types and generic containers.

mod collections;
mod contextual;
mod enumeration;
mod scalar;

pub use collections::{ListConverter, MapConverter, Nullable};
pub use contextual::ContextualConverter;
pub use enumeration::EnumConverter;
pub use scalar::{Scalar, ScalarConverter};
