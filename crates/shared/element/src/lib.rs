//! # Elements
//!
//! The tree-element document model and its text form.
//!
//! * [`Element`] is the `null | literal | object | array` union. Literals keep their lexical form.
//! * [`Reader`] parses exactly one value per call and reports where trailing input starts,
//!   leaving the "is the whole input consumed" decision to the caller.
//! * [`write_to_string`] renders compact or pretty text, optionally without quotes.
//!
//! Keep this crate free of codec policy: options here are purely textual.
//!
//! ## Example
//!
//! ```rust
//! use weft_element::{Element, Reader, ReaderOptions, WriterOptions, write_to_string};
//!
//! let mut reader = Reader::new("{name: Ada, tags: [x, y]}", ReaderOptions { lenient: true });
//! let element = reader.read_element().unwrap();
//! assert_eq!(reader.trailing_offset(), None);
//!
//! let text = write_to_string(&element, &WriterOptions::default());
//! assert_eq!(text, r#"{"name":Ada,"tags":[x,y]}"#);
//! ```

mod element;
mod error;
mod reader;
mod writer;

pub use element::{Array, Element, Literal, Null, Object, Primitive};
pub use error::{ElementError, ElementErrorExt};
pub use reader::{MAX_DEPTH, Reader, ReaderOptions};
pub use writer::{DEFAULT_INDENT, WriterOptions, write_to_string};
