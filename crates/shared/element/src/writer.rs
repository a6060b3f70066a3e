use std::borrow::Cow;

use crate::element::{Array, Element, Literal, Object};

/// Default indent used for pretty printing.
pub const DEFAULT_INDENT: &str = "    ";

/// Options controlling the text produced by [`write_to_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// One entry per line, indented with [`WriterOptions::indent`].
    pub pretty: bool,
    pub indent: Cow<'static, str>,
    /// Print keys and strings bare when the result is unambiguous.
    pub unquoted: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { pretty: false, indent: Cow::Borrowed(DEFAULT_INDENT), unquoted: false }
    }
}

/// Renders `element` as text.
#[must_use]
pub fn write_to_string(element: &Element, options: &WriterOptions) -> String {
    let mut writer = Writer { options, out: String::new(), level: 0 };
    writer.write_element(element);
    writer.out
}

struct Writer<'o> {
    options: &'o WriterOptions,
    out: String,
    level: usize,
}

impl Writer<'_> {
    fn write_element(&mut self, element: &Element) {
        match element {
            Element::Null => self.out.push_str("null"),
            Element::Literal(literal) => self.write_literal(literal),
            Element::Object(object) => self.write_object(object),
            Element::Array(array) => self.write_array(array),
        }
    }

    fn write_literal(&mut self, literal: &Literal) {
        if literal.is_quoted() {
            self.write_string(literal.content());
        } else {
            self.out.push_str(literal.content());
        }
    }

    fn write_object(&mut self, object: &Object) {
        if object.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.level += 1;
        for (i, (key, value)) in object.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline();
            self.write_string(key);
            self.out.push(':');
            if self.options.pretty {
                self.out.push(' ');
            }
            self.write_element(value);
        }
        self.level -= 1;
        self.newline();
        self.out.push('}');
    }

    fn write_array(&mut self, array: &Array) {
        if array.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        self.level += 1;
        for (i, item) in array.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline();
            self.write_element(item);
        }
        self.level -= 1;
        self.newline();
        self.out.push(']');
    }

    fn newline(&mut self) {
        if !self.options.pretty {
            return;
        }
        self.out.push('\n');
        for _ in 0..self.level {
            self.out.push_str(&self.options.indent);
        }
    }

    fn write_string(&mut self, value: &str) {
        if self.options.unquoted && is_safe_unquoted(value) {
            self.out.push_str(value);
            return;
        }
        self.out.push('"');
        escape_into(&mut self.out, value);
        self.out.push('"');
    }
}

/// A string may be printed bare when reading it back yields the same string token.
fn is_safe_unquoted(value: &str) -> bool {
    let Some(first) = value.bytes().next() else {
        return false;
    };
    if first.is_ascii_digit() || first == b'-' {
        return false;
    }
    if matches!(value, "true" | "false" | "null" | "NaN" | "Infinity") {
        return false;
    }
    value.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}

fn escape_into(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
}
