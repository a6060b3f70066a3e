use std::borrow::Cow;

use crate::element::{Array, Element, Literal, Object};
use crate::error::ElementError;

/// Maximum container nesting accepted by the reader.
pub const MAX_DEPTH: usize = 512;

const SPECIAL_FLOATS: [&str; 3] = ["NaN", "Infinity", "-Infinity"];

/// Options controlling what the [`Reader`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderOptions {
    /// Accept unquoted keys and unquoted string tokens.
    pub lenient: bool,
}

/// A single-pass reader that turns text into [`Element`] trees.
///
/// The reader consumes exactly one value per [`Reader::read_element`] call and leaves the cursor
/// right after it, so callers decide whether trailing input is an error.
#[derive(Debug)]
pub struct Reader<'a> {
    input: &'a str,
    pos: usize,
    options: ReaderOptions,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub const fn new(input: &'a str, options: ReaderOptions) -> Self {
        Self { input, pos: 0, options }
    }

    /// Current byte offset into the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads the next complete value.
    ///
    /// # Errors
    /// Returns [`ElementError::Syntax`] with the byte offset of the offending input.
    pub fn read_element(&mut self) -> Result<Element, ElementError> {
        self.read_value(0)
    }

    /// Offset of the first non-whitespace byte left after the last value, if any.
    pub fn trailing_offset(&mut self) -> Option<usize> {
        self.skip_whitespace();
        (self.pos < self.input.len()).then_some(self.pos)
    }

    fn read_value(&mut self, depth: usize) -> Result<Element, ElementError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("Unexpected end of input")),
            Some(b'{') => self.read_object(depth + 1),
            Some(b'[') => self.read_array(depth + 1),
            Some(b'"') => Ok(Element::Literal(Literal::string(self.read_quoted()?))),
            Some(b @ (b'}' | b']' | b',' | b':')) => {
                Err(self.error(format!("Unexpected character '{}'", char::from(b))))
            },
            Some(_) => self.read_token_value(),
        }
    }

    fn read_object(&mut self, depth: usize) -> Result<Element, ElementError> {
        self.check_depth(depth)?;
        self.pos += 1;
        let mut object = Object::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Element::Object(object));
        }

        loop {
            self.skip_whitespace();
            let key = self.read_key()?;
            self.skip_whitespace();
            self.expect(b':')?;
            let value = self.read_value(depth)?;
            object.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Element::Object(object));
                },
                None => return Err(self.error("Unterminated object")),
                Some(b) => {
                    return Err(self.error(format!(
                        "Expected ',' or '}}' but found '{}'",
                        char::from(b)
                    )));
                },
            }
        }
    }

    fn read_array(&mut self, depth: usize) -> Result<Element, ElementError> {
        self.check_depth(depth)?;
        self.pos += 1;
        let mut array = Array::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Element::Array(array));
        }

        loop {
            array.push(self.read_value(depth)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Element::Array(array));
                },
                None => return Err(self.error("Unterminated array")),
                Some(b) => {
                    return Err(self.error(format!(
                        "Expected ',' or ']' but found '{}'",
                        char::from(b)
                    )));
                },
            }
        }
    }

    fn read_key(&mut self) -> Result<String, ElementError> {
        match self.peek() {
            Some(b'"') => self.read_quoted(),
            Some(b'}') => Err(self.error("Trailing comma before '}'")),
            None => Err(self.error("Unterminated object")),
            Some(_) if self.options.lenient => {
                let token = self.read_token();
                if token.is_empty() {
                    return Err(self.error("Expected object key"));
                }
                Ok(token.to_owned())
            },
            Some(_) => Err(self.error(
                "Expected quoted object key. Use 'is_lenient = true' to accept unquoted keys",
            )),
        }
    }

    fn read_token_value(&mut self) -> Result<Element, ElementError> {
        let start = self.pos;
        let token = self.read_token();
        if token.is_empty() {
            return Err(self.error("Expected a value"));
        }
        if token == "null" {
            return Ok(Element::Null);
        }
        if token == "true"
            || token == "false"
            || SPECIAL_FLOATS.contains(&token)
            || is_json_number(token)
            || self.options.lenient
        {
            return Ok(Element::Literal(Literal::raw(token)));
        }
        Err(ElementError::Syntax {
            message: format!(
                "Unexpected token '{token}'. Use 'is_lenient = true' to accept unquoted literals"
            )
            .into(),
            offset: start,
            context: None,
        })
    }

    fn read_token(&mut self) -> &'a str {
        let start = self.pos;
        let input = self.input;
        let bytes = input.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if is_whitespace(b) || matches!(b, b'{' | b'}' | b'[' | b']' | b',' | b':' | b'"') {
                break;
            }
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    fn read_quoted(&mut self) -> Result<String, ElementError> {
        let open = self.pos;
        self.pos += 1;
        let input = self.input;
        let bytes = input.as_bytes();
        let mut out = String::new();
        let mut run_start = self.pos;

        loop {
            let Some(&b) = bytes.get(self.pos) else {
                return Err(ElementError::Syntax {
                    message: "Unterminated string".into(),
                    offset: open,
                    context: None,
                });
            };
            match b {
                b'"' => {
                    out.push_str(&input[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                },
                b'\\' => {
                    out.push_str(&input[run_start..self.pos]);
                    self.pos += 1;
                    self.read_escape(&mut out)?;
                    run_start = self.pos;
                },
                b if b < 0x20 && !self.options.lenient => {
                    return Err(self.error("Control character in string literal"));
                },
                _ => self.pos += 1,
            }
        }
    }

    fn read_escape(&mut self, out: &mut String) -> Result<(), ElementError> {
        let Some(b) = self.peek() else {
            return Err(self.error("Unterminated escape sequence"));
        };
        self.pos += 1;
        match b {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let high = self.read_hex4()?;
                let ch = if (0xD800..0xDC00).contains(&high) {
                    if !self.input[self.pos..].starts_with("\\u") {
                        return Err(self.error("Unpaired surrogate in unicode escape"));
                    }
                    self.pos += 2;
                    let low = self.read_hex4()?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.error("Invalid low surrogate in unicode escape"));
                    }
                    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
                } else {
                    char::from_u32(high)
                };
                let Some(ch) = ch else {
                    return Err(self.error("Invalid unicode escape"));
                };
                out.push(ch);
            },
            other => {
                self.pos -= 1;
                return Err(self.error(format!("Invalid escape '\\{}'", char::from(other))));
            },
        }
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<u32, ElementError> {
        let hex = self
            .input
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| self.error("Truncated unicode escape"))?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.error("Invalid hex in unicode escape"));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| self.error("Invalid hex in unicode escape"))?;
        self.pos += 4;
        Ok(value)
    }

    fn expect(&mut self, expected: u8) -> Result<(), ElementError> {
        match self.peek() {
            Some(b) if b == expected => {
                self.pos += 1;
                Ok(())
            },
            Some(b) => Err(self.error(format!(
                "Expected '{}' but found '{}'",
                char::from(expected),
                char::from(b)
            ))),
            None => Err(self.error(format!("Expected '{}' but input ended", char::from(expected)))),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), ElementError> {
        if depth > MAX_DEPTH {
            return Err(self.error(format!("Nesting depth exceeds {MAX_DEPTH}")));
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        let input = self.input;
        let bytes = input.as_bytes();
        while bytes.get(self.pos).copied().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn error(&self, message: impl Into<Cow<'static, str>>) -> ElementError {
        ElementError::Syntax { message: message.into(), offset: self.pos, context: None }
    }
}

const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_json_number(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut i = 0;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
        },
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    i == bytes.len()
}
