//! Codec for PHP `serialize()` output, the format Drupal 7 stores field and
//! instance settings in.
//!
//! Only the scalar and array forms are supported. Arrays decode to ordered
//! JSON objects keyed by the stringified array key; encoding restores integer
//! keys for any key in canonical integer form, which is what PHP itself does
//! with numeric string keys.

use super::{BlobCodec, CodecError};
use serde_json::{Map, Number, Value};

/// Deepest array nesting accepted on decode; matches serde_json's recursion limit.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, Default)]
pub struct PhpSerializer;

impl PhpSerializer {
    pub fn new() -> Self {
        PhpSerializer
    }
}

impl BlobCodec for PhpSerializer {
    fn name(&self) -> &'static str {
        "php"
    }

    fn decode(&self, blob: &str) -> Result<Value, CodecError> {
        let mut parser = Parser {
            input: blob.as_bytes(),
            pos: 0,
            depth: 0,
        };
        let value = parser.value()?;
        if parser.pos != parser.input.len() {
            return Err(parser.error("trailing data after value"));
        }
        Ok(value)
    }

    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        let mut out = String::new();
        write_value(&mut out, value)?;
        Ok(out)
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> CodecError {
        CodecError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), CodecError> {
        match self.peek() {
            Some(found) if found == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(self.error(format!(
                "expected '{}', found '{}'",
                byte as char, found as char
            ))),
            None => Err(self.error(format!("expected '{}', found end of input", byte as char))),
        }
    }

    /// Read bytes up to (not including) `terminator`, consuming the terminator.
    fn until(&mut self, terminator: u8) -> Result<&'a str, CodecError> {
        let input = self.input;
        let start = self.pos;
        let rest = &input[start..];
        let len = rest
            .iter()
            .position(|b| *b == terminator)
            .ok_or_else(|| self.error(format!("missing '{}'", terminator as char)))?;
        self.pos = start + len + 1;
        std::str::from_utf8(&rest[..len]).map_err(|_| CodecError::Syntax {
            offset: start,
            message: "invalid utf-8 in token".to_string(),
        })
    }

    fn length(&mut self) -> Result<usize, CodecError> {
        let start = self.pos;
        let token = self.until(b':')?;
        token.parse::<usize>().map_err(|_| CodecError::Syntax {
            offset: start,
            message: format!("invalid length '{}'", token),
        })
    }

    fn value(&mut self) -> Result<Value, CodecError> {
        let tag = self
            .peek()
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        match tag {
            b'N' => {
                self.expect(b';')?;
                Ok(Value::Null)
            }
            b'b' => {
                self.expect(b':')?;
                let start = self.pos;
                match self.until(b';')? {
                    "0" => Ok(Value::Bool(false)),
                    "1" => Ok(Value::Bool(true)),
                    other => Err(CodecError::Syntax {
                        offset: start,
                        message: format!("invalid boolean '{}'", other),
                    }),
                }
            }
            b'i' => {
                self.expect(b':')?;
                let start = self.pos;
                let token = self.until(b';')?;
                let parsed = token.parse::<i64>().map_err(|_| CodecError::Syntax {
                    offset: start,
                    message: format!("invalid integer '{}'", token),
                })?;
                Ok(Value::Number(parsed.into()))
            }
            b'd' => {
                self.expect(b':')?;
                let start = self.pos;
                let token = self.until(b';')?;
                let parsed = token.parse::<f64>().map_err(|_| CodecError::Syntax {
                    offset: start,
                    message: format!("invalid float '{}'", token),
                })?;
                Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| CodecError::Unsupported(format!("non-finite float '{}'", token)))
            }
            b's' => {
                self.expect(b':')?;
                let len = self.length()?;
                self.expect(b'"')?;
                let input = self.input;
                let start = self.pos;
                let end = start
                    .checked_add(len)
                    .filter(|end| *end <= input.len())
                    .ok_or_else(|| self.error("string length exceeds input"))?;
                let text = std::str::from_utf8(&input[start..end]).map_err(|_| {
                    CodecError::Syntax {
                        offset: start,
                        message: "invalid utf-8 in string".to_string(),
                    }
                })?;
                self.pos = end;
                self.expect(b'"')?;
                self.expect(b';')?;
                Ok(Value::String(text.to_string()))
            }
            b'a' => {
                self.expect(b':')?;
                let count = self.length()?;
                self.expect(b'{')?;
                if self.depth >= MAX_DEPTH {
                    let message = format!("array nesting exceeds {} levels", MAX_DEPTH);
                    return Err(self.error(message));
                }
                self.depth += 1;
                let mut map = Map::new();
                for _ in 0..count {
                    let key = match self.value()? {
                        Value::Number(n) => n.to_string(),
                        Value::String(s) => s,
                        _ => return Err(self.error("array keys must be integers or strings")),
                    };
                    let item = self.value()?;
                    map.insert(key, item);
                }
                self.expect(b'}')?;
                self.depth -= 1;
                Ok(Value::Object(map))
            }
            other => Err(CodecError::Unsupported(format!(
                "serialized type '{}'",
                other as char
            ))),
        }
    }
}

fn write_value(out: &mut String, value: &Value) -> Result<(), CodecError> {
    match value {
        Value::Null => out.push_str("N;"),
        Value::Bool(flag) => out.push_str(if *flag { "b:1;" } else { "b:0;" }),
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                out.push_str(&format!("i:{};", number));
            } else {
                let float = number
                    .as_f64()
                    .ok_or_else(|| CodecError::Unsupported(format!("number {}", number)))?;
                out.push_str(&format!("d:{};", float));
            }
        }
        Value::String(text) => write_string(out, text),
        Value::Array(items) => {
            out.push_str(&format!("a:{}:{{", items.len()));
            for (index, item) in items.iter().enumerate() {
                out.push_str(&format!("i:{};", index));
                write_value(out, item)?;
            }
            out.push('}');
        }
        Value::Object(map) => {
            out.push_str(&format!("a:{}:{{", map.len()));
            for (key, item) in map {
                write_key(out, key);
                write_value(out, item)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_string(out: &mut String, text: &str) {
    out.push_str(&format!("s:{}:\"{}\";", text.len(), text));
}

fn write_key(out: &mut String, key: &str) {
    if is_canonical_int(key) {
        out.push_str(&format!("i:{};", key));
    } else {
        write_string(out, key);
    }
}

fn is_canonical_int(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits == "0" {
        return !key.starts_with('-');
    }
    !digits.starts_with('0') && key.parse::<i64>().is_ok()
}
