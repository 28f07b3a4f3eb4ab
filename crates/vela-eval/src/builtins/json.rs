//! `JSON.stringify` / `JSON.parse`.
//!
//! Stringify follows spec.md §6's layout rules exactly (compact when no
//! `space` argument, per-level indent otherwise, empty containers
//! collapse to `{}`/`[]`) but resolves the spec's documented escaping
//! gap toward correctness rather than reproducing it: `\" \\ \n \r \t`
//! and `\u00XX` for other control points below `0x20`.
//!
//! Parse is a small hand-written recursive-descent JSON reader. It is
//! not derived from `vela-lex`/`vela-par` — JSON is not this language's
//! grammar, it is a data format the language happens to manipulate.

use vela_gc::{Heap, JSArray, JSObject, NativeError, Value};
use vela_util::Interner;

use crate::stringify::format_number;

pub fn stringify(heap: &mut Heap, interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    let value = args.first().cloned().unwrap_or(Value::Undefined);

    if let Some(replacer) = args.get(1) {
        if !matches!(replacer, Value::Null) {
            return Err(NativeError::NotImplemented(
                "JSON.stringify: replacer must be null".to_string(),
            ));
        }
    }

    let indent = match args.get(2) {
        None | Some(Value::Undefined) => String::new(),
        Some(Value::String(handle)) => heap
            .string(*handle)
            .map(|s| s.0.to_string())
            .unwrap_or_default(),
        Some(Value::Number(n)) => {
            let clamped = n.max(0.0).min(10.0).floor() as usize;
            " ".repeat(clamped)
        }
        Some(_) => String::new(),
    };

    let text = write_value(heap, interner, &value, &indent, 0);
    Ok(Value::String(heap.alloc_string(text)))
}

fn write_value(heap: &Heap, interner: &Interner, value: &Value, indent: &str, level: usize) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::String(handle) => quote(heap.string(*handle).map(|s| &*s.0).unwrap_or("")),
        Value::Boolean(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Object(handle) => match heap.object(*handle) {
            Some(obj) => write_object(heap, interner, obj, indent, level),
            None => "{}".to_string(),
        },
        Value::Array(handle) => match heap.array(*handle) {
            Some(arr) => write_array(heap, interner, arr, indent, level),
            None => "[]".to_string(),
        },
        Value::Function(_) => "[Function]".to_string(),
        Value::Native(_) => "[Native Function]".to_string(),
    }
}

fn write_object(heap: &Heap, interner: &Interner, obj: &JSObject, indent: &str, level: usize) -> String {
    if obj.0.is_empty() {
        return "{}".to_string();
    }
    if indent.is_empty() {
        let parts: Vec<String> = obj
            .0
            .iter()
            .map(|(k, v)| format!("{}:{}", quote(interner.resolve(*k)), write_value(heap, interner, v, indent, level)))
            .collect();
        format!("{{{}}}", parts.join(","))
    } else {
        let pad = indent.repeat(level + 1);
        let close_pad = indent.repeat(level);
        let parts: Vec<String> = obj
            .0
            .iter()
            .map(|(k, v)| {
                format!(
                    "{pad}{}: {}",
                    quote(interner.resolve(*k)),
                    write_value(heap, interner, v, indent, level + 1)
                )
            })
            .collect();
        format!("{{\n{}\n{close_pad}}}", parts.join(",\n"))
    }
}

fn write_array(heap: &Heap, interner: &Interner, arr: &JSArray, indent: &str, level: usize) -> String {
    if arr.0.is_empty() {
        return "[]".to_string();
    }
    if indent.is_empty() {
        let parts: Vec<String> = arr.0.iter().map(|v| write_value(heap, interner, v, indent, level)).collect();
        format!("[{}]", parts.join(","))
    } else {
        let pad = indent.repeat(level + 1);
        let close_pad = indent.repeat(level);
        let parts: Vec<String> = arr
            .0
            .iter()
            .map(|v| format!("{pad}{}", write_value(heap, interner, v, indent, level + 1)))
            .collect();
        format!("[\n{}\n{close_pad}]", parts.join(",\n"))
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn parse(heap: &mut Heap, interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    let handle = match args.first() {
        Some(Value::String(h)) => *h,
        _ => return Err(NativeError::InvalidArgument("JSON.parse expects a string argument".to_string())),
    };
    let text = heap.string(handle).map(|s| s.0.to_string()).unwrap_or_default();
    let chars: Vec<char> = text.chars().collect();
    let mut parser = Parser { chars: &chars, pos: 0 };
    parser.skip_ws();
    let value = parser.parse_value(heap, interner)?;
    parser.skip_ws();
    if parser.pos != parser.chars.len() {
        return Err(NativeError::InvalidArgument("unexpected trailing characters in JSON text".to_string()));
    }
    Ok(value)
}

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t') | Some('\n') | Some('\r')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, c: char) -> Result<(), NativeError> {
        if self.advance() == Some(c) {
            Ok(())
        } else {
            Err(NativeError::InvalidArgument(format!("expected '{c}' in JSON text")))
        }
    }

    fn expect_literal(&mut self, lit: &str) -> Result<(), NativeError> {
        for expected in lit.chars() {
            if self.advance() != Some(expected) {
                return Err(NativeError::InvalidArgument(format!("invalid JSON literal, expected '{lit}'")));
            }
        }
        Ok(())
    }

    fn parse_value(&mut self, heap: &mut Heap, interner: &mut Interner) -> Result<Value, NativeError> {
        self.skip_ws();
        match self.peek() {
            Some('{') => self.parse_object(heap, interner),
            Some('[') => self.parse_array(heap, interner),
            Some('"') => {
                let s = self.parse_string()?;
                Ok(Value::String(heap.alloc_string(s)))
            }
            Some('t') => {
                self.expect_literal("true")?;
                Ok(Value::Boolean(true))
            }
            Some('f') => {
                self.expect_literal("false")?;
                Ok(Value::Boolean(false))
            }
            Some('n') => {
                self.expect_literal("null")?;
                Ok(Value::Null)
            }
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            _ => Err(NativeError::InvalidArgument("unexpected character in JSON text".to_string())),
        }
    }

    fn parse_object(&mut self, heap: &mut Heap, interner: &mut Interner) -> Result<Value, NativeError> {
        self.expect('{')?;
        let mut object = JSObject::default();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.advance();
            return Ok(Value::Object(heap.alloc_object(object)));
        }
        loop {
            self.skip_ws();
            let key_text = self.parse_string()?;
            let key = interner.intern(&key_text);
            self.skip_ws();
            self.expect(':')?;
            let value = self.parse_value(heap, interner)?;
            object.0.insert(key, value);
            self.skip_ws();
            match self.advance() {
                Some(',') => continue,
                Some('}') => break,
                _ => return Err(NativeError::InvalidArgument("expected ',' or '}' in JSON object".to_string())),
            }
        }
        Ok(Value::Object(heap.alloc_object(object)))
    }

    fn parse_array(&mut self, heap: &mut Heap, interner: &mut Interner) -> Result<Value, NativeError> {
        self.expect('[')?;
        let mut elements = Vec::new();
        self.skip_ws();
        if self.peek() == Some(']') {
            self.advance();
            return Ok(Value::Array(heap.alloc_array(JSArray(elements))));
        }
        loop {
            let value = self.parse_value(heap, interner)?;
            elements.push(value);
            self.skip_ws();
            match self.advance() {
                Some(',') => continue,
                Some(']') => break,
                _ => return Err(NativeError::InvalidArgument("expected ',' or ']' in JSON array".to_string())),
            }
        }
        Ok(Value::Array(heap.alloc_array(JSArray(elements))))
    }

    fn parse_string(&mut self) -> Result<String, NativeError> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(out),
                Some('\\') => match self.advance() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('/') => out.push('/'),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some('b') => out.push('\u{8}'),
                    Some('f') => out.push('\u{c}'),
                    Some('u') => {
                        let mut code = 0u32;
                        for _ in 0..4 {
                            let digit = self
                                .advance()
                                .and_then(|c| c.to_digit(16))
                                .ok_or_else(|| NativeError::InvalidArgument("invalid \\u escape in JSON string".to_string()))?;
                            code = code * 16 + digit;
                        }
                        out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                    }
                    _ => return Err(NativeError::InvalidArgument("invalid escape in JSON string".to_string())),
                },
                Some(c) => out.push(c),
                None => return Err(NativeError::InvalidArgument("unterminated JSON string".to_string())),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, NativeError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map(Value::Number)
            .map_err(|_| NativeError::InvalidArgument("invalid JSON number".to_string()))
    }
}
