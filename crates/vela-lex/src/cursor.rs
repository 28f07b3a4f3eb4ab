//! Byte cursor over the source text, with a fast ASCII path and a slow
//! path for multi-byte UTF-8, tracking line/column as it advances.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorSnapshot {
    position: usize,
    line: u32,
    column: u32,
}

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
    is_ascii: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
            is_ascii: source.is_ascii(),
        }
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    #[inline]
    pub fn current_byte(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position).copied()
    }

    #[inline]
    pub fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + offset).copied()
    }

    /// The character at the cursor, or `'\0'` at end of input. `\0` is a
    /// safe sentinel here: embedded NULs in source text fall through to
    /// `UnexpectedCharacter` the same as any other non-token byte.
    pub fn current_char(&self) -> char {
        self.char_at(0).unwrap_or('\0')
    }

    pub fn peek_char(&self) -> char {
        self.char_at(1).unwrap_or('\0')
    }

    /// The character `offset` *characters* ahead of the cursor.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if self.is_ascii {
            let idx = self.position + offset;
            return self.source.as_bytes().get(idx).map(|&b| b as char);
        }
        self.source[self.position..].chars().nth(offset)
    }

    /// Advance past the current character, updating line/column.
    pub fn advance(&mut self) -> Option<char> {
        if self.is_at_end() {
            return None;
        }
        let ch = if self.is_ascii {
            let byte = self.source.as_bytes()[self.position];
            self.position += 1;
            byte as char
        } else {
            let ch = self.source[self.position..].chars().next()?;
            self.position += ch.len_utf8();
            ch
        };
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Consume and return `true` if the current character equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), ' ' | '\t' | '\r' | '\n') {
            self.advance();
        }
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_ascii() {
        let mut cursor = Cursor::new("let");
        assert_eq!(cursor.advance(), Some('l'));
        assert_eq!(cursor.advance(), Some('e'));
        assert_eq!(cursor.advance(), Some('t'));
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn advances_through_utf8() {
        let mut cursor = Cursor::new("é€x");
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.advance(), Some('€'));
        assert_eq!(cursor.advance(), Some('x'));
    }

    #[test]
    fn tracks_line_and_column() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_n(3);
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
        cursor.advance_n(2);
        assert_eq!(cursor.column(), 3);
    }

    #[test]
    fn snapshot_and_restore_roundtrip() {
        let mut cursor = Cursor::new("abcdef");
        cursor.advance_n(3);
        let snap = cursor.snapshot();
        cursor.advance_n(2);
        cursor.restore(snap);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.current_char(), 'd');
    }

    #[test]
    fn slice_from_returns_consumed_text() {
        let mut cursor = Cursor::new("hello world");
        let start = cursor.position();
        cursor.advance_n(5);
        assert_eq!(cursor.slice_from(start), "hello");
    }
}
