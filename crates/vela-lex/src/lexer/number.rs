//! Numeric literal scanning.
//!
//! The lexer only delimits the literal's span here; turning the raw
//! lexeme into an `f64` happens in [`crate::literal`] once the parser asks
//! for it, so the lexer itself never needs to fail on an out-of-range
//! value.

use super::core::Lexer;
use crate::token::TokenKind;

impl<'a> Lexer<'a> {
    pub(super) fn lex_number(&mut self) -> TokenKind {
        if self.cursor.current_char() == '0' {
            match self.cursor.peek_char() {
                'x' | 'X' => return self.lex_radix_integer(|c| c.is_ascii_hexdigit()),
                'b' | 'B' => return self.lex_radix_integer(|c| c == '0' || c == '1'),
                'o' | 'O' => return self.lex_radix_integer(|c| ('0'..='7').contains(&c)),
                _ => {}
            }
        }

        let mut is_float = false;

        if self.cursor.current_char() == '.' {
            // Leading-dot float, e.g. `.5`. `lex_dot` only routes here
            // after confirming a digit follows.
            is_float = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() || self.cursor.current_char() == '_'
            {
                self.cursor.advance();
            }
        } else {
            while self.cursor.current_char().is_ascii_digit() || self.cursor.current_char() == '_'
            {
                self.cursor.advance();
            }
            if self.cursor.current_char() == '.' && self.cursor.peek_char().is_ascii_digit() {
                is_float = true;
                self.cursor.advance();
                while self.cursor.current_char().is_ascii_digit()
                    || self.cursor.current_char() == '_'
                {
                    self.cursor.advance();
                }
            }
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            let snapshot = self.cursor.snapshot();
            self.cursor.advance();
            if matches!(self.cursor.current_char(), '+' | '-') {
                self.cursor.advance();
            }
            if self.cursor.current_char().is_ascii_digit() {
                is_float = true;
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            } else {
                self.report_error_at(self.token_start_span(), "no digits in float exponent");
                self.cursor.restore(snapshot);
                return TokenKind::Number;
            }
        }

        if !is_float && self.cursor.current_char() == 'n' {
            self.cursor.advance();
            return TokenKind::BigInt;
        }

        TokenKind::Number
    }

    /// `0x`/`0b`/`0o`-prefixed integers, sharing the underscore-separator
    /// and `n`-suffix handling.
    fn lex_radix_integer(&mut self, is_digit: impl Fn(char) -> bool) -> TokenKind {
        self.cursor.advance(); // '0'
        self.cursor.advance(); // x/b/o
        let mut saw_digit = false;
        while is_digit(self.cursor.current_char()) || self.cursor.current_char() == '_' {
            if self.cursor.current_char() != '_' {
                saw_digit = true;
            }
            self.cursor.advance();
        }
        if !saw_digit {
            self.report_error_at(self.token_start_span(), "no digits in numeric literal");
        }
        if self.cursor.current_char() == 'n' {
            self.cursor.advance();
            return TokenKind::BigInt;
        }
        TokenKind::Number
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::core::Lexer;
    use crate::token::TokenKind;
    use vela_util::{Handler, Interner};

    fn kinds(source: &str) -> Vec<TokenKind> {
        let handler = Handler::new();
        let mut interner = Interner::new();
        let lexer = Lexer::new(source, &handler, &mut interner);
        lexer.map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_decimal_integer() {
        assert_eq!(kinds("123"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn lexes_hex_literal() {
        assert_eq!(kinds("0xFF"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn lexes_binary_literal() {
        assert_eq!(kinds("0b1010"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn lexes_octal_literal() {
        assert_eq!(kinds("0o17"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn lexes_bare_leading_zero_integers_as_a_single_number_token() {
        // `017` (legacy octal) and `019` (demoted to decimal) are both
        // scanned identically here — the radix/demotion decision happens
        // in `crate::literal::parse_number`, not at token-boundary time.
        assert_eq!(kinds("017"), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(kinds("019"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn lexes_float_with_exponent() {
        assert_eq!(kinds("1.5e10"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn lexes_bigint_suffix() {
        assert_eq!(kinds("42n"), vec![TokenKind::BigInt, TokenKind::Eof]);
    }

    #[test]
    fn underscores_are_allowed_as_separators() {
        assert_eq!(kinds("1_000_000"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn leading_dot_float() {
        assert_eq!(kinds(".5"), vec![TokenKind::Number, TokenKind::Eof]);
    }
}
