//! String literal scanning.
//!
//! Escapes are not decoded here — the lexeme recorded on the token is the
//! raw text between the quotes, decoded on demand by
//! [`crate::literal::decode_string_escapes`]. Deferring decoding keeps the
//! lexer itself infallible on malformed escapes; it only needs to find
//! the closing quote.

use super::core::Lexer;
use crate::error::LexError;
use crate::token::TokenKind;

impl<'a> Lexer<'a> {
    pub(super) fn lex_string(&mut self, quote: char) -> TokenKind {
        self.cursor.advance();
        let content_start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                self.handler_error(LexError::UnterminatedStringLiteral {
                    span: self.token_start_span(),
                });
                let text = self.cursor.slice_from(content_start);
                self.set_pending_lexeme(text);
                return TokenKind::String;
            }
            match self.cursor.current_char() {
                c if c == quote => {
                    let text = self.cursor.slice_from(content_start);
                    self.cursor.advance();
                    self.set_pending_lexeme(text);
                    return TokenKind::String;
                }
                '\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_at_end() {
                        self.cursor.advance();
                    }
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
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
    fn double_quoted_string() {
        assert_eq!(kinds("\"hello\""), vec![TokenKind::String, TokenKind::Eof]);
    }

    #[test]
    fn single_quoted_string() {
        assert_eq!(kinds("'hello'"), vec![TokenKind::String, TokenKind::Eof]);
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        assert_eq!(
            kinds(r#""a\"b""#),
            vec![TokenKind::String, TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_reports_error() {
        let handler = Handler::new();
        let mut interner = Interner::new();
        let lexer = Lexer::new("\"abc", &handler, &mut interner);
        let _: Vec<_> = lexer.collect();
        assert!(handler.has_errors());
    }
}
