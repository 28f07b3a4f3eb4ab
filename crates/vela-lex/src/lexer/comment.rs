use super::core::Lexer;
use crate::error::LexError;

impl<'a> Lexer<'a> {
    pub(super) fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current_char() == '/' && self.cursor.peek_char() == '/' {
                self.skip_line_comment();
                continue;
            }
            if self.cursor.current_char() == '/' && self.cursor.peek_char() == '*' {
                self.skip_block_comment();
                continue;
            }
            break;
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    /// Block comments do not nest; the first `*/` closes them. Spec does
    /// not support nested `/* */`, unlike the teacher's compiler-comment
    /// lexer.
    fn skip_block_comment(&mut self) {
        let start_span = self.token_start_span();
        self.cursor.advance();
        self.cursor.advance();
        loop {
            if self.cursor.is_at_end() {
                self.handler_error(LexError::UnexpectedCharacter {
                    ch: '\0',
                    span: start_span,
                });
                return;
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char() == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
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
    fn skips_line_comments() {
        assert_eq!(
            kinds("1 // comment\n+ 2"),
            vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn skips_block_comments() {
        assert_eq!(
            kinds("1 /* comment */ + 2"),
            vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::Eof]
        );
    }
}
