//! Template literal scanning.
//!
//! Unlike the rest of the token stream, a template literal's interpolated
//! expressions (`${ ... }`) are ordinary tokens lexed one at a time by
//! [`Lexer::next_token`] — this module only scans the *literal* chunks
//! between interpolations. A stack of brace depths (`template_stack`)
//! tells `next_token` whether a `}` it sees closes an interpolation
//! (depth 0: hand back to this module) or an ordinary block/object
//! literal nested inside one (depth > 0: emit `RBrace` as usual).
//!
//! This sidesteps recursively invoking a second lexer over a biased
//! source slice — the whole source stays one flat token stream, so spans
//! never need rebiasing.

use super::core::Lexer;
use crate::error::LexError;
use crate::token::TokenKind;
use vela_util::Span;

impl<'a> Lexer<'a> {
    /// Called when the cursor sits just past an opening backtick, or just
    /// past the `}` that closed a `${ ... }` interpolation.
    pub(super) fn lex_template_chunk(&mut self, is_start: bool) -> TokenKind {
        let chunk_start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() {
                let span = self.span_from(chunk_start);
                self.handler_error(LexError::UnterminatedTemplateLiteral { span });
                return if is_start {
                    TokenKind::TemplateString
                } else {
                    TokenKind::TemplateTail
                };
            }
            match self.cursor.current_char() {
                '\\' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '`' => {
                    let text = self.cursor.slice_from(chunk_start);
                    self.cursor.advance();
                    self.set_pending_lexeme(text);
                    return if is_start {
                        TokenKind::TemplateString
                    } else {
                        TokenKind::TemplateTail
                    };
                }
                '$' if self.cursor.peek_char() == '{' => {
                    let text = self.cursor.slice_from(chunk_start);
                    self.cursor.advance();
                    self.cursor.advance();
                    self.set_pending_lexeme(text);
                    self.template_stack.push(0);
                    return if is_start {
                        TokenKind::TemplateHead
                    } else {
                        TokenKind::TemplateMiddle
                    };
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(
            start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
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
    fn plain_template_with_no_interpolation() {
        assert_eq!(
            kinds("`hello`"),
            vec![TokenKind::TemplateString, TokenKind::Eof]
        );
    }

    #[test]
    fn template_with_single_interpolation() {
        assert_eq!(
            kinds("`a${1}b`"),
            vec![
                TokenKind::TemplateHead,
                TokenKind::Number,
                TokenKind::TemplateTail,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn nested_braces_inside_interpolation_stay_braces() {
        assert_eq!(
            kinds("`${ {x: 1}.x }`"),
            vec![
                TokenKind::TemplateHead,
                TokenKind::LBrace,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::RBrace,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::TemplateTail,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn multiple_interpolations_emit_template_middle() {
        assert_eq!(
            kinds("`${1}mid${2}`"),
            vec![
                TokenKind::TemplateHead,
                TokenKind::Number,
                TokenKind::TemplateMiddle,
                TokenKind::Number,
                TokenKind::TemplateTail,
                TokenKind::Eof,
            ]
        );
    }
}
