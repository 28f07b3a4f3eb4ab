//! Lexer for the vela scripting language: turns source text into a token
//! stream, deferring literal-value decoding to [`literal`] so malformed
//! numeric/escape content never stops tokenization early.

pub mod cursor;
pub mod error;
mod lexer;
pub mod literal;
pub mod token;
pub mod unicode;

pub use cursor::Cursor;
pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;
    use vela_util::{Handler, Interner};

    #[test]
    fn tokenizes_a_full_expression_statement() {
        let handler = Handler::new();
        let mut interner = Interner::new();
        let lexer = Lexer::new("console.log(1 + 2 * 3);", &handler, &mut interner);
        let kinds: Vec<_> = lexer.map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Star,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn shebang_is_skipped() {
        let handler = Handler::new();
        let mut interner = Interner::new();
        let lexer = Lexer::new("#!/usr/bin/env vela\nlet x = 1;", &handler, &mut interner);
        let kinds: Vec<_> = lexer.map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::Let);
    }

    #[quickcheck_macros::quickcheck]
    fn lexer_always_terminates_and_ends_with_eof(source: String) -> bool {
        let handler = Handler::new();
        let mut interner = Interner::new();
        let lexer = Lexer::new(&source, &handler, &mut interner);
        let tokens: Vec<_> = lexer.collect();
        matches!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof))
    }
}
