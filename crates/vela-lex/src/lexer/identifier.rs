use super::core::Lexer;
use crate::token::TokenKind;
use crate::unicode::is_identifier_continue;

impl<'a> Lexer<'a> {
    pub(super) fn lex_identifier(&mut self) -> TokenKind {
        while is_identifier_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);
        TokenKind::keyword_from_str(text).unwrap_or(TokenKind::Identifier)
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
    fn recognizes_keywords() {
        assert_eq!(
            kinds("function let const var if else for while return break continue typeof void delete instanceof in true false null"),
            vec![
                TokenKind::Function, TokenKind::Let, TokenKind::Const, TokenKind::Var,
                TokenKind::If, TokenKind::Else, TokenKind::For, TokenKind::While,
                TokenKind::Return, TokenKind::Break, TokenKind::Continue, TokenKind::Typeof,
                TokenKind::Void, TokenKind::Delete, TokenKind::Instanceof, TokenKind::In,
                TokenKind::True, TokenKind::False, TokenKind::Null, TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn allows_dollar_and_underscore() {
        assert_eq!(
            kinds("$foo _bar $_baz"),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn plain_identifier_is_not_a_keyword() {
        assert_eq!(kinds("functionCall"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }
}
