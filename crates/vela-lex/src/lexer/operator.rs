use super::core::Lexer;
use crate::token::TokenKind;

impl<'a> Lexer<'a> {
    pub(super) fn lex_plus(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::PlusEq
        } else {
            TokenKind::Plus
        }
    }

    pub(super) fn lex_minus(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::MinusEq
        } else {
            TokenKind::Minus
        }
    }

    pub(super) fn lex_star(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('*') {
            if self.cursor.match_char('=') {
                TokenKind::StarStarEq
            } else {
                TokenKind::StarStar
            }
        } else if self.cursor.match_char('=') {
            TokenKind::StarEq
        } else {
            TokenKind::Star
        }
    }

    pub(super) fn lex_slash(&mut self) -> TokenKind {
        // Comments are already skipped by `skip_whitespace_and_comments`
        // before `next_token` dispatches here, so a `/` reaching this
        // point is always division.
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::SlashEq
        } else {
            TokenKind::Slash
        }
    }

    pub(super) fn lex_percent(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::PercentEq
        } else {
            TokenKind::Percent
        }
    }

    pub(super) fn lex_equals(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            if self.cursor.match_char('=') {
                TokenKind::EqEqEq
            } else {
                TokenKind::EqEq
            }
        } else if self.cursor.match_char('>') {
            TokenKind::Arrow
        } else {
            TokenKind::Assign
        }
    }

    pub(super) fn lex_bang(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            if self.cursor.match_char('=') {
                TokenKind::NotEqEq
            } else {
                TokenKind::NotEq
            }
        } else {
            TokenKind::Bang
        }
    }

    pub(super) fn lex_less(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::LtEq
        } else if self.cursor.match_char('<') {
            if self.cursor.match_char('=') {
                TokenKind::ShlEq
            } else {
                TokenKind::Shl
            }
        } else {
            TokenKind::Lt
        }
    }

    pub(super) fn lex_greater(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::GtEq
        } else if self.cursor.match_char('>') {
            if self.cursor.match_char('>') {
                if self.cursor.match_char('=') {
                    TokenKind::UShrEq
                } else {
                    TokenKind::UShr
                }
            } else if self.cursor.match_char('=') {
                TokenKind::ShrEq
            } else {
                TokenKind::Shr
            }
        } else {
            TokenKind::Gt
        }
    }

    pub(super) fn lex_ampersand(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            TokenKind::AmpAmp
        } else if self.cursor.match_char('=') {
            TokenKind::AmpEq
        } else {
            TokenKind::Amp
        }
    }

    pub(super) fn lex_pipe(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            TokenKind::PipePipe
        } else if self.cursor.match_char('=') {
            TokenKind::PipeEq
        } else {
            TokenKind::Pipe
        }
    }

    pub(super) fn lex_question(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('?') {
            if self.cursor.match_char('=') {
                TokenKind::QuestionQuestionEq
            } else {
                TokenKind::QuestionQuestion
            }
        } else if self.cursor.match_char('.') {
            TokenKind::QuestionDot
        } else {
            TokenKind::Question
        }
    }

    pub(super) fn lex_dot(&mut self) -> TokenKind {
        if self.cursor.peek_char().is_ascii_digit() {
            return self.lex_number();
        }
        self.cursor.advance();
        if self.cursor.current_char() == '.' && self.cursor.peek_char() == '.' {
            self.cursor.advance();
            self.cursor.advance();
            TokenKind::DotDotDot
        } else {
            TokenKind::Dot
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
    fn exponent_operator_and_compound_assign() {
        assert_eq!(
            kinds("** **="),
            vec![TokenKind::StarStar, TokenKind::StarStarEq, TokenKind::Eof]
        );
    }

    #[test]
    fn strict_equality_operators() {
        assert_eq!(
            kinds("=== !=="),
            vec![TokenKind::EqEqEq, TokenKind::NotEqEq, TokenKind::Eof]
        );
    }

    #[test]
    fn unsigned_shift_operators() {
        assert_eq!(
            kinds(">>> >>>="),
            vec![TokenKind::UShr, TokenKind::UShrEq, TokenKind::Eof]
        );
    }

    #[test]
    fn nullish_coalescing_and_optional_chaining() {
        assert_eq!(
            kinds("?? ??= ?."),
            vec![
                TokenKind::QuestionQuestion,
                TokenKind::QuestionQuestionEq,
                TokenKind::QuestionDot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spread_operator() {
        assert_eq!(kinds("..."), vec![TokenKind::DotDotDot, TokenKind::Eof]);
    }

    #[test]
    fn arrow_is_not_confused_with_ge() {
        assert_eq!(kinds("=>"), vec![TokenKind::Arrow, TokenKind::Eof]);
    }
}
