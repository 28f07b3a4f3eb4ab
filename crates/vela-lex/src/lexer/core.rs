use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};
use crate::unicode::{is_identifier_continue, is_identifier_start};
use vela_util::{Handler, Interner, Span, Symbol};

pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
    handler: &'a Handler,
    interner: &'a mut Interner,
    pub(super) token_start: usize,
    pub(super) token_start_line: u32,
    pub(super) token_start_column: u32,
    /// One entry per `${ ... }` interpolation we're currently inside;
    /// the value is how many ordinary `{ }` pairs are nested within it.
    /// See `lexer::template` for why `}` handling consults this.
    pub(super) template_stack: Vec<u32>,
    pending_lexeme: Option<&'a str>,
    bom_checked: bool,
    produced_eof: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler, interner: &'a mut Interner) -> Self {
        let source = source.strip_prefix("#!").map_or(source, |_| {
            match source.find('\n') {
                Some(idx) => &source[idx + 1..],
                None => "",
            }
        });
        Self {
            cursor: Cursor::new(source),
            handler,
            interner,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            template_stack: Vec::new(),
            pending_lexeme: None,
            bom_checked: false,
            produced_eof: false,
        }
    }

    pub(super) fn set_pending_lexeme(&mut self, text: &'a str) {
        self.pending_lexeme = Some(text);
    }

    pub(super) fn handler_error(&self, err: LexError) {
        self.handler.error(err.to_string(), err.span());
    }

    pub(super) fn report_error_at(&self, span: Span, message: &str) {
        self.handler.error(message.to_string(), span);
    }

    pub(super) fn token_start_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    fn skip_bom(&mut self) {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.remaining().starts_with('\u{feff}') {
                self.cursor.advance();
            }
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_bom();
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
        self.pending_lexeme = None;

        if self.cursor.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let ch = self.cursor.current_char();
        let kind = match ch {
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '%' => self.lex_percent(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '^' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }
            '~' => {
                self.cursor.advance();
                TokenKind::Tilde
            }
            '?' => self.lex_question(),
            ':' => {
                self.cursor.advance();
                TokenKind::Colon
            }
            '.' => self.lex_dot(),
            ',' => {
                self.cursor.advance();
                TokenKind::Comma
            }
            ';' => {
                self.cursor.advance();
                TokenKind::Semicolon
            }
            '(' => {
                self.cursor.advance();
                TokenKind::LParen
            }
            ')' => {
                self.cursor.advance();
                TokenKind::RParen
            }
            '{' => {
                self.cursor.advance();
                if let Some(depth) = self.template_stack.last_mut() {
                    *depth += 1;
                }
                TokenKind::LBrace
            }
            '}' => self.lex_closing_brace(),
            '[' => {
                self.cursor.advance();
                TokenKind::LBracket
            }
            ']' => {
                self.cursor.advance();
                TokenKind::RBracket
            }
            '"' | '\'' => self.lex_string(ch),
            '`' => {
                self.cursor.advance();
                self.lex_template_chunk(true)
            }
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_identifier_start(c) => self.lex_identifier(),
            c => {
                self.cursor.advance();
                self.handler_error(LexError::UnexpectedCharacter {
                    ch: c,
                    span: self.token_start_span(),
                });
                TokenKind::Invalid
            }
        };

        self.make_token(kind)
    }

    fn lex_closing_brace(&mut self) -> TokenKind {
        match self.template_stack.last_mut() {
            Some(0) => {
                self.template_stack.pop();
                self.cursor.advance();
                self.lex_template_chunk(false)
            }
            Some(depth) => {
                *depth -= 1;
                self.cursor.advance();
                TokenKind::RBrace
            }
            None => {
                self.cursor.advance();
                TokenKind::RBrace
            }
        }
    }

    fn make_token(&mut self, kind: TokenKind) -> Token {
        let span = self.token_start_span();
        if kind == TokenKind::Eof {
            return Token::new(kind, span);
        }
        let text = self
            .pending_lexeme
            .take()
            .unwrap_or_else(|| self.cursor.slice_from(self.token_start));
        let symbol: Symbol = self.interner.intern(text);
        Token::with_lexeme(kind, span, symbol)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.produced_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.produced_eof = true;
        }
        Some(token)
    }
}

