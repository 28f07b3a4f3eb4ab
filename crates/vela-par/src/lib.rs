//! Pratt-precedence parser: turns a `vela_lex::Token` stream into a
//! `Program` (`Vec<Stmt>`) of arena-free, `Box`-owned AST nodes.
//!
//! Statement dispatch lives in [`stmt`], expression climbing in [`expr`];
//! this module holds the token cursor and the small helpers both share.

pub mod ast;
pub mod error;
mod expr;
mod stmt;

use vela_lex::{Lexer, Token, TokenKind};
use vela_util::{Handler, Interner, Span, Symbol};

pub use ast::Program;
pub use error::{ParseError, ParseResult};

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    handler: &'a Handler,
    interner: &'a mut Interner,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler, interner: &'a mut Interner) -> Self {
        Self {
            tokens,
            pos: 0,
            handler,
            interner,
        }
    }

    /// Lex and parse `source` in one step. The `Handler` collects both
    /// lexer and parser diagnostics; callers should check
    /// `handler.has_errors()` after this returns, the same way a partial
    /// program survives a single bad statement via [`Parser::synchronize`].
    pub fn parse_source(source: &str, handler: &'a Handler, interner: &'a mut Interner) -> Program {
        let lexer = Lexer::new(source, handler, interner);
        let tokens: Vec<Token> = lexer.collect();
        let mut parser = Parser::new(tokens, handler, interner);
        parser.parse_program()
    }

    pub fn parse_program(&mut self) -> Program {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.report(&err);
                    self.synchronize();
                }
            }
        }
        stmts
    }

    fn report(&self, err: &ParseError) {
        self.handler.error(err.to_string(), err.span());
    }

    /// Skip tokens until the start of what looks like the next statement,
    /// so one malformed statement doesn't cascade into spurious errors for
    /// the rest of the file.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.previous_kind() == TokenKind::Semicolon {
                return;
            }
            if matches!(
                self.peek_kind(),
                TokenKind::Let
                    | TokenKind::Const
                    | TokenKind::Var
                    | TokenKind::Function
                    | TokenKind::If
                    | TokenKind::While
                    | TokenKind::For
                    | TokenKind::Return
                    | TokenKind::LBrace
            ) {
                return;
            }
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    fn peek(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn previous(&self) -> Token {
        self.tokens[self.pos.saturating_sub(1).min(self.tokens.len() - 1)]
    }

    fn previous_kind(&self) -> TokenKind {
        self.previous().kind
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::ExpectedToken {
                expected: kind,
                found: self.peek_kind(),
                span: self.current_span(),
            })
        }
    }

    /// Resolve a token's interned lexeme back to text, e.g. to look up a
    /// keyword-shaped object key or decode a numeric literal.
    fn text(&self, token: Token) -> &str {
        token
            .lexeme
            .map(|sym| self.interner.resolve(sym))
            .unwrap_or("")
    }

    fn intern(&mut self, text: &str) -> Symbol {
        self.interner.intern(text)
    }

    /// Identifiers arrive from the lexer pre-interned; no decoding needed,
    /// unlike string/template content (see `expr::parse_string_literal`).
    fn intern_token(&self, token: Token) -> Symbol {
        token
            .lexeme
            .expect("identifier/keyword tokens always carry a lexeme")
    }
}
