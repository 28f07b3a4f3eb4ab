//! Statement parsing: top-level dispatch on the leading token, per
//! spec §4.3.

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::Parser;
use vela_lex::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.peek_kind() {
            TokenKind::Let => self.parse_var_decl(VarKind::Let, true),
            TokenKind::Const => self.parse_var_decl(VarKind::Const, true),
            TokenKind::Var => self.parse_var_decl(VarKind::Var, true),
            TokenKind::Function => self.parse_func_decl(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Break => {
                let span = self.advance().span;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Break(span))
            }
            TokenKind::Continue => {
                let span = self.advance().span;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Continue(span))
            }
            TokenKind::LBrace => self.parse_block().map(Stmt::Block),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_expr_stmt(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expr()?;
        let start = expr.span();
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::ExprStmt(ExprStmt {
            expr: Box::new(expr),
            span: start.merge(end),
        }))
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.report(&err);
                    self.synchronize();
                }
            }
        }
        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(Block {
            stmts,
            span: start.merge(end),
        })
    }

    /// `require_semi` is false inside a `for (init; ...)` clause, where
    /// the caller consumes the separating `;` itself.
    fn parse_var_decl(&mut self, kind: VarKind, require_semi: bool) -> ParseResult<Stmt> {
        let start = self.advance().span; // let/const/var
        let name_tok = self.expect(TokenKind::Identifier)?;
        let name = self.intern_token(name_tok);

        let init = if self.matches(TokenKind::Assign) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        if kind == VarKind::Const && init.is_none() {
            return Err(ParseError::ConstantWithoutInitializer { span: name_tok.span });
        }

        let mut span = start.merge(init.as_ref().map(|e| e.span()).unwrap_or(name_tok.span));
        if require_semi {
            let end = self.expect(TokenKind::Semicolon)?.span;
            span = span.merge(end);
        }
        Ok(Stmt::VarDecl(VarDecl {
            kind,
            name,
            init,
            span,
        }))
    }

    fn parse_func_decl(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Function)?.span;
        let name_tok = self.expect(TokenKind::Identifier)?;
        let name = self.intern_token(name_tok);

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let param_tok = self.expect(TokenKind::Identifier)?;
                params.push(self.intern_token(param_tok));
                if !self.matches(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RParen) {
                    break; // trailing comma
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Stmt::FuncDecl(FuncDecl {
            name,
            params,
            body,
            span,
        }))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::If)?.span;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let then_branch = Box::new(self.parse_stmt()?);
        let mut span = start.merge(then_branch.span());
        let else_branch = if self.matches(TokenKind::Else) {
            let branch = Box::new(self.parse_stmt()?);
            span = span.merge(branch.span());
            Some(branch)
        } else {
            None
        };
        Ok(Stmt::If(IfStmt {
            cond: Box::new(cond),
            then_branch,
            else_branch,
            span,
        }))
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::While)?.span;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(body.span());
        Ok(Stmt::While(WhileStmt {
            cond: Box::new(cond),
            body,
            span,
        }))
    }

    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::For)?.span;
        self.expect(TokenKind::LParen)?;

        let init = if self.matches(TokenKind::Semicolon) {
            None
        } else {
            let stmt = match self.peek_kind() {
                TokenKind::Let => self.parse_var_decl(VarKind::Let, false)?,
                TokenKind::Const => self.parse_var_decl(VarKind::Const, false)?,
                TokenKind::Var => self.parse_var_decl(VarKind::Var, false)?,
                _ => {
                    let expr = self.parse_expr()?;
                    let span = expr.span();
                    Stmt::ExprStmt(ExprStmt {
                        expr: Box::new(expr),
                        span,
                    })
                }
            };
            self.expect(TokenKind::Semicolon)?;
            Some(Box::new(stmt))
        };

        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        self.expect(TokenKind::Semicolon)?;

        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        self.expect(TokenKind::RParen)?;

        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(body.span());
        Ok(Stmt::For(ForStmt {
            init,
            cond,
            update,
            body,
            span,
        }))
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Return)?.span;
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::Return(ReturnStmt {
            value,
            span: start.merge(end),
        }))
    }
}
