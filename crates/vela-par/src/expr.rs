//! Expression parsing: a precedence ladder from assignment (lowest) down
//! to primary (highest), per spec §4.3's level list. Each level parses
//! its operand at the next-higher level and loops on left-associative
//! operators at its own level; assignment and the ternary both recurse
//! back into themselves for their right-hand side, making them
//! right-associative.

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::Parser;
use vela_lex::literal::{decode_string_escapes, parse_number};
use vela_lex::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_conditional()?;
        let op = match self.peek_kind() {
            TokenKind::Assign => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            TokenKind::StarEq => AssignOp::MulAssign,
            TokenKind::SlashEq => AssignOp::DivAssign,
            TokenKind::PercentEq => AssignOp::ModAssign,
            TokenKind::StarStarEq => AssignOp::PowAssign,
            TokenKind::AmpEq => AssignOp::AndAssign,
            TokenKind::PipeEq => AssignOp::OrAssign,
            TokenKind::CaretEq => AssignOp::XorAssign,
            TokenKind::ShlEq => AssignOp::ShlAssign,
            TokenKind::ShrEq => AssignOp::ShrAssign,
            TokenKind::UShrEq => AssignOp::UShrAssign,
            TokenKind::QuestionQuestionEq => AssignOp::NullishAssign,
            _ => return Ok(lhs),
        };
        if !lhs.is_assignment_target() {
            return Err(ParseError::InvalidAssignmentTarget { span: lhs.span() });
        }
        self.advance();
        let value = self.parse_assignment()?;
        let span = lhs.span().merge(value.span());
        Ok(Expr::Assignment(AssignmentExpr {
            op,
            target: Box::new(lhs),
            value: Box::new(value),
            span,
        }))
    }

    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        let cond = self.parse_nullish()?;
        if self.matches(TokenKind::Question) {
            let then_branch = self.parse_assignment()?;
            self.expect(TokenKind::Colon)?;
            let else_branch = self.parse_assignment()?;
            let span = cond.span().merge(else_branch.span());
            return Ok(Expr::Ternary(TernaryExpr {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
                span,
            }));
        }
        Ok(cond)
    }

    fn parse_nullish(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_logical_or()?;
        while self.matches(TokenKind::QuestionQuestion) {
            let right = self.parse_logical_or()?;
            let span = left.span().merge(right.span());
            left = Expr::Logical(LogicalExpr {
                op: LogicalOp::NullishCoalesce,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_logical_and()?;
        while self.matches(TokenKind::PipePipe) {
            let right = self.parse_logical_and()?;
            let span = left.span().merge(right.span());
            left = Expr::Logical(LogicalExpr {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_bitor()?;
        while self.matches(TokenKind::AmpAmp) {
            let right = self.parse_bitor()?;
            let span = left.span().merge(right.span());
            left = Expr::Logical(LogicalExpr {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    fn parse_bitor(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_bitxor()?;
        while self.matches(TokenKind::Pipe) {
            left = self.binary(left, BinOp::BitOr, Self::parse_bitxor)?;
        }
        Ok(left)
    }

    fn parse_bitxor(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_bitand()?;
        while self.matches(TokenKind::Caret) {
            left = self.binary(left, BinOp::BitXor, Self::parse_bitand)?;
        }
        Ok(left)
    }

    fn parse_bitand(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_equality()?;
        while self.matches(TokenKind::Amp) {
            left = self.binary(left, BinOp::BitAnd, Self::parse_equality)?;
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::NotEq,
                TokenKind::EqEqEq => BinOp::StrictEq,
                TokenKind::NotEqEq => BinOp::StrictNotEq,
                _ => break,
            };
            self.advance();
            left = self.binary(left, op, Self::parse_comparison)?;
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_shift()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::LtEq => BinOp::LtEq,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::GtEq => BinOp::GtEq,
                TokenKind::In => BinOp::In,
                TokenKind::Instanceof => BinOp::Instanceof,
                _ => break,
            };
            self.advance();
            left = self.binary(left, op, Self::parse_shift)?;
        }
        Ok(left)
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Shl => BinOp::Shl,
                TokenKind::Shr => BinOp::Shr,
                TokenKind::UShr => BinOp::UShr,
                _ => break,
            };
            self.advance();
            left = self.binary(left, op, Self::parse_term)?;
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            left = self.binary(left, op, Self::parse_factor)?;
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_exponent()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            left = self.binary(left, op, Self::parse_exponent)?;
        }
        Ok(left)
    }

    /// `**` is right-associative and binds tighter than `* / %`.
    fn parse_exponent(&mut self) -> ParseResult<Expr> {
        let left = self.parse_unary()?;
        if self.matches(TokenKind::StarStar) {
            let right = self.parse_exponent()?;
            let span = left.span().merge(right.span());
            return Ok(Expr::Binary(BinaryExpr {
                op: BinOp::Pow,
                left: Box::new(left),
                right: Box::new(right),
                span,
            }));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Bang => UnOp::Not,
            TokenKind::Tilde => UnOp::BitNot,
            TokenKind::Typeof => UnOp::Typeof,
            TokenKind::Void => UnOp::Void,
            TokenKind::Delete => UnOp::Delete,
            TokenKind::Plus => {
                // Unary `+` is accepted by the grammar but has no distinct
                // AST node; evaluate its operand and discard the op.
                self.advance();
                return self.parse_unary();
            }
            _ => return self.parse_call_chain(),
        };
        let start = self.advance().span;
        let operand = self.parse_unary()?;
        let span = start.merge(operand.span());
        Ok(Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span,
        }))
    }

    /// Call/member/index, left-to-right: `a.b[c](d).e`.
    fn parse_call_chain(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            expr = match self.peek_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let prop_tok = self.advance();
                    let property = self.property_symbol(prop_tok)?;
                    let span = expr.span().merge(prop_tok.span);
                    Expr::Member(MemberExpr {
                        object: Box::new(expr),
                        property,
                        optional: false,
                        span,
                    })
                }
                TokenKind::QuestionDot => {
                    self.advance();
                    let prop_tok = self.advance();
                    let property = self.property_symbol(prop_tok)?;
                    let span = expr.span().merge(prop_tok.span);
                    Expr::Member(MemberExpr {
                        object: Box::new(expr),
                        property,
                        optional: true,
                        span,
                    })
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    let end = self.expect(TokenKind::RBracket)?.span;
                    let span = expr.span().merge(end);
                    Expr::Index(IndexExpr {
                        object: Box::new(expr),
                        index: Box::new(index),
                        span,
                    })
                }
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_args()?;
                    let end = self.expect(TokenKind::RParen)?.span;
                    let span = expr.span().merge(end);
                    Expr::Call(CallExpr {
                        callee: Box::new(expr),
                        args,
                        span,
                    })
                }
                _ => break,
            };
        }
        Ok(expr)
    }

    fn parse_args(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_assignment()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RParen) {
                    break; // trailing comma
                }
            }
        }
        Ok(args)
    }

    fn property_symbol(&self, token: vela_lex::Token) -> ParseResult<vela_util::Symbol> {
        if token.kind != TokenKind::Identifier {
            return Err(ParseError::ExpectedToken {
                expected: TokenKind::Identifier,
                found: token.kind,
                span: token.span,
            });
        }
        Ok(self.intern_token(token))
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = parse_number(self.text(token));
                Ok(Expr::Number(value, token.span))
            }
            TokenKind::BigInt => {
                self.advance();
                let value = parse_number(self.text(token));
                Ok(Expr::Number(value, token.span))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Boolean(true, token.span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Boolean(false, token.span))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Null(token.span))
            }
            TokenKind::String => {
                self.advance();
                self.parse_string_literal(token)
            }
            TokenKind::TemplateString | TokenKind::TemplateHead => self.parse_template(),
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Identifier(self.intern_token(token), token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Function => self.parse_function_expr(),
            _ => Err(ParseError::UnexpectedToken {
                found: token.kind,
                span: token.span,
            }),
        }
    }

    fn parse_function_expr(&mut self) -> ParseResult<Expr> {
        let start = self.expect(TokenKind::Function)?.span;
        let name = if self.check(TokenKind::Identifier) {
            let name_tok = self.advance();
            Some(self.intern_token(name_tok))
        } else {
            None
        };

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
        Ok(Expr::FunctionExpr(FunctionExpr {
            name,
            params,
            body,
            span,
        }))
    }

    fn parse_string_literal(&mut self, token: vela_lex::Token) -> ParseResult<Expr> {
        let raw = self.text(token).to_string();
        let decoded = decode_string_escapes(&raw, token.span)?;
        let sym = self.intern(&decoded);
        Ok(Expr::String(sym, token.span))
    }

    fn parse_template(&mut self) -> ParseResult<Expr> {
        let start_tok = self.advance();
        let is_full = start_tok.kind == TokenKind::TemplateString;
        let mut quasis = Vec::new();
        let mut exprs = Vec::new();

        let raw = self.text(start_tok).to_string();
        let decoded = decode_string_escapes(&raw, start_tok.span)?;
        quasis.push(self.intern(&decoded));

        let mut span = start_tok.span;
        if !is_full {
            loop {
                let expr = self.parse_expr()?;
                span = span.merge(expr.span());
                exprs.push(expr);

                let chunk_tok = self.advance();
                let raw = self.text(chunk_tok).to_string();
                let decoded = decode_string_escapes(&raw, chunk_tok.span)?;
                quasis.push(self.intern(&decoded));
                span = span.merge(chunk_tok.span);

                match chunk_tok.kind {
                    TokenKind::TemplateTail => break,
                    TokenKind::TemplateMiddle => continue,
                    _ => {
                        return Err(ParseError::UnexpectedToken {
                            found: chunk_tok.kind,
                            span: chunk_tok.span,
                        })
                    }
                }
            }
        }

        Ok(Expr::Template(TemplateExpr {
            quasis,
            exprs,
            span,
        }))
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let start = self.expect(TokenKind::LBracket)?.span;
        let mut elements = Vec::new();
        if !self.check(TokenKind::RBracket) {
            loop {
                elements.push(self.parse_assignment()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RBracket) {
                    break; // trailing comma
                }
            }
        }
        let end = self.expect(TokenKind::RBracket)?.span;
        Ok(Expr::ArrayLit(ArrayLitExpr {
            elements,
            span: start.merge(end),
        }))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expr> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let mut properties = Vec::new();
        if !self.check(TokenKind::RBrace) {
            loop {
                let key = self.parse_property_key()?;
                self.expect(TokenKind::Colon)?;
                let value = self.parse_assignment()?;
                properties.push(ObjectProperty { key, value });
                if !self.matches(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RBrace) {
                    break; // trailing comma
                }
            }
        }
        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(Expr::ObjectLit(ObjectLitExpr {
            properties,
            span: start.merge(end),
        }))
    }

    fn parse_property_key(&mut self) -> ParseResult<PropertyKey> {
        let token = self.peek();
        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(PropertyKey::Identifier(self.intern_token(token)))
            }
            TokenKind::String => {
                self.advance();
                let raw = self.text(token).to_string();
                let decoded = decode_string_escapes(&raw, token.span)?;
                Ok(PropertyKey::String(self.intern(&decoded)))
            }
            _ => Err(ParseError::UnexpectedToken {
                found: token.kind,
                span: token.span,
            }),
        }
    }

    /// Shared left-associative binary-operator step: consume the operator
    /// (already peeked by the caller), parse the next-tighter operand,
    /// and combine.
    fn binary(
        &mut self,
        left: Expr,
        op: BinOp,
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let right = operand(self)?;
        let span = left.span().merge(right.span());
        Ok(Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }))
    }
}
