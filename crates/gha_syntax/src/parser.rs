//! Recursive-descent parser.
//!
//! Precedence, loosest first: `or`, `and`, `not`, comparison (`==` ... `in`,
//! `not in`, non-associative), `+ -`, `* / // %`, unary `- +`, then postfix
//! call / index / attribute. Parsing stops at the first error.

use std::fmt;

use gha_stack::ensure_sufficient_stack;

use crate::ast::{BinaryOp, CallArg, Expr, ExprKind, Program, Stmt, StmtKind, UnaryOp};
use crate::lexer::{lex, Token, TokenKind};
use crate::Span;

/// A syntax error with the location it was detected at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

type ParseResult<T> = Result<T, ParseError>;

/// Parse a whole script.
pub fn parse(source: &str) -> ParseResult<Program> {
    let tokens = lex(source)?;
    Parser { tokens, pos: 0 }.program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    // Cursor

    fn current(&self) -> &Token {
        // The token list always ends with Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_next_kind(&self) -> &TokenKind {
        let next = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[next].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, context: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("{} {context}", kind.describe())))
        }
    }

    #[cold]
    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.current();
        ParseError::new(
            format!("expected {expected}, found {}", found.kind.describe()),
            found.span,
        )
    }

    // Statements

    fn program(mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&TokenKind::Separator) {}
            if self.check(&TokenKind::Eof) {
                break;
            }
            statements.push(self.statement()?);
            if !self.check(&TokenKind::Eof) {
                self.expect(&TokenKind::Separator, "after statement")?;
            }
        }
        Ok(Program { statements })
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.check(&TokenKind::Pass) {
            let token = self.advance();
            return Ok(Stmt {
                kind: StmtKind::Pass,
                span: token.span,
            });
        }

        let expr = self.expression()?;
        if !self.check(&TokenKind::Eq) {
            let span = expr.span;
            return Ok(Stmt {
                kind: StmtKind::Expr(expr),
                span,
            });
        }

        let eq = self.advance();
        if !expr.is_assignable() {
            return Err(ParseError::new("invalid assignment target", expr.span.merge(eq.span)));
        }
        let value = self.expression()?;
        let span = expr.span.merge(value.span);
        Ok(Stmt {
            kind: StmtKind::Assign {
                target: expr,
                value,
            },
            span,
        })
    }

    // Expressions

    fn expression(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.or_expr())
    }

    fn or_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.and_expr()?;
        while self.eat(&TokenKind::Or) {
            let right = self.and_expr()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.not_expr()?;
        while self.eat(&TokenKind::And) {
            let right = self.not_expr()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn not_expr(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Not) {
            let token = self.advance();
            let operand = ensure_sufficient_stack(|| self.not_expr())?;
            let span = token.span.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let left = self.additive()?;
        let Some(op) = self.comparison_op() else {
            return Ok(left);
        };
        let right = self.additive()?;
        if self.comparison_op().is_some() {
            return Err(ParseError::new(
                "chained comparisons are not supported; combine them with `and`",
                self.current().span,
            ));
        }
        Ok(binary(op, left, right))
    }

    /// Consume a comparison operator if one is next.
    fn comparison_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek_kind() {
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::In => BinaryOp::In,
            TokenKind::Not if *self.peek_next_kind() == TokenKind::In => {
                self.advance();
                BinaryOp::NotIn
            }
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.multiplicative()?;
            left = binary(op, left, right);
        }
    }

    fn multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::SlashSlash => BinaryOp::FloorDiv,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = binary(op, left, right);
        }
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            _ => return self.postfix(),
        };
        let token = self.advance();
        let operand = ensure_sufficient_stack(|| self.unary())?;
        let span = token.span.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            match self.peek_kind() {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.call_args()?;
                    let close = self.expect(&TokenKind::RParen, "to close the argument list")?;
                    let span = expr.span.merge(close.span);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.expression()?;
                    let close = self.expect(&TokenKind::RBracket, "to close the index")?;
                    let span = expr.span.merge(close.span);
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    let token = self.advance();
                    let TokenKind::Ident(name) = token.kind else {
                        return Err(ParseError::new(
                            format!("expected attribute name after `.`, found {}", token.kind.describe()),
                            token.span,
                        ));
                    };
                    let span = expr.span.merge(token.span);
                    expr = Expr::new(
                        ExprKind::Attr {
                            object: Box::new(expr),
                            name,
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    fn call_args(&mut self) -> ParseResult<Vec<CallArg>> {
        let mut args = Vec::new();
        let mut seen_named = false;

        while !self.check(&TokenKind::RParen) {
            let is_named = matches!(self.peek_kind(), TokenKind::Ident(_))
                && *self.peek_next_kind() == TokenKind::Eq;

            if is_named {
                let name_token = self.advance();
                self.advance();
                let value = self.expression()?;
                let TokenKind::Ident(name) = name_token.kind else {
                    unreachable!("checked by is_named");
                };
                let span = name_token.span.merge(value.span);
                args.push(CallArg::Named { name, value, span });
                seen_named = true;
            } else {
                let value = self.expression()?;
                if seen_named {
                    return Err(ParseError::new(
                        "positional argument follows keyword argument",
                        value.span,
                    ));
                }
                args.push(CallArg::Positional(value));
            }

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.advance();
        let span = token.span;
        let kind = match token.kind {
            TokenKind::None => ExprKind::None,
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Int(n) => ExprKind::Int(n),
            TokenKind::Float(f) => ExprKind::Float(f),
            TokenKind::Str(s) => ExprKind::Str(s),
            TokenKind::Ident(name) => ExprKind::Name(name),
            TokenKind::LParen => {
                let inner = self.expression()?;
                let close = self.expect(&TokenKind::RParen, "to close the parenthesis")?;
                return Ok(Expr::new(inner.kind, span.merge(close.span)));
            }
            TokenKind::LBracket => {
                let mut items = Vec::new();
                while !self.check(&TokenKind::RBracket) {
                    items.push(self.expression()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                let close = self.expect(&TokenKind::RBracket, "to close the list")?;
                return Ok(Expr::new(ExprKind::List(items), span.merge(close.span)));
            }
            TokenKind::LBrace => {
                let mut entries = Vec::new();
                while !self.check(&TokenKind::RBrace) {
                    let key = self.expression()?;
                    self.expect(&TokenKind::Colon, "after dict key")?;
                    let value = self.expression()?;
                    entries.push((key, value));
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                let close = self.expect(&TokenKind::RBrace, "to close the dict")?;
                return Ok(Expr::new(ExprKind::Dict(entries), span.merge(close.span)));
            }
            other => {
                return Err(ParseError::new(
                    format!("expected an expression, found {}", other.describe()),
                    span,
                ))
            }
        };
        Ok(Expr::new(kind, span))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}
