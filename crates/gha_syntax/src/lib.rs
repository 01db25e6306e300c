//! Syntax layer for the githubactions script dialect.
//!
//! A script is a flat sequence of statements (expressions, assignments,
//! `pass`) over a small Python-like expression grammar. There are no
//! user-defined functions or loops: scripts call into host modules and
//! inspect the values they return.

pub mod ast;
pub mod lexer;
mod parser;
mod span;

pub use ast::{BinaryOp, CallArg, Expr, ExprKind, Program, Stmt, StmtKind, UnaryOp};
pub use lexer::{lex, Token, TokenKind};
pub use parser::{parse, ParseError};
pub use span::Span;
