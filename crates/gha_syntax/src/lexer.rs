//! Lexer for the script dialect, built on logos.
//!
//! Produces owned tokens (the dialect is small and scripts are short, so
//! no interning). Newlines are significant as statement separators except
//! inside brackets, where they are dropped.

use logos::Logos;
use num_bigint::BigInt;

use crate::{ParseError, Span};

/// Raw token from logos (before literal decoding).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
#[logos(skip r"\\\r?\n")]
enum RawToken {
    #[token("\n")]
    Newline,
    #[token(";")]
    Semicolon,

    // Keywords
    #[token("True")]
    True,
    #[token("False")]
    False,
    #[token("None")]
    None,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("in")]
    In,
    #[token("pass")]
    Pass,

    // Symbols
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Operators
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("//")]
    SlashSlash,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Literals
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    Float,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Str,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
}

/// Token kind with decoded literal payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Int(BigInt),
    Float(f64),
    Str(String),
    Ident(String),

    True,
    False,
    None,
    And,
    Or,
    Not,
    In,
    Pass,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,

    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    Percent,

    /// Statement separator: a newline outside brackets, or `;`.
    Separator,
    Eof,
}

impl TokenKind {
    /// Short description for "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(f) => format!("float `{f}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Separator => "end of statement".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("`{}`", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::None => "None",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::In => "in",
            TokenKind::Pass => "pass",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::SlashSlash => "//",
            TokenKind::Percent => "%",
            TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Str(_)
            | TokenKind::Ident(_)
            | TokenKind::Separator
            | TokenKind::Eof => "",
        }
    }
}

/// A token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenize `source`. Always ends with an `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut depth: usize = 0;
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        let Ok(raw) = result else {
            return Err(lex_error(slice, span));
        };

        let kind = match raw {
            RawToken::Newline if depth > 0 => continue,
            RawToken::Newline | RawToken::Semicolon => TokenKind::Separator,

            RawToken::LParen | RawToken::LBracket | RawToken::LBrace => {
                depth += 1;
                open_kind(raw)
            }
            RawToken::RParen | RawToken::RBracket | RawToken::RBrace => {
                depth = depth.saturating_sub(1);
                close_kind(raw)
            }

            RawToken::Int => {
                let value = slice
                    .parse::<BigInt>()
                    .map_err(|_| ParseError::new(format!("invalid integer literal `{slice}`"), span))?;
                TokenKind::Int(value)
            }
            RawToken::Float => {
                let value = slice
                    .parse::<f64>()
                    .map_err(|_| ParseError::new(format!("invalid float literal `{slice}`"), span))?;
                TokenKind::Float(value)
            }
            RawToken::Str => TokenKind::Str(unescape(&slice[1..slice.len() - 1], span)?),
            RawToken::Ident => TokenKind::Ident(slice.to_string()),

            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::None => TokenKind::None,
            RawToken::And => TokenKind::And,
            RawToken::Or => TokenKind::Or,
            RawToken::Not => TokenKind::Not,
            RawToken::In => TokenKind::In,
            RawToken::Pass => TokenKind::Pass,

            RawToken::Comma => TokenKind::Comma,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::SlashSlash => TokenKind::SlashSlash,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
        };

        tokens.push(Token { kind, span });
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(end, end),
    });
    Ok(tokens)
}

fn open_kind(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::LParen => TokenKind::LParen,
        RawToken::LBracket => TokenKind::LBracket,
        _ => TokenKind::LBrace,
    }
}

fn close_kind(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::RParen => TokenKind::RParen,
        RawToken::RBracket => TokenKind::RBracket,
        _ => TokenKind::RBrace,
    }
}

#[cold]
fn lex_error(slice: &str, span: Span) -> ParseError {
    match slice.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            ParseError::new(format!("unterminated string literal (missing {quote})"), span)
        }
        Some(c) => ParseError::new(format!("unexpected character `{c}`"), span),
        None => ParseError::new("unexpected end of input", span),
    }
}

/// Process string escape sequences.
fn unescape(s: &str, span: Span) -> Result<String, ParseError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some(other) => {
                return Err(ParseError::new(
                    format!("invalid escape sequence `\\{other}`"),
                    span,
                ))
            }
            None => return Err(ParseError::new("trailing backslash in string", span)),
        }
    }

    Ok(result)
}
