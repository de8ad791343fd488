use fgj_ast::Span;
use std::fmt;

/// Represents the different kinds of tokens in FGJ source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Class,
    Extends,
    Super,
    This,
    Return,
    New,

    // Identifier
    Identifier,

    // Delimiters
    LBrace,    // {
    RBrace,    // }
    LParen,    // (
    RParen,    // )
    Eq,        // =
    Dot,       // .
    Comma,     // ,
    Semicolon, // ;
    Lt,        // <
    Gt,        // >

    // Special
    Eof,
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Class => "\"class\"",
            TokenKind::Extends => "\"extends\"",
            TokenKind::Super => "\"super\"",
            TokenKind::This => "\"this\"",
            TokenKind::Return => "\"return\"",
            TokenKind::New => "\"new\"",
            TokenKind::Identifier => "identifier",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Eq => "'='",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
        };
        write!(f, "{}", text)
    }
}

/// Represents a token with its kind, span, 1-based line and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: usize,
    pub value: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, span: Span, line: usize, value: String) -> Self {
        Self {
            kind,
            span,
            line,
            value,
        }
    }
}
