//! Core Parser struct and main parsing methods

use super::*;

/// Recursive descent parser for FGJ
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
    /// Type parameter names in scope, innermost last (class, then method)
    pub(crate) type_scopes: Vec<Vec<String>>,
}

impl Parser {
    /// Creates a new parser from a token stream
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = if tokens.is_empty() {
            vec![Token {
                kind: TokenKind::Eof,
                span: Span::default(),
                line: 1,
                value: String::new(),
            }]
        } else {
            tokens
        };
        Self {
            tokens,
            current: 0,
            type_scopes: Vec::new(),
        }
    }

    /// Parses a complete program: class declarations followed by one term.
    ///
    /// Parsing stops at the first error.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut classes = Vec::new();
        while self.check(TokenKind::Class) {
            classes.push(self.parse_class_declaration()?);
        }

        let start = self.current_token().span;
        let term = self.parse_term()?;
        let span = start.merge(&self.previous_token().span);

        self.consume(TokenKind::Eof, "end of file")?;

        Ok(Program {
            classes,
            term,
            span,
        })
    }
}
