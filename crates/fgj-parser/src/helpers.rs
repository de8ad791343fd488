//! Helper methods and utilities

use super::*;

impl Parser {
    pub(crate) fn current_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    pub(crate) fn previous_token(&self) -> &Token {
        &self.tokens[(self.current.saturating_sub(1)).min(self.tokens.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous_token()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_token().kind == kind
    }

    pub(crate) fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.current + offset).map(|t| t.kind)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || self.current_token().kind == TokenKind::Eof
    }

    /// Consumes a token of the given kind, or fails with "expected <what>"
    pub(crate) fn consume(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.check(kind) {
            let token = self.current_token().clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.error(format!("expected {}", what)))
        }
    }

    pub(crate) fn parse_identifier(&mut self, what: &str) -> ParseResult<String> {
        Ok(self.consume(TokenKind::Identifier, what)?.value)
    }

    /// Builds an error at the current token. A lexical error token always
    /// reports its own message instead.
    pub(crate) fn error(&self, message: String) -> ParseError {
        let token = self.current_token();
        let message = if token.kind == TokenKind::Error {
            token.value.clone()
        } else {
            message
        };
        ParseError {
            message,
            span: token.span,
            line: token.line,
        }
    }

    pub(crate) fn error_at_previous(&self, message: String) -> ParseError {
        let token = self.previous_token();
        ParseError {
            message,
            span: token.span,
            line: token.line,
        }
    }

    // =========================================================================
    // Type variable scopes
    // =========================================================================

    pub(crate) fn push_type_scope(&mut self, names: Vec<String>) {
        self.type_scopes.push(names);
    }

    pub(crate) fn pop_type_scope(&mut self) {
        self.type_scopes.pop();
    }

    /// True if `name` is a type parameter of the enclosing class or method
    pub(crate) fn is_type_var(&self, name: &str) -> bool {
        self.type_scopes
            .iter()
            .any(|scope| scope.iter().any(|n| n == name))
    }
}
