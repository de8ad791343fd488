//! Term parsing

use super::*;

impl Parser {
    /// Parses a primary term followed by any chain of field accesses and
    /// method calls.
    pub(crate) fn parse_term(&mut self) -> ParseResult<Term> {
        let mut term = self.parse_primary()?;

        while self.check(TokenKind::Dot) {
            self.advance();
            let name = self.parse_identifier("field or method name")?;

            if self.check(TokenKind::Lt) || self.check(TokenKind::LParen) {
                let type_args = self.parse_type_args()?;
                let args = self.parse_term_list()?;
                term = Term::Call {
                    base: Box::new(term),
                    method: name,
                    type_args,
                    args,
                };
            } else {
                term = Term::Field {
                    base: Box::new(term),
                    field: name,
                };
            }
        }

        Ok(term)
    }

    fn parse_primary(&mut self) -> ParseResult<Term> {
        match self.current_token().kind {
            TokenKind::This => {
                self.advance();
                Ok(Term::var("this"))
            }
            TokenKind::Identifier => {
                let name = self.current_token().value.clone();
                self.advance();
                Ok(Term::Var(name))
            }
            TokenKind::New => {
                self.advance();
                let ty = self.parse_non_variable_type("class name after \"new\"")?;
                let args = self.parse_term_list()?;
                Ok(Term::New { ty, args })
            }
            TokenKind::LParen if self.at_cast() => self.parse_cast(),
            TokenKind::LParen => {
                self.advance();
                let term = self.parse_term()?;
                self.consume(TokenKind::RParen, "')' after parenthesized term")?;
                Ok(term)
            }
            _ => Err(self.error("expected a term".to_string())),
        }
    }

    /// Decides whether the `(` under the cursor opens a cast
    fn at_cast(&self) -> bool {
        if self.peek_kind(1) != Some(TokenKind::Identifier) {
            return false;
        }
        match self.peek_kind(2) {
            Some(TokenKind::Lt) => true,
            Some(TokenKind::RParen) => matches!(
                self.peek_kind(3),
                Some(TokenKind::This)
                    | Some(TokenKind::Identifier)
                    | Some(TokenKind::New)
                    | Some(TokenKind::LParen)
            ),
            _ => false,
        }
    }

    fn parse_cast(&mut self) -> ParseResult<Term> {
        self.consume(TokenKind::LParen, "'(' to begin cast")?;
        let target = self.parse_non_variable_type("cast target type")?;
        self.consume(TokenKind::RParen, "')' after cast type")?;
        let term = self.parse_term()?;
        Ok(Term::Cast {
            target,
            term: Box::new(term),
        })
    }

    /// Parses `( t1, t2, ... )`
    fn parse_term_list(&mut self) -> ParseResult<Vec<Term>> {
        let mut terms = Vec::new();
        self.consume(TokenKind::LParen, "'(' to begin argument list")?;
        if self.check(TokenKind::RParen) {
            self.advance();
            return Ok(terms);
        }

        loop {
            terms.push(self.parse_term()?);
            if self.check(TokenKind::RParen) {
                self.advance();
                break;
            }
            if !self.check(TokenKind::Comma) {
                return Err(self.error("malformed argument list".to_string()));
            }
            self.advance();
        }
        Ok(terms)
    }
}
