//! Declaration parsing

use super::*;

impl Parser {
    pub(crate) fn parse_class_declaration(&mut self) -> ParseResult<ClassDecl> {
        let start = self.current_token().span;
        self.consume(TokenKind::Class, "\"class\"")?;

        let name = self.parse_identifier("class name")?;
        let type_params = self.parse_type_params()?;
        self.consume(TokenKind::Extends, "\"extends\" after class type")?;
        let super_type = self.parse_non_variable_type("super type")?;
        self.consume(TokenKind::LBrace, "'{' after super class type")?;

        let fields = self.parse_fields()?;
        let constructor = self.parse_constructor(&name)?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if self.is_at_end() {
                return Err(self.error("expected '}' at end of class".to_string()));
            }
            methods.push(self.parse_method()?);
        }
        self.consume(TokenKind::RBrace, "'}' at end of class")?;
        self.pop_type_scope();

        let span = start.merge(&self.previous_token().span);
        Ok(ClassDecl {
            name,
            type_params,
            super_type,
            fields,
            constructor,
            methods,
            span,
        })
    }

    /// Field declarations run until two-token lookahead finds `Name (`,
    /// which starts the constructor.
    fn parse_fields(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut fields = Vec::new();
        loop {
            if self.check(TokenKind::Identifier) && self.peek_kind(1) == Some(TokenKind::LParen) {
                break;
            }
            let ty = self.parse_type("field type")?;
            let name = self.parse_identifier("field name")?;
            self.consume(TokenKind::Semicolon, "';' after field declaration")?;
            fields.push(Declaration::new(ty, name));
        }
        Ok(fields)
    }

    fn parse_constructor(&mut self, class_name: &str) -> ParseResult<Constructor> {
        let name = self.parse_identifier("class name in constructor")?;
        if name != class_name {
            return Err(self.error_at_previous(
                "constructor name must match class name".to_string(),
            ));
        }

        let params = self.parse_params()?;

        self.consume(TokenKind::LBrace, "'{' after constructor parameter list")?;
        self.consume(TokenKind::Super, "\"super\" invocation")?;
        self.consume(TokenKind::LParen, "'(' after \"super\" in constructor")?;
        let mut super_args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                super_args.push(self.parse_identifier("field name")?);
                if self.check(TokenKind::Comma) {
                    self.advance();
                } else if self.check(TokenKind::RParen) {
                    break;
                } else {
                    return Err(self.error("malformed \"super\"".to_string()));
                }
            }
        }
        self.consume(TokenKind::RParen, "')' after \"super\" arguments")?;
        self.consume(TokenKind::Semicolon, "';' after \"super\" invocation")?;

        let mut inits = Vec::new();
        while !self.check(TokenKind::RBrace) {
            self.consume(TokenKind::This, "\"this\" in field initialization")?;
            self.consume(TokenKind::Dot, "'.' after \"this\"")?;
            let field = self.parse_identifier("field name")?;
            self.consume(TokenKind::Eq, "'=' in field initialization")?;
            let param = self.parse_identifier("parameter name")?;
            if field != param {
                return Err(self.error_at_previous(
                    "field initialization name mismatch".to_string(),
                ));
            }
            self.consume(TokenKind::Semicolon, "';' after field initialization")?;
            inits.push(FieldInit { field, param });
        }
        self.consume(TokenKind::RBrace, "'}' at end of constructor")?;

        Ok(Constructor {
            class_name: name,
            params,
            super_args,
            inits,
        })
    }

    fn parse_method(&mut self) -> ParseResult<Method> {
        let start = self.current_token().span;

        let type_params = self.parse_type_params()?;
        let return_type = self.parse_type("return type")?;
        let name = self.parse_identifier("method name")?;
        let params = self.parse_params()?;

        self.consume(TokenKind::LBrace, "'{' after method parameter list")?;
        self.consume(TokenKind::Return, "\"return\" in method body")?;
        let body = self.parse_term()?;
        self.consume(TokenKind::Semicolon, "';' after return statement")?;
        self.consume(TokenKind::RBrace, "'}' after method body")?;
        self.pop_type_scope();

        let span = start.merge(&self.previous_token().span);
        Ok(Method {
            type_params,
            return_type,
            name,
            params,
            body,
            span,
        })
    }

    fn parse_params(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut params = Vec::new();
        self.consume(TokenKind::LParen, "'(' to begin parameter list")?;
        if self.check(TokenKind::RParen) {
            self.advance();
            return Ok(params);
        }

        loop {
            let ty = self.parse_type("parameter type")?;
            let name = self.parse_identifier("variable name")?;
            params.push(Declaration::new(ty, name));

            if self.check(TokenKind::RParen) {
                self.advance();
                break;
            }
            if !self.check(TokenKind::Comma) {
                return Err(self.error("malformed parameter list".to_string()));
            }
            self.advance();
        }
        Ok(params)
    }
}
