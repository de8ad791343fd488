//! Type and type parameter parsing

use super::*;

impl Parser {
    /// Parses a type. A bare name bound as a type variable in an enclosing
    /// scope is a variable; any other bare name `C` is sugar for `C<>`.
    pub(crate) fn parse_type(&mut self, what: &str) -> ParseResult<Type> {
        let name = self.parse_identifier(what)?;
        let is_type_var = self.is_type_var(&name);

        if self.check(TokenKind::Lt) {
            if is_type_var {
                return Err(self.error(
                    "cannot apply type parameters to a type variable".to_string(),
                ));
            }
            let args = self.parse_type_args()?;
            Ok(Type::class(name, args))
        } else if is_type_var {
            Ok(Type::Var(name))
        } else {
            Ok(Type::class(name, vec![]))
        }
    }

    pub(crate) fn parse_non_variable_type(&mut self, what: &str) -> ParseResult<ClassType> {
        match self.parse_type(what)? {
            Type::Class(ty) => Ok(ty),
            Type::Var(_) => Err(self.error_at_previous(
                "cannot use a type variable as a nonvariable type".to_string(),
            )),
        }
    }

    /// Parses an optional `<T, ...>` list; absent and `<>` both yield no arguments
    pub(crate) fn parse_type_args(&mut self) -> ParseResult<Vec<Type>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::Lt) {
            return Ok(args);
        }
        self.advance();

        if self.check(TokenKind::Gt) {
            self.advance();
            return Ok(args);
        }

        loop {
            args.push(self.parse_type("type argument")?);
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.consume(TokenKind::Gt, "'>' at end of type argument list")?;
        Ok(args)
    }

    /// Parses an optional `<X extends N, ...>` list and opens a type
    /// variable scope for it. The caller closes the scope with
    /// `pop_type_scope` once the declaration's body has been parsed.
    ///
    /// Bounds may refer to parameters declared later in the same list, so
    /// they are first read with every bare name treated as a variable, and
    /// names that turn out not to be parameters are rewritten to classes
    /// once the whole list is known.
    pub(crate) fn parse_type_params(&mut self) -> ParseResult<Vec<TypeParam>> {
        if !self.check(TokenKind::Lt) {
            self.push_type_scope(Vec::new());
            return Ok(Vec::new());
        }
        self.advance();

        let mut names: Vec<String> = Vec::new();
        let mut raw_bounds = Vec::new();
        loop {
            let name = self.parse_identifier("type variable")?;
            if names.contains(&name) {
                return Err(self.error_at_previous("duplicate type variable".to_string()));
            }
            self.consume(TokenKind::Extends, "\"extends\" in type parameter")?;
            let bound = self.parse_raw_bound()?;
            names.push(name);
            raw_bounds.push(bound);

            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.consume(TokenKind::Gt, "'>' at end of type parameter list")?;

        self.push_type_scope(names.clone());

        let mut params = Vec::with_capacity(names.len());
        for (name, bound) in names.into_iter().zip(raw_bounds) {
            let bound = match bound {
                Type::Var(class_name) => {
                    if self.is_type_var(&class_name) {
                        return Err(self.error_at_previous(
                            "using type variable as a nonvariable type".to_string(),
                        ));
                    }
                    ClassType::new(class_name, vec![])
                }
                Type::Class(ty) => self.resolve_bound(ty)?,
            };
            params.push(TypeParam::new(name, bound));
        }
        Ok(params)
    }

    fn parse_raw_bound(&mut self) -> ParseResult<Type> {
        let name = self.parse_identifier("type or type variable name")?;
        if !self.check(TokenKind::Lt) {
            return Ok(Type::Var(name));
        }
        self.advance();

        let mut args = Vec::new();
        loop {
            args.push(self.parse_raw_bound()?);
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.consume(TokenKind::Gt, "'>' at end of type bound argument list")?;
        Ok(Type::class(name, args))
    }

    fn resolve_bound(&self, ty: ClassType) -> ParseResult<ClassType> {
        if self.is_type_var(&ty.name) {
            return Err(self.error_at_previous(
                "using type variable as a nonvariable type".to_string(),
            ));
        }
        let mut args = Vec::with_capacity(ty.args.len());
        for arg in ty.args {
            let arg = match arg {
                Type::Var(name) if !self.is_type_var(&name) => Type::class(name, vec![]),
                Type::Var(name) => Type::Var(name),
                Type::Class(inner) => Type::Class(self.resolve_bound(inner)?),
            };
            args.push(arg);
        }
        Ok(ClassType::new(ty.name, args))
    }
}
