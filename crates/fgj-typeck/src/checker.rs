//! Program type checker

use std::collections::HashMap;
use fgj_ast::*;

use crate::class_table::{ClassTable, MethodType};
use crate::env::TypeEnv;
use crate::error::{TypeError, TypeErrorKind, Warning};
use crate::subst::Substitution;

type CheckResult<T> = Result<T, TypeErrorKind>;

/// Term variables in scope and their static types
type VarEnv = HashMap<String, Type>;

/// Main type checker
pub struct TypeChecker<'a> {
    table: &'a ClassTable,
    warnings: Vec<Warning>,
    /// Location reported for diagnostics raised by the term being checked
    span: Span,
}

impl<'a> TypeChecker<'a> {
    pub fn new(table: &'a ClassTable) -> Self {
        Self {
            table,
            warnings: Vec::new(),
            span: Span::default(),
        }
    }

    /// Checks every class, then the main term in an empty environment, and
    /// returns the main term's type
    pub fn check_program(&mut self, program: &Program) -> Result<Type, TypeError> {
        for class in &program.classes {
            self.check_class(class)?;
        }

        self.span = program.span;
        let env = TypeEnv::new(self.table);
        let ty = self
            .check_term(&env, &VarEnv::new(), &program.term)
            .map_err(|kind| TypeError::new(kind, program.span))?;
        tracing::debug!(%ty, warnings = self.warnings.len(), "program checked");
        Ok(ty)
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    #[tracing::instrument(level = "debug", skip_all, fields(class = %class.name))]
    fn check_class(&mut self, class: &ClassDecl) -> Result<(), TypeError> {
        let mut env = TypeEnv::new(self.table);
        env.add_bounds(&class.type_params);

        self.check_class_header(&env, class)
            .map_err(|kind| TypeError::new(kind, class.span))?;

        for method in &class.methods {
            self.span = method.span;
            self.check_method(&env, class, method)
                .map_err(|kind| TypeError::new(kind, method.span))?;
        }
        Ok(())
    }

    fn check_class_header(&self, env: &TypeEnv, class: &ClassDecl) -> CheckResult<()> {
        for param in &class.type_params {
            env.check_class_well_formed(&param.bound)?;
        }
        env.check_class_well_formed(&class.super_type)?;
        for field in &class.fields {
            env.check_well_formed(&field.ty)?;
        }
        self.check_constructor(class)
    }

    /// The constructor takes the supertype's fields, forwards exactly those
    /// to `super`, then takes and initializes the class's own fields in order.
    fn check_constructor(&self, class: &ClassDecl) -> CheckResult<()> {
        let ctor = &class.constructor;
        if ctor.class_name != class.name {
            return Err(TypeErrorKind::Constructor(format!(
                "constructor name \"{}\" does not match class \"{}\"",
                ctor.class_name, class.name
            )));
        }

        let inherited = self.table.fields(&class.super_type)?;
        if ctor.params.len() < inherited.len() || ctor.super_args.len() != inherited.len() {
            return Err(TypeErrorKind::Constructor(
                "didn't cover all the supertype's fields".to_string(),
            ));
        }
        for ((param, field), arg) in ctor.params.iter().zip(&inherited).zip(&ctor.super_args) {
            if param != field {
                return Err(TypeErrorKind::Constructor(
                    "constructor parameter error".to_string(),
                ));
            }
            if *arg != field.name {
                return Err(TypeErrorKind::Constructor(
                    "constructor super argument error".to_string(),
                ));
            }
        }

        let own = &ctor.params[inherited.len()..];
        if own.len() != class.fields.len() || ctor.inits.len() != class.fields.len() {
            return Err(TypeErrorKind::Constructor(
                "too many fields or arguments".to_string(),
            ));
        }
        for ((param, field), init) in own.iter().zip(&class.fields).zip(&ctor.inits) {
            if param != field || init.field != field.name || init.param != param.name {
                return Err(TypeErrorKind::Constructor(
                    "constructor field parameter error".to_string(),
                ));
            }
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(method = %method.name))]
    fn check_method(&mut self, class_env: &TypeEnv, class: &ClassDecl, method: &Method) -> CheckResult<()> {
        let mut env = class_env.clone();
        env.add_bounds(&method.type_params);

        for param in &method.type_params {
            env.check_class_well_formed(&param.bound)?;
        }
        env.check_well_formed(&method.return_type)?;
        for param in &method.params {
            env.check_well_formed(&param.ty)?;
        }

        let mut vars: VarEnv = method
            .params
            .iter()
            .map(|p| (p.name.clone(), p.ty.clone()))
            .collect();
        vars.insert("this".to_string(), Type::Class(class.this_type()));

        let body = self.check_term(&env, &vars, &method.body)?;
        if !env.subtype(&body, &method.return_type)? {
            return Err(TypeErrorKind::NotSubtype {
                found: body,
                expected: method.return_type.clone(),
            });
        }

        if !env.override_ok(&method.name, &class.super_type, &MethodType::of(method))? {
            return Err(TypeErrorKind::InvalidOverride(method.name.clone()));
        }
        Ok(())
    }

    fn check_term(&mut self, env: &TypeEnv, vars: &VarEnv, term: &Term) -> CheckResult<Type> {
        match term {
            Term::Var(name) => vars
                .get(name)
                .cloned()
                .ok_or_else(|| TypeErrorKind::UnboundVariable(name.clone())),

            Term::Field { base, field } => {
                let base_ty = self.check_term(env, vars, base)?;
                let bound = env.bound(&base_ty)?;
                self.table
                    .fields(&bound)?
                    .into_iter()
                    .find(|f| f.name == *field)
                    .map(|f| f.ty)
                    .ok_or_else(|| TypeErrorKind::UnknownField {
                        ty: bound,
                        field: field.clone(),
                    })
            }

            Term::Call {
                base,
                method,
                type_args,
                args,
            } => self.check_call(env, vars, base, method, type_args, args),

            Term::New { ty, args } => {
                env.check_class_well_formed(ty)?;
                let fields = self.table.fields(ty)?;
                if fields.len() != args.len() {
                    return Err(TypeErrorKind::ArgumentCount {
                        expected: fields.len(),
                        found: args.len(),
                    });
                }
                for (arg, field) in args.iter().zip(&fields) {
                    self.expect_subtype(env, vars, arg, &field.ty)?;
                }
                Ok(Type::Class(ty.clone()))
            }

            Term::Cast { target, term } => {
                env.check_class_well_formed(target)?;
                let term_ty = self.check_term(env, vars, term)?;
                let from = env.bound(&term_ty)?;
                let from_ty = Type::Class(from.clone());
                let to_ty = Type::Class(target.clone());

                let upcast = env.subtype(&from_ty, &to_ty)?;
                if !upcast && !env.subtype(&to_ty, &from_ty)? {
                    tracing::debug!(%from, to = %target, "stupid cast");
                    self.warnings.push(Warning::StupidCast {
                        from,
                        to: target.clone(),
                        span: self.span,
                    });
                }
                Ok(to_ty)
            }
        }
    }

    fn check_call(
        &mut self,
        env: &TypeEnv,
        vars: &VarEnv,
        base: &Term,
        method: &str,
        type_args: &[Type],
        args: &[Term],
    ) -> CheckResult<Type> {
        let base_ty = self.check_term(env, vars, base)?;
        let bound = env.bound(&base_ty)?;
        let mtype = self
            .table
            .mtype(method, &bound)?
            .ok_or_else(|| TypeErrorKind::UnknownMethod {
                ty: bound.clone(),
                method: method.to_string(),
            })?;

        for ty in type_args {
            env.check_well_formed(ty)?;
        }
        if type_args.len() != mtype.type_params.len() {
            return Err(TypeErrorKind::TypeArgumentCount {
                expected: mtype.type_params.len(),
                found: type_args.len(),
            });
        }

        let subst = Substitution::new(type_args, &mtype.type_params)?;
        for (arg, param) in type_args.iter().zip(&mtype.type_params) {
            let bound = subst.apply_class(&param.bound);
            if !env.subtype(arg, &Type::Class(bound.clone()))? {
                return Err(TypeErrorKind::BoundViolation {
                    arg: arg.clone(),
                    bound,
                });
            }
        }

        if args.len() != mtype.param_types.len() {
            return Err(TypeErrorKind::ArgumentCount {
                expected: mtype.param_types.len(),
                found: args.len(),
            });
        }
        for (arg, param_ty) in args.iter().zip(&mtype.param_types) {
            self.expect_subtype(env, vars, arg, &subst.apply(param_ty))?;
        }

        Ok(subst.apply(&mtype.return_type))
    }

    fn expect_subtype(&mut self, env: &TypeEnv, vars: &VarEnv, term: &Term, expected: &Type) -> CheckResult<()> {
        let found = self.check_term(env, vars, term)?;
        if env.subtype(&found, expected)? {
            Ok(())
        } else {
            Err(TypeErrorKind::NotSubtype {
                found,
                expected: expected.clone(),
            })
        }
    }
}
