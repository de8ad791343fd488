//! Type variable substitution over types and terms

use std::collections::HashMap;
use fgj_ast::{ClassType, Term, Type, TypeParam};

use crate::error::ClassTableError;

/// A single-level mapping from type variable names to types.
///
/// Built from one list of actual arguments and the formal parameters they
/// instantiate. Nested generic scopes are handled by applying one
/// substitution after another, never by merging two of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitution {
    map: HashMap<String, Type>,
}

impl Substitution {
    /// Pairs `args` with `params` by position
    pub fn new(args: &[Type], params: &[TypeParam]) -> Result<Self, ClassTableError> {
        if args.len() != params.len() {
            return Err(ClassTableError::ArityMismatch {
                expected: params.len(),
                found: args.len(),
            });
        }
        let map = params
            .iter()
            .zip(args)
            .map(|(param, arg)| (param.name.clone(), arg.clone()))
            .collect();
        Ok(Self { map })
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Variables with no mapping are left alone; they belong to an
    /// enclosing scope.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Var(name) => self.map.get(name).cloned().unwrap_or_else(|| ty.clone()),
            Type::Class(class) => Type::Class(self.apply_class(class)),
        }
    }

    pub fn apply_class(&self, ty: &ClassType) -> ClassType {
        ClassType::new(
            ty.name.clone(),
            ty.args.iter().map(|arg| self.apply(arg)).collect(),
        )
    }

    /// Substitutes the bound, keeping the parameter's own name
    pub fn apply_param(&self, param: &TypeParam) -> TypeParam {
        TypeParam::new(param.name.clone(), self.apply_class(&param.bound))
    }

    pub fn apply_term(&self, term: &Term) -> Term {
        match term {
            Term::Var(_) => term.clone(),
            Term::Field { base, field } => Term::Field {
                base: Box::new(self.apply_term(base)),
                field: field.clone(),
            },
            Term::Call {
                base,
                method,
                type_args,
                args,
            } => Term::Call {
                base: Box::new(self.apply_term(base)),
                method: method.clone(),
                type_args: type_args.iter().map(|ty| self.apply(ty)).collect(),
                args: args.iter().map(|arg| self.apply_term(arg)).collect(),
            },
            Term::New { ty, args } => Term::New {
                ty: self.apply_class(ty),
                args: args.iter().map(|arg| self.apply_term(arg)).collect(),
            },
            Term::Cast { target, term } => Term::Cast {
                target: self.apply_class(target),
                term: Box::new(self.apply_term(term)),
            },
        }
    }
}
