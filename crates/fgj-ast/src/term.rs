//! Term definitions for the AST

use super::*;
use std::fmt;

/// Expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Variable reference, including `this`
    Var(String),

    /// Field access: e.f
    Field {
        base: Box<Term>,
        field: String,
    },

    /// Method invocation: e.m<V>(args)
    Call {
        base: Box<Term>,
        method: String,
        type_args: Vec<Type>,
        args: Vec<Term>,
    },

    /// Object construction: new N(args)
    New {
        ty: ClassType,
        args: Vec<Term>,
    },

    /// Type cast: (N) e
    Cast {
        target: ClassType,
        term: Box<Term>,
    },
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(name) => write!(f, "{}", name),
            Term::Field { base, field } => write!(f, "{}.{}", base, field),
            Term::Call {
                base,
                method,
                type_args,
                args,
            } => {
                write!(f, "{}.{}", base, method)?;
                if !type_args.is_empty() {
                    write!(f, "<{}>", join(type_args, ","))?;
                }
                write!(f, "({})", join(args, ", "))
            }
            Term::New { ty, args } => write!(f, "new {}({})", ty, join(args, ", ")),
            Term::Cast { target, term } => write!(f, "({}) {}", target, term),
        }
    }
}
