//! Evaluation errors

use std::fmt;
use fgj_ast::ClassType;
use fgj_typeck::ClassTableError;

use crate::value::Value;

/// Evaluation failures. Only `BadCast` is reachable for a program that
/// passed type checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The value's runtime type is not a subtype of the cast target
    BadCast { value: Value, target: ClassType },
    UnknownVariable(String),
    UnknownField { ty: ClassType, field: String },
    ArgumentCount { expected: usize, found: usize },
    ClassTable(ClassTableError),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::BadCast { value, target } => {
                write!(f, "invalid cast of {} to {}", value, target)
            }
            EvalError::UnknownVariable(name) => write!(f, "unknown variable \"{}\"", name),
            EvalError::UnknownField { ty, field } => {
                write!(f, "unknown field \"{}\" in {}", field, ty)
            }
            EvalError::ArgumentCount { expected, found } => write!(
                f,
                "incorrect number of arguments: expected {}, found {}",
                expected, found
            ),
            EvalError::ClassTable(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<ClassTableError> for EvalError {
    fn from(err: ClassTableError) -> Self {
        EvalError::ClassTable(err)
    }
}

pub type EvalResult<T> = Result<T, EvalError>;
