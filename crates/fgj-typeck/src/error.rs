//! Class table and type checking errors

use std::fmt;
use fgj_ast::{ClassType, Span, Type};

/// Errors raised while building or querying the class table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassTableError {
    /// Two classes share a name
    DuplicateClass(String),
    /// A program declares the root class
    RedefinedObject,
    /// Reference to an undeclared class
    UnknownClass(String),
    /// Type argument list length differs from the parameter list
    ArityMismatch { expected: usize, found: usize },
    /// The named class is its own ancestor
    Cycle(String),
    DuplicateField(String),
    DuplicateMethod(String),
    DuplicateTypeVar(String),
    /// Method lookup reached the root without a match
    UnknownMethod(String),
}

impl fmt::Display for ClassTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassTableError::DuplicateClass(name) => {
                write!(f, "duplicate class name \"{}\"", name)
            }
            ClassTableError::RedefinedObject => write!(f, "cannot define Object"),
            ClassTableError::UnknownClass(name) => write!(f, "unknown class \"{}\"", name),
            ClassTableError::ArityMismatch { expected, found } => write!(
                f,
                "wrong number of type arguments: expected {}, found {}",
                expected, found
            ),
            ClassTableError::Cycle(name) => {
                write!(f, "class \"{}\" introduces a subtyping cycle", name)
            }
            ClassTableError::DuplicateField(name) => {
                write!(f, "duplicate field name \"{}\"", name)
            }
            ClassTableError::DuplicateMethod(name) => {
                write!(f, "duplicate method name \"{}\"", name)
            }
            ClassTableError::DuplicateTypeVar(name) => {
                write!(f, "duplicate type variable \"{}\"", name)
            }
            ClassTableError::UnknownMethod(name) => write!(f, "unknown method \"{}\"", name),
        }
    }
}

impl std::error::Error for ClassTableError {}

/// Type error kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeErrorKind {
    /// Term variable not in scope
    UnboundVariable(String),
    /// Type variable not in scope
    UnboundTypeVar(String),
    /// Type argument does not satisfy its parameter's bound
    BoundViolation { arg: Type, bound: ClassType },
    UnknownField { ty: ClassType, field: String },
    UnknownMethod { ty: ClassType, method: String },
    /// Wrong number of term arguments
    ArgumentCount { expected: usize, found: usize },
    /// Wrong number of method type arguments
    TypeArgumentCount { expected: usize, found: usize },
    /// `found` was required to be a subtype of `expected`
    NotSubtype { found: Type, expected: Type },
    InvalidOverride(String),
    /// Constructor does not match the class's field layout
    Constructor(String),
    /// A class table lookup failed while checking
    ClassTable(ClassTableError),
}

impl fmt::Display for TypeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeErrorKind::UnboundVariable(name) => write!(f, "unbound variable \"{}\"", name),
            TypeErrorKind::UnboundTypeVar(name) => {
                write!(f, "type variable \"{}\" is not well formed", name)
            }
            TypeErrorKind::BoundViolation { arg, bound } => write!(
                f,
                "type argument {} must be subtype of bound {}",
                arg, bound
            ),
            TypeErrorKind::UnknownField { ty, field } => {
                write!(f, "unknown field \"{}\" in {}", field, ty)
            }
            TypeErrorKind::UnknownMethod { ty, method } => {
                write!(f, "unknown method \"{}\" in {}", method, ty)
            }
            TypeErrorKind::ArgumentCount { expected, found } => write!(
                f,
                "incorrect number of arguments: expected {}, found {}",
                expected, found
            ),
            TypeErrorKind::TypeArgumentCount { expected, found } => write!(
                f,
                "incorrect number of type arguments: expected {}, found {}",
                expected, found
            ),
            TypeErrorKind::NotSubtype { found, expected } => {
                write!(f, "{} is not a subtype of {}", found, expected)
            }
            TypeErrorKind::InvalidOverride(method) => {
                write!(f, "invalid override of method \"{}\"", method)
            }
            TypeErrorKind::Constructor(message) => write!(f, "{}", message),
            TypeErrorKind::ClassTable(err) => write!(f, "{}", err),
        }
    }
}

impl From<ClassTableError> for TypeErrorKind {
    fn from(err: ClassTableError) -> Self {
        TypeErrorKind::ClassTable(err)
    }
}

/// Type error with location information.
///
/// Terms carry no positions of their own, so the span is that of the
/// enclosing method, class, or main term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub span: Span,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for TypeError {}

/// Non-fatal diagnostics collected while checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A cast between types where neither is a subtype of the other
    StupidCast { from: ClassType, to: ClassType, span: Span },
}

impl Warning {
    pub fn span(&self) -> Span {
        match self {
            Warning::StupidCast { span, .. } => *span,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::StupidCast { from, to, .. } => {
                write!(f, "stupid cast from {} to {}", from, to)
            }
        }
    }
}
