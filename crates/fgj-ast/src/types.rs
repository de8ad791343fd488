//! Type definitions for the AST

use std::fmt;

/// Name of the universal root class. It declares no fields or methods and
/// takes no type arguments.
pub const OBJECT: &str = "Object";

/// Type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Type variable: X
    Var(String),

    /// Instantiated class type: C<T1, ..., Tn>
    Class(ClassType),
}

impl Type {
    pub fn var(name: impl Into<String>) -> Self {
        Type::Var(name.into())
    }

    pub fn class(name: impl Into<String>, args: Vec<Type>) -> Self {
        Type::Class(ClassType::new(name, args))
    }

    /// The instantiated class type, if this is not a type variable
    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            Type::Class(ty) => Some(ty),
            Type::Var(_) => None,
        }
    }
}

impl From<ClassType> for Type {
    fn from(ty: ClassType) -> Self {
        Type::Class(ty)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Var(name) => write!(f, "{}", name),
            Type::Class(ty) => write!(f, "{}", ty),
        }
    }
}

/// A class name applied to type arguments (a "non-variable" type)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub name: String,
    pub args: Vec<Type>,
}

impl ClassType {
    pub fn new(name: impl Into<String>, args: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn object() -> Self {
        Self::new(OBJECT, vec![])
    }

    /// `Object` with no type arguments. `Object<T>` is not the root; it is an
    /// ill-formed reference to an undeclared class.
    pub fn is_object(&self) -> bool {
        self.name == OBJECT && self.args.is_empty()
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
            write!(f, "<{}>", args.join(","))?;
        }
        Ok(())
    }
}

/// Type parameter with its (possibly F-bounded) upper bound: X extends N
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParam {
    pub name: String,
    pub bound: ClassType,
}

impl TypeParam {
    pub fn new(name: impl Into<String>, bound: ClassType) -> Self {
        Self {
            name: name.into(),
            bound,
        }
    }
}

impl fmt::Display for TypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} extends {}", self.name, self.bound)
    }
}
