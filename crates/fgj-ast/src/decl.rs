//! Declaration definitions for the AST

use super::*;
use std::fmt;

/// A typed name: a field declaration or a parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub ty: Type,
    pub name: String,
}

impl Declaration {
    pub fn new(ty: Type, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// Constructor field initializer: this.field = param;
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldInit {
    pub field: String,
    pub param: String,
}

/// The single constructor of a class.
///
/// The leading parameters mirror the supertype's fields and are forwarded
/// through `super(...)`; the rest initialize the class's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constructor {
    pub class_name: String,
    pub params: Vec<Declaration>,
    pub super_args: Vec<String>,
    pub inits: Vec<FieldInit>,
}

/// Method declaration: <Y extends P> T m(U x) { return e; }
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    pub type_params: Vec<TypeParam>,
    pub return_type: Type,
    pub name: String,
    pub params: Vec<Declaration>,
    pub body: Term,
    pub span: Span,
}

impl Method {
    pub fn param_names(&self) -> Vec<String> {
        self.params.iter().map(|p| p.name.clone()).collect()
    }

    pub fn param_types(&self) -> Vec<Type> {
        self.params.iter().map(|p| p.ty.clone()).collect()
    }
}

/// Class declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassDecl {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub super_type: ClassType,
    pub fields: Vec<Declaration>,
    pub constructor: Constructor,
    pub methods: Vec<Method>,
    pub span: Span,
}

impl ClassDecl {
    /// The class applied to its own type variables: C<X1, ..., Xn>
    pub fn this_type(&self) -> ClassType {
        ClassType::new(
            self.name.clone(),
            self.type_params
                .iter()
                .map(|p| Type::var(p.name.clone()))
                .collect(),
        )
    }
}

/// A whole program: class declarations followed by the main term
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub classes: Vec<ClassDecl>,
    pub term: Term,
    /// Location of the main term
    pub span: Span,
}
