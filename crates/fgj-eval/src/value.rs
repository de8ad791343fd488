//! Runtime values

use std::fmt;
use fgj_ast::ClassType;

/// A fully evaluated object: the type it was constructed at and its field
/// values in layout order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Value {
    pub ty: ClassType,
    pub fields: Vec<Value>,
}

impl Value {
    pub fn new(ty: ClassType, fields: Vec<Value>) -> Self {
        Self { ty, fields }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "new {}(", self.ty)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", field)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fgj_ast::Type;

    #[test]
    fn test_display() {
        let a = Value::new(ClassType::new("A", vec![]), vec![]);
        assert_eq!(a.to_string(), "new A()");

        let pair = Value::new(
            ClassType::new("Pair", vec![Type::class("A", vec![]), Type::class("A", vec![])]),
            vec![a.clone(), a],
        );
        assert_eq!(pair.to_string(), "new Pair<A,A>(new A(), new A())");
    }
}
