//! # FGJ Evaluator
//!
//! Call-by-value evaluation of closed FGJ terms. Objects are tagged with
//! the type they were constructed at; method calls dispatch on that tag
//! through the class table, and casts check it against the target type.

mod error;
mod value;
mod env;
mod evaluator;

pub use error::{EvalError, EvalResult};
pub use value::Value;
pub use env::Env;
pub use evaluator::Evaluator;

use fgj_ast::Term;
use fgj_typeck::ClassTable;

/// Evaluate a term with no variables in scope
pub fn eval(table: &ClassTable, term: &Term) -> EvalResult<Value> {
    Evaluator::new(table).eval(term)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fgj_ast::{ClassType, Type};
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> EvalResult<Value> {
        let program = fgj_parser::parse(source).unwrap();
        let table = ClassTable::new(program.classes).unwrap();
        eval(&table, &program.term)
    }

    fn object(name: &str, fields: Vec<Value>) -> Value {
        Value::new(ClassType::new(name, vec![]), fields)
    }

    const ABC: &str = r#"
        class A extends Object { A() { super(); } }
        class B extends A { B() { super(); } }
    "#;

    #[test]
    fn test_bad_cast() {
        let err = run(&format!("{} (B) new A()", ABC)).unwrap_err();
        assert_eq!(
            err,
            EvalError::BadCast {
                value: object("A", vec![]),
                target: ClassType::new("B", vec![]),
            }
        );
        assert_eq!(err.to_string(), "invalid cast of new A() to B");
    }

    #[test]
    fn test_good_casts_keep_value() {
        assert_eq!(run(&format!("{} (A) new B()", ABC)).unwrap(), object("B", vec![]));
        assert_eq!(run(&format!("{} (A) (new A())", ABC)).unwrap(), object("A", vec![]));
        assert_eq!(run(&format!("{} (Object) new B()", ABC)).unwrap(), object("B", vec![]));
    }

    #[test]
    fn test_field_round_trip() {
        let source = r#"
            class A extends Object { A() { super(); } }
            class B extends Object { B() { super(); } }
            class P extends Object { A a; P(A a) { super(); this.a = a; } }
            class Q extends P {
                B b;
                A c;
                Q(A a, B b, A c) { super(a); this.b = b; this.c = c; }
                A first() { return this.a; }
                B second() { return this.b; }
                A third() { return this.c; }
            }
        "#;
        let q = "new Q(new A(), new B(), new A())";
        assert_eq!(run(&format!("{} {}.a", source, q)).unwrap(), object("A", vec![]));
        assert_eq!(run(&format!("{} {}.b", source, q)).unwrap(), object("B", vec![]));
        assert_eq!(run(&format!("{} {}.first()", source, q)).unwrap(), object("A", vec![]));
        assert_eq!(run(&format!("{} {}.second()", source, q)).unwrap(), object("B", vec![]));
        assert_eq!(run(&format!("{} {}.third()", source, q)).unwrap(), object("A", vec![]));
    }

    #[test]
    fn test_new_is_terminal() {
        // no checking happens at construction time
        let value = run("new Whatever(new Object())").unwrap();
        assert_eq!(value.to_string(), "new Whatever(new Object())");
    }

    #[test]
    fn test_dynamic_dispatch() {
        let source = r#"
            class A extends Object { A() { super(); } }
            class B extends A { B() { super(); } }
            class P extends Object {
                P() { super(); }
                A who() { return new A(); }
                A call() { return this.who(); }
            }
            class Q extends P {
                Q() { super(); }
                A who() { return new B(); }
            }
            ((P) new Q()).call()
        "#;
        assert_eq!(run(source).unwrap(), object("B", vec![]));
    }

    #[test]
    fn test_generic_method_substitutes_type_args() {
        let source = r#"
            class A extends Object { A() { super(); } }
            class B extends Object { B() { super(); } }
            class Pair<X extends Object, Y extends Object> extends Object {
                X fst;
                Y snd;
                Pair(X fst, Y snd) { super(); this.fst = fst; this.snd = snd; }
                <Z extends Object> Pair<Z, Y> setfst(Z newfst) {
                    return new Pair<Z, Y>(newfst, this.snd);
                }
            }
            new Pair<A, B>(new A(), new B()).setfst<B>(new B())
        "#;
        let value = run(source).unwrap();
        assert_eq!(
            value.ty,
            ClassType::new(
                "Pair",
                vec![Type::class("B", vec![]), Type::class("B", vec![])]
            )
        );
        assert_eq!(value.to_string(), "new Pair<B,B>(new B(), new B())");
    }

    #[test]
    fn test_cast_inside_generic_body() {
        let source = r#"
            class A extends Object { A() { super(); } }
            class B extends A { B() { super(); } }
            class Box<T extends Object> extends Object {
                T item;
                Box(T item) { super(); this.item = item; }
            }
            class Unboxer extends Object {
                Unboxer() { super(); }
                <T extends Object> T unbox(Object o) { return ((Box<T>) o).item; }
            }
        "#;
        let ok = run(&format!("{} new Unboxer().unbox<A>(new Box<A>(new B()))", source)).unwrap();
        assert_eq!(ok, object("B", vec![]));

        // Box<A> is no Box<B>, even though B extends A
        let err = run(&format!("{} new Unboxer().unbox<B>(new Box<A>(new B()))", source)).unwrap_err();
        assert!(matches!(
            err,
            EvalError::BadCast { target, .. } if target.to_string() == "Box<B>"
        ));
    }

    #[test]
    fn test_arguments_evaluated_before_failure() {
        let err = run(&format!("{} new Object().missing((B) new A())", ABC)).unwrap_err();
        // the argument's bad cast fires before method lookup
        assert!(matches!(err, EvalError::BadCast { .. }));

        let err = run("new Object().missing()").unwrap_err();
        assert!(matches!(err, EvalError::ClassTable(_)));
    }

    #[test]
    fn test_unknown_variable() {
        assert_eq!(
            run("x").unwrap_err(),
            EvalError::UnknownVariable("x".to_string())
        );
    }
}
