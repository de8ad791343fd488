//! # FGJ Parser
//!
//! Recursive descent parser for Featherweight Generic Java programs.
//! Type variable scopes are tracked while parsing, so every bare name in a
//! type position comes out either as a bound type variable or as a class.

use fgj_ast::*;
use fgj_lexer::{Lexer, Token, TokenKind};

// Module declarations
mod error;
mod parser;
mod expr;
mod types;
mod decl;
mod helpers;

// Re-export public types
pub use error::{ParseError, ParseResult};
pub use parser::Parser;

/// Tokenizes and parses a complete source text
pub fn parse(source: &str) -> ParseResult<Program> {
    let tokens = Lexer::new(source).tokenize();
    Parser::new(tokens).parse_program()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: &str = r#"
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

    #[test]
    fn test_parse_generic_class() {
        let program = parse(PAIR).unwrap();
        assert_eq!(program.classes.len(), 3);

        let pair = &program.classes[2];
        assert_eq!(pair.name, "Pair");
        assert_eq!(pair.type_params.len(), 2);
        assert_eq!(pair.fields[0], Declaration::new(Type::var("X"), "fst"));
        assert_eq!(pair.constructor.params.len(), 2);
        assert!(pair.constructor.super_args.is_empty());
        assert_eq!(pair.constructor.inits.len(), 2);

        let setfst = &pair.methods[0];
        assert_eq!(setfst.type_params[0].name, "Z");
        assert_eq!(
            setfst.return_type,
            Type::class("Pair", vec![Type::var("Z"), Type::var("Y")])
        );
        assert_eq!(setfst.params[0].ty, Type::var("Z"));
    }

    #[test]
    fn test_parse_main_term() {
        let program = parse(PAIR).unwrap();
        assert_eq!(
            program.term.to_string(),
            "new Pair<A,B>(new A(), new B()).setfst<B>(new B())"
        );
    }

    #[test]
    fn test_bare_name_is_class() {
        let program = parse("class A extends Object { A() { super(); } } new A()").unwrap();
        assert_eq!(program.classes[0].super_type, ClassType::object());
        match program.term {
            Term::New { ty, args } => {
                assert_eq!(ty, ClassType::new("A", vec![]));
                assert!(args.is_empty());
            }
            other => panic!("expected new, got {:?}", other),
        }
    }

    #[test]
    fn test_f_bounded_params() {
        let source = r#"
            class Cmp<X extends Cmp<X>> extends Object { Cmp() { super(); } }
            class Two<X extends List<Y>, Y extends Object> extends Object { Two() { super(); } }
            new Object()
        "#;
        let program = parse(source).unwrap();

        let cmp = &program.classes[0];
        assert_eq!(
            cmp.type_params[0].bound,
            ClassType::new("Cmp", vec![Type::var("X")])
        );

        let two = &program.classes[1];
        assert_eq!(
            two.type_params[0].bound,
            ClassType::new("List", vec![Type::var("Y")])
        );
        assert_eq!(two.type_params[1].bound, ClassType::object());
    }

    #[test]
    fn test_bound_names_outside_list_are_classes() {
        let source = r#"
            class Box<X extends Pair<A, X>> extends Object { Box() { super(); } }
            new Object()
        "#;
        let program = parse(source).unwrap();
        assert_eq!(
            program.classes[0].type_params[0].bound,
            ClassType::new("Pair", vec![Type::class("A", vec![]), Type::var("X")])
        );
    }

    #[test]
    fn test_parse_casts() {
        let program = parse("(A) new B()").unwrap();
        assert!(matches!(program.term, Term::Cast { .. }));

        let program = parse("(Pair<A, B>) x").unwrap();
        match program.term {
            Term::Cast { target, term } => {
                assert_eq!(target.name, "Pair");
                assert_eq!(*term, Term::var("x"));
            }
            other => panic!("expected cast, got {:?}", other),
        }

        let program = parse("(A) (x)").unwrap();
        assert!(matches!(program.term, Term::Cast { .. }));
    }

    #[test]
    fn test_parenthesized_term_is_not_cast() {
        let program = parse("(x).f").unwrap();
        assert_eq!(
            program.term,
            Term::Field {
                base: Box::new(Term::var("x")),
                field: "f".to_string(),
            }
        );

        let program = parse("(new A())").unwrap();
        assert!(matches!(program.term, Term::New { .. }));
    }

    #[test]
    fn test_cast_binds_whole_postfix_chain() {
        let program = parse("(A) this.f.g").unwrap();
        assert_eq!(program.term.to_string(), "(A) this.f.g");
    }

    #[test]
    fn test_parse_calls() {
        let program = parse("x.m().n<A, B<C>>(y, z).f").unwrap();
        assert_eq!(program.term.to_string(), "x.m().n<A,B<C>>(y, z).f");

        let program = parse("x.m<>()").unwrap();
        match program.term {
            Term::Call { type_args, args, .. } => {
                assert!(type_args.is_empty());
                assert!(args.is_empty());
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_super_args() {
        let source = r#"
            class P extends Object { Object a; P(Object a) { super(); this.a = a; } }
            class Q extends P { Object b; Q(Object a, Object b) { super(a); this.b = b; } }
            new Object()
        "#;
        let program = parse(source).unwrap();
        assert_eq!(program.classes[1].constructor.super_args, vec!["a".to_string()]);
    }

    #[test]
    fn test_error_line_numbers() {
        let err = parse("class A extends Object {\n  A() { super(); }\n  A m( { return this; }\n}\nnew A()").unwrap_err();
        assert_eq!(err.line, 3);

        let err = parse("new A(\n)\n#").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.message, "unexpected character '#'");
    }

    #[test]
    fn test_missing_term() {
        let err = parse("class A extends Object { A() { super(); } }").unwrap_err();
        assert_eq!(err.message, "expected a term");
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse("new A() new B()").unwrap_err();
        assert_eq!(err.message, "expected end of file");
    }

    #[test]
    fn test_duplicate_type_variable() {
        let err = parse(
            "class P<X extends Object, X extends Object> extends Object { P() { super(); } } new Object()",
        )
        .unwrap_err();
        assert_eq!(err.message, "duplicate type variable");
    }

    #[test]
    fn test_constructor_name_mismatch() {
        let err = parse("class A extends Object { B() { super(); } } new A()").unwrap_err();
        assert_eq!(err.message, "constructor name must match class name");
    }

    #[test]
    fn test_field_init_mismatch() {
        let err = parse(
            "class A extends Object { Object f; A(Object g) { super(); this.f = g; } } new A(new Object())",
        )
        .unwrap_err();
        assert_eq!(err.message, "field initialization name mismatch");
    }

    #[test]
    fn test_type_variable_misuse() {
        let err = parse(
            "class A<X extends Object> extends X { A() { super(); } } new Object()",
        )
        .unwrap_err();
        assert_eq!(err.message, "cannot use a type variable as a nonvariable type");

        let err = parse(
            "class A<X extends Object> extends Object { A() { super(); } Object m() { return (X) this; } } new Object()",
        )
        .unwrap_err();
        assert_eq!(err.message, "cannot use a type variable as a nonvariable type");

        let err = parse(
            "class A<X extends Object> extends Object { X<Object> f; A(X<Object> f) { super(); this.f = f; } } new Object()",
        )
        .unwrap_err();
        assert_eq!(err.message, "cannot apply type parameters to a type variable");
    }

    #[test]
    fn test_bare_bound_variable_rejected() {
        let err = parse(
            "class A<X extends Object, Y extends X> extends Object { A() { super(); } } new Object()",
        )
        .unwrap_err();
        assert_eq!(err.message, "using type variable as a nonvariable type");
    }

    #[test]
    fn test_method_scope_closes() {
        // Z is only a type variable inside `m`; the main term sees a class
        let source = r#"
            class A extends Object {
                A() { super(); }
                <Z extends Object> Z m(Z z) { return z; }
            }
            new Z()
        "#;
        let program = parse(source).unwrap();
        assert_eq!(program.term.to_string(), "new Z()");
    }
}
