//! # FGJ Type Checker
//!
//! The generic class table with its `fields`/`mtype`/`mbody` lookups,
//! substitution, the type variable environment deciding subtyping and
//! well-formedness, and the checker for whole programs.

mod error;
mod subst;
mod class_table;
mod env;
mod checker;

// Re-export public API
pub use error::{ClassTableError, TypeError, TypeErrorKind, Warning};
pub use subst::Substitution;
pub use class_table::{ClassTable, MethodBody, MethodType};
pub use env::TypeEnv;
pub use checker::TypeChecker;

use fgj_ast::{Program, Type};

/// Outcome of checking a program
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedProgram {
    /// Static type of the main term
    pub ty: Type,
    pub warnings: Vec<Warning>,
}

// =============================================================================
// Public API
// =============================================================================

/// Type check a program against its class table
pub fn check_program(table: &ClassTable, program: &Program) -> Result<CheckedProgram, TypeError> {
    let mut checker = TypeChecker::new(table);
    let ty = checker.check_program(program)?;
    Ok(CheckedProgram {
        ty,
        warnings: checker.into_warnings(),
    })
}

// =============================================================================
// Tests
// =============================================================================
