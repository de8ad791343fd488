//! # FGJ AST
//!
//! Abstract syntax for Featherweight Generic Java programs: types, terms and
//! class declarations. Everything here is plain immutable data; the class
//! table, substitution and evaluation live in downstream crates.

// =============================================================================
// Core Types (kept in lib.rs - used by all modules)
// =============================================================================

/// Source location information (byte offsets into the program text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

// =============================================================================
// Module Declarations
// =============================================================================

pub mod types;
pub mod term;
pub mod decl;

pub use types::*;
pub use term::*;
pub use decl::*;

// =============================================================================
// Tests
// =============================================================================
