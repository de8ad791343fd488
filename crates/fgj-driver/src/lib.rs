//! FGJ Driver Library
//!
//! The whole pipeline behind the `fgj` binary: read, parse, build the
//! class table, type check, evaluate. Each stage's failure is kept apart in
//! [`FgjError`] so callers can report it as a single classified line.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fgj_ast::{Program, Span, Type};
use fgj_eval::{EvalError, Evaluator, Value};
use fgj_parser::ParseError;
use fgj_typeck::{ClassTable, ClassTableError, TypeError, TypeErrorKind, Warning};

/// Any failure of the pipeline. The first one aborts the run.
#[derive(Debug)]
pub enum FgjError {
    FileNotFound(PathBuf),
    Io { path: PathBuf, error: io::Error },
    Parse(ParseError),
    ClassTable(ClassTableError),
    Type(TypeError),
    /// Evaluation failed; the span is that of the main term
    Eval(EvalError, Span),
}

impl FgjError {
    /// Source location to point at, if the stage has one
    pub fn span(&self) -> Option<Span> {
        match self {
            FgjError::Parse(err) => Some(err.span),
            FgjError::Type(err) => Some(err.span),
            FgjError::Eval(_, span) => Some(*span),
            FgjError::FileNotFound(_) | FgjError::Io { .. } | FgjError::ClassTable(_) => None,
        }
    }

    /// Short diagnostic code for annotated reports
    pub fn code(&self) -> &'static str {
        match self {
            FgjError::FileNotFound(_) | FgjError::Io { .. } => "E0001",
            FgjError::Parse(_) => "E0002",
            FgjError::ClassTable(_) => "E0003",
            FgjError::Type(_) => "E0004",
            FgjError::Eval(..) => "E0005",
        }
    }

    /// Stage-specific message without the stage prefix
    pub fn detail(&self) -> String {
        match self {
            FgjError::FileNotFound(path) => format!("can't find file \"{}\"", path.display()),
            FgjError::Io { path, error } => format!("can't read \"{}\": {}", path.display(), error),
            FgjError::Parse(err) => err.message.clone(),
            FgjError::ClassTable(err) => err.to_string(),
            FgjError::Type(err) => err.to_string(),
            FgjError::Eval(err, _) => err.to_string(),
        }
    }
}

impl fmt::Display for FgjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FgjError::FileNotFound(_) | FgjError::Io { .. } => write!(f, "{}", self.detail()),
            FgjError::Parse(err) => write!(f, "{}", err),
            FgjError::ClassTable(err) => write!(f, "class table: {}", err),
            FgjError::Type(TypeError {
                kind: TypeErrorKind::ClassTable(err),
                ..
            }) => write!(f, "class table: {}", err),
            FgjError::Type(err) => write!(f, "type check error: {}", err),
            FgjError::Eval(EvalError::ClassTable(err), _) => write!(f, "class table: {}", err),
            FgjError::Eval(err, _) => write!(f, "evaluation error: {}", err),
        }
    }
}

impl std::error::Error for FgjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FgjError::FileNotFound(_) => None,
            FgjError::Io { error, .. } => Some(error),
            FgjError::Parse(err) => Some(err),
            FgjError::ClassTable(err) => Some(err),
            FgjError::Type(err) => Some(err),
            FgjError::Eval(err, _) => Some(err),
        }
    }
}

impl From<ParseError> for FgjError {
    fn from(err: ParseError) -> Self {
        FgjError::Parse(err)
    }
}

impl From<ClassTableError> for FgjError {
    fn from(err: ClassTableError) -> Self {
        FgjError::ClassTable(err)
    }
}

impl From<TypeError> for FgjError {
    fn from(err: TypeError) -> Self {
        FgjError::Type(err)
    }
}

/// A parsed program that passed class table validation and type checking
#[derive(Debug)]
pub struct Checked {
    pub program: Program,
    pub table: ClassTable,
    /// Static type of the main term
    pub ty: Type,
    pub warnings: Vec<Warning>,
}

/// Result of running a program to completion
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub value: Value,
    pub warnings: Vec<Warning>,
}

pub fn read_source(path: &Path) -> Result<String, FgjError> {
    fs::read_to_string(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => FgjError::FileNotFound(path.to_path_buf()),
        _ => FgjError::Io {
            path: path.to_path_buf(),
            error,
        },
    })
}

/// Parses, builds the class table and type checks
pub fn check_source(source: &str) -> Result<Checked, FgjError> {
    let program = fgj_parser::parse(source)?;
    tracing::debug!(classes = program.classes.len(), "parsed");

    let table = ClassTable::new(program.classes.clone())?;
    let checked = fgj_typeck::check_program(&table, &program)?;

    Ok(Checked {
        program,
        table,
        ty: checked.ty,
        warnings: checked.warnings,
    })
}

/// Checks and then evaluates the main term
pub fn run_source(source: &str) -> Result<Outcome, FgjError> {
    let checked = check_source(source)?;
    let value = Evaluator::new(&checked.table)
        .eval(&checked.program.term)
        .map_err(|err| FgjError::Eval(err, checked.program.span))?;
    tracing::debug!(%value, "evaluated");

    Ok(Outcome {
        value,
        warnings: checked.warnings,
    })
}

pub fn check_file(path: &Path) -> Result<Checked, FgjError> {
    check_source(&read_source(path)?)
}

pub fn run_file(path: &Path) -> Result<Outcome, FgjError> {
    run_source(&read_source(path)?)
}
