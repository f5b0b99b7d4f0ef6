//! Runtime errors for the interpreter

use super::value::Kind;
use crate::ast::Span;
use std::fmt;

/// Runtime error during interpretation
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
    /// Statement being executed when the error was raised
    pub span: Option<Span>,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reference to a name absent from the whole scope chain
    UndefinedVariable,
    /// Operand did not reduce to the kind the operator requires
    TypeError,
    /// Assignment tried to change the kind of an existing variable
    TypeConflict,
    /// Division or modulo by zero
    DivisionByZero,
    /// Input port failed, was exhausted, or gave a non-integer to `readint`
    IoError,
    /// `break` or `continue` outside of any `for` loop
    StrayControl,
}

impl RuntimeError {
    fn new(kind: ErrorKind, message: String) -> Self {
        RuntimeError {
            kind,
            message,
            span: None,
        }
    }

    pub fn undefined_variable(name: &str, suggestion: Option<&str>) -> Self {
        Self::new(
            ErrorKind::UndefinedVariable,
            format!(
                "undefined variable: {name}{}",
                crate::util::format_suggestion_hint(suggestion)
            ),
        )
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(
            ErrorKind::TypeError,
            format!("type error: expected {expected}, got {got}"),
        )
    }

    pub fn type_conflict(name: &str, existing: Kind, attempted: Kind) -> Self {
        Self::new(
            ErrorKind::TypeConflict,
            format!("cannot change the type of variable {name} from {existing} to {attempted}"),
        )
    }

    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, "division by zero".to_string())
    }

    pub fn io_error(msg: &str) -> Self {
        Self::new(ErrorKind::IoError, format!("IO error: {msg}"))
    }

    pub fn invalid_integer(input: &str) -> Self {
        Self::new(
            ErrorKind::IoError,
            format!("IO error: expected integer, got {input:?}"),
        )
    }

    pub fn stray_control(keyword: &str) -> Self {
        Self::new(
            ErrorKind::StrayControl,
            format!("{keyword} outside of a for loop"),
        )
    }

    /// Attach a source span unless a more precise one is already present
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Runtime error: {}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;
