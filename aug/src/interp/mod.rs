//! Tree-walking interpreter for aug programs
//!
//! Executes a parsed [`Program`](crate::ast::Program) directly against a
//! scope stack of type-locked variables, reading and writing through
//! pluggable line-oriented ports.

mod error;
mod eval;
mod flow;
pub mod io;
pub mod ops;
mod scope;
mod value;

pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use eval::Interpreter;
pub use flow::{Flow, Outcome};
pub use scope::ScopeStack;
pub use value::{Kind, Value};
