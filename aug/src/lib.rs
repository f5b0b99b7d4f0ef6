//! aug: a small imperative scripting language
//!
//! Source text goes through the logos lexer and the lalrpop parser into a
//! [`Program`](ast::Program), which the tree-walking [`Interpreter`] runs
//! statement by statement.

pub mod ast;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod util;

pub use ast::Span;
pub use error::{Error, Result};
pub use interp::{Interpreter, Outcome};

use interp::io::{InputPort, OutputPort};

/// Parse `source` and run it on `interp`.
/// Globals left behind by earlier runs stay visible.
pub fn run_source<I: InputPort, O: OutputPort>(
    interp: &mut Interpreter<I, O>,
    source: &str,
) -> Result<Outcome> {
    let program = parser::parse_source(source)?;
    Ok(interp.run(&program)?)
}
