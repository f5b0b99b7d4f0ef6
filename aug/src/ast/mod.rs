//! Abstract Syntax Tree definitions

mod node;
mod span;

pub use node::*;
pub use span::*;

use serde::{Deserialize, Serialize};

/// A program is the top-level statement sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Spanned<Stmt>>,
}

impl Program {
    pub fn new(body: Vec<Spanned<Stmt>>) -> Self {
        Self { body }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
