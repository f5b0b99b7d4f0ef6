//! Statement outcomes
//!
//! Statements produce no value. Besides failing with a `RuntimeError` they
//! can end in one of the signals below, which every evaluator hands back to
//! its caller until something consumes it: `for` consumes `Break` and
//! `Continue`, nothing consumes `Exit`.

/// How a statement finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Fell through; run the next statement
    Normal,
    /// Leave the innermost `for` loop
    Break,
    /// Skip to the next iteration of the innermost `for` loop
    Continue,
    /// Stop the whole program run
    Exit,
}

impl Flow {
    pub fn is_normal(self) -> bool {
        self == Flow::Normal
    }
}

/// How a program run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every top-level statement ran
    Completed,
    /// An `exit` statement stopped the run
    Exited,
}
