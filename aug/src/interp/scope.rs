//! Scope stack: the lexically scoped, type-locked variable store
//!
//! Frames are created on block entry and dropped on block exit, so only the
//! path from the innermost frame to the global frame is ever live. A
//! `Vec<HashMap>` models that path directly: index 0 is the global frame and
//! the last element is the current one.

use super::error::{InterpResult, RuntimeError};
use super::value::Value;
use std::collections::HashMap;

#[derive(Debug)]
pub struct ScopeStack {
    /// Stack of frames, index 0 is global
    scopes: Vec<HashMap<String, Value>>,
}

impl ScopeStack {
    /// Create a new scope stack with a global frame
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![HashMap::new()],
        }
    }

    /// Push an empty child of the current frame.
    /// Returns the new depth.
    pub fn push_scope(&mut self) -> usize {
        self.scopes.push(HashMap::new());
        self.scopes.len()
    }

    /// Discard the current frame.
    /// Callers pair this with `push_scope` on every exit path.
    /// Panics if trying to pop the global frame
    pub fn pop_scope(&mut self) {
        if self.scopes.len() <= 1 {
            panic!("Cannot pop global scope");
        }
        self.scopes.pop();
    }

    /// Current depth; 1 means only the global frame is live
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Look up a variable, searching from the current frame to global
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Bind `name` in the current frame.
    ///
    /// If the name is visible anywhere in the live chain with a different
    /// kind, the store is left untouched and a type conflict is returned.
    /// A name bound only in an outer frame is shadowed, not updated.
    pub fn set(&mut self, name: &str, value: Value) -> InterpResult<()> {
        if let Some(existing) = self.get(name)
            && existing.kind() != value.kind()
        {
            return Err(RuntimeError::type_conflict(name, existing.kind(), value.kind()));
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }
        Ok(())
    }

    /// Check if a variable exists in any live frame
    pub fn contains(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    /// Every name visible from the current frame (may repeat shadowed names)
    pub fn visible_names(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().rev().flat_map(|scope| scope.keys().map(String::as_str))
    }

    /// Global bindings sorted by name (REPL `:vars`)
    pub fn globals(&self) -> Vec<(&str, &Value)> {
        let mut vars: Vec<_> = self.scopes[0]
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }

    /// Drop every frame and binding
    pub fn reset(&mut self) {
        self.scopes.truncate(1);
        self.scopes[0].clear();
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
