//! Statement and expression evaluator

use super::error::{InterpResult, RuntimeError};
use super::flow::{Flow, Outcome};
use super::io::{self as ports, InputPort, OutputPort, StdInput, StdOutput};
use super::ops;
use super::scope::ScopeStack;
use super::value::Value;
use crate::ast::{BinOp, CmpOp, Expr, LogicOp, Program, Spanned, Stmt, UnOp};
use crate::util::find_similar_name;

/// Stack growth parameters for deeply nested programs
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// The interpreter
///
/// Owns the variable store and the two I/O ports. Global bindings survive
/// across calls to [`Interpreter::run`], which is what the REPL relies on.
pub struct Interpreter<I = StdInput, O = StdOutput> {
    scopes: ScopeStack,
    input: I,
    output: O,
}

impl Interpreter {
    /// Interpreter reading stdin and writing stdout
    pub fn new() -> Self {
        Self::with_io(ports::stdin(), ports::stdout())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: InputPort, O: OutputPort> Interpreter<I, O> {
    pub fn with_io(input: I, output: O) -> Self {
        Interpreter {
            scopes: ScopeStack::new(),
            input,
            output,
        }
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Drop every binding, keeping the ports
    pub fn reset(&mut self) {
        self.scopes.reset();
    }

    /// Run a program's top-level sequence.
    ///
    /// Output is flushed on every path. A `break` or `continue` that no loop
    /// consumed surfaces here as a `StrayControl` error.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn run(&mut self, program: &Program) -> InterpResult<Outcome> {
        let result = self.run_body(&program.body);
        let flushed = self
            .output
            .flush()
            .map_err(|e| RuntimeError::io_error(&e.to_string()));
        let outcome = result?;
        flushed?;
        tracing::debug!(?outcome, "run finished");
        Ok(outcome)
    }

    fn run_body(&mut self, body: &[Spanned<Stmt>]) -> InterpResult<Outcome> {
        for stmt in body {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                Flow::Exit => return Ok(Outcome::Exited),
                Flow::Break => return Err(RuntimeError::stray_control("break").with_span(stmt.span)),
                Flow::Continue => {
                    return Err(RuntimeError::stray_control("continue").with_span(stmt.span));
                }
            }
        }
        Ok(Outcome::Completed)
    }

    /// Evaluate a single expression against the current scope (for REPL)
    pub fn eval_expr(&mut self, expr: &Spanned<Expr>) -> InterpResult<Value> {
        self.eval(expr).map_err(|e| e.with_span(expr.span))
    }

    // ============ Statements ============

    /// Execute a statement with automatic stack growth for deep nesting
    fn exec_stmt(&mut self, stmt: &Spanned<Stmt>) -> InterpResult<Flow> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.exec_stmt_inner(stmt))
            .map_err(|e| e.with_span(stmt.span))
    }

    fn exec_stmt_inner(&mut self, stmt: &Spanned<Stmt>) -> InterpResult<Flow> {
        match &stmt.node {
            Stmt::Assign { name, value } => {
                let val = self.eval(value)?;
                // Booleans can be printed and branched on but not stored
                if !val.is_storable() {
                    return Err(RuntimeError::type_error("integer or string", val.type_name()));
                }
                tracing::trace!(%name, value = %val, "assign");
                self.scopes.set(name, val)?;
                Ok(Flow::Normal)
            }

            Stmt::Print { value } => {
                let val = self.eval(value)?;
                self.output
                    .write_line(&val.to_string())
                    .map_err(|e| RuntimeError::io_error(&e.to_string()))?;
                Ok(Flow::Normal)
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let truth = expect_bool(self.eval(cond)?)?;
                if truth {
                    self.exec_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::For { var, from, to, body } => self.exec_for(var, from, to, body),

            Stmt::Block(stmts) => self.exec_block(stmts),

            Stmt::Break => Ok(Flow::Break),
            Stmt::Continue => Ok(Flow::Continue),
            Stmt::Exit => Ok(Flow::Exit),
        }
    }

    /// Run statements in order, stopping at the first error or signal
    fn exec_sequence(&mut self, stmts: &[Spanned<Stmt>]) -> InterpResult<Flow> {
        for stmt in stmts {
            let flow = self.exec_stmt(stmt)?;
            if !flow.is_normal() {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// `begin ... end`: the child frame is popped on every exit path
    fn exec_block(&mut self, stmts: &[Spanned<Stmt>]) -> InterpResult<Flow> {
        let depth = self.scopes.push_scope();
        tracing::trace!(depth, "enter block");
        let outcome = self.exec_sequence(stmts);
        self.scopes.pop_scope();
        tracing::trace!(depth, "leave block");
        outcome
    }

    /// Inclusive ascending loop. The loop variable lives in the current
    /// frame, not a per-iteration one.
    fn exec_for(
        &mut self,
        var: &str,
        from: &Spanned<Expr>,
        to: &Spanned<Expr>,
        body: &Spanned<Stmt>,
    ) -> InterpResult<Flow> {
        let start = self.eval(from)?;
        let end = self.eval(to)?;
        let start = expect_int(start)?;
        let end = expect_int(end)?;

        for i in start..=end {
            self.scopes.set(var, Value::Int(i))?;
            tracing::trace!(var, i, "iteration");
            match self.exec_stmt(body)? {
                Flow::Normal | Flow::Continue => {}
                Flow::Break => {
                    tracing::debug!(var, i, "loop exited by break");
                    break;
                }
                Flow::Exit => return Ok(Flow::Exit),
            }
        }
        Ok(Flow::Normal)
    }

    // ============ Expressions ============

    /// Evaluate an expression with automatic stack growth for deep nesting
    fn eval(&mut self, expr: &Spanned<Expr>) -> InterpResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Spanned<Expr>) -> InterpResult<Value> {
        match &expr.node {
            Expr::IntLit(n) => Ok(Value::Int(*n)),
            Expr::StringLit(s) => Ok(Value::Str(s.clone())),
            Expr::BoolLit(b) => Ok(Value::Bool(*b)),

            Expr::Var(name) => self.lookup(name),

            Expr::Binary { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                eval_binary(*op, left, right)
            }

            Expr::Compare { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                eval_compare(*op, left, right)
            }

            Expr::Logical { left, op, right } => {
                let lhs = expect_bool(self.eval(left)?)?;
                match (op, lhs) {
                    (LogicOp::And, false) => Ok(Value::Bool(false)),
                    (LogicOp::Or, true) => Ok(Value::Bool(true)),
                    _ => Ok(Value::Bool(expect_bool(self.eval(right)?)?)),
                }
            }

            Expr::Unary { op, operand } => {
                let val = self.eval(operand)?;
                eval_unary(*op, val)
            }

            Expr::Length(s) => {
                let s = expect_str(self.eval(s)?)?;
                Ok(Value::Int(ops::length(&s)))
            }

            Expr::Position { haystack, needle } => {
                let haystack = self.eval(haystack)?;
                let needle = self.eval(needle)?;
                let (haystack, needle) = (expect_str(haystack)?, expect_str(needle)?);
                Ok(Value::Int(ops::position(&haystack, &needle)))
            }

            Expr::Concatenate { left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                let mut joined = expect_str(left)?;
                joined.push_str(&expect_str(right)?);
                Ok(Value::Str(joined))
            }

            Expr::Substring { string, start, len } => {
                let string = self.eval(string)?;
                let start = self.eval(start)?;
                let len = self.eval(len)?;
                let string = expect_str(string)?;
                let (start, len) = (expect_int(start)?, expect_int(len)?);
                Ok(Value::Str(ops::substring(&string, start, len)))
            }

            Expr::ReadInt => {
                let line = self.read_line()?;
                let text = line.trim();
                text.parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| RuntimeError::invalid_integer(text))
            }

            Expr::ReadStr => {
                let line = self.read_line()?;
                Ok(Value::Str(line.trim().to_string()))
            }
        }
    }

    fn lookup(&self, name: &str) -> InterpResult<Value> {
        self.scopes.get(name).cloned().ok_or_else(|| {
            let suggestion = find_similar_name(name, self.scopes.visible_names());
            RuntimeError::undefined_variable(name, suggestion)
        })
    }

    fn read_line(&mut self) -> InterpResult<String> {
        self.input
            .read_line()
            .map_err(|e| RuntimeError::io_error(&e.to_string()))?
            .ok_or_else(|| RuntimeError::io_error("end of input"))
    }
}

/// Integer arithmetic; both operands must be integers
fn eval_binary(op: BinOp, left: Value, right: Value) -> InterpResult<Value> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(ops::arith(op, *a, *b)?)),
        _ => Err(RuntimeError::type_error(
            "integer",
            &format!("{} {op} {}", left.type_name(), right.type_name()),
        )),
    }
}

/// `==`/`!=` go to the string comparison, every other operator to the
/// integer one. The choice is made on the operator alone; operands of the
/// wrong kind fail inside the chosen comparison.
fn eval_compare(op: CmpOp, left: Value, right: Value) -> InterpResult<Value> {
    let (expected, result) = if op.is_string_comparison() {
        let result = match (&left, &right) {
            (Value::Str(a), Value::Str(b)) => ops::compare_strs(op, a, b),
            _ => None,
        };
        ("string", result)
    } else {
        let result = match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => ops::compare_ints(op, *a, *b),
            _ => None,
        };
        ("integer", result)
    };
    result.map(Value::Bool).ok_or_else(|| {
        RuntimeError::type_error(
            expected,
            &format!("{} {op} {}", left.type_name(), right.type_name()),
        )
    })
}

/// Evaluate unary operation
fn eval_unary(op: UnOp, val: Value) -> InterpResult<Value> {
    match (op, val) {
        (UnOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnOp::Neg, other) => Err(RuntimeError::type_error("integer", other.type_name())),
        (UnOp::Not, other) => Err(RuntimeError::type_error("boolean", other.type_name())),
    }
}

fn expect_int(val: Value) -> InterpResult<i64> {
    val.as_int()
        .ok_or_else(|| RuntimeError::type_error("integer", val.type_name()))
}

fn expect_str(val: Value) -> InterpResult<String> {
    val.as_str()
        .map(str::to_owned)
        .ok_or_else(|| RuntimeError::type_error("string", val.type_name()))
}

fn expect_bool(val: Value) -> InterpResult<bool> {
    val.as_bool()
        .ok_or_else(|| RuntimeError::type_error("boolean", val.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::interp::error::ErrorKind;
    use crate::interp::io::{BufferOutput, ScriptedInput};

    type TestInterp = Interpreter<ScriptedInput, BufferOutput>;

    fn interp_with(input: &[&str]) -> TestInterp {
        Interpreter::with_io(ScriptedInput::new(input.iter().copied()), BufferOutput::new())
    }

    fn spanned<T>(node: T) -> Spanned<T> {
        Spanned::detached(node)
    }

    fn int(n: i64) -> Spanned<Expr> {
        spanned(Expr::IntLit(n))
    }

    fn string(s: &str) -> Spanned<Expr> {
        spanned(Expr::StringLit(s.to_string()))
    }

    fn boolean(b: bool) -> Spanned<Expr> {
        spanned(Expr::BoolLit(b))
    }

    fn var(name: &str) -> Spanned<Expr> {
        spanned(Expr::Var(name.to_string()))
    }

    fn binary(left: Spanned<Expr>, op: BinOp, right: Spanned<Expr>) -> Spanned<Expr> {
        spanned(Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn compare(left: Spanned<Expr>, op: CmpOp, right: Spanned<Expr>) -> Spanned<Expr> {
        spanned(Expr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn assign(name: &str, value: Spanned<Expr>) -> Spanned<Stmt> {
        spanned(Stmt::Assign {
            name: name.to_string(),
            value,
        })
    }

    fn print(value: Spanned<Expr>) -> Spanned<Stmt> {
        spanned(Stmt::Print { value })
    }

    fn if_then(cond: Spanned<Expr>, then_branch: Spanned<Stmt>) -> Spanned<Stmt> {
        spanned(Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: None,
        })
    }

    fn block(stmts: Vec<Spanned<Stmt>>) -> Spanned<Stmt> {
        spanned(Stmt::Block(stmts))
    }

    fn for_loop(var: &str, from: i64, to: i64, body: Spanned<Stmt>) -> Spanned<Stmt> {
        spanned(Stmt::For {
            var: var.to_string(),
            from: int(from),
            to: int(to),
            body: Box::new(body),
        })
    }

    fn run_program(stmts: Vec<Spanned<Stmt>>, input: &[&str]) -> (InterpResult<Outcome>, Vec<String>) {
        let mut interp = interp_with(input);
        let result = interp.run(&Program::new(stmts));
        (result, interp.into_output().into_lines())
    }

    fn eval(expr: Spanned<Expr>) -> InterpResult<Value> {
        interp_with(&[]).eval_expr(&expr)
    }

    // ---- Expressions ----

    #[test]
    fn test_eval_literals() {
        assert_eq!(eval(int(42)).unwrap(), Value::Int(42));
        assert_eq!(eval(string("hi")).unwrap(), Value::from("hi"));
        assert_eq!(eval(boolean(true)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_eval_arithmetic() {
        assert_eq!(eval(binary(int(2), BinOp::Add, int(3))).unwrap(), Value::Int(5));
        assert_eq!(eval(binary(int(2), BinOp::Sub, int(3))).unwrap(), Value::Int(-1));
        assert_eq!(eval(binary(int(4), BinOp::Mul, int(3))).unwrap(), Value::Int(12));
        assert_eq!(eval(binary(int(-7), BinOp::Div, int(2))).unwrap(), Value::Int(-3));
        assert_eq!(eval(binary(int(-7), BinOp::Mod, int(2))).unwrap(), Value::Int(-1));
    }

    #[test]
    fn test_division_by_zero() {
        let err = eval(binary(int(10), BinOp::Div, int(0))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        let err = eval(binary(int(10), BinOp::Mod, int(0))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_arithmetic_on_string_is_type_error() {
        let err = eval(binary(string("1"), BinOp::Add, int(2))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert!(err.message.contains("string + integer"));
    }

    #[test]
    fn test_numeric_comparisons() {
        let cases = [
            (CmpOp::Eq, 3, 3, true),
            (CmpOp::NotEq, 3, 3, false),
            (CmpOp::Gt, 4, 3, true),
            (CmpOp::GtEq, 3, 3, true),
            (CmpOp::Lt, 4, 3, false),
            (CmpOp::LtEq, 2, 3, true),
        ];
        for (op, a, b, expected) in cases {
            assert_eq!(eval(compare(int(a), op, int(b))).unwrap(), Value::Bool(expected), "{a} {op} {b}");
        }
    }

    #[test]
    fn test_string_comparisons() {
        assert_eq!(eval(compare(string("a"), CmpOp::StrEq, string("a"))).unwrap(), Value::Bool(true));
        assert_eq!(eval(compare(string("a"), CmpOp::StrNotEq, string("b"))).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_comparison_dispatch_is_by_operator() {
        // `==` always means string comparison
        let err = eval(compare(int(1), CmpOp::StrEq, int(1))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert!(err.message.contains("expected string"));

        // `>` always means integer comparison
        let err = eval(compare(string("b"), CmpOp::Gt, string("a"))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert!(err.message.contains("expected integer"));
    }

    #[test]
    fn test_unary_operators() {
        let neg = spanned(Expr::Unary { op: UnOp::Neg, operand: Box::new(int(5)) });
        assert_eq!(eval(neg).unwrap(), Value::Int(-5));

        let not = spanned(Expr::Unary { op: UnOp::Not, operand: Box::new(boolean(false)) });
        assert_eq!(eval(not).unwrap(), Value::Bool(true));

        let bad_neg = spanned(Expr::Unary { op: UnOp::Neg, operand: Box::new(boolean(true)) });
        assert_eq!(eval(bad_neg).unwrap_err().kind, ErrorKind::TypeError);

        let bad_not = spanned(Expr::Unary { op: UnOp::Not, operand: Box::new(int(0)) });
        assert_eq!(eval(bad_not).unwrap_err().kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_logical_short_circuit() {
        // Right side would fail if evaluated
        let failing = binary(int(1), BinOp::Div, int(0));
        let and = spanned(Expr::Logical {
            left: Box::new(boolean(false)),
            op: LogicOp::And,
            right: Box::new(failing.clone()),
        });
        assert_eq!(eval(and).unwrap(), Value::Bool(false));

        let or = spanned(Expr::Logical {
            left: Box::new(boolean(true)),
            op: LogicOp::Or,
            right: Box::new(failing),
        });
        assert_eq!(eval(or).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_logical_requires_booleans() {
        let expr = spanned(Expr::Logical {
            left: Box::new(boolean(true)),
            op: LogicOp::And,
            right: Box::new(int(1)),
        });
        assert_eq!(eval(expr).unwrap_err().kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_string_primitives() {
        assert_eq!(eval(spanned(Expr::Length(Box::new(string("hello"))))).unwrap(), Value::Int(5));

        let pos = spanned(Expr::Position {
            haystack: Box::new(string("hello")),
            needle: Box::new(string("ll")),
        });
        assert_eq!(eval(pos).unwrap(), Value::Int(3));

        let cat = spanned(Expr::Concatenate {
            left: Box::new(string("foo")),
            right: Box::new(string("bar")),
        });
        assert_eq!(eval(cat).unwrap(), Value::from("foobar"));

        let sub = spanned(Expr::Substring {
            string: Box::new(string("hello")),
            start: Box::new(int(4)),
            len: Box::new(int(10)),
        });
        assert_eq!(eval(sub).unwrap(), Value::from("lo"));
    }

    #[test]
    fn test_string_primitive_type_errors() {
        assert_eq!(
            eval(spanned(Expr::Length(Box::new(int(5))))).unwrap_err().kind,
            ErrorKind::TypeError
        );
        let sub = spanned(Expr::Substring {
            string: Box::new(string("hello")),
            start: Box::new(string("1")),
            len: Box::new(int(1)),
        });
        assert_eq!(eval(sub).unwrap_err().kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_expect_helpers_name_both_kinds() {
        assert_eq!(expect_int(Value::Int(7)).unwrap(), 7);
        assert_eq!(expect_str(Value::from("ab")).unwrap(), "ab");
        assert!(expect_bool(Value::Bool(true)).unwrap());

        let err = expect_int(Value::from("7")).unwrap_err();
        assert_eq!(err.message, "type error: expected integer, got string");
        let err = expect_str(Value::Bool(false)).unwrap_err();
        assert_eq!(err.message, "type error: expected string, got boolean");
        let err = expect_bool(Value::Int(1)).unwrap_err();
        assert_eq!(err.message, "type error: expected boolean, got integer");
    }

    #[test]
    fn test_read_int_and_read_str() {
        let mut interp = interp_with(&[" 42 ", "  padded text\t"]);
        assert_eq!(interp.eval_expr(&spanned(Expr::ReadInt)).unwrap(), Value::Int(42));
        assert_eq!(interp.eval_expr(&spanned(Expr::ReadStr)).unwrap(), Value::from("padded text"));
        assert_eq!(interp.input().remaining(), 0);
    }

    #[test]
    fn test_read_int_rejects_non_integer() {
        let err = interp_with(&["12abc"]).eval_expr(&spanned(Expr::ReadInt)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IoError);
        assert!(err.message.contains("12abc"));
    }

    #[test]
    fn test_read_at_end_of_input() {
        let err = interp_with(&[]).eval_expr(&spanned(Expr::ReadStr)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IoError);
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn test_undefined_variable_with_suggestion() {
        let (result, _) = run_program(
            vec![assign("count", int(1)), print(var("cuont"))],
            &[],
        );
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedVariable);
        assert!(err.message.contains("did you mean `count`"));
    }

    // ---- Statements ----

    #[test]
    fn test_print_renders_each_kind() {
        let (result, out) = run_program(
            vec![print(int(-3)), print(string("plain text")), print(boolean(false))],
            &[],
        );
        assert_eq!(result.unwrap(), Outcome::Completed);
        assert_eq!(out, ["-3", "plain text", "false"]);
    }

    #[test]
    fn test_assign_then_reassign_same_kind() {
        let (result, out) = run_program(
            vec![assign("x", int(1)), assign("x", int(2)), print(var("x"))],
            &[],
        );
        assert!(result.is_ok());
        assert_eq!(out, ["2"]);
    }

    #[test]
    fn test_assign_different_kind_is_type_conflict() {
        let (result, out) = run_program(
            vec![assign("x", int(1)), assign("x", string("one")), print(var("x"))],
            &[],
        );
        assert_eq!(result.unwrap_err().kind, ErrorKind::TypeConflict);
        assert!(out.is_empty());
    }

    #[test]
    fn test_assigning_boolean_is_rejected() {
        // Booleans are print-only; storing one is a deliberate type error
        let (result, _) = run_program(
            vec![assign("b", compare(int(3), CmpOp::Eq, int(3)))],
            &[],
        );
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert!(err.message.contains("boolean"));
    }

    #[test]
    fn test_if_requires_boolean_condition() {
        let (result, _) = run_program(vec![if_then(int(1), print(int(1)))], &[]);
        assert_eq!(result.unwrap_err().kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_if_without_else_skips_silently() {
        let (result, out) = run_program(
            vec![if_then(boolean(false), print(int(1))), print(int(2))],
            &[],
        );
        assert!(result.is_ok());
        assert_eq!(out, ["2"]);
    }

    #[test]
    fn test_if_else_branches() {
        let stmt = spanned(Stmt::If {
            cond: compare(int(1), CmpOp::Gt, int(2)),
            then_branch: Box::new(print(string("then"))),
            else_branch: Some(Box::new(print(string("else")))),
        });
        let (_, out) = run_program(vec![stmt], &[]);
        assert_eq!(out, ["else"]);
    }

    #[test]
    fn test_block_variables_do_not_leak() {
        let (result, out) = run_program(
            vec![block(vec![assign("inner", int(1))]), print(var("inner"))],
            &[],
        );
        assert_eq!(result.unwrap_err().kind, ErrorKind::UndefinedVariable);
        assert!(out.is_empty());
    }

    #[test]
    fn test_block_reads_outer_variable() {
        let (result, out) = run_program(
            vec![assign("x", int(7)), block(vec![block(vec![print(var("x"))])])],
            &[],
        );
        assert!(result.is_ok());
        assert_eq!(out, ["7"]);
    }

    #[test]
    fn test_block_write_shadows_outer_variable() {
        let (_, out) = run_program(
            vec![
                assign("x", int(1)),
                block(vec![assign("x", int(2)), print(var("x"))]),
                print(var("x")),
            ],
            &[],
        );
        assert_eq!(out, ["2", "1"]);
    }

    #[test]
    fn test_block_restores_scope_after_error() {
        let mut interp = interp_with(&[]);
        let program = Program::new(vec![block(vec![
            assign("tmp", int(1)),
            print(binary(int(1), BinOp::Div, int(0))),
        ])]);
        assert!(interp.run(&program).is_err());
        assert_eq!(interp.scopes().depth(), 1);
        assert!(!interp.scopes().contains("tmp"));
    }

    #[test]
    fn test_for_loop_inclusive() {
        let (result, out) = run_program(vec![for_loop("i", 1, 3, print(var("i")))], &[]);
        assert!(result.is_ok());
        assert_eq!(out, ["1", "2", "3"]);
    }

    #[test]
    fn test_for_loop_reverse_range_runs_zero_times() {
        let (result, out) = run_program(vec![for_loop("i", 5, 1, print(var("i")))], &[]);
        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn test_for_loop_break() {
        let body = block(vec![
            if_then(compare(var("i"), CmpOp::Eq, int(3)), spanned(Stmt::Break)),
            print(var("i")),
        ]);
        let (result, out) = run_program(vec![for_loop("i", 1, 5, body), print(string("after"))], &[]);
        assert!(result.is_ok());
        assert_eq!(out, ["1", "2", "after"]);
    }

    #[test]
    fn test_for_loop_continue() {
        let body = block(vec![
            if_then(compare(var("i"), CmpOp::Eq, int(3)), spanned(Stmt::Continue)),
            print(var("i")),
        ]);
        let (result, out) = run_program(vec![for_loop("i", 1, 5, body)], &[]);
        assert!(result.is_ok());
        assert_eq!(out, ["1", "2", "4", "5"]);
    }

    #[test]
    fn test_for_loop_variable_stays_in_current_frame() {
        let (_, out) = run_program(vec![for_loop("i", 1, 2, print(var("i"))), print(var("i"))], &[]);
        assert_eq!(out, ["1", "2", "2"]);
    }

    #[test]
    fn test_for_loop_bounds_must_be_integers() {
        let stmt = spanned(Stmt::For {
            var: "i".to_string(),
            from: string("1"),
            to: int(3),
            body: Box::new(print(var("i"))),
        });
        let (result, _) = run_program(vec![stmt], &[]);
        assert_eq!(result.unwrap_err().kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_for_loop_error_aborts_loop() {
        let body = print(binary(int(10), BinOp::Div, binary(var("i"), BinOp::Sub, int(2))));
        let (result, out) = run_program(vec![for_loop("i", 0, 5, body)], &[]);
        assert_eq!(result.unwrap_err().kind, ErrorKind::DivisionByZero);
        assert_eq!(out, ["-5", "-10"]);
    }

    #[test]
    fn test_break_only_exits_innermost_loop() {
        let inner = for_loop(
            "j",
            1,
            3,
            block(vec![
                if_then(compare(var("j"), CmpOp::Eq, int(2)), spanned(Stmt::Break)),
                print(binary(binary(var("i"), BinOp::Mul, int(10)), BinOp::Add, var("j"))),
            ]),
        );
        let (result, out) = run_program(vec![for_loop("i", 1, 2, inner)], &[]);
        assert!(result.is_ok());
        assert_eq!(out, ["11", "21"]);
    }

    #[test]
    fn test_exit_stops_everything() {
        let body = block(vec![
            if_then(compare(var("i"), CmpOp::Eq, int(2)), spanned(Stmt::Exit)),
            print(var("i")),
        ]);
        let mut interp = interp_with(&[]);
        let program = Program::new(vec![for_loop("i", 1, 5, body), print(string("unreachable"))]);
        assert_eq!(interp.run(&program).unwrap(), Outcome::Exited);
        assert_eq!(interp.output().lines(), ["1"]);
        assert_eq!(interp.scopes().depth(), 1);
    }

    #[test]
    fn test_stray_break_is_fatal() {
        let (result, out) = run_program(
            vec![block(vec![spanned(Stmt::Break)]), print(int(1))],
            &[],
        );
        assert_eq!(result.unwrap_err().kind, ErrorKind::StrayControl);
        assert!(out.is_empty());
    }

    #[test]
    fn test_undefined_variable_halts_sequence() {
        let (result, out) = run_program(
            vec![print(int(1)), print(var("missing")), print(int(2))],
            &[],
        );
        assert_eq!(result.unwrap_err().kind, ErrorKind::UndefinedVariable);
        assert_eq!(out, ["1"]);
    }

    #[test]
    fn test_error_carries_innermost_statement_span() {
        let failing = Spanned::new(
            Stmt::Print { value: var("nope") },
            Span::new(20, 31),
        );
        let outer = Spanned::new(Stmt::Block(vec![failing]), Span::new(0, 40));
        let (result, _) = run_program(vec![outer], &[]);
        assert_eq!(result.unwrap_err().span, Some(Span::new(20, 31)));
    }

    #[test]
    fn test_globals_persist_across_runs() {
        let mut interp = interp_with(&[]);
        interp.run(&Program::new(vec![assign("x", int(5))])).unwrap();
        interp.run(&Program::new(vec![print(var("x"))])).unwrap();
        assert_eq!(interp.output().lines(), ["5"]);
    }

    #[test]
    fn test_deeply_nested_blocks() {
        let mut stmt = print(int(1));
        for _ in 0..20_000 {
            stmt = block(vec![stmt]);
        }
        let (result, out) = run_program(vec![stmt], &[]);
        assert!(result.is_ok());
        assert_eq!(out, ["1"]);
    }
}
