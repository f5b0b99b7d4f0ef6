//! Statement and expression nodes

use super::Spanned;
use serde::{Deserialize, Serialize};

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// `name := value`
    Assign { name: String, value: Spanned<Expr> },

    /// `print(value)`
    Print { value: Spanned<Expr> },

    /// `if cond then a [else b]`
    If {
        cond: Spanned<Expr>,
        then_branch: Box<Spanned<Stmt>>,
        else_branch: Option<Box<Spanned<Stmt>>>,
    },

    /// `for var := from to to do body` (inclusive, ascending)
    For {
        var: String,
        from: Spanned<Expr>,
        to: Spanned<Expr>,
        body: Box<Spanned<Stmt>>,
    },

    /// `begin ... end`, evaluated in a fresh child scope
    Block(Vec<Spanned<Stmt>>),

    Break,
    Continue,
    Exit,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    IntLit(i64),
    StringLit(String),
    BoolLit(bool),

    /// Variable reference
    Var(String),

    /// Integer arithmetic
    Binary {
        left: Box<Spanned<Expr>>,
        op: BinOp,
        right: Box<Spanned<Expr>>,
    },

    /// Comparison; the operator decides whether operands are integers or strings
    Compare {
        left: Box<Spanned<Expr>>,
        op: CmpOp,
        right: Box<Spanned<Expr>>,
    },

    /// Short-circuit `and` / `or` over booleans
    Logical {
        left: Box<Spanned<Expr>>,
        op: LogicOp,
        right: Box<Spanned<Expr>>,
    },

    Unary {
        op: UnOp,
        operand: Box<Spanned<Expr>>,
    },

    /// `length(s)`
    Length(Box<Spanned<Expr>>),

    /// `position(haystack, needle)`, 1-based, 0 when absent
    Position {
        haystack: Box<Spanned<Expr>>,
        needle: Box<Spanned<Expr>>,
    },

    /// `concatenate(left, right)`
    Concatenate {
        left: Box<Spanned<Expr>>,
        right: Box<Spanned<Expr>>,
    },

    /// `substring(string, start, len)`, 1-based start
    Substring {
        string: Box<Spanned<Expr>>,
        start: Box<Spanned<Expr>>,
        len: Box<Spanned<Expr>>,
    },

    /// `readint()`
    ReadInt,

    /// `readstr()`
    ReadStr,
}

/// Integer arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    /// `==`
    StrEq,
    /// `!=`
    StrNotEq,
}

impl CmpOp {
    /// `==` and `!=` compare strings; everything else compares integers
    pub fn is_string_comparison(self) -> bool {
        matches!(self, CmpOp::StrEq | CmpOp::StrNotEq)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    /// `-`
    Neg,
    /// `not`
    Not,
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CmpOp::Eq => "=",
            CmpOp::NotEq => "<>",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::LtEq => "<=",
            CmpOp::GtEq => ">=",
            CmpOp::StrEq => "==",
            CmpOp::StrNotEq => "!=",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for LogicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicOp::And => write!(f, "and"),
            LogicOp::Or => write!(f, "or"),
        }
    }
}

impl std::fmt::Display for UnOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
            UnOp::Not => write!(f, "not"),
        }
    }
}

// Teardown detaches children onto a work list so deeply nested trees drop
// without recursing.

impl Stmt {
    fn detach_children(&mut self, out: &mut Vec<Spanned<Stmt>>) {
        match self {
            Stmt::Block(body) => out.append(body),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                out.push(std::mem::replace(&mut **then_branch, Spanned::detached(Stmt::Break)));
                if let Some(else_branch) = else_branch.take() {
                    out.push(*else_branch);
                }
            }
            Stmt::For { body, .. } => {
                out.push(std::mem::replace(&mut **body, Spanned::detached(Stmt::Break)));
            }
            Stmt::Assign { .. } | Stmt::Print { .. } | Stmt::Break | Stmt::Continue | Stmt::Exit => {}
        }
    }
}

impl Drop for Stmt {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut stmt) = pending.pop() {
            stmt.node.detach_children(&mut pending);
        }
    }
}

impl Expr {
    fn detach_children(&mut self, out: &mut Vec<Spanned<Expr>>) {
        let mut take = |child: &mut Box<Spanned<Expr>>| {
            out.push(std::mem::replace(&mut **child, Spanned::detached(Expr::ReadInt)));
        };
        match self {
            Expr::Binary { left, right, .. }
            | Expr::Compare { left, right, .. }
            | Expr::Logical { left, right, .. }
            | Expr::Concatenate { left, right } => {
                take(left);
                take(right);
            }
            Expr::Position { haystack, needle } => {
                take(haystack);
                take(needle);
            }
            Expr::Substring { string, start, len } => {
                take(string);
                take(start);
                take(len);
            }
            Expr::Unary { operand, .. } | Expr::Length(operand) => take(operand),
            Expr::IntLit(_)
            | Expr::StringLit(_)
            | Expr::BoolLit(_)
            | Expr::Var(_)
            | Expr::ReadInt
            | Expr::ReadStr => {}
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.node.detach_children(&mut pending);
        }
    }
}
