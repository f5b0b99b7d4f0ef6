//! Token definitions

use logos::Logos;

/// aug token
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("to")]
    To,
    #[token("do")]
    Do,
    #[token("begin")]
    Begin,
    #[token("end")]
    End,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("exit")]
    Exit,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,

    // Built-in primitives
    #[token("print")]
    Print,
    #[token("length")]
    Length,
    #[token("position")]
    Position,
    #[token("concatenate")]
    Concatenate,
    #[token("substring")]
    Substring,
    #[token("readint")]
    ReadInt,
    #[token("readstr")]
    ReadStr,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok(), priority = 2)]
    IntLit(i64),

    // No escape sequences: the literal runs to the next double quote
    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    StringLit(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    // Punctuation
    #[token(":=")]
    ColonEq,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Integer comparison
    #[token("=")]
    Eq,
    #[token("<>")]
    LtGt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // String comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::If => write!(f, "if"),
            Token::Then => write!(f, "then"),
            Token::Else => write!(f, "else"),
            Token::For => write!(f, "for"),
            Token::To => write!(f, "to"),
            Token::Do => write!(f, "do"),
            Token::Begin => write!(f, "begin"),
            Token::End => write!(f, "end"),
            Token::Break => write!(f, "break"),
            Token::Continue => write!(f, "continue"),
            Token::Exit => write!(f, "exit"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::Print => write!(f, "print"),
            Token::Length => write!(f, "length"),
            Token::Position => write!(f, "position"),
            Token::Concatenate => write!(f, "concatenate"),
            Token::Substring => write!(f, "substring"),
            Token::ReadInt => write!(f, "readint"),
            Token::ReadStr => write!(f, "readstr"),
            Token::IntLit(n) => write!(f, "{n}"),
            Token::StringLit(s) => write!(f, "\"{s}\""),
            Token::Ident(s) => write!(f, "{s}"),
            Token::ColonEq => write!(f, ":="),
            Token::Semi => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Eq => write!(f, "="),
            Token::LtGt => write!(f, "<>"),
            Token::LtEq => write!(f, "<="),
            Token::GtEq => write!(f, ">="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::EqEq => write!(f, "=="),
            Token::NotEq => write!(f, "!="),
        }
    }
}
