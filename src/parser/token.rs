//! Tokens produced by the lexer

use super::ast::SourceLocation;
use std::fmt;

/// Longest lexeme the lexer accepts
pub const MAX_LEXEME_LEN: usize = 100;

/// Token classes of C-
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifiers and numbers
    Ident,
    Num,

    // Reserved words
    Else,
    If,
    Int,
    Return,
    Void,
    While,

    // Arithmetic
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    // Comparison
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=
    EqEq,  // ==
    NotEq, // !=

    // Assignment
    Eq, // =

    // Punctuation
    Semicolon, // ;
    Comma,     // ,
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]

    // Lexically invalid input
    Error,
}

impl TokenKind {
    /// Upper-case class label used when echoing tokens
    pub fn class_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::Num => "NUMBER",
            TokenKind::Else => "ELSE",
            TokenKind::If => "IF",
            TokenKind::Int => "INT",
            TokenKind::Return => "RETURN",
            TokenKind::Void => "VOID",
            TokenKind::While => "WHILE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Lt => "LESS THAN",
            TokenKind::Le => "LESS OR EQUAL",
            TokenKind::Gt => "GREATER THAN",
            TokenKind::Ge => "GREATER OR EQUAL",
            TokenKind::EqEq => "EQUAL",
            TokenKind::NotEq => "NOT EQUAL",
            TokenKind::Eq => "ASSIGN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LParen => "LEFT PARENTHESIS",
            TokenKind::RParen => "RIGHT PARENTHESIS",
            TokenKind::LBrace => "LEFT BRACE",
            TokenKind::RBrace => "RIGHT BRACE",
            TokenKind::LBracket => "LEFT BRACKET",
            TokenKind::RBracket => "RIGHT BRACKET",
            TokenKind::Error => "UNKNOWN",
        }
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::EqEq
                | TokenKind::NotEq
        )
    }

    pub fn is_type_specifier(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Void)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Num => write!(f, "number"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Void => write!(f, "'void'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Error => write!(f, "invalid token"),
        }
    }
}

/// A lexeme with its class and the position of its first character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Num => write!(f, "number {}", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}
