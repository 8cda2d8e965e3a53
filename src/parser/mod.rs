//! C- front end
//!
//! This module transforms C- source text into an Abstract Syntax Tree (AST):
//! - [`source`]: character cursor with one character of pushback
//! - [`keywords`]: reserved word table
//! - [`lexer`]: DFA tokenizer (source text → tokens)
//! - [`parse`]: [`Parser`] struct, errors and token helpers (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`printer`]: indented AST dump
//!
//! # Language
//!
//! C- is the small teaching subset of C: `int` and `void` only, one-dimensional
//! arrays, functions, `if`/`else`, `while`, `return`, assignment, the four
//! arithmetic operators and six comparisons. No preprocessor, no pointers, no
//! other types.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead; each grammar
//! rule is a method. Declaration, statement and expression rules live in
//! their own files as `impl Parser` blocks.

pub mod ast;
mod declarations;
mod expressions;
pub mod keywords;
pub mod lexer;
pub mod parse;
pub mod printer;
pub mod source;
mod statements;
pub mod token;

pub use parse::{ParseError, Parser};

/// Parse a complete C- source text.
pub fn parse(source: &str) -> Result<ast::Program, ParseError> {
    Parser::new(source)?.parse_program()
}
