//! # Introduction
//!
//! `cminus` is the front end of a C- compiler: it turns source text into a
//! syntax tree and reports the first lexical or syntax error it meets.
//!
//! ## Pipeline
//!
//! ```text
//! Source → CharSource → Lexer (+ reserved words) → Parser → AST
//! ```
//!
//! The parser pulls tokens from the lexer one at a time; nothing is buffered
//! beyond the current token and one pushed-back character.
//!
//! ```
//! use cminus::parser::{self, ast::Declaration};
//!
//! let program = parser::parse("int x; void main(void) { x = 1; }").unwrap();
//! assert_eq!(program.declarations.len(), 2);
//! assert!(matches!(program.declarations[1], Declaration::Fun(_)));
//! ```
//!
//! Errors are fail-fast: [`parser::ParseError`] carries the location of the
//! offending token, and lexical errors arrive wrapped in it.

pub mod parser;
