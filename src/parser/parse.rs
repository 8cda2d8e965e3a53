//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent analyser with one token of lookahead,
//! organised as:
//! - This module: Parser struct, token cursor helpers, and coordination
//! - `declarations`: global declarations, type specifiers, parameters
//! - `statements`: compound blocks and the five statement forms
//! - `expressions`: assignment, simple/additive/multiplicative expressions,
//!   factors and calls
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state. Tokens are pulled from the
//! [`Lexer`] on demand; only the current token is buffered.
//!
//! Every error is fatal: the first [`ParseError`] unwinds through `?` to
//! [`Parser::parse_program`] and no partial tree is returned.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::token::{Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer rejected the input while the parser was pulling tokens
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The current token does not fit the grammar rule being parsed
    #[error(
        "syntax error at line {}, column {}: expected {expected}, found {found} \"{lexeme}\"",
        .location.line,
        .location.column
    )]
    Unexpected {
        expected: String,
        found: TokenKind,
        lexeme: String,
        location: SourceLocation,
    },

    /// Input ended before the grammar was satisfied
    #[error(
        "syntax error at line {}, column {}: unexpected end of input, expected {expected}",
        .location.line,
        .location.column
    )]
    UnexpectedEof {
        expected: String,
        location: SourceLocation,
    },

    /// A number token that does not fit the literal's type
    #[error(
        "syntax error at line {}, column {}: integer literal {lexeme} is out of range",
        .location.line,
        .location.column
    )]
    InvalidNumber {
        lexeme: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location,
            ParseError::Unexpected { location, .. }
            | ParseError::UnexpectedEof { location, .. }
            | ParseError::InvalidNumber { location, .. } => *location,
        }
    }
}

/// Recursive descent parser for C-
pub struct Parser {
    lexer: Lexer,
    current: Option<Token>,
    nodes_built: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_lexer(Lexer::new(source))
    }

    /// Parse from an already configured lexer (e.g. one with echo enabled).
    pub fn with_lexer(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            nodes_built: 0,
        })
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let declarations = self.parse_declaration_list()?;

        // Anything left over cannot start a declaration
        if self.current.is_some() {
            return Err(self.unexpected("'int' or 'void'"));
        }

        self.built();
        log::debug!(
            "parsed {} declaration(s), {} node(s)",
            declarations.len(),
            self.nodes_built
        );

        Ok(Program { declarations })
    }

    /// Number of AST nodes the parser has put into the tree so far.
    ///
    /// Speculatively parsed subtrees that end up discarded are not counted.
    pub fn nodes_built(&self) -> usize {
        self.nodes_built
    }

    // ===== Helper methods =====

    pub(crate) fn built(&mut self) {
        self.nodes_built += 1;
    }

    pub(crate) fn discarded(&mut self, nodes: usize) {
        self.nodes_built -= nodes;
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.current.as_ref().map(|token| token.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consume the current token and pull the next one from the lexer.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let Some(token) = self.current.take() else {
            return Err(ParseError::UnexpectedEof {
                expected: "more input".to_string(),
                location: self.lexer.location(),
            });
        };
        self.current = self.lexer.next_token()?;
        Ok(token)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        Ok(self.expect(TokenKind::Ident)?.lexeme)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        match &self.current {
            Some(token) => token.location,
            None => self.lexer.location(),
        }
    }

    /// Error describing the current token (or end of input) as unexpected.
    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let expected = expected.into();
        match &self.current {
            Some(token) => ParseError::Unexpected {
                expected,
                found: token.kind,
                lexeme: token.lexeme.clone(),
                location: token.location,
            },
            None => ParseError::UnexpectedEof {
                expected,
                location: self.lexer.location(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_function() {
        let source = "int main(void) { return 0; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.declarations.len(), 1);
        match &program.declarations[0] {
            Declaration::Fun(fun) => {
                assert_eq!(fun.name, "main");
                assert_eq!(fun.return_type, TypeSpecifier::Int);
                assert!(fun.params.is_empty());
                assert_eq!(fun.body.statements.len(), 1);
                assert!(matches!(fun.body.statements[0], Statement::Return(_)));
            }
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_empty_input_is_empty_program() {
        let mut parser = Parser::new("  /* nothing */ \n").unwrap();
        let program = parser.parse_program().unwrap();
        assert!(program.declarations.is_empty());
        assert_eq!(program.node_count(), 1);
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        let mut parser = Parser::new("int x; x = 1;").unwrap();
        let err = parser.parse_program().unwrap_err();

        match err {
            ParseError::Unexpected {
                found,
                lexeme,
                location,
                ..
            } => {
                assert_eq!(found, TokenKind::Ident);
                assert_eq!(lexeme, "x");
                assert_eq!(location, SourceLocation::new(1, 7));
            }
            other => panic!("Expected unexpected-token error, got {other:?}"),
        }
    }

    #[test]
    fn test_lexical_error_surfaces_through_parser() {
        let mut parser = Parser::new("int x; int y$;").unwrap();
        let err = parser.parse_program().unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)));
        assert_eq!(err.location(), SourceLocation::new(1, 12));
    }

    #[test]
    fn test_lexical_error_in_first_token() {
        assert!(matches!(Parser::new("#include"), Err(ParseError::Lex(_))));
    }

    #[test]
    fn test_error_messages() {
        let mut parser = Parser::new("int x").unwrap();
        let err = parser.parse_program().unwrap_err();
        assert_eq!(
            err.to_string(),
            "syntax error at line 1, column 5: unexpected end of input, expected ';'"
        );

        let mut parser = Parser::new("int 5;").unwrap();
        let err = parser.parse_program().unwrap_err();
        assert_eq!(
            err.to_string(),
            "syntax error at line 1, column 4: expected identifier, found number \"5\""
        );
    }
}
