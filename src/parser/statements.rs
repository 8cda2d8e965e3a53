//! Statement parsing implementation
//!
//! This module handles parsing of all C- statement types:
//!
//! - Compound statements: `{ local-declarations statement-list }`
//! - Selection: `if (e) s [else s]`
//! - Iteration: `while (e) s`
//! - Return: `return [e];`
//! - Expression statements, including the empty statement `;`
//!
//! # Grammar
//!
//! ```text
//! compound-stmt  ::= "{" { var-declaration } { statement } "}"
//! statement      ::= selection-stmt | iteration-stmt | return-stmt
//!                  | compound-stmt | expression-stmt
//! expression-stmt ::= [ expression ] ";"
//! ```
//!
//! A dangling `else` binds to the nearest `if`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

/// Tokens that can begin a statement
fn starts_statement(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::If
            | TokenKind::While
            | TokenKind::Return
            | TokenKind::LBrace
            | TokenKind::Ident
            | TokenKind::Num
            | TokenKind::LParen
            | TokenKind::Semicolon
    )
}

impl Parser {
    /// Parse a compound statement including its braces
    pub(crate) fn parse_compound_stmt(&mut self) -> Result<CompoundStmt, ParseError> {
        let loc = self.current_location();
        self.expect(TokenKind::LBrace)?;

        let local_declarations = self.parse_local_declarations()?;
        let statements = self.parse_statement_list()?;

        self.expect(TokenKind::RBrace)?;
        self.built();

        Ok(CompoundStmt {
            local_declarations,
            statements,
            location: loc,
        })
    }

    fn parse_local_declarations(&mut self) -> Result<Vec<VarDeclaration>, ParseError> {
        let mut declarations = Vec::new();

        while self.peek_kind().is_some_and(TokenKind::is_type_specifier) {
            declarations.push(self.parse_var_declaration()?);
        }

        Ok(declarations)
    }

    fn parse_statement_list(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();

        while self.peek_kind().is_some_and(starts_statement) {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::If) => self.parse_selection_stmt().map(Statement::Selection),
            Some(TokenKind::While) => self.parse_iteration_stmt().map(Statement::Iteration),
            Some(TokenKind::Return) => self.parse_return_stmt().map(Statement::Return),
            Some(TokenKind::LBrace) => self.parse_compound_stmt().map(Statement::Compound),
            _ => self.parse_expression_stmt().map(Statement::Expression),
        }
    }

    fn parse_expression_stmt(&mut self) -> Result<ExpressionStmt, ParseError> {
        let loc = self.current_location();

        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(TokenKind::Semicolon)?;
        self.built();

        Ok(ExpressionStmt {
            expr,
            location: loc,
        })
    }

    /// Parse if statement
    fn parse_selection_stmt(&mut self) -> Result<SelectionStmt, ParseError> {
        let loc = self.current_location();

        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        self.built();

        Ok(SelectionStmt {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_iteration_stmt(&mut self) -> Result<IterationStmt, ParseError> {
        let loc = self.current_location();

        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let body = Box::new(self.parse_statement()?);
        self.built();

        Ok(IterationStmt {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse return statement
    fn parse_return_stmt(&mut self) -> Result<ReturnStmt, ParseError> {
        let loc = self.current_location();
        self.expect(TokenKind::Return)?;

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(TokenKind::Semicolon)?;
        self.built();

        Ok(ReturnStmt {
            value,
            location: loc,
        })
    }
}
