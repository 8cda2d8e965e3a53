//! Declaration parsing implementation
//!
//! This module handles parsing of declarations in C- programs:
//!
//! - Global variables: `int x;`, `int a[10];`
//! - Function declarations: `type name(params) { ... }`
//! - Local variable declarations at the top of a compound statement
//! - Type specifiers and parameter lists
//!
//! # Grammar
//!
//! ```text
//! declaration-list ::= { declaration }
//! declaration      ::= type-specifier ID ( "(" params ")" compound-stmt | [ "[" NUM "]" ] ";" )
//! var-declaration  ::= type-specifier ID [ "[" NUM "]" ] ";"
//! type-specifier   ::= "int" | "void"
//! params           ::= "void" | param { "," param }
//! param            ::= type-specifier ID [ "[" "]" ]
//! ```
//!
//! A global declaration is a variable or a function depending on whether the
//! identifier is followed by `(`; both share the type specifier and name that
//! were already consumed.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse declarations until the current token cannot start one
    pub(crate) fn parse_declaration_list(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        while self.peek_kind().is_some_and(TokenKind::is_type_specifier) {
            declarations.push(self.parse_declaration()?);
        }

        Ok(declarations)
    }

    /// Parse a global declaration (variable or function)
    pub(crate) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let loc = self.current_location();
        let type_spec = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;

        if self.check(TokenKind::LParen) {
            let fun = self.parse_function_rest(type_spec, name, loc)?;
            Ok(Declaration::Fun(fun))
        } else {
            let var = self.parse_variable_rest(type_spec, name, loc)?;
            Ok(Declaration::Var(var))
        }
    }

    /// Parse a local variable declaration: type name [ "[" NUM "]" ] ;
    pub(crate) fn parse_var_declaration(&mut self) -> Result<VarDeclaration, ParseError> {
        let loc = self.current_location();
        let type_spec = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;
        self.parse_variable_rest(type_spec, name, loc)
    }

    /// Everything after the name of a variable declaration
    fn parse_variable_rest(
        &mut self,
        type_spec: TypeSpecifier,
        name: String,
        location: SourceLocation,
    ) -> Result<VarDeclaration, ParseError> {
        let array_size = if self.match_token(TokenKind::LBracket)? {
            let size = self.parse_array_size()?;
            self.expect(TokenKind::RBracket)?;
            Some(size)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon)?;
        self.built();

        Ok(VarDeclaration {
            type_spec,
            name,
            array_size,
            location,
        })
    }

    /// Constant array bound; must be a number token
    fn parse_array_size(&mut self) -> Result<usize, ParseError> {
        if !self.check(TokenKind::Num) {
            return Err(self.unexpected("array size"));
        }

        let token = self.advance()?;
        token
            .lexeme
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidNumber {
                lexeme: token.lexeme.clone(),
                location: token.location,
            })
    }

    /// Everything after the name of a function declaration: (params) { body }
    fn parse_function_rest(
        &mut self,
        return_type: TypeSpecifier,
        name: String,
        location: SourceLocation,
    ) -> Result<FunDeclaration, ParseError> {
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        let body = self.parse_compound_stmt()?;
        self.built();

        log::debug!(
            "function '{}' at line {}: {} parameter(s)",
            name,
            location.line,
            params.len()
        );

        Ok(FunDeclaration {
            return_type,
            name,
            params,
            body,
            location,
        })
    }

    pub(crate) fn parse_type_specifier(&mut self) -> Result<TypeSpecifier, ParseError> {
        let type_spec = match self.peek_kind() {
            Some(TokenKind::Int) => TypeSpecifier::Int,
            Some(TokenKind::Void) => TypeSpecifier::Void,
            _ => return Err(self.unexpected("'int' or 'void'")),
        };
        self.advance()?;
        Ok(type_spec)
    }

    /// Parse parameter list contents: `void` or param { , param }
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        if self.check(TokenKind::Void) {
            let loc = self.current_location();
            self.advance()?; // consume 'void'

            // `(void)` means no parameters; `void name` is a parameter of type void
            if !self.check(TokenKind::Ident) {
                return Ok(Vec::new());
            }

            let first = self.parse_param_rest(TypeSpecifier::Void, loc)?;
            return self.parse_param_list(vec![first]);
        }

        self.parse_param_list(Vec::new())
    }

    fn parse_param_list(&mut self, mut params: Vec<Param>) -> Result<Vec<Param>, ParseError> {
        if params.is_empty() {
            params.push(self.parse_param()?);
        }

        while self.match_token(TokenKind::Comma)? {
            params.push(self.parse_param()?);
        }

        Ok(params)
    }

    pub(crate) fn parse_param(&mut self) -> Result<Param, ParseError> {
        let loc = self.current_location();
        let type_spec = self.parse_type_specifier()?;
        self.parse_param_rest(type_spec, loc)
    }

    fn parse_param_rest(
        &mut self,
        type_spec: TypeSpecifier,
        location: SourceLocation,
    ) -> Result<Param, ParseError> {
        let name = self.expect_identifier()?;

        // Unsized array []
        let is_array = if self.match_token(TokenKind::LBracket)? {
            self.expect(TokenKind::RBracket)?;
            true
        } else {
            false
        };

        self.built();

        Ok(Param {
            type_spec,
            name,
            is_array,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};
    use crate::parser::token::TokenKind;

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::new(source)?.parse_program()
    }

    #[test]
    fn test_global_variables() {
        let program = parse("int x; int a[10]; void v;").unwrap();
        let vars: Vec<&VarDeclaration> = program
            .declarations
            .iter()
            .map(|decl| match decl {
                Declaration::Var(var) => var,
                _ => panic!("Expected variable declaration"),
            })
            .collect();

        assert_eq!(vars[0].name, "x");
        assert_eq!(vars[0].array_size, None);
        assert!(!vars[0].is_array());
        assert_eq!(vars[1].name, "a");
        assert_eq!(vars[1].array_size, Some(10));
        assert!(vars[1].is_array());
        assert_eq!(vars[2].type_spec, TypeSpecifier::Void);
    }

    #[test]
    fn test_parameters() {
        let program = parse("int f(int a, int b[], void c) { }").unwrap();
        let Declaration::Fun(fun) = &program.declarations[0] else {
            panic!("Expected function declaration");
        };

        assert_eq!(fun.params.len(), 3);
        assert_eq!(fun.params[0].name, "a");
        assert!(!fun.params[0].is_array);
        assert_eq!(fun.params[1].name, "b");
        assert!(fun.params[1].is_array);
        assert_eq!(fun.params[2].type_spec, TypeSpecifier::Void);
    }

    #[test]
    fn test_void_parameter_list() {
        let program = parse("void f(void) { }").unwrap();
        let Declaration::Fun(fun) = &program.declarations[0] else {
            panic!("Expected function declaration");
        };
        assert!(fun.params.is_empty());
    }

    #[test]
    fn test_void_named_parameter_starts_list() {
        let program = parse("void f(void x, int y) { }").unwrap();
        let Declaration::Fun(fun) = &program.declarations[0] else {
            panic!("Expected function declaration");
        };
        assert_eq!(fun.params.len(), 2);
        assert_eq!(fun.params[0].type_spec, TypeSpecifier::Void);
        assert_eq!(fun.params[0].name, "x");
    }

    #[test]
    fn test_empty_parentheses_are_rejected() {
        let err = parse("int f() { }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected {
                found: TokenKind::RParen,
                ..
            }
        ));
    }

    #[test]
    fn test_array_size_must_be_number() {
        let err = parse("int a[n];").unwrap_err();
        match err {
            ParseError::Unexpected {
                expected,
                found,
                location,
                ..
            } => {
                assert_eq!(expected, "array size");
                assert_eq!(found, TokenKind::Ident);
                assert_eq!(location, SourceLocation::new(1, 6));
            }
            other => panic!("Expected unexpected-token error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_identifier_after_type() {
        let err = parse("int ;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected {
                found: TokenKind::Semicolon,
                ..
            }
        ));
    }

    #[test]
    fn test_declaration_locations() {
        let program = parse("int x;\nvoid main(void) { }").unwrap();
        assert_eq!(program.declarations[0].location(), SourceLocation::new(1, 0));
        assert_eq!(program.declarations[1].location(), SourceLocation::new(2, 0));
        assert_eq!(program.declarations[1].name(), "main");
    }
}
