//! Expression parsing implementation
//!
//! This module handles parsing of C- expressions by recursive descent, one
//! method per precedence level:
//!
//! ```text
//! expression          ::= var "=" expression | simple-expression
//! simple-expression   ::= additive-expression [ relop additive-expression ]
//! additive-expression ::= term { ("+" | "-") term }
//! term                ::= factor { ("*" | "/") factor }
//! factor              ::= "(" expression ")" | var | call | NUM
//! var                 ::= ID [ "[" expression "]" ]
//! call                ::= ID "(" [ expression { "," expression } ] ")"
//! ```
//!
//! # Identifier-led expressions
//!
//! An expression starting with an identifier may be an assignment target, a
//! call, or the leftmost operand of a simple expression. The parser reads the
//! identifier and its optional index into a [`Primary`] without building a
//! node, then decides from the token that follows:
//!
//! - `=`: the primary becomes the [`Variable`] target of an [`AssignExpr`]
//! - `(`: the primary's name becomes an [`Activation`]; an index is dropped
//!   with a warning
//! - anything else: the primary becomes a [`Variable`] factor and is threaded
//!   down as the first factor of the simple expression
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{Token, TokenKind};

/// Identifier plus optional index, before it is known what it names
struct Primary {
    name: String,
    index: Option<Box<Expression>>,
    location: SourceLocation,
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        if !self.check(TokenKind::Ident) {
            return self.parse_simple_expression(None).map(Expression::Simple);
        }

        let primary = self.parse_primary()?;

        if self.check(TokenKind::Eq) {
            let loc = primary.location;
            self.advance()?; // consume '='

            let target = self.finish_variable(primary);
            // Right-associative: a = b = c
            let value = Box::new(self.parse_expression()?);
            self.built();

            return Ok(Expression::Assign(AssignExpr {
                target,
                value,
                location: loc,
            }));
        }

        let lead = self.finish_identifier_factor(primary)?;
        self.parse_simple_expression(Some(lead))
            .map(Expression::Simple)
    }

    /// ID [ "[" expression "]" ]
    fn parse_primary(&mut self) -> Result<Primary, ParseError> {
        let loc = self.current_location();
        let name = self.expect_identifier()?;

        let index = if self.match_token(TokenKind::LBracket)? {
            let index = self.parse_expression()?;
            self.expect(TokenKind::RBracket)?;
            Some(Box::new(index))
        } else {
            None
        };

        Ok(Primary {
            name,
            index,
            location: loc,
        })
    }

    fn finish_variable(&mut self, primary: Primary) -> Variable {
        self.built();
        Variable {
            name: primary.name,
            index: primary.index,
            location: primary.location,
        }
    }

    /// Turn a primary into a variable or call factor depending on the next token
    fn finish_identifier_factor(&mut self, primary: Primary) -> Result<Factor, ParseError> {
        let factor = if self.check(TokenKind::LParen) {
            Factor::Call(self.parse_call(primary)?)
        } else {
            Factor::Var(self.finish_variable(primary))
        };
        self.built();
        Ok(factor)
    }

    /// Parse the argument list of a call whose name has been read
    fn parse_call(&mut self, primary: Primary) -> Result<Activation, ParseError> {
        let Primary {
            name,
            index,
            location,
        } = primary;

        if let Some(index) = index {
            log::warn!(
                "line {}, column {}: array index on call to '{}' ignored",
                location.line,
                location.column,
                name
            );
            self.discarded(index.node_count());
        }

        self.expect(TokenKind::LParen)?;
        let args = self.parse_args()?;
        self.expect(TokenKind::RParen)?;
        self.built();

        Ok(Activation {
            name,
            args,
            location,
        })
    }

    fn parse_args(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        args.push(self.parse_expression()?);
        while self.match_token(TokenKind::Comma)? {
            args.push(self.parse_expression()?);
        }

        Ok(args)
    }

    /// additive-expression [ relop additive-expression ]
    ///
    /// `lead` is an already parsed first factor, if any.
    pub(crate) fn parse_simple_expression(
        &mut self,
        lead: Option<Factor>,
    ) -> Result<SimpleExpr, ParseError> {
        let loc = match &lead {
            Some(factor) => factor.location(),
            None => self.current_location(),
        };

        let left = self.parse_additive_expression(lead)?;

        let comparison = if self.peek_kind().is_some_and(TokenKind::is_relational) {
            let op = self.parse_relational_op()?;
            let right = self.parse_additive_expression(None)?;
            Some((op, right))
        } else {
            None
        };

        self.built();

        Ok(SimpleExpr {
            left,
            comparison,
            location: loc,
        })
    }

    fn parse_relational_op(&mut self) -> Result<RelOp, ParseError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Lt) => RelOp::Lt,
            Some(TokenKind::Le) => RelOp::Le,
            Some(TokenKind::Gt) => RelOp::Gt,
            Some(TokenKind::Ge) => RelOp::Ge,
            Some(TokenKind::EqEq) => RelOp::Eq,
            Some(TokenKind::NotEq) => RelOp::Ne,
            _ => return Err(self.unexpected("relational operator")),
        };
        self.advance()?;
        Ok(op)
    }

    /// Parse additive (+ -), left associative
    pub(crate) fn parse_additive_expression(
        &mut self,
        lead: Option<Factor>,
    ) -> Result<AdditiveExpr, ParseError> {
        let mut left = AdditiveExpr::Term(self.parse_term(lead)?);
        self.built();

        while matches!(self.peek_kind(), Some(TokenKind::Plus | TokenKind::Minus)) {
            let loc = self.current_location();
            let op = self.parse_add_op()?;
            let right = self.parse_term(None)?;
            left = AdditiveExpr::Binary {
                left: Box::new(left),
                op,
                right,
                location: loc,
            };
            self.built();
        }

        Ok(left)
    }

    fn parse_add_op(&mut self) -> Result<AddOp, ParseError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Plus) => AddOp::Add,
            Some(TokenKind::Minus) => AddOp::Sub,
            _ => return Err(self.unexpected("'+' or '-'")),
        };
        self.advance()?;
        Ok(op)
    }

    /// Parse multiplicative (* /), left associative
    pub(crate) fn parse_term(&mut self, lead: Option<Factor>) -> Result<Term, ParseError> {
        let mut left = Term::Factor(self.parse_factor(lead)?);
        self.built();

        while matches!(self.peek_kind(), Some(TokenKind::Star | TokenKind::Slash)) {
            let loc = self.current_location();
            let op = self.parse_mul_op()?;
            let right = self.parse_factor(None)?;
            left = Term::Binary {
                left: Box::new(left),
                op,
                right,
                location: loc,
            };
            self.built();
        }

        Ok(left)
    }

    fn parse_mul_op(&mut self) -> Result<MulOp, ParseError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Star) => MulOp::Mul,
            Some(TokenKind::Slash) => MulOp::Div,
            _ => return Err(self.unexpected("'*' or '/'")),
        };
        self.advance()?;
        Ok(op)
    }

    /// Parse factor; `lead` short-circuits to an already parsed one
    pub(crate) fn parse_factor(&mut self, lead: Option<Factor>) -> Result<Factor, ParseError> {
        if let Some(factor) = lead {
            return Ok(factor);
        }

        match self.peek_kind() {
            Some(TokenKind::LParen) => {
                let loc = self.current_location();
                self.advance()?; // consume '('
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                self.built();
                Ok(Factor::Group(Box::new(expr), loc))
            }
            Some(TokenKind::Ident) => {
                let primary = self.parse_primary()?;
                self.finish_identifier_factor(primary)
            }
            Some(TokenKind::Num) => {
                let token = self.advance()?;
                let value = parse_int_literal(&token)?;
                self.built();
                Ok(Factor::Num(value, token.location))
            }
            _ => Err(self.unexpected("'(', identifier, or number")),
        }
    }
}

fn parse_int_literal(token: &Token) -> Result<i32, ParseError> {
    token
        .lexeme
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidNumber {
            lexeme: token.lexeme.clone(),
            location: token.location,
        })
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};
    use crate::parser::token::TokenKind;

    /// Parse `expr;` inside a function body and return the expression
    fn parse_expr(expr: &str) -> Result<Expression, ParseError> {
        let source = format!("void f(void) {{ {expr}; }}");
        let program = Parser::new(&source)?.parse_program()?;
        let Some(Declaration::Fun(fun)) = program.declarations.into_iter().next() else {
            panic!("Expected function declaration");
        };
        match fun.body.statements.into_iter().next() {
            Some(Statement::Expression(ExpressionStmt {
                expr: Some(expr), ..
            })) => Ok(expr),
            other => panic!("Expected expression statement, got {other:?}"),
        }
    }

    fn single_factor(expr: &Expression) -> &Factor {
        match expr {
            Expression::Simple(SimpleExpr {
                left: AdditiveExpr::Term(Term::Factor(factor)),
                comparison: None,
                ..
            }) => factor,
            other => panic!("Expected a lone factor, got {other:?}"),
        }
    }

    #[test]
    fn test_call_with_arguments() {
        let expr = parse_expr("x(1, 2)").unwrap();
        let Factor::Call(call) = single_factor(&expr) else {
            panic!("Expected call");
        };
        assert_eq!(call.name, "x");
        assert_eq!(call.args.len(), 2);
        assert!(matches!(single_factor(&call.args[0]), Factor::Num(1, _)));
        assert!(matches!(single_factor(&call.args[1]), Factor::Num(2, _)));
    }

    #[test]
    fn test_call_without_arguments() {
        let expr = parse_expr("input()").unwrap();
        let Factor::Call(call) = single_factor(&expr) else {
            panic!("Expected call");
        };
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_indexed_assignment() {
        let expr = parse_expr("x[0] = 5").unwrap();
        let Expression::Assign(assign) = expr else {
            panic!("Expected assignment");
        };
        assert_eq!(assign.target.name, "x");
        let index = assign.target.index.as_deref().expect("index");
        assert!(matches!(single_factor(index), Factor::Num(0, _)));
        assert!(matches!(single_factor(&assign.value), Factor::Num(5, _)));
    }

    #[test]
    fn test_variable_folds_into_simple_expression() {
        let expr = parse_expr("x + 1").unwrap();
        let Expression::Simple(simple) = expr else {
            panic!("Expected simple expression");
        };
        assert!(simple.comparison.is_none());

        match simple.left {
            AdditiveExpr::Binary {
                left, op, right, ..
            } => {
                assert_eq!(op, AddOp::Add);
                assert!(matches!(
                    *left,
                    AdditiveExpr::Term(Term::Factor(Factor::Var(Variable { ref name, index: None, .. })))
                        if name == "x"
                ));
                assert!(matches!(right, Term::Factor(Factor::Num(1, _))));
            }
            other => panic!("Expected additive expression, got {other:?}"),
        }
    }

    #[test]
    fn test_call_as_leading_operand() {
        let expr = parse_expr("f(a) * 2 < 10").unwrap();
        let Expression::Simple(simple) = expr else {
            panic!("Expected simple expression");
        };
        let (op, _) = simple.comparison.expect("comparison");
        assert_eq!(op, RelOp::Lt);
        assert!(matches!(
            simple.left,
            AdditiveExpr::Term(Term::Binary {
                op: MulOp::Mul,
                ..
            })
        ));
    }

    #[test]
    fn test_chained_assignment_is_right_associative() {
        let expr = parse_expr("a = b = 3").unwrap();
        let Expression::Assign(outer) = expr else {
            panic!("Expected assignment");
        };
        assert_eq!(outer.target.name, "a");
        let Expression::Assign(inner) = *outer.value else {
            panic!("Expected nested assignment");
        };
        assert_eq!(inner.target.name, "b");
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        // (10 - 4) - 3
        let expr = parse_expr("10 - 4 - 3").unwrap();
        let Expression::Simple(simple) = expr else {
            panic!("Expected simple expression");
        };
        let AdditiveExpr::Binary { left, right, .. } = simple.left else {
            panic!("Expected binary additive expression");
        };
        assert!(matches!(right, Term::Factor(Factor::Num(3, _))));
        assert!(matches!(*left, AdditiveExpr::Binary { .. }));
    }

    #[test]
    fn test_parenthesised_group() {
        let expr = parse_expr("(a + b) * c").unwrap();
        let Expression::Simple(simple) = expr else {
            panic!("Expected simple expression");
        };
        let AdditiveExpr::Term(Term::Binary { left, .. }) = simple.left else {
            panic!("Expected multiplicative term");
        };
        assert!(matches!(*left, Term::Factor(Factor::Group(..))));
    }

    #[test]
    fn test_every_relational_operator() {
        for (text, op) in [
            ("<", RelOp::Lt),
            ("<=", RelOp::Le),
            (">", RelOp::Gt),
            (">=", RelOp::Ge),
            ("==", RelOp::Eq),
            ("!=", RelOp::Ne),
        ] {
            let expr = parse_expr(&format!("a {text} b")).unwrap();
            let Expression::Simple(simple) = expr else {
                panic!("Expected simple expression");
            };
            assert_eq!(simple.comparison.map(|(op, _)| op), Some(op), "{text}");
            assert_eq!(op.symbol(), text);
        }
    }

    #[test]
    fn test_index_on_call_is_dropped() {
        let source = "void f(void) { g[1 + 2](3); }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let Declaration::Fun(fun) = &program.declarations[0] else {
            panic!("Expected function declaration");
        };
        let Statement::Expression(ExpressionStmt {
            expr: Some(expr), ..
        }) = &fun.body.statements[0]
        else {
            panic!("Expected expression statement");
        };
        let Factor::Call(call) = single_factor(expr) else {
            panic!("Expected call");
        };
        assert_eq!(call.name, "g");
        assert_eq!(call.args.len(), 1);
        assert_eq!(parser.nodes_built(), program.node_count());
    }

    #[test]
    fn test_assignment_to_call_is_rejected() {
        let err = parse_expr("f(1) = 2").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected {
                found: TokenKind::Eq,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_expr("x = 1 +").unwrap_err();
        match err {
            ParseError::Unexpected {
                expected, found, ..
            } => {
                assert_eq!(expected, "'(', identifier, or number");
                assert_eq!(found, TokenKind::Semicolon);
            }
            other => panic!("Expected unexpected-token error, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_literal() {
        let err = parse_expr("x = 99999999999").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { ref lexeme, .. } if lexeme == "99999999999"));
    }
}
