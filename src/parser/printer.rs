//! Indented AST dump for the verbose parser mode
//!
//! One node per line, four `-` per nesting level. Precedence wrappers that hold
//! a single child (a term with no operator, a parenthesised group, a simple
//! expression without a comparison) are printed as their child.

use crate::parser::ast::*;

const INDENT: &str = "----";

/// Render `program` as an indented tree.
pub fn render(program: &Program) -> String {
    let mut printer = Printer::default();
    printer.program(program);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn program(&mut self, program: &Program) {
        self.line(0, "Program");
        for decl in &program.declarations {
            match decl {
                Declaration::Var(var) => self.var_declaration(1, var),
                Declaration::Fun(fun) => self.fun_declaration(1, fun),
            }
        }
    }

    fn var_declaration(&mut self, depth: usize, var: &VarDeclaration) {
        let text = match var.array_size {
            Some(size) => format!(
                "VarDeclaration: {} {}[{}]",
                var.type_spec.as_str(),
                var.name,
                size
            ),
            None => format!("VarDeclaration: {} {}", var.type_spec.as_str(), var.name),
        };
        self.line(depth, &text);
    }

    fn fun_declaration(&mut self, depth: usize, fun: &FunDeclaration) {
        self.line(
            depth,
            &format!("FunDeclaration: {} {}", fun.return_type.as_str(), fun.name),
        );
        for param in &fun.params {
            let brackets = if param.is_array { "[]" } else { "" };
            self.line(
                depth + 1,
                &format!("Param: {} {}{}", param.type_spec.as_str(), param.name, brackets),
            );
        }
        self.compound(depth + 1, &fun.body);
    }

    fn compound(&mut self, depth: usize, block: &CompoundStmt) {
        self.line(depth, "CompoundStmt");
        for var in &block.local_declarations {
            self.var_declaration(depth + 1, var);
        }
        for stmt in &block.statements {
            self.statement(depth + 1, stmt);
        }
    }

    fn statement(&mut self, depth: usize, stmt: &Statement) {
        match stmt {
            Statement::Expression(stmt) => {
                self.line(depth, "ExpressionStmt");
                if let Some(expr) = &stmt.expr {
                    self.expression(depth + 1, expr);
                }
            }
            Statement::Compound(block) => self.compound(depth, block),
            Statement::Selection(stmt) => {
                self.line(depth, "SelectionStmt");
                self.expression(depth + 1, &stmt.condition);
                self.statement(depth + 1, &stmt.then_branch);
                if let Some(else_branch) = &stmt.else_branch {
                    self.line(depth, "Else");
                    self.statement(depth + 1, else_branch);
                }
            }
            Statement::Iteration(stmt) => {
                self.line(depth, "IterationStmt");
                self.expression(depth + 1, &stmt.condition);
                self.statement(depth + 1, &stmt.body);
            }
            Statement::Return(stmt) => {
                self.line(depth, "ReturnStmt");
                if let Some(value) = &stmt.value {
                    self.expression(depth + 1, value);
                }
            }
        }
    }

    fn expression(&mut self, depth: usize, expr: &Expression) {
        match expr {
            Expression::Assign(assign) => {
                self.line(depth, "Assign");
                self.variable(depth + 1, &assign.target);
                self.expression(depth + 1, &assign.value);
            }
            Expression::Simple(simple) => match &simple.comparison {
                Some((op, right)) => {
                    self.line(depth, &format!("Compare: {}", op.symbol()));
                    self.additive(depth + 1, &simple.left);
                    self.additive(depth + 1, right);
                }
                None => self.additive(depth, &simple.left),
            },
        }
    }

    fn additive(&mut self, depth: usize, expr: &AdditiveExpr) {
        match expr {
            AdditiveExpr::Term(term) => self.term(depth, term),
            AdditiveExpr::Binary {
                left, op, right, ..
            } => {
                self.line(depth, &format!("Additive: {}", op.symbol()));
                self.additive(depth + 1, left);
                self.term(depth + 1, right);
            }
        }
    }

    fn term(&mut self, depth: usize, term: &Term) {
        match term {
            Term::Factor(factor) => self.factor(depth, factor),
            Term::Binary {
                left, op, right, ..
            } => {
                self.line(depth, &format!("Term: {}", op.symbol()));
                self.term(depth + 1, left);
                self.factor(depth + 1, right);
            }
        }
    }

    fn factor(&mut self, depth: usize, factor: &Factor) {
        match factor {
            Factor::Group(expr, _) => self.expression(depth, expr),
            Factor::Var(var) => self.variable(depth, var),
            Factor::Call(call) => {
                self.line(depth, &format!("Call: {}", call.name));
                for arg in &call.args {
                    self.expression(depth + 1, arg);
                }
            }
            Factor::Num(value, _) => self.line(depth, &format!("Number: {value}")),
        }
    }

    fn variable(&mut self, depth: usize, var: &Variable) {
        self.line(depth, &format!("Variable: {}", var.name));
        if let Some(index) = &var.index {
            self.expression(depth + 1, index);
        }
    }
}
