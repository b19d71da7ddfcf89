//! Statement execution.

use plc_ir::ast::{Case, Expr, ExprKind, Stmt};

use super::{as_list, list_index, Interpreter};
use crate::errors::{expected_type, undefined_variable};
use crate::{AssignError, EvalError, Mutability, Value};

/// How a statement finished.
///
/// `Return` travels outward through every enclosing block until the
/// function call that owns it turns it back into a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Normal,
    Return(Value),
}

impl<'a> Interpreter<'a> {
    /// Run statements in the current scope, stopping at the first `RETURN`.
    pub fn exec_block(&mut self, statements: &'a [Stmt]) -> Result<Completion, EvalError> {
        for statement in statements {
            if let Completion::Return(value) = self.exec_stmt(statement)? {
                return Ok(Completion::Return(value));
            }
        }
        Ok(Completion::Normal)
    }

    /// Run statements in a fresh child scope.
    fn exec_scoped_block(&mut self, statements: &'a [Stmt]) -> Result<Completion, EvalError> {
        self.with_env_scope(|scoped| scoped.exec_block(statements))
    }

    pub fn exec_stmt(&mut self, statement: &'a Stmt) -> Result<Completion, EvalError> {
        match statement {
            Stmt::Expression(expr) => {
                self.eval_expr(expr)?;
            }
            Stmt::Declaration(declaration) => {
                let value = match &declaration.value {
                    Some(value) => self.eval_expr(value)?,
                    None => Value::Nil,
                };
                self.env.define(&declaration.name, value, Mutability::Mutable);
            }
            Stmt::Assignment { receiver, value } => self.exec_assignment(receiver, value)?,
            Stmt::If {
                condition,
                then_statements,
                else_statements,
            } => {
                let branch = if self.eval_condition(condition)? {
                    then_statements
                } else {
                    else_statements
                };
                return self.exec_scoped_block(branch);
            }
            Stmt::Switch { condition, cases } => return self.exec_switch(condition, cases),
            Stmt::While {
                condition,
                statements,
            } => {
                while self.eval_condition(condition)? {
                    if let Completion::Return(value) = self.exec_scoped_block(statements)? {
                        return Ok(Completion::Return(value));
                    }
                }
            }
            Stmt::Return { value } => return Ok(Completion::Return(self.eval_expr(value)?)),
        }
        Ok(Completion::Normal)
    }

    fn eval_condition(&mut self, condition: &'a Expr) -> Result<bool, EvalError> {
        match self.eval_expr(condition)? {
            Value::Boolean(b) => Ok(b),
            other => Err(expected_type("Boolean", &other)),
        }
    }

    /// The condition is evaluated once; cases are tried in order and the
    /// first equal one runs. Otherwise the default case runs.
    fn exec_switch(&mut self, condition: &'a Expr, cases: &'a [Case]) -> Result<Completion, EvalError> {
        let subject = self.eval_expr(condition)?;
        let mut default = None;
        for case in cases {
            match &case.value {
                None => default = default.or(Some(case)),
                Some(value) => {
                    if self.eval_expr(value)? == subject {
                        return self.exec_scoped_block(&case.statements);
                    }
                }
            }
        }
        match default {
            Some(case) => self.exec_scoped_block(&case.statements),
            None => Ok(Completion::Normal),
        }
    }

    /// Plain assignment replaces the binding's value. Indexed assignment
    /// builds a new list with one element replaced and rebinds the
    /// variable to it.
    fn exec_assignment(&mut self, receiver: &'a Expr, value: &'a Expr) -> Result<(), EvalError> {
        let ExprKind::Access { offset, name, .. } = &receiver.kind else {
            return Err(EvalError::InvalidReceiver);
        };

        let new_value = match offset {
            None => self.eval_expr(value)?,
            Some(offset) => {
                let current = self.env.lookup(name).ok_or_else(|| undefined_variable(name))?;
                let items = as_list(name, &current)?;
                let index = self.eval_expr(offset)?;
                let position = list_index(&index, items.len())?;
                let element = self.eval_expr(value)?;

                let mut updated = items.to_vec();
                updated[position] = element;
                Value::list(updated)
            }
        };

        self.env.assign(name, new_value).map_err(|err| match err {
            AssignError::Immutable => EvalError::ImmutableAssignment { name: name.clone() },
            AssignError::Undefined => undefined_variable(name),
        })
    }
}
