//! Statements.

use plc_ir::ast::{Case, Declaration, Expr, ExprKind, Stmt};
use plc_ir::{Type, Variable};

use crate::{require_assignable, Analyzer, SemanticError};

impl Analyzer {
    pub(crate) fn visit_block(&mut self, statements: &mut [Stmt]) -> Result<(), SemanticError> {
        statements
            .iter_mut()
            .try_for_each(|statement| self.visit_stmt(statement))
    }

    fn visit_stmt(&mut self, statement: &mut Stmt) -> Result<(), SemanticError> {
        match statement {
            Stmt::Expression(expr) => {
                if !matches!(expr.kind, ExprKind::Call { .. }) {
                    return Err(SemanticError::ExpressionNotCall);
                }
                self.visit_expr(expr).map(drop)
            }
            Stmt::Declaration(declaration) => self.visit_declaration(declaration),
            Stmt::Assignment { receiver, value } => self.visit_assignment(receiver, value),
            Stmt::If {
                condition,
                then_statements,
                else_statements,
            } => {
                self.visit_condition(condition)?;
                if then_statements.is_empty() {
                    return Err(SemanticError::EmptyThenBlock);
                }
                self.with_scope(|this| this.visit_block(then_statements))?;
                self.with_scope(|this| this.visit_block(else_statements))
            }
            Stmt::Switch { condition, cases } => self.visit_switch(condition, cases),
            Stmt::While {
                condition,
                statements,
            } => {
                self.visit_condition(condition)?;
                self.with_scope(|this| this.visit_block(statements))
            }
            Stmt::Return { value } => {
                let value_type = self.visit_expr(value)?;
                let return_type = self.scopes.return_type().cloned().unwrap_or(Type::Nil);
                require_assignable(&return_type, &value_type)
            }
        }
    }

    fn visit_declaration(&mut self, declaration: &mut Declaration) -> Result<(), SemanticError> {
        let ty = self.resolve_binding_type(
            &declaration.name,
            declaration.type_name.as_deref(),
            declaration.value.as_mut(),
        )?;
        let variable = Variable::new(&declaration.name, ty, true);
        self.scopes.define_variable(variable.clone());
        declaration.variable = Some(variable);
        Ok(())
    }

    /// The value is visited before the receiver.
    fn visit_assignment(&mut self, receiver: &mut Expr, value: &mut Expr) -> Result<(), SemanticError> {
        if !matches!(receiver.kind, ExprKind::Access { .. }) {
            return Err(SemanticError::InvalidReceiver);
        }
        let value_type = self.visit_expr(value)?;
        let receiver_type = self.visit_expr(receiver)?;

        if let ExprKind::Access {
            variable: Some(variable),
            ..
        } = &receiver.kind
        {
            if !variable.mutable {
                return Err(SemanticError::ImmutableAssignment {
                    name: variable.name.clone(),
                });
            }
        }
        require_assignable(&receiver_type, &value_type)
    }

    fn visit_switch(&mut self, condition: &mut Expr, cases: &mut [Case]) -> Result<(), SemanticError> {
        let condition_type = self.visit_expr(condition)?;

        let defaults = cases.iter().filter(|case| case.is_default()).count();
        if defaults != 1 {
            return Err(SemanticError::DefaultCaseCount { found: defaults });
        }

        for case in cases {
            self.with_scope(|this| {
                if let Some(value) = &mut case.value {
                    let value_type = this.visit_expr(value)?;
                    require_assignable(&condition_type, &value_type)?;
                }
                this.visit_block(&mut case.statements)
            })?;
        }
        Ok(())
    }

    fn visit_condition(&mut self, condition: &mut Expr) -> Result<(), SemanticError> {
        let ty = self.visit_expr(condition)?;
        require_assignable(&Type::Boolean, &ty)
    }
}
