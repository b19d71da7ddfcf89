//! Expressions.
//!
//! Each visit computes the expression's type, stores it in the `ty` slot
//! and returns it.

use num_traits::ToPrimitive;
use plc_ir::ast::{Expr, ExprKind, Literal};
use plc_ir::{BinaryOp, Type};
use plc_stack::ensure_sufficient_stack;

use crate::{require_assignable, Analyzer, SemanticError};

impl Analyzer {
    pub(crate) fn visit_expr(&mut self, expr: &mut Expr) -> Result<Type, SemanticError> {
        let ty = ensure_sufficient_stack(|| self.expr_type(&mut expr.kind))?;
        expr.ty = Some(ty.clone());
        Ok(ty)
    }

    fn expr_type(&mut self, kind: &mut ExprKind) -> Result<Type, SemanticError> {
        match kind {
            ExprKind::Literal(literal) => literal_type(literal),
            ExprKind::Group(inner) => {
                if !matches!(inner.kind, ExprKind::Binary { .. }) {
                    return Err(SemanticError::InvalidGroup);
                }
                self.visit_expr(inner)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.visit_expr(left)?;
                let right = self.visit_expr(right)?;
                binary_type(*op, &left, &right)
            }
            ExprKind::Access {
                offset,
                name,
                variable,
            } => {
                if let Some(offset) = offset {
                    let offset_type = self.visit_expr(offset)?;
                    require_assignable(&Type::Integer, &offset_type)?;
                }
                let resolved = self
                    .scopes
                    .lookup_variable(name)
                    .cloned()
                    .ok_or_else(|| SemanticError::UndefinedVariable { name: name.clone() })?;
                let ty = resolved.ty.clone();
                *variable = Some(resolved);
                Ok(ty)
            }
            ExprKind::Call {
                name,
                arguments,
                function,
            } => {
                let signature = self
                    .scopes
                    .lookup_function(name, arguments.len())
                    .cloned()
                    .ok_or_else(|| SemanticError::UndefinedFunction {
                        name: name.clone(),
                        arity: arguments.len(),
                    })?;
                for (argument, parameter_type) in arguments.iter_mut().zip(&signature.parameter_types) {
                    let argument_type = self.visit_expr(argument)?;
                    require_assignable(parameter_type, &argument_type)?;
                }
                let ty = signature.return_type.clone();
                *function = Some(signature);
                Ok(ty)
            }
            // Outside an initializer there is no declared element type.
            ExprKind::List(elements) => {
                for element in elements {
                    self.visit_expr(element)?;
                }
                Ok(Type::Any)
            }
        }
    }
}

fn literal_type(literal: &Literal) -> Result<Type, SemanticError> {
    Ok(match literal {
        Literal::Nil => Type::Nil,
        Literal::Boolean(_) => Type::Boolean,
        Literal::Character(_) => Type::Character,
        Literal::String(_) => Type::String,
        Literal::Integer(value) => {
            if value.to_i32().is_none() {
                return Err(SemanticError::IntegerOutOfRange {
                    value: value.clone(),
                });
            }
            Type::Integer
        }
        Literal::Decimal(value) => {
            if !value.to_f64().is_some_and(f64::is_finite) {
                return Err(SemanticError::DecimalOutOfRange {
                    value: value.clone(),
                });
            }
            Type::Decimal
        }
    })
}

fn binary_type(op: BinaryOp, left: &Type, right: &Type) -> Result<Type, SemanticError> {
    let invalid = || SemanticError::InvalidOperands {
        op,
        left: left.clone(),
        right: right.clone(),
    };
    match op {
        BinaryOp::And | BinaryOp::Or => {
            require_assignable(&Type::Boolean, left)?;
            require_assignable(&Type::Boolean, right)?;
            Ok(Type::Boolean)
        }
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Eq | BinaryOp::NotEq => {
            require_assignable(&Type::Comparable, left)?;
            require_assignable(&Type::Comparable, right)?;
            require_assignable(left, right)?;
            require_assignable(right, left)?;
            Ok(Type::Boolean)
        }
        BinaryOp::Add if *left == Type::String || *right == Type::String => Ok(Type::String),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            if left.is_numeric() && left == right {
                Ok(left.clone())
            } else {
                Err(invalid())
            }
        }
        BinaryOp::Pow => {
            if left.is_numeric() && *right == Type::Integer {
                Ok(left.clone())
            } else {
                Err(invalid())
            }
        }
    }
}
