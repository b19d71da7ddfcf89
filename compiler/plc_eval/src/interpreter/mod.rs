//! Tree-walking interpreter.
//!
//! Executes an AST directly. Every block construct runs in its own child
//! scope; function bodies run in a child of the scope the function was
//! defined in. The interpreter works on unanalyzed trees too: it checks
//! runtime tags itself and never reads the analyzer's slots.

mod builder;
mod exec;
mod scope_guard;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use exec::Completion;
pub use scope_guard::ScopedInterpreter;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use plc_ir::ast::{self, Expr, ExprKind, Source};
use plc_ir::BinaryOp;
use plc_stack::ensure_sufficient_stack;

use crate::errors::{expected_type, undefined_variable};
use crate::{
    evaluate_binary, Builtin, Callable, Environment, EvalError, EvalResult, Mutability,
    SharedPrintHandler, Value,
};

pub struct Interpreter<'a> {
    pub(crate) env: Environment<'a>,
    print_handler: SharedPrintHandler,
    pub(crate) call_depth: usize,
    max_call_depth: usize,
}

impl<'a> Interpreter<'a> {
    /// An interpreter printing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn env(&self) -> &Environment<'a> {
        &self.env
    }

    /// Define the globals, register the functions, then call `main()` and
    /// return its result.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, source: &'a Source) -> EvalResult {
        for global in &source.globals {
            let value = match &global.value {
                Some(value) => self.eval_expr(value)?,
                None => Value::Nil,
            };
            let mutability = if global.mutable {
                Mutability::Mutable
            } else {
                Mutability::Immutable
            };
            tracing::debug!(name = %global.name, %value, "define global");
            self.env.define(&global.name, value, mutability);
        }
        for function in &source.functions {
            self.define_function(function);
        }
        self.call("main", Vec::new())
    }

    /// Register `function` in the current scope, closing over that scope.
    pub fn define_function(&mut self, function: &'a ast::Function) {
        let callable = Callable::User {
            decl: function,
            closure: self.env.current_scope(),
        };
        self.env
            .define_function(&function.name, function.parameters.len(), callable);
    }

    pub fn eval_expr(&mut self, expr: &'a Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &'a Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from(literal)),
            ExprKind::Group(inner) => self.eval_expr(inner),
            ExprKind::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                left,
                right,
            } => self.eval_logical(*op, left, right),
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(left, right, *op)
            }
            ExprKind::Access { offset, name, .. } => {
                let value = self.env.lookup(name).ok_or_else(|| undefined_variable(name))?;
                match offset {
                    None => Ok(value),
                    Some(offset) => {
                        let index = self.eval_expr(offset)?;
                        let items = as_list(name, &value)?;
                        let position = list_index(&index, items.len())?;
                        Ok(items[position].clone())
                    }
                }
            }
            ExprKind::Call {
                name, arguments, ..
            } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| self.eval_expr(argument))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call(name, arguments)
            }
            ExprKind::List(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.eval_expr(element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(items))
            }
        }
    }

    /// `&&` is false unless the left operand is `true`, `||` is true if it
    /// is; only otherwise is the right operand evaluated. Any operand other
    /// than `TRUE` counts as false.
    fn eval_logical(&mut self, op: BinaryOp, left: &'a Expr, right: &'a Expr) -> EvalResult {
        let left = is_true(&self.eval_expr(left)?);
        if left != (op == BinaryOp::And) {
            return Ok(Value::Boolean(left));
        }
        let right = is_true(&self.eval_expr(right)?);
        Ok(Value::Boolean(right))
    }

    /// Call the function `name` with the given arguments.
    pub fn call(&mut self, name: &str, arguments: Vec<Value>) -> EvalResult {
        let callable = self
            .env
            .lookup_function(name, arguments.len())
            .ok_or_else(|| EvalError::UndefinedFunction {
                name: name.to_string(),
                arity: arguments.len(),
            })?;

        match callable {
            Callable::Builtin(Builtin::Print) => {
                for argument in &arguments {
                    self.print_handler.println(&argument.to_string());
                }
                Ok(Value::Nil)
            }
            Callable::User { decl, closure } => self.call_user(decl, closure, arguments),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %decl.name, depth = self.call_depth))]
    fn call_user(
        &mut self,
        decl: &'a ast::Function,
        closure: crate::LocalScope<crate::Scope<'a>>,
        arguments: Vec<Value>,
    ) -> EvalResult {
        if self.call_depth >= self.max_call_depth {
            return Err(EvalError::StackOverflow {
                limit: self.max_call_depth,
            });
        }

        let mut frame = Environment::enclosed(closure);
        for (name, value) in decl.parameters.iter().zip(arguments) {
            frame.define(name, value, Mutability::Immutable);
        }

        let completion = ensure_sufficient_stack(|| {
            self.with_frame(frame, |this| this.exec_block(&decl.statements))
        })?;
        Ok(match completion {
            Completion::Return(value) => value,
            Completion::Normal => Value::Nil,
        })
    }
}

impl Default for Interpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Interpreter<'_> {
    fn drop(&mut self) {
        // Functions hold their defining scope; clearing it frees both.
        self.env.root_scope().borrow_mut().clear();
    }
}

#[inline]
fn is_true(value: &Value) -> bool {
    matches!(value, Value::Boolean(true))
}

/// The items of a list value, or `NotAList` naming the variable.
fn as_list<'v>(name: &str, value: &'v Value) -> Result<&'v [Value], EvalError> {
    match value {
        Value::List(items) => Ok(items.as_slice()),
        _ => Err(EvalError::NotAList {
            name: name.to_string(),
        }),
    }
}

/// Checked conversion of an index value to a position in a list of `len`.
fn list_index(index: &Value, len: usize) -> Result<usize, EvalError> {
    let Value::Integer(index) = index else {
        return Err(expected_type("Integer", index));
    };
    index
        .to_usize()
        .filter(|&position| position < len)
        .ok_or_else(|| out_of_bounds(index, len))
}

#[cold]
fn out_of_bounds(index: &BigInt, length: usize) -> EvalError {
    EvalError::IndexOutOfBounds {
        index: index.clone(),
        length,
    }
}
