//! Globals, functions and the initializers they share with `LET`.

use plc_ir::ast::{Expr, ExprKind, Function, Global};
use plc_ir::{FunctionSig, Type, Variable};

use crate::{require_assignable, Analyzer, SemanticError};

impl Analyzer {
    pub(crate) fn visit_global(&mut self, global: &mut Global) -> Result<(), SemanticError> {
        let ty = self.resolve_binding_type(
            &global.name,
            global.type_name.as_deref(),
            global.value.as_mut(),
        )?;
        let variable = Variable::new(&global.name, ty, global.mutable);
        self.scopes.define_variable(variable.clone());
        global.variable = Some(variable);
        Ok(())
    }

    /// Register the signature, then check the body in a fresh scope holding
    /// the parameters. The signature is visible to the body, so functions
    /// may call themselves.
    pub(crate) fn visit_function(&mut self, function: &mut Function) -> Result<(), SemanticError> {
        let parameter_types = function
            .parameter_type_names
            .iter()
            .map(|name| self.resolve_type(name))
            .collect::<Result<Vec<_>, _>>()?;
        let return_type = self.resolve_return_type(function.return_type_name.as_deref())?;

        let signature = FunctionSig::new(&function.name, parameter_types.clone(), return_type.clone());
        tracing::debug!(name = %function.name, arity = signature.arity(), "register function");
        self.scopes.define_function(signature.clone());
        function.function = Some(signature);

        let parameters = &function.parameters;
        let statements = &mut function.statements;
        self.with_function_scope(return_type, |this| {
            for (name, ty) in parameters.iter().zip(parameter_types) {
                this.scopes.define_variable(Variable::new(name, ty, false));
            }
            this.visit_block(statements)
        })
    }

    /// Type of a `LIST`/`VAR`/`VAL`/`LET` binding.
    ///
    /// The initializer, if any, is visited first and must fit the declared
    /// type. Without a declared type the initializer's type is used.
    pub(crate) fn resolve_binding_type(
        &mut self,
        name: &str,
        type_name: Option<&str>,
        value: Option<&mut Expr>,
    ) -> Result<Type, SemanticError> {
        let declared = type_name.map(|name| self.resolve_type(name)).transpose()?;
        match (value, declared) {
            (Some(value), Some(declared)) => {
                self.visit_initializer(value, &declared)?;
                Ok(declared)
            }
            (Some(value), None) => self.visit_expr(value),
            (None, Some(declared)) => Ok(declared),
            (None, None) => Err(SemanticError::MissingTypeAndValue {
                name: name.to_string(),
            }),
        }
    }

    /// Check an initializer against a declared type. A list literal is
    /// checked element by element and takes the declared type itself.
    fn visit_initializer(&mut self, value: &mut Expr, declared: &Type) -> Result<(), SemanticError> {
        if let ExprKind::List(elements) = &mut value.kind {
            for element in elements {
                let element_type = self.visit_expr(element)?;
                require_assignable(declared, &element_type)?;
            }
            value.ty = Some(declared.clone());
            return Ok(());
        }
        let value_type = self.visit_expr(value)?;
        require_assignable(declared, &value_type)
    }
}
