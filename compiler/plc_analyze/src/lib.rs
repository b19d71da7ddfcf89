//! Semantic analysis for PLC.
//!
//! A single scope-aware walk over the tree that resolves every variable
//! and function reference, computes a static type for every expression
//! and writes both into the tree's slots. The first violation aborts the
//! walk with a [`SemanticError`].
//!
//! # Assignability
//!
//! ```text
//!            Any
//!      ┌──────┼───────────┬─────────┐
//!     Nil  Boolean    Comparable  (named)
//!            ┌───────┬────┴────┬────────┐
//!         Integer Decimal Character String
//! ```
//!
//! `T` is assignable to `U` when `U` is `Any`, when `U` is `Comparable` and
//! `T` sits under it, or when they are the same type.

mod check;
mod error;
mod scope;

pub use error::SemanticError;
pub use scope::{ScopeId, Scopes};

use plc_ir::ast::Source;
use plc_ir::{FunctionSig, Type, TypeRegistry};

/// Check that a value of type `source` may be stored where `target` is
/// expected.
pub fn require_assignable(target: &Type, source: &Type) -> Result<(), SemanticError> {
    match target {
        Type::Any => Ok(()),
        Type::Comparable if source.is_comparable() => Ok(()),
        _ if target == source => Ok(()),
        _ => Err(SemanticError::mismatch(target, source)),
    }
}

pub struct Analyzer {
    scopes: Scopes,
    types: TypeRegistry,
}

impl Analyzer {
    /// An analyzer that knows the built-in types and `print`.
    pub fn new() -> Self {
        Self::with_types(TypeRegistry::new())
    }

    /// An analyzer resolving type names through `types`.
    pub fn with_types(types: TypeRegistry) -> Self {
        let mut scopes = Scopes::new();
        scopes.define_function(FunctionSig::new("print", vec![Type::Any], Type::Nil));
        Analyzer { scopes, types }
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Analyze a whole program in place.
    ///
    /// The entry point is checked before anything else is visited.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn analyze(&mut self, source: &mut Source) -> Result<(), SemanticError> {
        self.check_main(source)?;
        for global in &mut source.globals {
            self.visit_global(global)?;
        }
        for function in &mut source.functions {
            self.visit_function(function)?;
        }
        tracing::debug!("analysis complete");
        Ok(())
    }

    fn check_main(&self, source: &Source) -> Result<(), SemanticError> {
        let main = source
            .functions
            .iter()
            .find(|function| function.name == "main" && function.parameters.is_empty())
            .ok_or(SemanticError::MissingMain)?;
        let return_type = self.resolve_return_type(main.return_type_name.as_deref())?;
        require_assignable(&Type::Integer, &return_type).map_err(|_| SemanticError::MissingMain)
    }

    fn resolve_type(&self, name: &str) -> Result<Type, SemanticError> {
        self.types
            .lookup(name)
            .ok_or_else(|| SemanticError::UnknownType {
                name: name.to_string(),
            })
    }

    /// A missing return type means `Nil`.
    fn resolve_return_type(&self, name: Option<&str>) -> Result<Type, SemanticError> {
        name.map_or(Ok(Type::Nil), |name| self.resolve_type(name))
    }

    /// Run `f` in a child scope, returning to the current scope afterwards
    /// whether or not `f` succeeded.
    fn with_scope<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, SemanticError>,
    ) -> Result<R, SemanticError> {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn with_function_scope<R>(
        &mut self,
        return_type: Type,
        f: impl FnOnce(&mut Self) -> Result<R, SemanticError>,
    ) -> Result<R, SemanticError> {
        self.scopes.push_function(return_type);
        let result = f(self);
        self.scopes.pop();
        result
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
