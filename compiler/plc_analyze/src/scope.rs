//! Scope management for name resolution.
//!
//! Scopes form a tree stored in a flat vector; each frame points at its
//! parent by index. Popping a scope only moves the cursor back to the
//! parent, so frames are never invalidated while the pass runs.

use std::fmt;

use plc_ir::{FunctionSig, Type, Variable};
use rustc_hash::FxHashMap;

/// Index of a scope frame.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The root scope holding globals, functions and built-ins.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ROOT {
            write!(f, "ScopeId::ROOT")
        } else {
            write!(f, "ScopeId({})", self.0)
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ScopeData {
    parent: Option<ScopeId>,
    variables: FxHashMap<String, Variable>,
    functions: FxHashMap<(String, usize), FunctionSig>,
    /// Declared return type of the enclosing function.
    return_type: Option<Type>,
}

pub struct Scopes {
    scopes: Vec<ScopeData>,
    current: ScopeId,
}

impl Scopes {
    /// A scope tree containing only the root scope.
    pub fn new() -> Self {
        Scopes {
            scopes: vec![ScopeData::default()],
            current: ScopeId::ROOT,
        }
    }

    #[inline]
    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Enter a child scope of the current one.
    pub fn push(&mut self) -> ScopeId {
        let return_type = self.scopes[self.current.index()].return_type.clone();
        self.push_frame(return_type)
    }

    /// Enter a function body scope.
    pub fn push_function(&mut self, return_type: Type) -> ScopeId {
        self.push_frame(Some(return_type))
    }

    fn push_frame(&mut self, return_type: Option<Type>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(ScopeData {
            parent: Some(self.current),
            return_type,
            ..ScopeData::default()
        });
        self.current = id;
        id
    }

    /// Return to the parent scope. The root scope is never popped.
    pub fn pop(&mut self) {
        if let Some(parent) = self.scopes[self.current.index()].parent {
            self.current = parent;
        }
    }

    /// Define a variable in the current scope, shadowing outer ones.
    pub fn define_variable(&mut self, variable: Variable) {
        tracing::trace!(name = %variable.name, ty = %variable.ty, scope = ?self.current, "define variable");
        self.scopes[self.current.index()]
            .variables
            .insert(variable.name.clone(), variable);
    }

    pub fn define_function(&mut self, function: FunctionSig) {
        tracing::trace!(name = %function.name, arity = function.arity(), scope = ?self.current, "define function");
        self.scopes[self.current.index()]
            .functions
            .insert((function.name.clone(), function.arity()), function);
    }

    /// Innermost variable named `name`.
    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.ancestors().find_map(|scope| scope.variables.get(name))
    }

    /// Innermost function named `name` taking `arity` arguments.
    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<&FunctionSig> {
        let key = (name.to_string(), arity);
        self.ancestors().find_map(|scope| scope.functions.get(&key))
    }

    /// Return type of the function whose body is being visited.
    pub fn return_type(&self) -> Option<&Type> {
        self.scopes[self.current.index()].return_type.as_ref()
    }

    fn ancestors(&self) -> impl Iterator<Item = &ScopeData> {
        let mut next = Some(self.current);
        std::iter::from_fn(move || {
            let id = next?;
            let scope = &self.scopes[id.index()];
            next = scope.parent;
            Some(scope)
        })
    }
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}
