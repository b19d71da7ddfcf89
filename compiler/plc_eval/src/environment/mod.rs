//! Environment for variable and function scoping in the interpreter.
//!
//! Scopes are reference counted so that a function can hold on to the
//! scope it was defined in and run its body in a child of that scope,
//! independent of the caller's scope stack.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use plc_ir::ast;
use rustc_hash::FxHashMap;

use crate::Value;

/// Whether a variable binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `VAR`, `LIST` and `LET` bindings.
    Mutable,
    /// `VAL` bindings and function parameters.
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Error returned by `Scope::assign` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable exists but is immutable.
    Immutable,
    /// Variable not found in any scope.
    Undefined,
}

/// Shared, single-threaded handle to a scope.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Functions the interpreter provides itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    /// `print(value)`: write the value's display form as a line.
    Print,
}

/// Anything that can be called by `(name, arity)`.
#[derive(Clone)]
pub enum Callable<'a> {
    Builtin(Builtin),
    User {
        decl: &'a ast::Function,
        /// Scope the function was defined in.
        closure: LocalScope<Scope<'a>>,
    },
}

impl fmt::Debug for Callable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Builtin(builtin) => write!(f, "Builtin({builtin:?})"),
            Callable::User { decl, .. } => write!(f, "User({}/{})", decl.name, decl.parameters.len()),
        }
    }
}

/// A variable binding.
#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// A single scope: variables by name, functions by `(name, arity)`.
#[derive(Default)]
pub struct Scope<'a> {
    variables: FxHashMap<String, Binding>,
    functions: FxHashMap<(String, usize), Callable<'a>>,
    parent: Option<LocalScope<Scope<'a>>>,
}

impl<'a> Scope<'a> {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope<'a>>) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value, mutability: Mutability) {
        self.variables.insert(name.into(), Binding { value, mutability });
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.variables.get(name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Replace the value of the innermost binding named `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.variables.get_mut(name) {
            if !binding.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }

    pub fn define_function(&mut self, name: impl Into<String>, arity: usize, callable: Callable<'a>) {
        self.functions.insert((name.into(), arity), callable);
    }

    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<Callable<'a>> {
        if let Some(callable) = self.functions.get(&(name.to_string(), arity)) {
            return Some(callable.clone());
        }
        self.parent.as_ref()?.borrow().lookup_function(name, arity)
    }

    /// Drop every binding. Breaks the reference cycle between a scope and
    /// the closures of functions defined in it.
    pub fn clear(&mut self) {
        self.variables.clear();
        self.functions.clear();
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("variables", &self.variables)
            .field("functions", &self.functions)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Scope stack for the code currently executing.
///
/// The bottom of the stack is either the global scope or, inside a
/// function call, a child of the function's closure scope.
pub struct Environment<'a> {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope<'a>>>,
    /// Bottom of the stack.
    root: LocalScope<Scope<'a>>,
}

impl<'a> Environment<'a> {
    /// A fresh environment with an empty global scope.
    pub fn new() -> Self {
        Self::with_root(LocalScope::new(Scope::new()))
    }

    /// An environment whose root is a new child of `parent`.
    pub fn enclosed(parent: LocalScope<Scope<'a>>) -> Self {
        Self::with_root(LocalScope::new(Scope::with_parent(parent)))
    }

    fn with_root(root: LocalScope<Scope<'a>>) -> Self {
        Environment {
            scopes: vec![root.clone()],
            root,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the innermost scope. The root is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope<'a>> {
        self.scopes.last().unwrap_or(&self.root).clone()
    }

    pub fn root_scope(&self) -> &LocalScope<Scope<'a>> {
        &self.root
    }

    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value, mutability: Mutability) {
        self.current_scope().borrow_mut().define(name, value, mutability);
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current_scope().borrow().lookup(name)
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        self.current_scope().borrow_mut().assign(name, value)
    }

    pub fn define_function(&mut self, name: impl Into<String>, arity: usize, callable: Callable<'a>) {
        self.current_scope()
            .borrow_mut()
            .define_function(name, arity, callable);
    }

    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<Callable<'a>> {
        self.current_scope().borrow().lookup_function(name, arity)
    }
}

impl Default for Environment<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
