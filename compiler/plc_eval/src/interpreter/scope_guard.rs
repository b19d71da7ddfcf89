//! RAII scope guards for the interpreter's environment.
//!
//! [`ScopedInterpreter`] pops the scope it pushed when dropped, so a block
//! that exits early through `?` or a `RETURN` still leaves the scope stack
//! balanced.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::Environment;

/// Access to the interpreter inside a pushed scope.
pub struct ScopedInterpreter<'guard, 'a> {
    interpreter: &'guard mut Interpreter<'a>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl<'a> Deref for ScopedInterpreter<'_, 'a> {
    type Target = Interpreter<'a>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Push a child scope that is popped when the guard is dropped.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` in a child scope of the current one.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` with `frame` as the environment, then restore the caller's
    /// environment whatever `f` returned.
    pub(crate) fn with_frame<T, F>(&mut self, frame: Environment<'a>, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        let caller = std::mem::replace(&mut self.env, frame);
        self.call_depth += 1;
        let result = f(self);
        self.call_depth -= 1;
        self.env = caller;
        result
    }
}
