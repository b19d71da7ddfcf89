//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::Interpreter;
use crate::{stdout_handler, Builtin, Callable, Environment, SharedPrintHandler};

/// Calls nested deeper than this fail with `StackOverflow`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Where `print` writes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Build an interpreter whose global scope holds the built-ins.
    pub fn build<'a>(self) -> Interpreter<'a> {
        let mut env = Environment::new();
        env.define_function("print", 1, Callable::Builtin(Builtin::Print));
        Interpreter {
            env,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: 0,
            max_call_depth: self.max_call_depth,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
