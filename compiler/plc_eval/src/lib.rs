//! PLC interpreter.
//!
//! Runtime values, scoped environments, operator semantics and the
//! tree-walking [`Interpreter`] that executes a parsed program.
//!
//! Integers and decimals are arbitrary precision. Decimal division keeps
//! the dividend's scale and rounds half to even; integer division
//! truncates. `RETURN` is carried as a [`Completion`] rather than by
//! unwinding.

mod environment;
mod errors;
mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use environment::{
    AssignError, Builtin, Callable, Environment, LocalScope, Mutability, Scope,
};
pub use errors::{EvalError, EvalResult};
pub use interpreter::{
    Completion, Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH,
};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use value::Value;

#[cfg(test)]
mod tests;
