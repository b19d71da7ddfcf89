//! Runtime errors.
//!
//! The interpreter does not trust the analyzer to have run, so every
//! operation re-checks the runtime tags of its operands and reports a
//! mismatch here instead of panicking.

use num_bigint::BigInt;
use plc_ir::BinaryOp;

use crate::Value;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("invalid operand types for {op}: {left} and {right}")]
    InvalidOperands {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("negative exponent: {exponent}")]
    NegativeExponent { exponent: BigInt },

    #[error("exponent too large: {exponent}")]
    ExponentOutOfRange { exponent: BigInt },

    #[error("cannot assign to immutable variable: {name}")]
    ImmutableAssignment { name: String },

    #[error("index {index} out of bounds for list of length {length}")]
    IndexOutOfBounds { index: BigInt, length: usize },

    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("undefined function: {name}/{arity}")]
    UndefinedFunction { name: String, arity: usize },

    #[error("{name} is not a list")]
    NotAList { name: String },

    #[error("assignment target must be a variable or list element")]
    InvalidReceiver,

    #[error("maximum call depth of {limit} exceeded")]
    StackOverflow { limit: usize },
}

pub type EvalResult = Result<Value, EvalError>;

#[cold]
pub(crate) fn expected_type(expected: &'static str, got: &Value) -> EvalError {
    EvalError::TypeMismatch {
        expected,
        got: got.type_name(),
    }
}

#[cold]
pub(crate) fn binary_type_mismatch(left: &Value, right: &Value, op: BinaryOp) -> EvalError {
    EvalError::InvalidOperands {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
}

#[cold]
pub(crate) fn undefined_variable(name: &str) -> EvalError {
    EvalError::UndefinedVariable {
        name: name.to_string(),
    }
}
