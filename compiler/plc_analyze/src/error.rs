//! Semantic errors.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use plc_ir::{BinaryOp, Type};

/// The first rule a program violates.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SemanticError {
    #[error("missing entry point: expected `main` with no parameters returning Integer")]
    MissingMain,

    #[error("unknown type: {name}")]
    UnknownType { name: String },

    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("undefined function: {name}/{arity}")]
    UndefinedFunction { name: String, arity: usize },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },

    #[error("variable {name} needs a type or an initial value")]
    MissingTypeAndValue { name: String },

    #[error("assignment target must be a variable or list element")]
    InvalidReceiver,

    #[error("cannot assign to immutable variable: {name}")]
    ImmutableAssignment { name: String },

    #[error("expression statement must be a function call")]
    ExpressionNotCall,

    #[error("IF statement must have at least one statement before ELSE or END")]
    EmptyThenBlock,

    #[error("SWITCH must have exactly one DEFAULT case, found {found}")]
    DefaultCaseCount { found: usize },

    #[error("integer literal {value} does not fit in 32 bits")]
    IntegerOutOfRange { value: BigInt },

    #[error("decimal literal {value} is out of range")]
    DecimalOutOfRange { value: BigDecimal },

    #[error("only binary expressions may be grouped")]
    InvalidGroup,

    #[error("operator {op} cannot be applied to {left} and {right}")]
    InvalidOperands { op: BinaryOp, left: Type, right: Type },
}

impl SemanticError {
    pub(crate) fn mismatch(expected: &Type, found: &Type) -> Self {
        SemanticError::TypeMismatch {
            expected: expected.clone(),
            found: found.clone(),
        }
    }
}
