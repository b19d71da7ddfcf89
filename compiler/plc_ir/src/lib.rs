//! PLC IR - data shared between the pipeline stages.
//!
//! - [`Token`] / [`TokenKind`]: the lexer's output contract
//! - [`ast`]: the syntax tree produced by the parser, with `ty` and symbol
//!   slots filled in by the analyzer
//! - [`Type`] / [`TypeRegistry`]: the nominal type lattice
//! - [`Variable`] / [`FunctionSig`]: resolved symbols
//!
//! Nodes own their children. There is no arena and no sharing, so a parsed
//! tree can be compared structurally with `==`.

pub mod ast;
mod symbol;
mod token;
mod types;

pub use ast::BinaryOp;
pub use symbol::{FunctionSig, Variable};
pub use token::{Token, TokenKind};
pub use types::{Type, TypeRegistry};
