//! Resolved symbols written into the AST by the analyzer.

use crate::Type;

/// A variable as seen by the analyzer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Variable {
    pub name: String,
    pub ty: Type,
    pub mutable: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: Type, mutable: bool) -> Self {
        Variable {
            name: name.into(),
            ty,
            mutable,
        }
    }
}

/// A function signature. Functions are keyed by `(name, arity)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionSig {
    pub name: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
}

impl FunctionSig {
    pub fn new(name: impl Into<String>, parameter_types: Vec<Type>, return_type: Type) -> Self {
        FunctionSig {
            name: name.into(),
            parameter_types,
            return_type,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}
