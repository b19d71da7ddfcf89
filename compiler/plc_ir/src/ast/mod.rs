//! Syntax tree.
//!
//! Every expression carries a `ty` slot and every access, call, global,
//! declaration and function carries a symbol slot. The parser leaves them
//! `None`; the analyzer fills them in place.

mod operators;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{FunctionSig, Type, Variable};

pub use operators::BinaryOp;

/// A whole program: globals first, then functions.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Source {
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
}

/// A top-level `LIST`, `VAR` or `VAL` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Global {
    pub name: String,
    pub type_name: Option<String>,
    pub mutable: bool,
    pub value: Option<Expr>,
    pub variable: Option<Variable>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    /// Parallel to `parameters`.
    pub parameter_type_names: Vec<String>,
    pub return_type_name: Option<String>,
    pub statements: Vec<Stmt>,
    pub function: Option<FunctionSig>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Declaration(Declaration),
    Assignment {
        receiver: Expr,
        value: Expr,
    },
    If {
        condition: Expr,
        then_statements: Vec<Stmt>,
        else_statements: Vec<Stmt>,
    },
    Switch {
        condition: Expr,
        /// The default case, the one without a value, comes last.
        cases: Vec<Case>,
    },
    While {
        condition: Expr,
        statements: Vec<Stmt>,
    },
    Return {
        value: Expr,
    },
}

/// A `LET` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<Expr>,
    pub variable: Option<Variable>,
}

/// One arm of a `SWITCH`. `value` is `None` for `DEFAULT`.
#[derive(Clone, Debug, PartialEq)]
pub struct Case {
    pub value: Option<Expr>,
    pub statements: Vec<Stmt>,
}

impl Case {
    #[inline]
    pub fn is_default(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<Type>,
}

impl Expr {
    /// An expression with an empty type slot.
    pub fn new(kind: ExprKind) -> Self {
        Expr { kind, ty: None }
    }

    pub fn literal(literal: Literal) -> Self {
        Self::new(ExprKind::Literal(literal))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn access(name: impl Into<String>, offset: Option<Expr>) -> Self {
        Self::new(ExprKind::Access {
            offset: offset.map(Box::new),
            name: name.into(),
            variable: None,
        })
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call {
            name: name.into(),
            arguments,
            function: None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Group(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `name` or `name[offset]`.
    Access {
        offset: Option<Box<Expr>>,
        name: String,
        variable: Option<Variable>,
    },
    Call {
        name: String,
        arguments: Vec<Expr>,
        function: Option<FunctionSig>,
    },
    /// A `LIST` global's initializer.
    List(Vec<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
}
