//! The nominal type lattice.
//!
//! `Any` sits above every type and `Comparable` above the four ordered
//! scalar types. There are no other subtyping edges: assignability is
//! decided by the analyzer from these two facts plus equality.

use std::fmt;

use rustc_hash::FxHashMap;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Any,
    Nil,
    Comparable,
    Boolean,
    Integer,
    Decimal,
    Character,
    String,
    /// A user-registered nominal type.
    Named(String),
}

impl Type {
    /// Built-in types in registration order.
    pub const BUILTINS: [Type; 8] = [
        Type::Any,
        Type::Nil,
        Type::Comparable,
        Type::Boolean,
        Type::Integer,
        Type::Decimal,
        Type::Character,
        Type::String,
    ];

    /// Source-level name of the type.
    pub fn name(&self) -> &str {
        match self {
            Type::Any => "Any",
            Type::Nil => "Nil",
            Type::Comparable => "Comparable",
            Type::Boolean => "Boolean",
            Type::Integer => "Integer",
            Type::Decimal => "Decimal",
            Type::Character => "Character",
            Type::String => "String",
            Type::Named(name) => name,
        }
    }

    /// True for the types that sit directly below `Comparable`.
    #[inline]
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            Type::Integer | Type::Decimal | Type::Character | Type::String
        )
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Decimal)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name → type lookup used when resolving declared type names.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: FxHashMap<String, Type>,
}

impl TypeRegistry {
    /// A registry holding only the built-in types.
    pub fn new() -> Self {
        let types = Type::BUILTINS
            .into_iter()
            .map(|ty| (ty.name().to_string(), ty))
            .collect();
        TypeRegistry { types }
    }

    /// Register a nominal type and return it.
    ///
    /// Registering an existing name returns the type already registered.
    pub fn register(&mut self, name: impl Into<String>) -> Type {
        let name = name.into();
        self.types
            .entry(name.clone())
            .or_insert(Type::Named(name))
            .clone()
    }

    pub fn lookup(&self, name: &str) -> Option<Type> {
        self.types.get(name).cloned()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
