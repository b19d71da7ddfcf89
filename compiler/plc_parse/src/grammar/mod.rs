//! Grammar productions, one method per nonterminal.

mod expr;
mod item;
mod stmt;
