//! Visitors for each node category.

mod expr;
mod item;
mod stmt;
