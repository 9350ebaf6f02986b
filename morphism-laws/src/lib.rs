//! Laws, reference implementations and fixtures used to check the `morphism`
//! recursion schemes.
//!
//! - [`laws`]: each algebraic law as a function over any frame, returning a
//!   [`laws::LawViolation`] when it does not hold
//! - [`reference`]: naive, call-stack recursive versions of the schemes
//! - [`list`] and [`expr`]: a cons list and an arithmetic expression tree, with
//!   proptest strategies for values, algebras and coalgebras

pub mod expr;
pub mod laws;
pub mod list;
pub mod reference;

#[cfg(test)]
mod stack_safety;
