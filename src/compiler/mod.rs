//! Code generation module for the compiler.
//!
//! Lowers the AST to a linear three-address IR of quadruples and labels:
//!
//! - Expressions evaluate into fresh temporaries
//! - Control flow becomes conditional and unconditional jumps between labels
//! - Calls push their arguments last-to-first before the `CALL`

pub mod compiler;
pub mod quadruple;

#[cfg(test)]
mod tests;
