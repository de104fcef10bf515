//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! Parsing happens in three steps:
//!
//! - A grammar made of interchangeable engines (recursive descent, LL(1) and
//!   SLR(1)) turns the token list into a concrete parse tree
//! - The simplifier drops grammar-only non-terminals according to per-symbol
//!   node policies
//! - The handlers attached by the policies build the AST bottom-up
//!
//! Every engine reports the next unconsumed token on success and the furthest
//! token reached on failure, so the driver can point at the real culprit.

pub mod engine;
pub mod grammar;
pub mod ll1_parser;
pub mod parse_tree;
pub mod parser;
pub mod rd_parser;
pub mod simplifier;
pub mod slr1_parser;
pub mod symbol;
pub mod terminals;

#[cfg(test)]
mod tests;
