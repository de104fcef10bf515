//! Type checking and semantic analysis module.
//!
//! Every AST node checks itself against a scoped symbol table:
//!
//! - Verifying operand types of expressions and computing their result type
//! - Resolving variable and function references through enclosing scopes
//! - Opening a scope for every function, block and `for` header
//!
//! Function calls always check to the wildcard `any` type.

pub mod symbol_table;
pub mod type_checker;
pub mod types;
