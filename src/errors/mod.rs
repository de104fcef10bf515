//! Error types and error handling for the compiler.
//!
//! Every stage of the pipeline reports failures through the same
//! [`errors::Error`] value: a message-carrying [`errors::ErrorImpl`] variant
//! plus the source position it refers to. Errors are classified into
//! lexical, parse and type errors, and the first error aborts the pipeline.

pub mod errors;

#[cfg(test)]
mod tests;
