//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Ordered acceptors for numbers, strings, keywords, identifiers,
//!   operators and punctuators, each matching greedily
//! - Hard errors versus soft rejections between acceptors
//! - Line and column tracking for every token and error
//! - Print and write renderings of token lists, and reading them back

pub mod acceptors;
pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
