//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the compiler:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Builds one right-hand side of a recursive-descent rule
//!
//! These macros reduce boilerplate in the lexer and in the grammar tables.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$id` - The numeric token id
/// * `$category` - The TokenCategory
/// * `$text` - The token's source text
/// * `$position` - The source position of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(INTEGER_ID, TokenCategory::Integer, "42".to_string(), Position(1, 1));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($id:expr, $category:expr, $text:expr, $position:expr) => {
        Token {
            id: $id,
            category: $category,
            text: $text,
            position: $position,
        }
    };
}

/// Builds a right-hand side for a recursive-descent rule.
///
/// Every element is converted with `RdSymbol::from`, so terminals,
/// non-terminals and sub-parser engines can be mixed freely.
///
/// # Example
///
/// ```ignore
/// MK_RULE![nt("Type"), Terminal::identifier(), Terminal::punctuator("(")]
/// ```
#[macro_export]
macro_rules! MK_RULE {
    ($($symbol:expr),* $(,)?) => {
        vec![$($crate::parser::rd_parser::RdSymbol::from($symbol)),*]
    };
}
