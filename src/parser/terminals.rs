//! Terminal factory.
//!
//! Maps token categories and fixed keyword, operator and punctuator text to
//! [`Terminal`]s, and maps a concrete token back to the terminal it matches.

use std::collections::HashMap;

use crate::lexer::tokens::{
    Token, TokenCategory, FLOAT_ID, IDENTIFIER_ID, INTEGER_ID, KEYWORD_LOOKUP, OPERATOR_LOOKUP,
    PUNCTUATOR_LOOKUP, STRING_ID,
};

use super::symbol::Terminal;

impl Terminal {
    pub fn identifier() -> Terminal {
        Terminal::new(IDENTIFIER_ID, "identifier")
    }

    pub fn integer_literal() -> Terminal {
        Terminal::new(INTEGER_ID, "integer")
    }

    pub fn float_literal() -> Terminal {
        Terminal::new(FLOAT_ID, "float")
    }

    pub fn string_literal() -> Terminal {
        Terminal::new(STRING_ID, "string")
    }

    pub fn keyword(text: &str) -> Terminal {
        fixed(&KEYWORD_LOOKUP, text, "keyword")
    }

    pub fn operator(text: &str) -> Terminal {
        fixed(&OPERATOR_LOOKUP, text, "operator")
    }

    pub fn punctuator(text: &str) -> Terminal {
        fixed(&PUNCTUATOR_LOOKUP, text, "punctuator")
    }

    /// The terminal a token satisfies.
    pub fn from_token(token: &Token) -> Terminal {
        match token.category {
            TokenCategory::Identifier => Terminal::identifier(),
            TokenCategory::Integer => Terminal::integer_literal(),
            TokenCategory::Float => Terminal::float_literal(),
            TokenCategory::String => Terminal::string_literal(),
            TokenCategory::Keyword | TokenCategory::Operator | TokenCategory::Punctuator => {
                Terminal::new(token.id, &token.text)
            }
        }
    }
}

// Grammar tables are written against the fixed token tables, so an unknown
// entry is a bug in the grammar rather than in the input.
fn fixed(table: &HashMap<&'static str, i32>, text: &str, kind: &str) -> Terminal {
    match table.get(text) {
        Some(id) => Terminal::new(*id, text),
        None => panic!("`{}` is not a known {}", text, kind),
    }
}
