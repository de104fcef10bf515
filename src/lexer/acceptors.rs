//! Token acceptors.
//!
//! An acceptor tries to recognise one token category at a byte offset of the
//! source. Rejecting at the starting offset is a soft rejection and lets the
//! next acceptor try; rejecting further in is a hard error for the whole input.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::Lexer,
    tokens::{
        Token, TokenCategory, FLOAT_ID, IDENTIFIER_ID, INTEGER_ID, KEYWORD_LOOKUP,
        LONGEST_KEYWORD, LONGEST_OPERATOR, LONGEST_PUNCTUATOR, OPERATOR_LOOKUP,
        PUNCTUATOR_LOOKUP, STRING_ID,
    },
};

lazy_static! {
    static ref NUMBER_PATTERN: Regex = Regex::new(r"^[0-9]+(\.[0-9]*)?").unwrap();
    static ref KEYWORD_PATTERN: Regex = Regex::new(r"^[A-Za-z][A-Za-z_]*").unwrap();
    static ref IDENTIFIER_PATTERN: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap();
}

pub enum Acceptance {
    Accept { token: Token, next: usize },
    Reject { error: ErrorImpl, at: usize },
}

pub type AcceptorHandler = fn(&Lexer, usize) -> Acceptance;

#[derive(Clone)]
pub struct TokenAcceptor {
    pub name: &'static str,
    pub handler: AcceptorHandler,
}

static DEFAULT_ACCEPTORS: [TokenAcceptor; 6] = [
    TokenAcceptor { name: "number", handler: number_acceptor },
    TokenAcceptor { name: "string", handler: string_acceptor },
    TokenAcceptor { name: "keyword", handler: keyword_acceptor },
    TokenAcceptor { name: "identifier", handler: identifier_acceptor },
    TokenAcceptor { name: "operator", handler: operator_acceptor },
    TokenAcceptor { name: "punctuator", handler: punctuator_acceptor },
];

/// The acceptors in the order the lexer tries them.
pub fn default_acceptors() -> &'static [TokenAcceptor] {
    &DEFAULT_ACCEPTORS
}

/// Characters that may not directly follow an identifier, number, string or keyword.
pub fn is_conflicting(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_' || character == '"'
}

fn soft_reject(start: usize, expected: &str, lexer: &Lexer) -> Acceptance {
    let character = lexer.char_at(start).unwrap_or(' ');
    Acceptance::Reject {
        error: ErrorImpl::InvalidCharacter {
            character,
            context: String::from(expected),
        },
        at: start,
    }
}

fn number_acceptor(lexer: &Lexer, start: usize) -> Acceptance {
    let Some(matched) = NUMBER_PATTERN.find(lexer.rest(start)) else {
        return soft_reject(start, "numeric constant", lexer);
    };
    let end = start + matched.end();
    let text = matched.as_str();

    if text.ends_with('.') {
        return Acceptance::Reject {
            error: ErrorImpl::InvalidDigit { character: '.' },
            at: end - 1,
        };
    }

    let is_float = text.contains('.');
    if let Some(next) = lexer.char_at(end) {
        if next == '.' || is_conflicting(next) {
            return Acceptance::Reject {
                error: ErrorImpl::InvalidDigit { character: next },
                at: end,
            };
        }
    }

    let (id, category) = if is_float {
        (FLOAT_ID, TokenCategory::Float)
    } else {
        (INTEGER_ID, TokenCategory::Integer)
    };

    Acceptance::Accept {
        token: lexer.make_token(id, category, start, end),
        next: end,
    }
}

fn string_acceptor(lexer: &Lexer, start: usize) -> Acceptance {
    if lexer.char_at(start) != Some('"') {
        return soft_reject(start, "string constant", lexer);
    }

    let mut escaped = false;
    let mut chars = lexer.rest(start).char_indices().skip(1);

    let end = loop {
        let Some((offset, character)) = chars.next() else {
            return Acceptance::Reject {
                error: ErrorImpl::UnterminatedString,
                at: lexer.len(),
            };
        };

        match character {
            '\n' => {
                return Acceptance::Reject {
                    error: ErrorImpl::UnexpectedNewline,
                    at: start + offset,
                }
            }
            '"' if !escaped => break start + offset + 1,
            '\\' if !escaped => escaped = true,
            _ => escaped = false,
        }
    };

    if let Some(next) = lexer.char_at(end) {
        if is_conflicting(next) {
            return Acceptance::Reject {
                error: ErrorImpl::InvalidCharacter {
                    character: next,
                    context: String::from("string constant"),
                },
                at: end,
            };
        }
    }

    Acceptance::Accept {
        token: lexer.make_token(STRING_ID, TokenCategory::String, start, end),
        next: end,
    }
}

fn keyword_acceptor(lexer: &Lexer, start: usize) -> Acceptance {
    let Some(matched) = KEYWORD_PATTERN.find(lexer.rest(start)) else {
        return soft_reject(start, "keyword", lexer);
    };

    // Never reads past the longest keyword; anything longer is rejected by
    // the adjacency check below.
    let length = matched.end().min(*LONGEST_KEYWORD);
    let end = start + length;
    let text = &matched.as_str()[..length];

    let conflicting = lexer.char_at(end).is_some_and(is_conflicting);
    match KEYWORD_LOOKUP.get(text) {
        Some(id) if !conflicting => Acceptance::Accept {
            token: lexer.make_token(*id, TokenCategory::Keyword, start, end),
            next: end,
        },
        _ => soft_reject(start, "keyword", lexer),
    }
}

fn identifier_acceptor(lexer: &Lexer, start: usize) -> Acceptance {
    let Some(matched) = IDENTIFIER_PATTERN.find(lexer.rest(start)) else {
        return soft_reject(start, "identifier", lexer);
    };
    let end = start + matched.end();

    if let Some(next) = lexer.char_at(end) {
        if is_conflicting(next) {
            return Acceptance::Reject {
                error: ErrorImpl::InvalidCharacter {
                    character: next,
                    context: String::from("identifier"),
                },
                at: end,
            };
        }
    }

    Acceptance::Accept {
        token: lexer.make_token(IDENTIFIER_ID, TokenCategory::Identifier, start, end),
        next: end,
    }
}

fn operator_acceptor(lexer: &Lexer, start: usize) -> Acceptance {
    accept_longest(
        lexer,
        start,
        &OPERATOR_LOOKUP,
        *LONGEST_OPERATOR,
        TokenCategory::Operator,
    )
}

fn punctuator_acceptor(lexer: &Lexer, start: usize) -> Acceptance {
    accept_longest(
        lexer,
        start,
        &PUNCTUATOR_LOOKUP,
        *LONGEST_PUNCTUATOR,
        TokenCategory::Punctuator,
    )
}

/// Extends the candidate one character at a time, remembering the longest
/// prefix present in `table`.
fn accept_longest(
    lexer: &Lexer,
    start: usize,
    table: &HashMap<&'static str, i32>,
    longest: usize,
    category: TokenCategory,
) -> Acceptance {
    if !lexer.char_at(start).is_some_and(|c| c.is_ascii_punctuation()) {
        return soft_reject(start, category.name(), lexer);
    }

    let mut best: Option<(i32, usize)> = None;
    for (offset, character) in lexer.rest(start).char_indices().take(longest) {
        let end = start + offset + character.len_utf8();
        if let Some(id) = table.get(&lexer.source()[start..end]) {
            best = Some((*id, end));
        }
    }

    match best {
        Some((id, end)) => Acceptance::Accept {
            token: lexer.make_token(id, category, start, end),
            next: end,
        },
        None => soft_reject(start, category.name(), lexer),
    }
}
