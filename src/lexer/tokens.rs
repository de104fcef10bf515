use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, fmt::Display, str::FromStr};

use crate::Position;

pub const IDENTIFIER_ID: i32 = 0;
pub const INTEGER_ID: i32 = 1;
pub const FLOAT_ID: i32 = 2;
pub const STRING_ID: i32 = 3;

lazy_static! {
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, i32> = {
        let mut map = HashMap::new();
        map.insert("int", 100);
        map.insert("float", 101);
        map.insert("str", 102);
        map.insert("for", 103);
        map.insert("if", 104);
        map.insert("else", 105);
        map.insert("return", 106);
        map.insert("while", 107);
        map.insert("do", 108);
        map
    };
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, i32> = {
        let mut map = HashMap::new();
        map.insert("=", 200);
        map.insert("==", 201);
        map.insert("!=", 202);
        map.insert(">=", 203);
        map.insert("<=", 204);
        map.insert(">", 205);
        map.insert("<", 206);
        map.insert("+", 207);
        map.insert("-", 208);
        map.insert("*", 209);
        map.insert("/", 210);
        map.insert("%", 211);
        map.insert("&&", 212);
        map.insert("||", 213);
        map.insert("!", 214);
        map
    };
    pub static ref PUNCTUATOR_LOOKUP: HashMap<&'static str, i32> = {
        let mut map = HashMap::new();
        map.insert("{", 300);
        map.insert("}", 301);
        map.insert(",", 302);
        map.insert(";", 303);
        map.insert("(", 304);
        map.insert(")", 305);
        map.insert("[", 306);
        map.insert("]", 307);
        map
    };
    pub static ref LONGEST_KEYWORD: usize = longest_entry(&KEYWORD_LOOKUP);
    pub static ref LONGEST_OPERATOR: usize = longest_entry(&OPERATOR_LOOKUP);
    pub static ref LONGEST_PUNCTUATOR: usize = longest_entry(&PUNCTUATOR_LOOKUP);

    // id category text line:column; the text itself may contain spaces
    static ref WRITE_LINE: Regex = Regex::new(r"^(-?\d+) ([a-z]+) (.+) (\d+):(\d+)$").unwrap();
}

fn longest_entry(table: &HashMap<&'static str, i32>) -> usize {
    table.keys().map(|text| text.len()).max().unwrap_or(0)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenCategory {
    Identifier,
    Integer,
    Float,
    String,
    Keyword,
    Operator,
    Punctuator,
}

impl TokenCategory {
    pub fn name(&self) -> &'static str {
        match self {
            TokenCategory::Identifier => "identifier",
            TokenCategory::Integer => "integer",
            TokenCategory::Float => "float",
            TokenCategory::String => "string",
            TokenCategory::Keyword => "keyword",
            TokenCategory::Operator => "operator",
            TokenCategory::Punctuator => "punctuator",
        }
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TokenCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identifier" => Ok(TokenCategory::Identifier),
            "integer" => Ok(TokenCategory::Integer),
            "float" => Ok(TokenCategory::Float),
            "string" => Ok(TokenCategory::String),
            "keyword" => Ok(TokenCategory::Keyword),
            "operator" => Ok(TokenCategory::Operator),
            "punctuator" => Ok(TokenCategory::Punctuator),
            _ => Err(()),
        }
    }
}

/// A lexical unit. `text` is the exact source slice, so string tokens keep
/// their quotes and escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: i32,
    pub category: TokenCategory,
    pub text: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}>", self.text, self.category)
    }
}

impl Token {
    /// The `<text, category>` form used in diagnostics.
    pub fn to_print_string(&self) -> String {
        self.to_string()
    }

    /// The `id category text line:column` line stored in token files.
    pub fn to_write_string(&self) -> String {
        format!(
            "{} {} {} {}",
            self.id, self.category, self.text, self.position
        )
    }

    /// Reads back a line produced by [`Token::to_write_string`].
    pub fn from_line(line: &str) -> Option<Token> {
        let captures = WRITE_LINE.captures(line.trim_end_matches(&['\r', '\n'][..]))?;

        Some(Token {
            id: captures[1].parse().ok()?,
            category: captures[2].parse().ok()?,
            text: captures[3].to_string(),
            position: Position(captures[4].parse().ok()?, captures[5].parse().ok()?),
        })
    }
}
