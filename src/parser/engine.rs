use crate::lexer::tokens::Token;

use super::{
    ll1_parser::Ll1Parser, parse_tree::ParseResult, rd_parser::RdParser,
    slr1_parser::Slr1Parser,
};

/// The contract shared by every parsing algorithm: parse a prefix of
/// `tokens` starting at index `start`.
pub trait Parser {
    fn parse(&self, tokens: &[Token], start: usize) -> ParseResult;
}

/// An owned parser of any of the supported algorithms, so a grammar table can
/// embed sub-parsers directly in its right-hand sides.
#[derive(Debug)]
pub enum Engine {
    RecursiveDescent(RdParser),
    Ll1(Ll1Parser),
    Slr1(Slr1Parser),
}

impl Parser for Engine {
    fn parse(&self, tokens: &[Token], start: usize) -> ParseResult {
        match self {
            Engine::RecursiveDescent(parser) => parser.parse(tokens, start),
            Engine::Ll1(parser) => parser.parse(tokens, start),
            Engine::Slr1(parser) => parser.parse(tokens, start),
        }
    }
}

impl From<RdParser> for Engine {
    fn from(parser: RdParser) -> Self {
        Engine::RecursiveDescent(parser)
    }
}

impl From<Ll1Parser> for Engine {
    fn from(parser: Ll1Parser) -> Self {
        Engine::Ll1(parser)
    }
}

impl From<Slr1Parser> for Engine {
    fn from(parser: Slr1Parser) -> Self {
        Engine::Slr1(parser)
    }
}
