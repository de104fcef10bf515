//! Token stream to AST driver.
//!
//! Runs a grammar over the whole token list, rejects trailing input, then
//! simplifies the concrete tree and hands it to the AST builder.

use tracing::debug;

use crate::{
    ast::{ast::AstNode, builder::build_ast},
    errors::errors::{CompileError, Error, ErrorImpl},
    lexer::tokens::Token,
    with_deep_stack, Position,
};

use super::{
    engine::Parser,
    grammar::{EXPRESSION_GRAMMAR, NODE_POLICIES, PROGRAM_GRAMMAR},
    parse_tree::ParseTree,
    rd_parser::{RdParser, MAX_DEPTH},
    simplifier::{simplify, SimplifiedChild},
};

/// Parses a complete program.
pub fn parse(tokens: &[Token]) -> Result<AstNode, CompileError> {
    with_deep_stack(|| build(&PROGRAM_GRAMMAR, tokens))
}

/// Parses a single expression.
pub fn parse_expression(tokens: &[Token]) -> Result<AstNode, CompileError> {
    with_deep_stack(|| build(&EXPRESSION_GRAMMAR, tokens))
}

/// Parses a complete program into its concrete parse tree.
pub fn parse_tree(tokens: &[Token]) -> Result<ParseTree, CompileError> {
    with_deep_stack(|| run(&PROGRAM_GRAMMAR, tokens))
}

fn run(grammar: &RdParser, tokens: &[Token]) -> Result<ParseTree, CompileError> {
    match grammar.parse(tokens, 0) {
        Ok(accept) if accept.next == tokens.len() => {
            debug!(
                start = %grammar.start(),
                nodes = accept.tree.node_count(),
                "parsed token stream"
            );
            Ok(accept.tree)
        }
        Ok(accept) => Err(unexpected_at(tokens, accept.next.max(accept.furthest))),
        Err(reject) if reject.too_deep => Err(Error::new(
            ErrorImpl::NestingTooDeep { limit: MAX_DEPTH },
            position_of(tokens, reject.position),
        )),
        Err(reject) => {
            debug!(message = %reject.message, index = reject.position, "parse rejected");
            Err(unexpected_at(tokens, reject.position))
        }
    }
}

fn build(grammar: &RdParser, tokens: &[Token]) -> Result<AstNode, CompileError> {
    let tree = run(grammar, tokens)?;
    let root = tree.symbol.to_string();

    let mut simplified = simplify(tree, &NODE_POLICIES);
    let child = match (simplified.pop(), simplified.is_empty()) {
        (Some(SimplifiedChild::Tree(child)), true) => child,
        _ => {
            return Err(Error::new(
                ErrorImpl::MalformedTree { node: root },
                Position::default(),
            ))
        }
    };
    debug!(nodes = child.node_count(), "simplified parse tree");

    build_ast(child)
}

/// The error for the token at `index`, or for the end of input past the
/// last token.
fn unexpected_at(tokens: &[Token], index: usize) -> Error {
    match tokens.get(index) {
        Some(token) => Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.to_string(),
                index,
            },
            token.position,
        ),
        None => Error::new(
            ErrorImpl::UnexpectedEndOfInput { index },
            end_of_input(tokens),
        ),
    }
}

fn position_of(tokens: &[Token], index: usize) -> Position {
    tokens
        .get(index)
        .map_or_else(|| end_of_input(tokens), |token| token.position)
}

fn end_of_input(tokens: &[Token]) -> Position {
    match tokens.last() {
        Some(token) => Position(
            token.position.0,
            token.position.1 + token.text.chars().count() as u32,
        ),
        None => Position(1, 1),
    }
}
