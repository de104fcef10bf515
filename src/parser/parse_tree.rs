use crate::lexer::tokens::Token;

use super::symbol::NonTerminal;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseChild {
    Token(Token),
    Tree(ParseTree),
}

/// Concrete parse tree node, tagged by the non-terminal it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
    pub symbol: NonTerminal,
    pub children: Vec<ParseChild>,
}

impl ParseTree {
    pub fn new(symbol: NonTerminal, children: Vec<ParseChild>) -> Self {
        ParseTree { symbol, children }
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                ParseChild::Token(_) => 0,
                ParseChild::Tree(tree) => tree.node_count(),
            })
            .sum::<usize>()
    }

    /// The leaf tokens in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = vec![];
        for child in self.children.iter() {
            match child {
                ParseChild::Token(token) => tokens.push(token),
                ParseChild::Tree(tree) => tokens.extend(tree.tokens()),
            }
        }
        tokens
    }
}

/// A successful parse starting at some token index.
///
/// `next` is the first unconsumed token index and `furthest` the deepest
/// index at which any alternative tried along the way failed.
#[derive(Debug, Clone)]
pub struct Accept {
    pub tree: ParseTree,
    pub next: usize,
    pub furthest: usize,
}

/// A failed parse. `too_deep` marks a failure caused by the nesting limit
/// rather than by the input's shape; it is never retried with another
/// alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct Reject {
    pub message: String,
    pub position: usize,
    pub too_deep: bool,
}

impl Reject {
    pub fn new(message: String, position: usize) -> Self {
        Reject {
            message,
            position,
            too_deep: false,
        }
    }

    pub fn too_deep(limit: usize, position: usize) -> Self {
        Reject {
            message: format!("nesting exceeds {} levels", limit),
            position,
            too_deep: true,
        }
    }

    /// Moves the failure position forward to at least `position`.
    pub fn at_least(mut self, position: usize) -> Self {
        self.position = self.position.max(position);
        self
    }
}

pub type ParseResult = Result<Accept, Reject>;
