//! Parse-tree simplification.
//!
//! Removes the non-terminals that only exist to shape the grammar (precedence
//! levels, repetition tails, single-alternative wrappers) so that every
//! remaining node corresponds to one AST construct. Each retained node is
//! tagged with the handler that will build its AST node.

use std::collections::HashMap;

use crate::lexer::tokens::Token;

use super::{
    parse_tree::{ParseChild, ParseTree},
    symbol::NonTerminal,
};

#[derive(Debug, Clone, Copy)]
pub enum NodePolicy<H> {
    Retain(H),
    MergeUp,
    RetainIfMultipleChildren(H),
}

/// Policies keyed by non-terminal. Non-terminals without an entry are merged
/// into their parent.
#[derive(Debug, Clone)]
pub struct PolicyTable<H> {
    policies: HashMap<NonTerminal, NodePolicy<H>>,
}

impl<H: Copy> Default for PolicyTable<H> {
    fn default() -> Self {
        PolicyTable {
            policies: HashMap::new(),
        }
    }
}

impl<H: Copy> PolicyTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retain(&mut self, symbol: &str, handler: H) {
        self.policies
            .insert(NonTerminal::new(symbol), NodePolicy::Retain(handler));
    }

    pub fn retain_if_multiple(&mut self, symbol: &str, handler: H) {
        self.policies.insert(
            NonTerminal::new(symbol),
            NodePolicy::RetainIfMultipleChildren(handler),
        );
    }

    pub fn merge_up(&mut self, symbol: &str) {
        self.policies
            .insert(NonTerminal::new(symbol), NodePolicy::MergeUp);
    }

    pub fn get(&self, symbol: &NonTerminal) -> NodePolicy<H> {
        self.policies
            .get(symbol)
            .copied()
            .unwrap_or(NodePolicy::MergeUp)
    }
}

#[derive(Debug, Clone)]
pub enum SimplifiedChild<H> {
    Token(Token),
    Tree(SimplifiedTree<H>),
}

#[derive(Debug, Clone)]
pub struct SimplifiedTree<H> {
    pub symbol: NonTerminal,
    pub handler: H,
    pub children: Vec<SimplifiedChild<H>>,
}

impl<H> SimplifiedTree<H> {
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                SimplifiedChild::Token(_) => 0,
                SimplifiedChild::Tree(tree) => tree.node_count(),
            })
            .sum::<usize>()
    }
}

/// Simplifies `tree` and returns what it contributes to its (imaginary)
/// parent: a single retained node, or the spliced children of a merged one.
pub fn simplify<H: Copy>(tree: ParseTree, policies: &PolicyTable<H>) -> Vec<SimplifiedChild<H>> {
    let mut output = vec![];
    simplify_into(tree, policies, &mut output);
    output
}

fn simplify_into<H: Copy>(
    tree: ParseTree,
    policies: &PolicyTable<H>,
    output: &mut Vec<SimplifiedChild<H>>,
) {
    let mut children = vec![];
    for child in tree.children {
        match child {
            ParseChild::Token(token) => children.push(SimplifiedChild::Token(token)),
            ParseChild::Tree(subtree) => simplify_into(subtree, policies, &mut children),
        }
    }

    match policies.get(&tree.symbol) {
        NodePolicy::MergeUp => output.extend(children),
        NodePolicy::RetainIfMultipleChildren(_) if children.len() <= 1 => output.extend(children),
        NodePolicy::Retain(handler) | NodePolicy::RetainIfMultipleChildren(handler) => {
            output.push(SimplifiedChild::Tree(SimplifiedTree {
                symbol: tree.symbol,
                handler,
                children,
            }))
        }
    }
}
