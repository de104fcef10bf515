//! Table-driven LL(1) parser.
//!
//! The table maps `(NonTerminal, Lookahead)` to a right-hand side. When the
//! real next token has no entry, the end-of-input entry is tried instead, and
//! from then on every lookup uses end-of-input. This lets ε-productions fire
//! when the fragment ends without computing follow sets.

use std::collections::HashMap;

use tracing::trace;

use crate::lexer::tokens::Token;

use super::{
    engine::Parser,
    parse_tree::{Accept, ParseChild, ParseResult, ParseTree, Reject},
    symbol::{Lookahead, NonTerminal, Symbol, Terminal},
};

#[derive(Debug)]
pub struct Ll1Parser {
    start: NonTerminal,
    table: HashMap<(NonTerminal, Lookahead), Vec<Symbol>>,
}

enum StackEntry {
    EndMarker,
    Symbol { symbol: Symbol, parent: Option<usize> },
}

enum ArenaChild {
    Token(Token),
    Node(usize),
}

struct ArenaNode {
    symbol: NonTerminal,
    children: Vec<ArenaChild>,
}

impl Ll1Parser {
    pub fn new(start: NonTerminal) -> Self {
        Ll1Parser {
            start,
            table: HashMap::new(),
        }
    }

    pub fn add_entry(&mut self, lhs: &str, lookahead: Lookahead, rhs: Vec<Symbol>) {
        self.table.insert((NonTerminal::new(lhs), lookahead), rhs);
    }

    fn lookup(
        &self,
        symbol: &NonTerminal,
        token: Option<&Token>,
        assume_end_of_input: &mut bool,
    ) -> Option<&Vec<Symbol>> {
        if let (Some(token), false) = (token, *assume_end_of_input) {
            let key = (symbol.clone(), Lookahead::Terminal(Terminal::from_token(token)));
            if let Some(rhs) = self.table.get(&key) {
                return Some(rhs);
            }
        }

        let rhs = self.table.get(&(symbol.clone(), Lookahead::EndOfInput))?;
        if !*assume_end_of_input {
            trace!(rule = %symbol, "falling back to end of input");
            *assume_end_of_input = true;
        }
        Some(rhs)
    }
}

impl Parser for Ll1Parser {
    fn parse(&self, tokens: &[Token], start: usize) -> ParseResult {
        let mut nodes: Vec<ArenaNode> = vec![];
        let mut stack = vec![
            StackEntry::EndMarker,
            StackEntry::Symbol {
                symbol: Symbol::NonTerminal(self.start.clone()),
                parent: None,
            },
        ];
        let mut cursor = start;
        let mut assume_end_of_input = false;

        while let Some(entry) = stack.pop() {
            let (symbol, parent) = match entry {
                StackEntry::EndMarker => {
                    let tree = assemble(&mut nodes, 0);
                    return Ok(Accept {
                        tree,
                        next: cursor,
                        furthest: cursor,
                    });
                }
                StackEntry::Symbol { symbol, parent } => (symbol, parent),
            };

            match symbol {
                Symbol::Terminal(terminal) => match tokens.get(cursor) {
                    Some(token) if terminal.matches(token) => {
                        if let Some(parent) = parent {
                            nodes[parent].children.push(ArenaChild::Token(token.clone()));
                        }
                        cursor += 1;
                    }
                    _ => return Err(Reject::new(format!("expected {}", terminal), cursor)),
                },
                Symbol::NonTerminal(non_terminal) => {
                    let Some(rhs) =
                        self.lookup(&non_terminal, tokens.get(cursor), &mut assume_end_of_input)
                    else {
                        return Err(Reject::new(
                            format!("no production for {}", non_terminal),
                            cursor,
                        ));
                    };

                    let index = nodes.len();
                    nodes.push(ArenaNode {
                        symbol: non_terminal,
                        children: vec![],
                    });
                    if let Some(parent) = parent {
                        nodes[parent].children.push(ArenaChild::Node(index));
                    }

                    for symbol in rhs.iter().rev() {
                        stack.push(StackEntry::Symbol {
                            symbol: symbol.clone(),
                            parent: Some(index),
                        });
                    }
                }
            }
        }

        Err(Reject::new(String::from("parse stack exhausted"), cursor))
    }
}

fn assemble(nodes: &mut [ArenaNode], index: usize) -> ParseTree {
    let children = std::mem::take(&mut nodes[index].children)
        .into_iter()
        .map(|child| match child {
            ArenaChild::Token(token) => ParseChild::Token(token),
            ArenaChild::Node(node) => ParseChild::Tree(assemble(nodes, node)),
        })
        .collect();

    ParseTree::new(nodes[index].symbol.clone(), children)
}
