//! Table-driven SLR(1) shift-reduce parser.

use std::collections::HashMap;

use tracing::trace;

use crate::lexer::tokens::Token;

use super::{
    engine::Parser,
    parse_tree::{Accept, ParseChild, ParseResult, ParseTree, Reject},
    symbol::{Lookahead, NonTerminal, Production, Terminal},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(State),
    Reduce(usize),
    Accept,
}

#[derive(Debug)]
pub struct Slr1Parser {
    start: State,
    productions: HashMap<usize, Production>,
    actions: HashMap<(State, Lookahead), Action>,
    gotos: HashMap<(State, NonTerminal), State>,
}

impl Slr1Parser {
    pub fn new(start: State) -> Self {
        Slr1Parser {
            start,
            productions: HashMap::new(),
            actions: HashMap::new(),
            gotos: HashMap::new(),
        }
    }

    pub fn add_production(&mut self, id: usize, production: Production) {
        self.productions.insert(id, production);
    }

    pub fn add_action(&mut self, state: usize, lookahead: Lookahead, action: Action) {
        self.actions.insert((State(state), lookahead), action);
    }

    pub fn add_goto(&mut self, state: usize, symbol: &str, target: usize) {
        self.gotos
            .insert((State(state), NonTerminal::new(symbol)), State(target));
    }

    fn lookup(&self, state: State, token: Option<&Token>, assume_end_of_input: &mut bool) -> Option<Action> {
        if let (Some(token), false) = (token, *assume_end_of_input) {
            let key = (state, Lookahead::Terminal(Terminal::from_token(token)));
            if let Some(action) = self.actions.get(&key) {
                return Some(*action);
            }
        }

        let action = self.actions.get(&(state, Lookahead::EndOfInput))?;
        *assume_end_of_input = true;
        Some(*action)
    }
}

impl Parser for Slr1Parser {
    fn parse(&self, tokens: &[Token], start: usize) -> ParseResult {
        let mut stack: Vec<(State, Option<ParseChild>)> = vec![(self.start, None)];
        let mut cursor = start;
        let mut assume_end_of_input = false;

        loop {
            let state = stack.last().map_or(self.start, |(state, _)| *state);

            let Some(action) = self.lookup(state, tokens.get(cursor), &mut assume_end_of_input) else {
                return Err(Reject::new(format!("no action in state {}", state.0), cursor));
            };

            match action {
                Action::Shift(next) => {
                    let Some(token) = tokens.get(cursor).filter(|_| !assume_end_of_input) else {
                        return Err(Reject::new(String::from("cannot shift past end of input"), cursor));
                    };
                    stack.push((next, Some(ParseChild::Token(token.clone()))));
                    cursor += 1;
                }
                Action::Reduce(id) => {
                    let Some(production) = self.productions.get(&id) else {
                        unreachable!("SLR(1) table reduces by unknown production {}", id);
                    };
                    trace!(production = id, lhs = %production.lhs, "reduce");

                    // The bottom entry is the start state and is never popped.
                    let split = stack.len().saturating_sub(production.rhs.len()).max(1);
                    let children = stack
                        .drain(split..)
                        .filter_map(|(_, child)| child)
                        .collect();
                    let exposed = stack.last().map_or(self.start, |(state, _)| *state);

                    let Some(target) = self.gotos.get(&(exposed, production.lhs.clone())) else {
                        return Err(Reject::new(
                            format!("no goto from state {} on {}", exposed.0, production.lhs),
                            cursor,
                        ));
                    };
                    let tree = ParseTree::new(production.lhs.clone(), children);
                    stack.push((*target, Some(ParseChild::Tree(tree))));
                }
                Action::Accept => {
                    return match stack.pop() {
                        Some((_, Some(ParseChild::Tree(tree)))) => Ok(Accept {
                            tree,
                            next: cursor,
                            furthest: cursor,
                        }),
                        _ => Err(Reject::new(String::from("accepted without a tree"), cursor)),
                    };
                }
            }
        }
    }
}
