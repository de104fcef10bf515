//! Recursive-descent parser driven by an ordered grammar table.
//!
//! Every non-terminal maps to a list of alternatives that are tried in
//! declaration order; the first alternative that matches wins. An alternative
//! may embed a complete sub-parser, which then consumes tokens on its own and
//! contributes its tree as a single child.
//!
//! Rules registered with [`RdParser::add_list_rule`] repeat through their own
//! right recursion (`X → a b X | ...`). Those repetitions are parsed in a loop
//! and their children collected into a single node, so a long list costs no
//! stack. Every other non-terminal nests one level deeper, and nesting beyond
//! [`MAX_DEPTH`] is rejected.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::lexer::tokens::Token;

use super::{
    engine::{Engine, Parser},
    parse_tree::{Accept, ParseChild, ParseResult, ParseTree, Reject},
    symbol::{NonTerminal, Terminal},
};

/// Deepest chain of nested non-terminals a parse may open.
pub const MAX_DEPTH: usize = 4_000;

#[derive(Debug)]
pub enum RdSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    SubParser(Box<Engine>),
}

impl From<Terminal> for RdSymbol {
    fn from(terminal: Terminal) -> Self {
        RdSymbol::Terminal(terminal)
    }
}

impl From<NonTerminal> for RdSymbol {
    fn from(non_terminal: NonTerminal) -> Self {
        RdSymbol::NonTerminal(non_terminal)
    }
}

impl From<Engine> for RdSymbol {
    fn from(engine: Engine) -> Self {
        RdSymbol::SubParser(Box::new(engine))
    }
}

#[derive(Debug)]
pub struct RdParser {
    start: NonTerminal,
    rules: HashMap<NonTerminal, Vec<Vec<RdSymbol>>>,
    lists: HashSet<NonTerminal>,
}

/// A sequence that matched: its children, the next unconsumed index and the
/// furthest index any nested alternative reached.
struct Matched {
    children: Vec<ParseChild>,
    next: usize,
    furthest: usize,
}

/// One repetition of a rule: where it starts, the alternative being tried
/// and the best failure so far. For a list rule waiting on its next
/// repetition, `children` and `furthest` hold the matched prefix.
struct Repetition {
    start: usize,
    alternative: usize,
    failure: Option<Reject>,
    children: Vec<ParseChild>,
    furthest: usize,
}

impl Repetition {
    fn new(start: usize) -> Self {
        Repetition {
            start,
            alternative: 0,
            failure: None,
            children: vec![],
            furthest: start,
        }
    }

    /// Keeps the deepest failure and moves on to the next alternative.
    fn fail(&mut self, reject: Reject) {
        if self
            .failure
            .as_ref()
            .map_or(true, |best| reject.position >= best.position)
        {
            self.failure = Some(reject);
        }
        self.alternative += 1;
    }

    fn furthest_with(&self, furthest: usize) -> usize {
        self.failure
            .as_ref()
            .map_or(furthest, |failure| furthest.max(failure.position))
    }
}

impl RdParser {
    pub fn new(start: NonTerminal) -> Self {
        RdParser {
            start,
            rules: HashMap::new(),
            lists: HashSet::new(),
        }
    }

    pub fn start(&self) -> &NonTerminal {
        &self.start
    }

    /// Appends alternatives to the rule for `lhs`.
    pub fn add_rule(&mut self, lhs: &str, alternatives: Vec<Vec<RdSymbol>>) {
        self.rules
            .entry(NonTerminal::new(lhs))
            .or_default()
            .extend(alternatives);
    }

    /// Appends alternatives to a repetition rule. An alternative ending in
    /// `lhs` itself continues the list; the whole list becomes one node with
    /// the children of every repetition in order.
    pub fn add_list_rule(&mut self, lhs: &str, alternatives: Vec<Vec<RdSymbol>>) {
        self.lists.insert(NonTerminal::new(lhs));
        self.add_rule(lhs, alternatives);
    }

    fn parse_non_terminal(
        &self,
        symbol: &NonTerminal,
        tokens: &[Token],
        pos: usize,
        depth: usize,
    ) -> ParseResult {
        if depth >= MAX_DEPTH {
            return Err(Reject::too_deep(MAX_DEPTH, pos));
        }
        let Some(alternatives) = self.rules.get(symbol) else {
            return Err(Reject::new(format!("no rule for {}", symbol), pos));
        };
        let is_list = self.lists.contains(symbol);

        let mut pending: Vec<Repetition> = vec![];
        let mut current = Repetition::new(pos);

        loop {
            let Some(rhs) = alternatives.get(current.alternative) else {
                let reject = current.failure.unwrap_or_else(|| {
                    Reject::new(format!("{} has no alternatives", symbol), current.start)
                });
                // The repetition that was waiting on this one fails too.
                let Some(mut outer) = pending.pop() else {
                    return Err(reject);
                };
                let furthest = outer.furthest;
                outer.fail(reject.at_least(furthest));
                current = outer;
                continue;
            };

            let (prefix, repeats) = match rhs.split_last() {
                Some((RdSymbol::NonTerminal(last), prefix)) if is_list && last == symbol => {
                    (prefix, true)
                }
                _ => (rhs.as_slice(), false),
            };

            match self.parse_sequence(prefix, tokens, current.start, depth) {
                Err(reject) if reject.too_deep => return Err(reject),
                Err(reject) => {
                    trace!(rule = %symbol, position = reject.position, "alternative failed");
                    current.fail(reject);
                }
                Ok(matched) if repeats && matched.next == current.start => {
                    current.fail(Reject::new(
                        format!("{} repeats without consuming input", symbol),
                        current.start,
                    ));
                }
                Ok(matched) if repeats => {
                    let next = matched.next;
                    current.children = matched.children;
                    current.furthest = matched.furthest;
                    pending.push(current);
                    current = Repetition::new(next);
                }
                Ok(matched) => {
                    let next = matched.next;
                    let mut furthest = current.furthest_with(matched.furthest);
                    let mut children = matched.children;

                    while let Some(outer) = pending.pop() {
                        furthest = outer.furthest_with(furthest.max(outer.furthest));
                        let mut spliced = outer.children;
                        spliced.append(&mut children);
                        children = spliced;
                    }

                    return Ok(Accept {
                        tree: ParseTree::new(symbol.clone(), children),
                        next,
                        furthest,
                    });
                }
            }
        }
    }

    fn parse_sequence(
        &self,
        rhs: &[RdSymbol],
        tokens: &[Token],
        pos: usize,
        depth: usize,
    ) -> Result<Matched, Reject> {
        let mut children = vec![];
        let mut cursor = pos;
        let mut furthest = pos;

        for symbol in rhs {
            let accept = match symbol {
                RdSymbol::Terminal(terminal) => match tokens.get(cursor) {
                    Some(token) if terminal.matches(token) => {
                        children.push(ParseChild::Token(token.clone()));
                        cursor += 1;
                        continue;
                    }
                    _ => {
                        return Err(Reject::new(
                            format!("expected {}", terminal),
                            cursor.max(furthest),
                        ))
                    }
                },
                RdSymbol::NonTerminal(non_terminal) => {
                    self.parse_non_terminal(non_terminal, tokens, cursor, depth + 1)
                }
                RdSymbol::SubParser(engine) => engine.parse(tokens, cursor),
            };

            match accept {
                Ok(accept) => {
                    furthest = furthest.max(accept.furthest);
                    cursor = accept.next;
                    children.push(ParseChild::Tree(accept.tree));
                }
                Err(reject) => return Err(reject.at_least(furthest)),
            }
        }

        Ok(Matched {
            children,
            next: cursor,
            furthest: furthest.max(cursor),
        })
    }
}

impl Parser for RdParser {
    fn parse(&self, tokens: &[Token], start: usize) -> ParseResult {
        self.parse_non_terminal(&self.start, tokens, start, 0)
    }
}
