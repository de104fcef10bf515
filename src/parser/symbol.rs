use std::fmt::Display;

use crate::lexer::tokens::Token;

/// A leaf grammar symbol. Terminals are created through the factory
/// functions in `terminals.rs`, which always pair an id with the same name,
/// so the derived comparisons behave as comparisons by id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Terminal {
    id: i32,
    name: String,
}

impl Terminal {
    pub fn new(id: i32, name: &str) -> Self {
        Terminal {
            id,
            name: String::from(name),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, token: &Token) -> bool {
        token.id == self.id
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminal(String);

impl NonTerminal {
    pub fn new(name: &str) -> Self {
        NonTerminal(String::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl From<Terminal> for Symbol {
    fn from(terminal: Terminal) -> Self {
        Symbol::Terminal(terminal)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(non_terminal: NonTerminal) -> Self {
        Symbol::NonTerminal(non_terminal)
    }
}

/// Lookahead used as a table key by the table-driven engines.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lookahead {
    Terminal(Terminal),
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: &str, rhs: Vec<Symbol>) -> Self {
        Production {
            lhs: NonTerminal::new(lhs),
            rhs,
        }
    }
}

/// Shorthand for building non-terminal symbols in grammar tables.
pub fn nt(name: &str) -> NonTerminal {
    NonTerminal::new(name)
}
