use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl, LexError},
    Position, MK_TOKEN,
};

use super::{
    acceptors::{default_acceptors, Acceptance, TokenAcceptor},
    tokens::{Token, TokenCategory},
};

#[derive(Clone)]
pub struct Lexer {
    acceptors: &'static [TokenAcceptor],
    tokens: Vec<Token>,
    source: String,
    line_starts: Vec<usize>,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(index, _)| index + 1))
            .collect();

        Lexer {
            acceptors: default_acceptors(),
            tokens: vec![],
            source: String::from(source),
            line_starts,
            pos: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// The unread source starting at byte offset `at`.
    pub fn rest(&self, at: usize) -> &str {
        &self.source[at..]
    }

    pub fn char_at(&self, at: usize) -> Option<char> {
        self.source.get(at..).and_then(|rest| rest.chars().next())
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// 1-based line and column of a byte offset.
    pub fn position_at(&self, at: usize) -> Position {
        let line = self.line_starts.partition_point(|start| *start <= at);
        let line_start = self.line_starts[line - 1];
        let column = self.source[line_start..at].chars().count() + 1;

        Position(line as u32, column as u32)
    }

    pub fn make_token(&self, id: i32, category: TokenCategory, start: usize, end: usize) -> Token {
        MK_TOKEN!(
            id,
            category,
            String::from(&self.source[start..end]),
            self.position_at(start)
        )
    }

    fn skip_whitespace(&mut self) {
        let skipped = self
            .rest(self.pos)
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(self.source.len() - self.pos);
        self.pos += skipped;
    }

    fn accept_next(&mut self) -> Result<(), LexError> {
        let start = self.pos;

        for acceptor in self.acceptors {
            match (acceptor.handler)(self, start) {
                Acceptance::Accept { token, next } => {
                    trace!(acceptor = acceptor.name, token = %token, "accepted");
                    self.tokens.push(token);
                    self.pos = next;
                    return Ok(());
                }
                Acceptance::Reject { error, at } if at != start => {
                    return Err(Error::new(error, self.position_at(at)));
                }
                Acceptance::Reject { .. } => {}
            }
        }

        let character = self.char_at(start).unwrap_or(' ');
        Err(Error::new(
            ErrorImpl::UnexpectedCharacter { character },
            self.position_at(start),
        ))
    }
}

/// Converts source text into tokens, failing on the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lex = Lexer::new(source);

    loop {
        lex.skip_whitespace();
        if lex.at_eof() {
            break;
        }
        lex.accept_next()?;
    }

    debug!(count = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}

/// Renders tokens in print form, e.g. `<int, keyword>, <a, identifier>`.
pub fn print_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_print_string)
        .collect::<Vec<String>>()
        .join(", ")
}

/// Renders tokens one write-form line each.
pub fn write_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_write_string)
        .collect::<Vec<String>>()
        .join("\n")
}

/// Reads a token file produced by [`write_tokens`]. Blank lines are ignored;
/// `None` means some line could not be read.
pub fn read_tokens(contents: &str) -> Option<Vec<Token>> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Token::from_line)
        .collect()
}
