#![allow(clippy::module_inception)]

use std::{fmt::Display, panic, path::Path, thread};

use tracing::warn;

use crate::{
    ast::ast::AstNode,
    errors::errors::{CompileError, Error, ErrorTip},
    lexer::tokens::Token,
    type_checker::types::DataType,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

pub use compiler::compiler::generate_ir;
pub use lexer::lexer::tokenize;

/// A 1-based `line:column` source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position(pub u32, pub u32);

impl Position {
    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

/// Stack reserved for the recursive passes over a tree.
const DEEP_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Runs a recursive pass on a thread with a large stack, so nesting up to
/// the parser's depth limit never exhausts the caller's stack. Falls back to
/// the current thread when no thread can be spawned.
pub fn with_deep_stack<T: Send>(work: impl Fn() -> T + Sync) -> T {
    let work = &work;

    thread::scope(|scope| {
        let spawned = thread::Builder::new()
            .name(String::from("quadc-pass"))
            .stack_size(DEEP_STACK_SIZE)
            .spawn_scoped(scope, move || work());

        match spawned {
            Ok(handle) => match handle.join() {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            },
            Err(err) => {
                warn!("running on the current stack: {}", err);
                work()
            }
        }
    })
}

/// Parses a whole program and type checks it.
pub fn parse_and_check(tokens: &[Token]) -> Result<AstNode, CompileError> {
    let ast = parser::parser::parse(tokens)?;
    type_checker::type_checker::type_check(&ast)?;
    Ok(ast)
}

/// Parses a bare expression and returns its type.
pub fn check_expression(tokens: &[Token]) -> Result<DataType, CompileError> {
    let ast = parser::parser::parse_expression(tokens)?;
    type_checker::type_checker::type_check(&ast)
}

/// The line containing `position`, its text without the line break and the
/// 0-based character offset of the column within it.
pub fn get_line_at_position(source: &str, position: Position) -> Option<(usize, String, usize)> {
    let line_number = position.line() as usize;
    let line = source.lines().nth(line_number.checked_sub(1)?)?;
    let column = (position.column() as usize).saturating_sub(1);

    Some((line_number, String::from(line), column))
}


pub fn display_error(error: &Error, source: &str, file: &Path) {
    /*
        error: message
        -> code.txt
           |
        20 | int a = #;
           | --------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("{}: {}", error.kind(), error.message());
    } else {
        eprintln!("{}: {} ({})", error.kind(), error.message(), error.get_tip());
    }
    eprintln!("-> {}:{}", file.to_string_lossy(), error.get_position());

    let Some((line, line_text, line_pos)) = get_line_at_position(source, *error.get_position())
    else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| c.is_whitespace()).count();
    (string.chars().skip(start).collect(), start)
}
