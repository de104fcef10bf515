use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Error produced by the tokenizer. Always of kind [`ErrorKind::Lexical`].
pub type LexError = Error;

/// Error produced after tokenization. Always of kind [`ErrorKind::Parse`] or [`ErrorKind::Type`].
pub type CompileError = Error;

/// The pipeline stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Parse,
    Type,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "LexError"),
            ErrorKind::Parse => write!(f, "ParseError"),
            ErrorKind::Type => write!(f, "TypeError"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} (at position {position})")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The message without the trailing position.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. }
            | ErrorImpl::InvalidDigit { .. }
            | ErrorImpl::UnexpectedNewline
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnexpectedCharacter { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedEndOfInput { .. }
            | ErrorImpl::NestingTooDeep { .. }
            | ErrorImpl::MalformedTree { .. } => ErrorKind::Parse,
            _ => ErrorKind::Type,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => "InvalidCharacter",
            ErrorImpl::InvalidDigit { .. } => "InvalidDigit",
            ErrorImpl::UnexpectedNewline => "UnexpectedNewline",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::MalformedTree { .. } => "MalformedTree",
            ErrorImpl::VariableNotFound { .. } => "VariableNotFound",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::ComparisonMismatch { .. } => "ComparisonMismatch",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::NonNumericOperand { .. } => "NonNumericOperand",
            ErrorImpl::NonBooleanOperand { .. } => "NonBooleanOperand",
            ErrorImpl::NonBooleanCondition { .. } => "NonBooleanCondition",
            ErrorImpl::ArrayWithoutIndex { .. } => "ArrayWithoutIndex",
            ErrorImpl::IndexOnNonArray { .. } => "IndexOnNonArray",
            ErrorImpl::NonIntegerIndex { .. } => "NonIntegerIndex",
            ErrorImpl::CallOnNonFunction { .. } => "CallOnNonFunction",
            ErrorImpl::FunctionAsVariable { .. } => "FunctionAsVariable",
            ErrorImpl::ArrayInitializer { .. } => "ArrayInitializer",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { character, .. } | ErrorImpl::InvalidDigit { character } => {
                ErrorTip::Suggestion(format!(
                    "Separate `{}` from the preceding token with whitespace or an operator",
                    character
                ))
            }
            ErrorImpl::UnexpectedNewline => ErrorTip::Suggestion(String::from(
                "String constants cannot span lines, use `\\n` instead",
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Close the string with `\"`"))
            }
            ErrorImpl::UnexpectedToken { token, .. } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::VariableNotFound { name } => {
                ErrorTip::Suggestion(format!("Declare `{}` before using it", name))
            }
            ErrorImpl::FunctionNotFound { name } => {
                ErrorTip::Suggestion(format!("Define function `{}` before calling it", name))
            }
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the expression or block into smaller pieces",
            )),
            ErrorImpl::ArrayWithoutIndex { name } => {
                ErrorTip::Suggestion(format!("Access an element with `{}[index]`", name))
            }
            ErrorImpl::NonIntegerIndex { .. } => {
                ErrorTip::Suggestion(String::from("Array indices must be of type `int`"))
            }
            _ => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("Invalid character '{character}' in {context}")]
    InvalidCharacter { character: char, context: String },
    #[error("Invalid digit '{character}' in numeric constant")]
    InvalidDigit { character: char },
    #[error("Unexpected newline in string constant")]
    UnexpectedNewline,
    #[error("Expected a double quote")]
    UnterminatedString,
    #[error("Unexpected token: {character}")]
    UnexpectedCharacter { character: char },

    // Parse
    #[error("Unexpected token {token}")]
    UnexpectedToken { token: String, index: usize },
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput { index: usize },
    #[error("Malformed parse tree at {node}")]
    MalformedTree { node: String },

    // Type
    #[error("Variable not found: {name}")]
    VariableNotFound { name: String },
    #[error("Function not found: {name}")]
    FunctionNotFound { name: String },
    #[error("Type mismatch: cannot assign {received} to {expected}")]
    TypeMismatch { expected: String, received: String },
    #[error("Cannot {operation} types {left} and {right}")]
    InvalidOperands {
        operation: String,
        left: String,
        right: String,
    },
    #[error("Type mismatch: cannot compare {left} and {right}")]
    ComparisonMismatch { left: String, right: String },
    #[error("Nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("The operand must be numeric, found {received}")]
    NonNumericOperand { received: String },
    #[error("The operand must be boolean, found {received}")]
    NonBooleanOperand { received: String },
    #[error("Condition must be boolean, found {received}")]
    NonBooleanCondition { received: String },
    #[error("Array variable used without index: {name}")]
    ArrayWithoutIndex { name: String },
    #[error("Non-array variable used with index: {name}")]
    IndexOnNonArray { name: String },
    #[error("Array index must be int, found {received}")]
    NonIntegerIndex { received: String },
    #[error("Function call on a non-function: {name}")]
    CallOnNonFunction { name: String },
    #[error("Function used as a variable: {name}")]
    FunctionAsVariable { name: String },
    #[error("Array variable cannot be initialized: {name}")]
    ArrayInitializer { name: String },
}
