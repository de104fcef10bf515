use std::fmt::Display;

/// The checked type of an expression or declaration.
///
/// `Any` is the wildcard produced by function calls and is compatible with
/// every other type. `None` is the type of statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Float,
    Str,
    Any,
    None,
    Function,
}

impl DataType {
    /// Maps a type keyword to its type.
    pub fn from_keyword(keyword: &str) -> Option<DataType> {
        match keyword {
            "int" => Some(DataType::Int),
            "float" => Some(DataType::Float),
            "str" => Some(DataType::Str),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, DataType::Any)
    }

    /// Int or the wildcard, the only types usable as a truth value.
    pub fn is_boolean(&self) -> bool {
        matches!(self, DataType::Int | DataType::Any)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "str",
            DataType::Any => "any",
            DataType::None => "none",
            DataType::Function => "function",
        };
        write!(f, "{}", name)
    }
}
