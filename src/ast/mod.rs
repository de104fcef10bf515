/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The closed `AstNode` enum and the node structs it wraps
/// - builder: Handlers that turn simplified parse-tree nodes into AST nodes
pub mod ast;
pub mod builder;

#[cfg(test)]
mod tests;
