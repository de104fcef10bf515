//! Lexically scoped symbol table.
//!
//! Scopes live in an arena and refer to their parent by index. Scopes are
//! strictly nested, so the innermost scope is always the last one in the
//! arena and leaving it simply drops it.

use std::collections::HashMap;

use tracing::trace;

use super::types::DataType;

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub name: String,
    pub data_type: DataType,
    pub is_array: bool,
}

impl SymbolEntry {
    pub fn new(name: &str, data_type: DataType, is_array: bool) -> Self {
        SymbolEntry {
            name: String::from(name),
            data_type,
            is_array,
        }
    }
}

#[derive(Debug, Default)]
pub struct Scope {
    pub parent: Option<usize>,
    pub symbols: HashMap<String, SymbolEntry>,
}

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable {
            scopes: vec![Scope::default()],
            current: 0,
        }
    }
}

impl SymbolTable {
    /// A table holding only the global scope.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = &self.scopes[self.current];
        while let Some(parent) = scope.parent {
            depth += 1;
            scope = &self.scopes[parent];
        }
        depth
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope {
            parent: Some(self.current),
            symbols: HashMap::new(),
        });
        self.current = self.scopes.len() - 1;
        trace!(scope = self.current, "entered scope");
    }

    /// Leaves the innermost scope and discards it. The global scope is never
    /// left.
    pub fn exit_scope(&mut self) {
        let Some(parent) = self.scopes[self.current].parent else {
            return;
        };
        self.scopes.truncate(self.current);
        trace!(scope = self.current, "left scope");
        self.current = parent;
    }

    /// Binds `entry` in the innermost scope, replacing any previous binding
    /// of the same name there.
    pub fn insert(&mut self, entry: SymbolEntry) {
        self.scopes[self.current]
            .symbols
            .insert(entry.name.clone(), entry);
    }

    /// Finds `name` in the innermost scope or the nearest enclosing one.
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        let mut index = Some(self.current);
        while let Some(current) = index {
            let scope = &self.scopes[current];
            if let Some(entry) = scope.symbols.get(name) {
                return Some(entry);
            }
            index = scope.parent;
        }
        None
    }
}
