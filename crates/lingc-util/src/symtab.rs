//! The flat, insertion-ordered variable symbol table.

use crate::types::{DataType, SizeLimiter};
use indexmap::IndexMap;

/// One declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub ty: DataType,
    pub value: Option<String>,
    pub scope: String,
    pub limiter: Option<SizeLimiter>,
}

/// Result of an [`SymbolTable::insert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    Inserted,
    Duplicate,
}

/// Names are unique across the whole program: there is no block scoping,
/// only a `scope` label recording which function (or `"global"`) a name was
/// declared in. Backed by an `IndexMap` so lookup is O(1) and report
/// iteration preserves declaration order.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: IndexMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// Inserts a new entry if no entry with this name exists yet. Leaves the
    /// table unchanged on a duplicate name — callers are expected to emit a
    /// duplicate-declaration warning and move on.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        ty: DataType,
        scope: impl Into<String>,
        limiter: Option<SizeLimiter>,
    ) -> InsertResult {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return InsertResult::Duplicate;
        }
        self.entries.insert(
            name.clone(),
            SymbolEntry { name, ty, value: None, scope: scope.into(), limiter },
        );
        InsertResult::Inserted
    }

    /// Sets the initializer value on an already-inserted entry. No-op if the
    /// name is unknown.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.value = Some(value.into());
        }
    }

    pub fn find(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order, for the symbol-table report.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }
}
