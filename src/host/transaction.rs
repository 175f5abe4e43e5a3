//! Host editor transactions and the metadata keys the paginator reserves

use rustc_hash::FxHashMap;
use serde_json::Value;

/// Set by the paginator on the transaction it dispatches after a resynthesis
pub const PAGINATION_UPDATED: &str = "paginationUpdated";

/// Requests an unconditional resynthesis
pub const REFRESH_PAGINATION: &str = "refreshPagination";

/// Marks a geometry change applied through the host
pub const PAGE_MARGINS_UPDATED: &str = "pageMarginsUpdated";

/// A state transition of the host editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    /// Whether the document content changed
    pub doc_changed: bool,
    meta: FxHashMap<String, Value>,
}

impl Transaction {
    /// Transaction without content changes
    pub fn new() -> Self {
        Self::default()
    }

    /// Transaction that edits the document
    pub fn doc_change() -> Self {
        Self {
            doc_changed: true,
            meta: FxHashMap::default(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.meta.insert(key.into(), value.into());
    }

    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    pub fn has_meta(&self, key: &str) -> bool {
        self.meta.contains_key(key)
    }

    /// Metadata entries, in no particular order
    pub fn meta_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.meta.iter().map(|(key, value)| (key.as_str(), value))
    }
}
