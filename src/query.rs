//! Table-side state and the patch representation the encoder produces.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Extra caller-owned parameters synced alongside the table state.
///
/// An empty-string value marks the parameter as cleared and removes its
/// key from the URL on the next sync.
pub type ParamMap = IndexMap<String, String>;

/// A table widget's current query state.
///
/// Owned by the table-state store; this crate only reads it. Sort and
/// filter entries use `None` for "explicitly cleared": the field is still
/// listed so its key gets removed from the URL, but it carries no value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableQuery {
    pub sort: IndexMap<String, Option<String>>,
    pub filter: IndexMap<String, Option<String>>,
    pub page: Option<u64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u64>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sort direction for a field.
    pub fn with_sort(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort.insert(field.into(), Some(direction.into()));
        self
    }

    /// Marks a field's sort as cleared, so its key is dropped on sync.
    pub fn without_sort(mut self, field: impl Into<String>) -> Self {
        self.sort.insert(field.into(), None);
        self
    }

    /// Sets the filter value for a field.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.insert(field.into(), Some(value.into()));
        self
    }

    /// Marks a field's filter as cleared, so its key is dropped on sync.
    pub fn without_filter(mut self, field: impl Into<String>) -> Self {
        self.filter.insert(field.into(), None);
        self
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Outcome for a single key in an encode pass.
///
/// `Remove` signals "delete this key from the URL" and is distinct from
/// setting the key to some sentinel string. Keys the table does not own
/// never appear in a patch at all, which is the implicit "keep".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchValue {
    Set(String),
    Remove,
}

impl PatchValue {
    pub fn is_remove(&self) -> bool {
        matches!(self, PatchValue::Remove)
    }

    /// The value to set, if any.
    pub fn as_set(&self) -> Option<&str> {
        match self {
            PatchValue::Set(value) => Some(value),
            PatchValue::Remove => None,
        }
    }
}

/// The encoder's output: dotted key → outcome, in emission order.
pub type QueryPatch = IndexMap<String, PatchValue>;
