use super::*;
use crate::stmt::Filter;

/// A filter query against one business object type.
#[derive(Debug, Clone)]
pub struct QueryRecords {
    pub type_name: String,

    pub filter: Filter,

    /// Fields to return. Empty returns every field.
    pub fields: Vec<String>,

    /// Return at most this many records
    pub top_count: Option<usize>,

    /// Restrict results to the children of one parent record
    pub scope: Option<RelationScope>,

    pub page: Option<Page>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationScope {
    pub parent_type: String,
    pub parent_id: String,
    pub relationship: String,
}

/// One page of results; `number` starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl QueryRecords {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            filter: Filter::new(),
            fields: vec![],
            top_count: None,
            scope: None,
            page: None,
        }
    }
}

impl Page {
    /// Number of records to skip before this page.
    pub fn offset(&self) -> usize {
        self.number.saturating_sub(1) * self.size
    }
}

impl From<QueryRecords> for Operation {
    fn from(value: QueryRecords) -> Self {
        Self::QueryRecords(value)
    }
}
