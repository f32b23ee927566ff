use super::{Conjunction, Operator};

use serde::{Deserialize, Serialize};

/// One filter condition of a query.
///
/// `property` is the remote field name and `value` is always text; the remote
/// store interprets it according to the field's type.
///
/// A clause with a `relationship` tests a field of the related records
/// instead: it holds when any record related through that relationship
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub property: String,
    pub operator: Operator,
    pub value: String,
    pub conjunction: Conjunction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl Clause {
    pub fn new(property: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            operator,
            value: value.into(),
            conjunction: Conjunction::And,
            relationship: None,
        }
    }

    /// A clause on a field of the records related through `relationship`.
    pub fn related(
        relationship: impl Into<String>,
        property: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            relationship: Some(relationship.into()),
            ..Self::new(property, operator, value)
        }
    }

    pub fn is_related(&self) -> bool {
        self.relationship.is_some()
    }

    pub fn eq(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property, Operator::Equal, value)
    }

    pub fn contains(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property, Operator::Contains, value)
    }

    pub fn like(property: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(property, Operator::Like, pattern)
    }

    pub fn empty(property: impl Into<String>) -> Self {
        Self::new(property, Operator::Empty, "")
    }

    pub fn not_empty(property: impl Into<String>) -> Self {
        Self::new(property, Operator::NotEmpty, "")
    }
}
