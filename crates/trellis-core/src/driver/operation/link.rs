use super::*;

#[derive(Debug, Clone)]
pub struct Link {
    /// Relationship name, defined on the parent type
    pub relationship: String,

    pub parent_type: String,
    pub parent_id: String,
    pub child_id: String,

    /// Drop the parent's existing children in this relationship first
    pub replace: bool,
}

#[derive(Debug, Clone)]
pub struct Unlink {
    pub relationship: String,
    pub parent_type: String,
    pub parent_id: String,
    pub child_id: String,
}

impl From<Link> for Operation {
    fn from(value: Link) -> Self {
        Self::Link(value)
    }
}

impl From<Unlink> for Operation {
    fn from(value: Unlink) -> Self {
        Self::Unlink(value)
    }
}
