/// Maps a navigation property onto a remote relationship.
///
/// The relationship name is resolved against the remote schema when a query
/// runs, not when the mapping is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMapping {
    /// Position of the property in the model
    pub index: usize,

    /// Rust property name
    pub property: String,

    /// Remote relationship name
    pub name: String,

    /// Remote type name of the related model
    pub target: String,

    /// `Vec<_>` properties hold many records, `Option<_>` at most one
    pub collection: bool,
}
