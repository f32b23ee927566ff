mod delete_record;
pub use delete_record::DeleteRecord;

mod get_definition;
pub use get_definition::GetDefinition;

mod get_field;
pub use get_field::GetField;

mod link;
pub use link::{Link, Unlink};

mod new_record;
pub use new_record::NewRecord;

mod open_record;
pub use open_record::OpenRecord;

mod query_records;
pub use query_records::{Page, QueryRecords, RelationScope};

mod save;
pub use save::Save;

mod set_field;
pub use set_field::SetField;

/// Identifies a record opened for editing on the remote store.
///
/// Field sets made through a handle are staged until the record is saved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordHandle {
    /// Driver-assigned handle id
    pub id: u64,

    pub type_name: String,

    /// Remote record id; assigned when the record is created
    pub record_id: String,
}

#[derive(Debug, Clone)]
pub enum Operation {
    /// Resolve a type name to its definition
    GetDefinition(GetDefinition),

    /// Begin a new, unsaved record
    NewRecord(NewRecord),

    /// Open an existing record for editing
    OpenRecord(OpenRecord),

    /// Read one field of an open record
    GetField(GetField),

    /// Set one field of an open record from text
    SetField(SetField),

    /// Commit an open record
    Save(Save),

    /// Delete a record by type and id
    DeleteRecord(DeleteRecord),

    /// Run a filter query
    QueryRecords(QueryRecords),

    /// Relate a child record to a parent record
    Link(Link),

    /// Remove a relation between two records
    Unlink(Unlink),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetDefinition(_) => "get_definition",
            Self::NewRecord(_) => "new_record",
            Self::OpenRecord(_) => "open_record",
            Self::GetField(_) => "get_field",
            Self::SetField(_) => "set_field",
            Self::Save(_) => "save",
            Self::DeleteRecord(_) => "delete_record",
            Self::QueryRecords(_) => "query_records",
            Self::Link(_) => "link",
            Self::Unlink(_) => "unlink",
        }
    }
}
