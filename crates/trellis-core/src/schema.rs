//! Model-side field mappings and the remote store's business object definitions.

mod definition;
pub use definition::{BusinessObjectDef, FieldDef, FieldType, RelationshipDef};

mod field;
pub use field::{FieldMapping, Validation};

mod model;
pub use model::ModelSchema;

mod relation;
pub use relation::RelationMapping;

/// Remote name of the record id field every business object carries.
pub const RECORD_ID_FIELD: &str = "RecID";
