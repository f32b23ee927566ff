use super::*;

#[derive(Debug, Clone)]
pub struct SetField {
    pub record: RecordHandle,

    /// Internal field name
    pub field: String,

    /// The value as text; the remote store converts it to the field's type
    pub value: String,
}

impl From<SetField> for Operation {
    fn from(value: SetField) -> Self {
        Self::SetField(value)
    }
}
