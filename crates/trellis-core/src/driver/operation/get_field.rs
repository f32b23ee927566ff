use super::*;

#[derive(Debug, Clone)]
pub struct GetField {
    pub record: RecordHandle,

    /// Internal field name
    pub field: String,
}

impl From<GetField> for Operation {
    fn from(value: GetField) -> Self {
        Self::GetField(value)
    }
}
