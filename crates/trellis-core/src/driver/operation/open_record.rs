use super::*;

#[derive(Debug, Clone)]
pub struct OpenRecord {
    pub type_name: String,
    pub record_id: String,
}

impl From<OpenRecord> for Operation {
    fn from(value: OpenRecord) -> Self {
        Self::OpenRecord(value)
    }
}
