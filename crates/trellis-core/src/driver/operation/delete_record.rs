use super::*;

#[derive(Debug, Clone)]
pub struct DeleteRecord {
    pub type_name: String,
    pub record_id: String,
}

impl From<DeleteRecord> for Operation {
    fn from(value: DeleteRecord) -> Self {
        Self::DeleteRecord(value)
    }
}
