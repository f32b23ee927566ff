use super::*;

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub type_name: String,
}

impl From<NewRecord> for Operation {
    fn from(value: NewRecord) -> Self {
        Self::NewRecord(value)
    }
}
