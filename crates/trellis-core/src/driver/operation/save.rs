use super::*;

#[derive(Debug, Clone)]
pub struct Save {
    pub record: RecordHandle,
}

impl From<Save> for Operation {
    fn from(value: Save) -> Self {
        Self::Save(value)
    }
}
