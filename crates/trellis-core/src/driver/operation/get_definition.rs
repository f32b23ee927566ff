use super::*;

#[derive(Debug, Clone)]
pub struct GetDefinition {
    pub type_name: String,
}

impl From<GetDefinition> for Operation {
    fn from(value: GetDefinition) -> Self {
        Self::GetDefinition(value)
    }
}
