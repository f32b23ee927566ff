use indexmap::IndexMap;
use trellis_core::{
    schema::RECORD_ID_FIELD,
    stmt::{Row, Value},
};

/// An untyped record of any business object type.
///
/// Fields are text keyed by remote field name, in the order they are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArbitraryRecord {
    pub type_name: String,

    /// Assigned when the record is created
    pub record_id: Option<String>,

    pub fields: IndexMap<String, String>,
}

impl ArbitraryRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            record_id: None,
            fields: IndexMap::new(),
        }
    }

    /// Sets a field, builder style.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into().to_text());
    }

    /// Field text, matching the name case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn from_row(type_name: &str, row: Row) -> Self {
        let mut record = Self::new(type_name);

        for (name, value) in row {
            if name.eq_ignore_ascii_case(RECORD_ID_FIELD) {
                record.record_id = value.as_str().map(str::to_string);
            } else {
                record.fields.insert(name, value.to_text());
            }
        }

        record
    }
}
