/// Maps one model property onto a remote field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Position of the property in the model
    pub index: usize,

    /// Rust property name
    pub property: String,

    /// External field name, defaults to the property name
    pub name: String,

    /// False for computed or read-only remote fields
    pub writable: bool,

    /// True when the property is an alternate lookup key
    pub key: bool,

    /// Validator declared on the property
    pub validation: Option<Validation>,
}

/// How a failed validator is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Fail the write instead of skipping the field
    pub throws: bool,

    /// Appended to the validation error message
    pub message: Option<String>,
}

impl FieldMapping {
    pub fn new(index: usize, property: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            index,
            property: property.into(),
            name: name.into(),
            writable: true,
            key: false,
            validation: None,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn key(mut self) -> Self {
        self.key = true;
        self
    }

    pub fn validated(mut self, throws: bool, message: Option<&str>) -> Self {
        self.validation = Some(Validation {
            throws,
            message: message.map(str::to_string),
        });
        self
    }
}
