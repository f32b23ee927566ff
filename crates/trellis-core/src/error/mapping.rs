use super::Error;

/// Error when model metadata and the remote schema disagree.
///
/// This occurs when:
/// - A key-marked property carries no field mapping
/// - An external field name is not defined on the remote business object
/// - A relationship name is not defined on the remote business object
/// - The remote store does not know the business object type at all
#[derive(Debug)]
pub(super) struct MappingError {
    kind: MappingErrorKind,
}

#[derive(Debug)]
enum MappingErrorKind {
    Invalid(Box<str>),
    FieldNotFound { field: Box<str>, type_name: Box<str> },
    RelationshipNotFound { name: Box<str>, type_name: Box<str> },
    TypeNotFound(Box<str>),
}

impl std::error::Error for MappingError {}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("mapping error: ")?;
        match &self.kind {
            MappingErrorKind::Invalid(message) => f.write_str(message),
            MappingErrorKind::FieldNotFound { field, type_name } => write!(
                f,
                "expected to find field `{field}` on business object `{type_name}`, but it was not found"
            ),
            MappingErrorKind::RelationshipNotFound { name, type_name } => write!(
                f,
                "could not find relationship `{name}` on business object `{type_name}`"
            ),
            MappingErrorKind::TypeNotFound(type_name) => {
                write!(f, "business object `{type_name}` is not defined")
            }
        }
    }
}

impl Error {
    /// Creates a mapping error for invalid model metadata.
    pub fn mapping(message: impl Into<String>) -> Error {
        mapping_error(MappingErrorKind::Invalid(message.into().into()))
    }

    /// Creates a mapping error for a field name the remote schema does not define.
    pub fn field_not_found(field: impl Into<String>, type_name: impl Into<String>) -> Error {
        mapping_error(MappingErrorKind::FieldNotFound {
            field: field.into().into(),
            type_name: type_name.into().into(),
        })
    }

    /// Creates a mapping error for a relationship the remote schema does not define.
    pub fn relationship_not_found(name: impl Into<String>, type_name: impl Into<String>) -> Error {
        mapping_error(MappingErrorKind::RelationshipNotFound {
            name: name.into().into(),
            type_name: type_name.into().into(),
        })
    }

    /// Creates a mapping error for an unknown business object type.
    pub fn type_not_found(type_name: impl Into<String>) -> Error {
        mapping_error(MappingErrorKind::TypeNotFound(type_name.into().into()))
    }

    /// Returns `true` if this error is a mapping error.
    pub fn is_mapping(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Mapping(_))
    }
}

fn mapping_error(kind: MappingErrorKind) -> Error {
    Error::from(super::ErrorKind::Mapping(MappingError { kind }))
}
