use super::Error;

/// Error when a field validator configured to throw rejects a value.
#[derive(Debug)]
pub(super) struct ValidationError {
    property: Box<str>,
    message: Option<Box<str>>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "custom validation failed for {}", self.property)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a validation error for the given model property.
    pub fn validation(property: impl Into<String>, message: Option<&str>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            property: property.into().into(),
            message: message.filter(|m| !m.is_empty()).map(Into::into),
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }
}
