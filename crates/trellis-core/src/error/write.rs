use super::Error;

/// Error when the remote store does not accept a write.
///
/// This occurs when:
/// - The remote rejects an individual field set
/// - A field still does not reflect the intended value after one retry
/// - The intended value cannot be interpreted for the field's type
/// - Saving the record fails
#[derive(Debug)]
pub(super) struct WriteError {
    kind: WriteErrorKind,
}

#[derive(Debug)]
enum WriteErrorKind {
    FieldRejected {
        field: Box<str>,
        remote: Box<str>,
    },
    NotVerified {
        field: Box<str>,
        attempted: Box<str>,
        observed: Box<str>,
    },
    Unparseable {
        field: Box<str>,
        value: Box<str>,
        expected: &'static str,
    },
    SaveFailed {
        type_name: Box<str>,
        remote: Box<str>,
    },
    Rejected {
        action: &'static str,
        type_name: Box<str>,
        remote: Box<str>,
    },
}

impl std::error::Error for WriteError {}

impl core::fmt::Display for WriteError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("write error: ")?;
        match &self.kind {
            WriteErrorKind::FieldRejected { field, remote } => {
                write!(f, "update of `{field}` was rejected: {remote}")
            }
            WriteErrorKind::NotVerified {
                field,
                attempted,
                observed,
            } => write!(
                f,
                "attempted to set `{field}` to `{attempted}` twice, and it failed both times; observed `{observed}`"
            ),
            WriteErrorKind::Unparseable {
                field,
                value,
                expected,
            } => write!(f, "`{value}` is not a parseable {expected} for `{field}`"),
            WriteErrorKind::SaveFailed { type_name, remote } => {
                write!(f, "saving `{type_name}` failed: {remote}")
            }
            WriteErrorKind::Rejected {
                action,
                type_name,
                remote,
            } => write!(f, "{action} of `{type_name}` was rejected: {remote}"),
        }
    }
}

impl Error {
    /// Creates a write error for a field set the remote store rejected.
    pub fn field_rejected(field: impl Into<String>, remote: impl Into<String>) -> Error {
        write_error(WriteErrorKind::FieldRejected {
            field: field.into().into(),
            remote: remote.into().into(),
        })
    }

    /// Creates a write error for a field whose value did not stick after the retry.
    pub fn write_not_verified(
        field: impl Into<String>,
        attempted: impl Into<String>,
        observed: impl Into<String>,
    ) -> Error {
        write_error(WriteErrorKind::NotVerified {
            field: field.into().into(),
            attempted: attempted.into().into(),
            observed: observed.into().into(),
        })
    }

    /// Creates a write error for an intended value that does not parse as the field's type.
    pub fn write_unparseable(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Error {
        write_error(WriteErrorKind::Unparseable {
            field: field.into().into(),
            value: value.into().into(),
            expected,
        })
    }

    /// Creates a write error for a failed record save.
    pub fn save_failed(type_name: impl Into<String>, remote: impl Into<String>) -> Error {
        write_error(WriteErrorKind::SaveFailed {
            type_name: type_name.into().into(),
            remote: remote.into().into(),
        })
    }

    /// Creates a write error for a delete or link the remote store refused.
    pub fn remote_rejected(
        action: &'static str,
        type_name: impl Into<String>,
        remote: impl Into<String>,
    ) -> Error {
        write_error(WriteErrorKind::Rejected {
            action,
            type_name: type_name.into().into(),
            remote: remote.into().into(),
        })
    }

    /// Returns `true` if this error is a write error.
    pub fn is_write(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Write(_))
    }
}

fn write_error(kind: WriteErrorKind) -> Error {
    Error::from(super::ErrorKind::Write(WriteError { kind }))
}
