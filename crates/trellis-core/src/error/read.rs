use super::Error;

/// Error when the remote store fails to answer a query.
#[derive(Debug)]
pub(super) struct ReadError {
    remote: Box<str>,
}

impl std::error::Error for ReadError {}

impl core::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "read error: {}", self.remote)
    }
}

impl Error {
    /// Creates a read error carrying the remote store's error text.
    pub fn read(remote: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Read(ReadError {
            remote: remote.into().into(),
        }))
    }

    /// Returns `true` if this error is a read error.
    pub fn is_read(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Read(_))
    }
}
