use super::Error;

/// Error when a predicate uses an expression shape outside the translatable set.
///
/// The set is closed: comparisons of a field against a value, AND, OR, and
/// negation of a boolean field. Everything else is rejected by node kind.
#[derive(Debug)]
pub(super) struct UnsupportedPredicate {
    node: Box<str>,
}

impl std::error::Error for UnsupportedPredicate {}

impl core::fmt::Display for UnsupportedPredicate {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported predicate: {}", self.node)
    }
}

impl Error {
    /// Creates an unsupported predicate error naming the offending node kind.
    pub fn unsupported_predicate(node: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedPredicate(UnsupportedPredicate {
            node: node.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported predicate error.
    pub fn is_unsupported_predicate(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedPredicate(_))
    }
}
