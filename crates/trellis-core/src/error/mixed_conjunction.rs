use super::Error;

/// Error when a single query combines AND and OR clauses.
///
/// The remote store evaluates a clause list with exactly one conjunction, so
/// mixing is rejected instead of silently reinterpreted.
#[derive(Debug)]
pub(super) struct MixedConjunction {
    existing: &'static str,
    attempted: &'static str,
}

impl std::error::Error for MixedConjunction {}

impl core::fmt::Display for MixedConjunction {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot add {} clauses to a query whose clauses are combined with {}",
            self.attempted, self.existing
        )
    }
}

impl Error {
    /// Creates a mixed conjunction error.
    ///
    /// `existing` is the conjunction already in use by the clause list, `attempted`
    /// the one that was rejected.
    pub fn mixed_conjunction(existing: &'static str, attempted: &'static str) -> Error {
        Error::from(super::ErrorKind::MixedConjunction(MixedConjunction {
            existing,
            attempted,
        }))
    }

    /// Returns `true` if this error is a mixed conjunction error.
    pub fn is_mixed_conjunction(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MixedConjunction(_))
    }
}
