mod response;
pub use response::{FieldSet, Outcome, Record, Response};

pub mod operation;
pub use operation::{Operation, RecordHandle};

use crate::async_trait;

use std::fmt::Debug;

/// The remote record store.
///
/// A driver owns the session with the remote store. The session is opened
/// once by [`Driver::open_session`] and lives as long as the driver. Callers
/// add no locking around `exec`; the driver's own thread safety governs.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Log in to the remote store.
    async fn open_session(&self) -> crate::Result<()>;

    /// Execute one round trip against the remote store.
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}
