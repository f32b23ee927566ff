//! Shared vocabulary between the trellis client and its drivers: the
//! [`Driver`] interface, remote and local schema types, filter statements,
//! and the [`Error`] type.

pub mod driver;
pub use driver::Driver;

mod error;
pub use error::Error;

pub mod schema;

pub mod stmt;

pub type Result<T, E = Error> = core::result::Result<T, E>;

pub use async_trait::async_trait;
