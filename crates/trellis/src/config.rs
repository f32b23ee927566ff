use serde::{Deserialize, Serialize};

/// Client settings.
///
/// Loading these from files or the environment is left to the application;
/// the struct deserializes from any serde format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Records requested per round trip when a query pages through results
    pub page_size: usize,

    /// Read each field back after setting it, retrying once on a mismatch
    pub verify_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 2000,
            verify_writes: true,
        }
    }
}
