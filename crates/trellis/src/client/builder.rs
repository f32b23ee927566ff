use super::Client;
use crate::{engine::Engine, Config, Result};

use std::sync::Arc;
use trellis_core::driver::Driver;

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Records requested per round trip when a query pages through results
    pub fn page_size(&mut self, page_size: usize) -> &mut Self {
        self.config.page_size = page_size;
        self
    }

    pub fn verify_writes(&mut self, verify_writes: bool) -> &mut Self {
        self.config.verify_writes = verify_writes;
        self
    }

    /// Replace every setting at once.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Opens the remote session and returns a client sharing it.
    pub async fn connect(&mut self, driver: impl Driver) -> Result<Client> {
        driver.open_session().await?;

        tracing::info!(
            driver = ?driver,
            page_size = self.config.page_size,
            verify_writes = self.config.verify_writes,
            "session opened"
        );

        let engine = Engine::new(Arc::new(driver), self.config.clone());
        Ok(Client {
            engine: Arc::new(engine),
        })
    }
}
