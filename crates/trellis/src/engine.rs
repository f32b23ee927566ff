mod exec;

mod translate;
pub(crate) use translate::translate;

mod verify;

mod write;
pub use write::WriteSummary;
pub(crate) use write::WriteTransaction;

use crate::{Config, Registry};

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};
use trellis_core::{
    driver::{
        operation::{GetDefinition, Operation},
        Driver, Response,
    },
    schema::BusinessObjectDef,
    Result,
};

/// Shared state behind every [`Client`](crate::Client) clone.
pub(crate) struct Engine {
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) config: Config,
    pub(crate) registry: Registry,

    /// Remote definitions by type name, fetched on first use
    definitions: RwLock<HashMap<String, Arc<BusinessObjectDef>>>,
}

impl Engine {
    pub(crate) fn new(driver: Arc<dyn Driver>, config: Config) -> Self {
        Self {
            driver,
            config,
            registry: Registry::new(),
            definitions: RwLock::new(HashMap::new()),
        }
    }

    /// One round trip to the remote store.
    pub(crate) async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        let op = op.into();
        tracing::debug!(operation = op.name(), ?op, "exec");
        self.driver.exec(op).await
    }

    pub(crate) async fn definition(&self, type_name: &str) -> Result<Arc<BusinessObjectDef>> {
        {
            let definitions = self.definitions.read().unwrap_or_else(|e| e.into_inner());
            if let Some(def) = definitions.get(type_name) {
                return Ok(def.clone());
            }
        }

        let def = self
            .exec(GetDefinition {
                type_name: type_name.to_string(),
            })
            .await?
            .into_definition()?;

        tracing::debug!(type_name, fields = def.fields.len(), "loaded definition");

        let mut definitions = self.definitions.write().unwrap_or_else(|e| e.into_inner());
        Ok(definitions
            .entry(type_name.to_string())
            .or_insert_with(|| Arc::new(def))
            .clone())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("driver", &self.driver)
            .field("config", &self.config)
            .finish()
    }
}
