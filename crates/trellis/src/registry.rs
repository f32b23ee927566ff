use crate::BusinessObject;

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, RwLock},
};
use trellis_core::{schema::ModelSchema, Result};

/// Validated model metadata, computed once per model type.
///
/// Each [`Client`](crate::Client) owns a registry; lookups after the first
/// are shared reads.
#[derive(Debug, Default)]
pub struct Registry {
    schemas: RwLock<HashMap<TypeId, Arc<ModelSchema>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema of `M`, validating it on first use.
    pub fn get<M: BusinessObject>(&self) -> Result<Arc<ModelSchema>> {
        self.get_dyn(TypeId::of::<M>(), M::schema)
    }

    pub(crate) fn get_dyn(
        &self,
        type_id: TypeId,
        schema: fn() -> ModelSchema,
    ) -> Result<Arc<ModelSchema>> {
        {
            let schemas = self.schemas.read().unwrap_or_else(|e| e.into_inner());
            if let Some(schema) = schemas.get(&type_id) {
                return Ok(schema.clone());
            }
        }

        let schema = schema();
        schema.validate()?;

        let mut schemas = self.schemas.write().unwrap_or_else(|e| e.into_inner());
        Ok(schemas
            .entry(type_id)
            .or_insert_with(|| Arc::new(schema))
            .clone())
    }

    pub fn len(&self) -> usize {
        self.schemas.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
