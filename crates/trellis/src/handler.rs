//! Per-type custom write logic.
//!
//! [`Client::create`], [`Client::update`] and [`Client::delete`] dispatch to
//! the model's [`Handler`]. A handler receives a [`HandlerClient`] whose own
//! `create`/`update`/`delete` write directly, so a handler calling back into
//! its own type never dispatches to itself again. Writes to other types go
//! through [`HandlerClient::dispatch`] and reach those types' handlers, while
//! writes of the handler's own type through it still write directly.

use crate::{BusinessObject, Client, Query, WriteSummary};

use async_trait::async_trait;
use std::{any::Any, fmt, marker::PhantomData};
use trellis_core::Result;

#[async_trait]
pub trait Handler<M: BusinessObject>: Send + Sync {
    async fn create(&self, model: &mut M, client: &HandlerClient<'_, M>) -> Result<WriteSummary> {
        client.create(model).await
    }

    async fn update(&self, model: &mut M, client: &HandlerClient<'_, M>) -> Result<WriteSummary> {
        client.update(model).await
    }

    async fn delete(&self, model: &M, client: &HandlerClient<'_, M>) -> Result<()> {
        client.delete(model).await
    }
}

/// Forwards every write to the write transaction engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHandler;

#[async_trait]
impl<M: BusinessObject> Handler<M> for DefaultHandler {}

/// The client handed to a handler for one invocation.
pub struct HandlerClient<'a, M> {
    client: &'a Client,
    _p: PhantomData<fn() -> M>,
}

impl<'a, M: BusinessObject> HandlerClient<'a, M> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            _p: PhantomData,
        }
    }

    /// Creates `model` without going through its handler.
    pub async fn create(&self, model: &mut M) -> Result<WriteSummary> {
        self.client.engine.create(model).await
    }

    /// Updates `model` without going through its handler.
    pub async fn update(&self, model: &mut M) -> Result<WriteSummary> {
        self.client.engine.update(model).await
    }

    /// Deletes `model` without going through its handler.
    pub async fn delete(&self, model: &M) -> Result<()> {
        self.client.delete_direct(model).await
    }

    pub fn query(&self) -> Query<M> {
        M::query()
    }

    pub async fn execute(&self, query: Query<M>) -> Result<Vec<M>> {
        self.client.execute(query).await
    }

    /// Writes other types through their own handlers.
    pub fn dispatch(&self) -> Dispatch<'a, M> {
        Dispatch {
            client: self.client,
            _p: PhantomData,
        }
    }
}

/// Routes writes to the handler of the written type, except for `M` itself.
///
/// Obtained from [`HandlerClient::dispatch`] inside the handler for `M`.
pub struct Dispatch<'a, M> {
    client: &'a Client,
    _p: PhantomData<fn() -> M>,
}

impl<M: BusinessObject> Dispatch<'_, M> {
    pub async fn create<T: BusinessObject>(&self, model: &mut T) -> Result<WriteSummary> {
        if let Some(own) = as_own_mut::<T, M>(model) {
            return self.client.engine.create(own).await;
        }
        self.client.create(model).await
    }

    pub async fn update<T: BusinessObject>(&self, model: &mut T) -> Result<WriteSummary> {
        if let Some(own) = as_own_mut::<T, M>(model) {
            return self.client.engine.update(own).await;
        }
        self.client.update(model).await
    }

    pub async fn delete<T: BusinessObject>(&self, model: &T) -> Result<()> {
        if let Some(own) = as_own::<T, M>(model) {
            return self.client.delete_direct(own).await;
        }
        self.client.delete(model).await
    }

    pub async fn execute<T: BusinessObject>(
        &self,
        query: impl Into<Query<T>>,
    ) -> Result<Vec<T>> {
        self.client.execute(query).await
    }
}

fn as_own<T: 'static, M: 'static>(model: &T) -> Option<&M> {
    (model as &dyn Any).downcast_ref()
}

fn as_own_mut<T: 'static, M: 'static>(model: &mut T) -> Option<&mut M> {
    (model as &mut dyn Any).downcast_mut()
}

impl<M> fmt::Debug for Dispatch<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("client", &self.client)
            .finish()
    }
}

impl<M> fmt::Debug for HandlerClient<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerClient")
            .field("client", &self.client)
            .finish()
    }
}
