mod builder;
pub use builder::Builder;

use crate::{
    engine::{Engine, WriteTransaction},
    handler::{Handler, HandlerClient},
    ArbitraryRecord, BusinessObject, Config, Query, Relation, WriteSummary,
};

use std::sync::Arc;
use trellis_core::{
    driver::operation::{Link, Unlink},
    schema::{ModelSchema, RECORD_ID_FIELD},
    stmt::{Clause, Filter},
    Error, Result,
};

/// A connected handle to the remote store.
///
/// Cheap to clone; clones share one session.
#[derive(Clone, Debug)]
pub struct Client {
    pub(crate) engine: Arc<Engine>,
}

impl Client {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn config(&self) -> &Config {
        &self.engine.config
    }

    /// The validated schema of `M`.
    pub fn schema<M: BusinessObject>(&self) -> Result<Arc<ModelSchema>> {
        self.engine.registry.get::<M>()
    }

    /// The remote id of a business object type.
    pub async fn business_object_type_id(&self, type_name: &str) -> Result<String> {
        Ok(self.engine.definition(type_name).await?.id.clone())
    }

    pub fn query<M: BusinessObject>(&self) -> Query<M> {
        M::query()
    }

    pub async fn execute<M: BusinessObject>(&self, query: impl Into<Query<M>>) -> Result<Vec<M>> {
        self.engine.query(query.into()).await
    }

    pub async fn first<M: BusinessObject>(&self, query: impl Into<Query<M>>) -> Result<Option<M>> {
        let query = query.into().for_single_record();
        Ok(self.engine.query(query).await?.into_iter().next())
    }

    /// Like [`first`](Client::first), but a missing record is an error.
    pub async fn get<M: BusinessObject>(&self, query: impl Into<Query<M>>) -> Result<M> {
        match self.first(query).await? {
            Some(record) => Ok(record),
            None => Err(Error::record_not_found(format!(
                "no `{}` matches the query",
                M::TYPE_NAME
            ))),
        }
    }

    /// Creates `model` through its handler.
    pub async fn create<M: BusinessObject>(&self, model: &mut M) -> Result<WriteSummary> {
        M::Handler::default()
            .create(model, &HandlerClient::new(self))
            .await
    }

    /// Updates `model` through its handler.
    pub async fn update<M: BusinessObject>(&self, model: &mut M) -> Result<WriteSummary> {
        M::Handler::default()
            .update(model, &HandlerClient::new(self))
            .await
    }

    /// Deletes `model` through its handler.
    pub async fn delete<M: BusinessObject>(&self, model: &M) -> Result<()> {
        M::Handler::default()
            .delete(model, &HandlerClient::new(self))
            .await
    }

    pub(crate) async fn delete_direct<M: BusinessObject>(&self, model: &M) -> Result<()> {
        let Some(record_id) = model.record_id() else {
            return Err(Error::record_not_found(format!(
                "`{}` has no record id",
                M::TYPE_NAME
            )));
        };

        self.delete_by_type_and_id(M::TYPE_NAME, record_id).await
    }

    /// Deletes a record by type and id. A record that does not exist is not
    /// an error.
    pub async fn delete_by_type_and_id(&self, type_name: &str, record_id: &str) -> Result<()> {
        let def = self.engine.definition(type_name).await?;
        let deleted = self.engine.delete_record(&def.name, record_id).await?;

        tracing::debug!(type_name = %def.name, record_id, deleted, "delete");
        Ok(())
    }

    /// Creates a record from untyped field text and assigns its record id.
    pub async fn create_arbitrary(&self, record: &mut ArbitraryRecord) -> Result<()> {
        let mut tx = WriteTransaction::create(&self.engine, &record.type_name).await?;
        let result = tx.execute_fields(&record.fields).await;
        record.record_id = Some(tx.finish(result).await?);
        Ok(())
    }

    pub async fn update_arbitrary(&self, record: &ArbitraryRecord) -> Result<()> {
        let Some(record_id) = &record.record_id else {
            return Err(Error::record_not_found(format!(
                "`{}` has no record id",
                record.type_name
            )));
        };

        let mut tx = WriteTransaction::update(&self.engine, &record.type_name, record_id).await?;
        let result = tx.execute_fields(&record.fields).await;
        tx.finish(result).await?;
        Ok(())
    }

    /// Reads every field of one record.
    pub async fn read_arbitrary(
        &self,
        type_name: &str,
        record_id: &str,
    ) -> Result<ArbitraryRecord> {
        let filter = Filter::single(Clause::eq(RECORD_ID_FIELD, record_id));
        let rows = self
            .engine
            .query_untyped(type_name, filter, Some(1))
            .await?;

        match rows.into_iter().next() {
            Some(row) => Ok(ArbitraryRecord::from_row(type_name, row)),
            None => Err(Error::record_not_found(format!(
                "type={type_name} id={record_id}"
            ))),
        }
    }

    pub async fn query_arbitrary(
        &self,
        type_name: &str,
        filter: Filter,
    ) -> Result<Vec<ArbitraryRecord>> {
        let rows = self.engine.query_untyped(type_name, filter, None).await?;

        Ok(rows
            .into_iter()
            .map(|row| ArbitraryRecord::from_row(type_name, row))
            .collect())
    }

    /// Relates `child` to the parent record. Does nothing when the two are
    /// already related.
    pub async fn link_child_to_parent<M, R>(
        &self,
        relation: Relation<M, R>,
        child: &R,
        parent_id: &str,
    ) -> Result<()>
    where
        M: BusinessObject,
        R: BusinessObject,
    {
        let child_id = child_record_id(child)?;

        let existing = M::query()
            .for_children(relation, parent_id)
            .for_record_id(child_id);
        if self.engine.query(existing).await?.len() == 1 {
            return Ok(());
        }

        self.link::<M, R>(relation, child_id, parent_id, false).await
    }

    /// Relates `child` to the parent record, replacing whatever record the
    /// parent was related to before.
    pub async fn link_one_to_one<M, R>(
        &self,
        relation: Relation<M, R>,
        child: &R,
        parent_id: &str,
    ) -> Result<()>
    where
        M: BusinessObject,
        R: BusinessObject,
    {
        let child_id = child_record_id(child)?;
        self.link::<M, R>(relation, child_id, parent_id, true).await
    }

    pub async fn unlink_child_from_parent<M, R>(
        &self,
        relation: Relation<M, R>,
        child: &R,
        parent_id: &str,
    ) -> Result<()>
    where
        M: BusinessObject,
        R: BusinessObject,
    {
        let child_id = child_record_id(child)?;
        let def = self.engine.definition(M::TYPE_NAME).await?;
        let relationship = def.relationship_by_name(relation.name())?;

        let outcome = self
            .engine
            .exec(Unlink {
                relationship: relationship.name.clone(),
                parent_type: def.name.clone(),
                parent_id: parent_id.to_string(),
                child_id: child_id.to_string(),
            })
            .await?
            .into_outcome()?;

        if !outcome.success {
            return Err(Error::remote_rejected(
                "unlink",
                &def.name,
                outcome.error_text(),
            ));
        }

        Ok(())
    }

    async fn link<M, R>(
        &self,
        relation: Relation<M, R>,
        child_id: &str,
        parent_id: &str,
        replace: bool,
    ) -> Result<()>
    where
        M: BusinessObject,
        R: BusinessObject,
    {
        let def = self.engine.definition(M::TYPE_NAME).await?;
        let relationship = def.relationship_by_name(relation.name())?;

        let outcome = self
            .engine
            .exec(Link {
                relationship: relationship.name.clone(),
                parent_type: def.name.clone(),
                parent_id: parent_id.to_string(),
                child_id: child_id.to_string(),
                replace,
            })
            .await?
            .into_outcome()?;

        if !outcome.success {
            return Err(Error::remote_rejected(
                "link",
                &def.name,
                outcome.error_text(),
            ));
        }

        tracing::debug!(
            relationship = %relationship.name,
            parent_id,
            child_id,
            replace,
            "linked"
        );
        Ok(())
    }
}

fn child_record_id<R: BusinessObject>(child: &R) -> Result<&str> {
    child.record_id().ok_or_else(|| {
        Error::record_not_found(format!(
            "`{}` must be created before it can be linked",
            R::TYPE_NAME
        ))
    })
}
