use super::{verify, Engine};
use crate::BusinessObject;

use indexmap::IndexMap;
use std::sync::Arc;
use trellis_core::{
    driver::operation::{
        DeleteRecord, GetField, NewRecord, OpenRecord, RecordHandle, Save, SetField,
    },
    schema::{BusinessObjectDef, FieldDef, ModelSchema},
    stmt::{Row, Value},
    Error, Result,
};

/// What a successful create or update wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// External names of the fields set on the remote record
    pub written: Vec<String>,

    /// External names of the fields a non-throwing validator rejected
    pub skipped: Vec<String>,
}

impl WriteSummary {
    pub fn was_written(&self, name: &str) -> bool {
        self.written.iter().any(|written| written == name)
    }

    pub fn was_skipped(&self, name: &str) -> bool {
        self.skipped.iter().any(|skipped| skipped == name)
    }
}

/// A single create or update of one remote record.
///
/// The remote store has no transactions. Field sets are staged on an open
/// record and committed by one save; when anything fails, [`finish`] undoes
/// what it can before returning the original error.
///
/// [`finish`]: WriteTransaction::finish
pub(crate) struct WriteTransaction<'a> {
    engine: &'a Engine,
    def: Arc<BusinessObjectDef>,
    record: RecordHandle,

    /// Original values of the writable fields; `None` for a create
    snapshot: Option<Row>,

    summary: WriteSummary,
}

impl<'a> WriteTransaction<'a> {
    /// Begins a new remote record.
    pub(crate) async fn create(engine: &'a Engine, type_name: &str) -> Result<Self> {
        let def = engine.definition(type_name).await?;

        let record = engine
            .exec(NewRecord {
                type_name: def.name.clone(),
            })
            .await?
            .into_record()?;

        Ok(Self {
            engine,
            def,
            record: record.handle,
            snapshot: None,
            summary: WriteSummary::default(),
        })
    }

    /// Opens an existing record and snapshots its writable fields.
    pub(crate) async fn update(
        engine: &'a Engine,
        type_name: &str,
        record_id: &str,
    ) -> Result<Self> {
        let def = engine.definition(type_name).await?;

        let record = engine
            .exec(OpenRecord {
                type_name: def.name.clone(),
                record_id: record_id.to_string(),
            })
            .await?
            .into_record()?;

        let snapshot = def
            .fields
            .iter()
            .filter(|field| !field.read_only)
            .map(|field| {
                let value = record.values.get(&field.name).cloned().unwrap_or_default();
                (field.name.clone(), value)
            })
            .collect();

        Ok(Self {
            engine,
            def,
            record: record.handle,
            snapshot: Some(snapshot),
            summary: WriteSummary::default(),
        })
    }

    /// Writes every mapped field of `model`, saves, and assigns the record id.
    pub(crate) async fn execute<M: BusinessObject>(
        &mut self,
        schema: &ModelSchema,
        model: &mut M,
    ) -> Result<WriteSummary> {
        for mapping in schema.writable_fields() {
            let value = model.field_value(mapping.index);

            if value.is_null() {
                continue;
            }

            if let Some(validation) = &mapping.validation {
                if !model.validate(mapping.index, &value) {
                    if validation.throws {
                        return Err(Error::validation(
                            &mapping.property,
                            validation.message.as_deref(),
                        ));
                    }

                    tracing::debug!(
                        type_name = M::TYPE_NAME,
                        field = %mapping.name,
                        "validator rejected value; skipping field"
                    );
                    self.summary.skipped.push(mapping.name.clone());
                    continue;
                }
            }

            self.write(&mapping.name, &value.to_text()).await?;
        }

        let record_id = self.save().await?;
        model.set_record_id(record_id);

        Ok(self.summary.clone())
    }

    /// Writes untyped field text, saves, and returns the record id.
    pub(crate) async fn execute_fields(
        &mut self,
        fields: &IndexMap<String, String>,
    ) -> Result<String> {
        for (name, text) in fields {
            self.write(name, text).await?;
        }

        self.save().await
    }

    /// Returns `result` unchanged, rolling back first when it is an error.
    pub(crate) async fn finish<T>(self, result: Result<T>) -> Result<T> {
        let err = match result {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        tracing::debug!(
            type_name = %self.def.name,
            record_id = %self.record.record_id,
            error = %err,
            "write failed; rolling back"
        );

        if let Err(rollback) = self.rollback().await {
            tracing::error!(
                type_name = %self.def.name,
                record_id = %self.record.record_id,
                error = %rollback,
                cause = %err,
                "rollback failed"
            );
        }

        Err(err)
    }

    async fn write(&mut self, name: &str, text: &str) -> Result<()> {
        let field = self.def.field_by_name(name)?.clone();
        self.set_field(&field, text).await?;
        self.summary.written.push(name.to_string());
        Ok(())
    }

    /// Sets a field and reads it back, retrying once when the value did not
    /// stick.
    async fn set_field(&self, field: &FieldDef, text: &str) -> Result<()> {
        self.set_once(field, text).await?;

        if !self.engine.config.verify_writes {
            return Ok(());
        }

        let observed = self.get_field(&field.name).await?;
        if verify::matches(&field.name, field.ty, text, &observed)? {
            return Ok(());
        }

        tracing::warn!(
            type_name = %self.def.name,
            field = %field.name,
            attempted = text,
            observed = %observed,
            "field write was dropped; retrying"
        );

        self.set_once(field, text).await?;

        let observed = self.get_field(&field.name).await?;
        if verify::matches(&field.name, field.ty, text, &observed)? {
            return Ok(());
        }

        Err(Error::write_not_verified(
            &field.name,
            text,
            observed.to_text(),
        ))
    }

    async fn set_once(&self, field: &FieldDef, text: &str) -> Result<()> {
        let set = self
            .engine
            .exec(SetField {
                record: self.record.clone(),
                field: field.name.clone(),
                value: text.to_string(),
            })
            .await?
            .into_field_set()?;

        if !set.success {
            return Err(Error::field_rejected(
                &field.name,
                set.error.unwrap_or_default(),
            ));
        }

        Ok(())
    }

    async fn get_field(&self, name: &str) -> Result<Value> {
        self.engine
            .exec(GetField {
                record: self.record.clone(),
                field: name.to_string(),
            })
            .await?
            .into_value()
    }

    async fn save(&self) -> Result<String> {
        let outcome = match self
            .engine
            .exec(Save {
                record: self.record.clone(),
            })
            .await
        {
            Ok(response) => response.into_outcome()?,
            Err(err) => return Err(Error::save_failed(&self.def.name, err.to_string())),
        };

        if !outcome.success {
            return Err(Error::save_failed(&self.def.name, outcome.error_text()));
        }

        tracing::debug!(
            type_name = %self.def.name,
            record_id = %self.record.record_id,
            written = self.summary.written.len(),
            skipped = self.summary.skipped.len(),
            "saved record"
        );

        Ok(self.record.record_id.clone())
    }

    async fn rollback(&self) -> Result<()> {
        let Some(snapshot) = &self.snapshot else {
            // Create: the record may never have been saved
            self.engine
                .delete_record(&self.def.name, &self.record.record_id)
                .await?;
            return Ok(());
        };

        let mut restored = 0;
        for (name, original) in snapshot {
            let current = self.get_field(name).await?;

            if current.to_text() == original.to_text() {
                continue;
            }

            self.set_once(self.def.field_by_name(name)?, &original.to_text())
                .await?;
            restored += 1;
        }

        if restored > 0 {
            self.save().await?;
        }

        tracing::debug!(
            type_name = %self.def.name,
            record_id = %self.record.record_id,
            restored,
            "rolled back update"
        );

        Ok(())
    }
}

impl Engine {
    pub(crate) async fn create<M: BusinessObject>(&self, model: &mut M) -> Result<WriteSummary> {
        let schema = self.registry.get::<M>()?;

        let mut tx = WriteTransaction::create(self, M::TYPE_NAME).await?;
        let result = tx.execute(&schema, model).await;
        tx.finish(result).await
    }

    pub(crate) async fn update<M: BusinessObject>(&self, model: &mut M) -> Result<WriteSummary> {
        let schema = self.registry.get::<M>()?;

        let Some(record_id) = model.record_id().map(str::to_string) else {
            return Err(Error::record_not_found(format!(
                "`{}` has no record id; create it first",
                M::TYPE_NAME
            )));
        };

        let mut tx = WriteTransaction::update(self, M::TYPE_NAME, &record_id).await?;
        let result = tx.execute(&schema, model).await;
        tx.finish(result).await
    }

    /// Deletes a record. Returns `false` when it did not exist.
    pub(crate) async fn delete_record(&self, type_name: &str, record_id: &str) -> Result<bool> {
        let response = self
            .exec(DeleteRecord {
                type_name: type_name.to_string(),
                record_id: record_id.to_string(),
            })
            .await;

        let outcome = match response {
            Ok(response) => response.into_outcome()?,
            Err(err) if err.is_record_not_found() => return Ok(false),
            Err(err) => return Err(err),
        };

        if !outcome.success {
            return Err(Error::remote_rejected(
                "delete",
                type_name,
                outcome.error_text(),
            ));
        }

        Ok(true)
    }
}
