//! An in-process record store implementing [`Driver`].
//!
//! Holds business object definitions and records in memory and applies the
//! remote store's write rules: field text is converted to the field's type,
//! read-only fields refuse sets and saving checks required fields. Relations
//! keyed by a foreign key field are stored on the child record; all others go
//! to a link table.
//!
//! Faults can be queued to exercise failure paths, e.g. a field set that
//! reports success but leaves the value unchanged.

mod filter;
mod state;
mod value;

use state::State;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use trellis_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    schema::BusinessObjectDef,
    stmt::{Row, Value},
    Result,
};

#[derive(Debug, Clone, Default)]
pub struct Memory {
    state: Arc<Mutex<State>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a business object type. A `RecID` field is added when the
    /// definition lacks one.
    pub fn define(&self, def: BusinessObjectDef) -> &Self {
        self.lock().define(def);
        self
    }

    /// Stores a record as-is and returns its record id.
    ///
    /// Field names may be internal or display names. A `RecID` entry is used
    /// as the record id; otherwise one is generated.
    pub fn insert<K, V>(
        &self,
        type_name: &str,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<String>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();

        self.lock().insert(type_name, fields)
    }

    /// A saved record, keyed by internal field name.
    pub fn record(&self, type_name: &str, record_id: &str) -> Option<Row> {
        let state = self.lock();
        let def = state.definitions.get(&type_name.to_ascii_lowercase())?;
        state.records.get(&def.name)?.get(record_id).cloned()
    }

    /// Every saved record of a type, in insertion order.
    pub fn records(&self, type_name: &str) -> Vec<Row> {
        let state = self.lock();
        let Some(def) = state.definitions.get(&type_name.to_ascii_lowercase()) else {
            return vec![];
        };

        state
            .records
            .get(&def.name)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default()
    }

    /// The next `times` sets of `field` report success without changing it.
    pub fn drop_writes(&self, field: &str, times: usize) -> &Self {
        self.lock()
            .faults
            .dropped_writes
            .insert(field.to_ascii_lowercase(), times);
        self
    }

    /// Sets of `field` to exactly `value` are refused.
    pub fn reject_value(&self, field: &str, value: &str) -> &Self {
        self.lock()
            .faults
            .rejected_values
            .insert((field.to_ascii_lowercase(), value.to_string()));
        self
    }

    /// The next `times` saves fail.
    pub fn fail_saves(&self, times: usize) -> &Self {
        self.lock().faults.failed_saves = times;
        self
    }

    /// The next `times` deletes fail.
    pub fn fail_deletes(&self, times: usize) -> &Self {
        self.lock().faults.failed_deletes = times;
        self
    }

    /// The next `times` queries return a driver error.
    pub fn fail_queries(&self, times: usize) -> &Self {
        self.lock().faults.failed_queries = times;
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Driver for Memory {
    async fn open_session(&self) -> Result<()> {
        let state = self.lock();
        tracing::debug!(types = state.definitions.len(), "memory session opened");
        Ok(())
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        let mut state = self.lock();

        match op {
            Operation::GetDefinition(op) => state.get_definition(op),
            Operation::NewRecord(op) => state.new_record(op),
            Operation::OpenRecord(op) => state.open_record(op),
            Operation::GetField(op) => state.get_field(op),
            Operation::SetField(op) => state.set_field(op),
            Operation::Save(op) => state.save(op),
            Operation::DeleteRecord(op) => state.delete_record(op),
            Operation::QueryRecords(op) => state.query(op),
            Operation::Link(op) => state.link(op),
            Operation::Unlink(op) => state.unlink(op),
        }
    }
}
