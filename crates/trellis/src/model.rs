use crate::{Handler, Query};

use trellis_core::{
    schema::ModelSchema,
    stmt::{Row, Value},
    Result,
};

/// A typed model mapped onto a remote business object type.
///
/// Implemented by `#[derive(BusinessObject)]`.
pub trait BusinessObject: Sized + Send + Sync + 'static {
    /// Remote business object name
    const TYPE_NAME: &'static str;

    /// Custom write logic; [`DefaultHandler`](crate::DefaultHandler) unless
    /// the model names one.
    type Handler: Handler<Self> + Default;

    /// Field, key and relationship metadata.
    fn schema() -> ModelSchema;

    /// The remote record id, once the record exists remotely.
    fn record_id(&self) -> Option<&str>;

    fn set_record_id(&mut self, record_id: String);

    /// Current value of the property at `index`.
    fn field_value(&self, index: usize) -> Value;

    /// Runs the validator declared on the property at `index`.
    ///
    /// Properties without a validator always pass.
    fn validate(&self, index: usize, value: &Value) -> bool {
        let _ = (index, value);
        true
    }

    /// Builds an instance from a row keyed by external field name.
    fn load(row: &Row) -> Result<Self>;

    /// Populates the navigation property at `index`.
    fn load_relation(&mut self, index: usize, rows: Vec<Row>) -> Result<()> {
        let _ = (index, rows);
        Ok(())
    }

    fn query() -> Query<Self> {
        Query::all()
    }
}

/// A user supplied validation rule for one property.
///
/// Returning `false` either fails the write or skips the property, depending
/// on how the validator is attached.
pub trait Validator<M> {
    fn validate(field: &str, value: &Value, model: &M) -> bool;
}

/// A navigation property type: `Vec<R>` for collections, `Option<R>` for a
/// single related record.
pub trait Related: Default {
    type Target: BusinessObject;

    const COLLECTION: bool;

    fn load_rows(rows: Vec<Row>) -> Result<Self>;
}

impl<R: BusinessObject> Related for Vec<R> {
    type Target = R;

    const COLLECTION: bool = true;

    fn load_rows(rows: Vec<Row>) -> Result<Self> {
        rows.iter().map(R::load).collect()
    }
}

impl<R: BusinessObject> Related for Option<R> {
    type Target = R;

    const COLLECTION: bool = false;

    fn load_rows(rows: Vec<Row>) -> Result<Self> {
        rows.first().map(R::load).transpose()
    }
}
