use super::RecordHandle;
use crate::{
    schema::BusinessObjectDef,
    stmt::{Row, Value},
    Error, Result,
};

#[derive(Debug, Clone)]
pub enum Response {
    /// A business object definition
    Definition(BusinessObjectDef),

    /// An open record and its current field values
    Record(Record),

    /// A single field's typed value
    Value(Value),

    /// Result of setting one field
    FieldSet(FieldSet),

    /// Result of a save, delete or link
    Outcome(Outcome),

    /// Query results
    Rows(Vec<Row>),
}

#[derive(Debug, Clone)]
pub struct Record {
    pub handle: RecordHandle,

    /// Field values as stored, keyed by internal field name
    pub values: Row,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    pub success: bool,

    /// Remote error text when the set was rejected
    pub error: Option<String>,

    /// The field's value after the set
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,

    /// Remote error text on failure
    pub error: Option<String>,
}

impl Outcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// The remote error text, or a generic message when none was given.
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or("the remote store reported a failure")
    }
}

macro_rules! into_variant {
    ( $( $f:ident => $variant:ident($ty:ty) ;)* ) => {
        impl Response {
            $(
                pub fn $f(self) -> Result<$ty> {
                    match self {
                        Self::$variant(value) => Ok(value),
                        other => Err(Error::invalid_result(format!(
                            concat!("expected ", stringify!($variant), " response; got {}"),
                            other.variant_name()
                        ))),
                    }
                }
            )*
        }
    };
}

into_variant! {
    into_definition => Definition(BusinessObjectDef);
    into_record => Record(Record);
    into_value => Value(Value);
    into_field_set => FieldSet(FieldSet);
    into_outcome => Outcome(Outcome);
    into_rows => Rows(Vec<Row>);
}

impl Response {
    fn variant_name(&self) -> &'static str {
        match self {
            Self::Definition(_) => "Definition",
            Self::Record(_) => "Record",
            Self::Value(_) => "Value",
            Self::FieldSet(_) => "FieldSet",
            Self::Outcome(_) => "Outcome",
            Self::Rows(_) => "Rows",
        }
    }
}
