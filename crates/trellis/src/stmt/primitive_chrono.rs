use super::Primitive;

use chrono::{NaiveDate, NaiveDateTime};
use trellis_core::{stmt::Value, Error, Result};

impl Primitive for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::DateTime(value) => Ok(value),
            Value::Text(ref text) => match Value::parse_date_time(text) {
                Some(value) => Ok(value),
                None => Err(Error::type_conversion(value, "NaiveDateTime")),
            },
            value => Err(Error::type_conversion(value, "NaiveDateTime")),
        }
    }
}

impl Primitive for NaiveDate {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn load(value: Value) -> Result<Self> {
        NaiveDateTime::load(value).map(|date_time| date_time.date())
    }
}
