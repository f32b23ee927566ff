use rust_decimal::{prelude::ToPrimitive, Decimal};
use trellis_core::{
    stmt::{Row, Value},
    Error, Result,
};

/// A property type that maps onto a single remote field.
pub trait Primitive: Sized {
    /// The value written to the remote store. `Null` skips the field.
    fn to_value(&self) -> Value;

    fn load(value: Value) -> Result<Self>;
}

impl Primitive for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Text(text) => Ok(text),
            value => Ok(value.to_text()),
        }
    }
}

impl Primitive for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(value) => Ok(value),
            Value::Null => Ok(false),
            Value::Text(ref text) => match Value::parse_bool(text) {
                Some(value) => Ok(value),
                None => Err(Error::type_conversion(value, "bool")),
            },
            value => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl Primitive for Decimal {
    fn to_value(&self) -> Value {
        Value::Number(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Number(number) => Ok(number),
            Value::Null => Ok(Decimal::ZERO),
            Value::Text(ref text) => match Value::parse_number(text) {
                Some(number) => Ok(number),
                None => Err(Error::type_conversion(value, "Decimal")),
            },
            value => Err(Error::type_conversion(value, "Decimal")),
        }
    }
}

macro_rules! impl_integer_primitive {
    ( $( $ty:ident => $to:ident ;)* ) => {
        $(
            impl Primitive for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }

                fn load(value: Value) -> Result<Self> {
                    let number = match value {
                        Value::Number(number) => number,
                        Value::Null => return Ok(0),
                        Value::Text(ref text) => match Value::parse_number(text) {
                            Some(number) => number,
                            None => return Err(Error::type_conversion(value, stringify!($ty))),
                        },
                        value => return Err(Error::type_conversion(value, stringify!($ty))),
                    };

                    if !number.fract().is_zero() {
                        return Err(Error::type_conversion(Value::Number(number), stringify!($ty)));
                    }

                    number.$to().ok_or_else(|| {
                        Error::type_conversion(Value::Number(number), stringify!($ty))
                    })
                }
            }
        )*
    };
}

impl_integer_primitive! {
    i32 => to_i32;
    i64 => to_i64;
    u32 => to_u32;
    u64 => to_u64;
}

impl<T: Primitive> Primitive for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            Value::Text(ref text) if text.is_empty() => Ok(None),
            value => T::load(value).map(Some),
        }
    }
}

/// Loads property `property` from the row field `name`. Used by generated code.
pub fn load_field<T: Primitive>(row: &Row, name: &str, property: &str) -> Result<T> {
    let value = row.get(name).cloned().unwrap_or_default();
    T::load(value)
        .map_err(|err| err.context(trellis_core::err!("loading `{property}` from `{name}`")))
}
