use trellis_core::{
    schema::FieldType,
    stmt::Value,
    Error, Result,
};

/// Whether the remote field now holds the value written to it.
///
/// `attempted` is the text that was set; `observed` is read back from the
/// record. Comparison follows the remote field type.
pub(super) fn matches(
    field: &str,
    ty: FieldType,
    attempted: &str,
    observed: &Value,
) -> Result<bool> {
    let observed_text = observed.to_text();

    match ty {
        FieldType::Number => {
            let Some(expected) = Value::parse_number(attempted) else {
                return Err(Error::write_unparseable(field, attempted, "number"));
            };

            let actual = match observed {
                Value::Number(number) => Some(*number),
                Value::Null => None,
                _ => Value::parse_number(&observed_text),
            };

            Ok(actual == Some(expected))
        }
        FieldType::Date | FieldType::DateTime => {
            // Setting a blank date clears it
            if attempted.trim().is_empty() {
                return Ok(true);
            }

            let Some(expected) = Value::parse_date_time(attempted) else {
                return Err(Error::write_unparseable(field, attempted, "date"));
            };

            let actual = match observed {
                Value::DateTime(date_time) => Some(*date_time),
                Value::Null => None,
                _ => Value::parse_date_time(&observed_text),
            };

            Ok(match (ty, actual) {
                (FieldType::Date, Some(actual)) => actual.date() == expected.date(),
                (_, Some(actual)) => actual == expected,
                (_, None) => false,
            })
        }
        FieldType::Logical => Ok(attempted.eq_ignore_ascii_case(&observed_text)),
        FieldType::Text => Ok(attempted == observed_text),
    }
}
