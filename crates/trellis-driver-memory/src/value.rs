use trellis_core::{schema::FieldType, stmt::Value};

/// Converts field text to the value stored for a field of type `ty`.
///
/// Blank text clears the field. On failure, returns the error text the store
/// reports back on the field set.
pub(crate) fn coerce(ty: FieldType, text: &str) -> Result<Value, String> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value = match ty {
        FieldType::Text => Some(Value::Text(text.to_string())),
        FieldType::Number => Value::parse_number(text).map(Value::Number),
        FieldType::Date => Value::parse_date_time(text)
            .and_then(|date_time| date_time.date().and_hms_opt(0, 0, 0))
            .map(Value::DateTime),
        FieldType::DateTime => Value::parse_date_time(text).map(Value::DateTime),
        FieldType::Logical => Value::parse_bool(text).map(Value::Bool),
    };

    value.ok_or_else(|| format!("`{text}` is not a valid {}", type_name(ty)))
}

fn type_name(ty: FieldType) -> &'static str {
    match ty {
        FieldType::Text => "text value",
        FieldType::Number => "number",
        FieldType::Date => "date",
        FieldType::DateTime => "date and time",
        FieldType::Logical => "logical value",
    }
}
