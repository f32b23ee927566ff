use std::cmp::Ordering;
use trellis_core::{
    schema::{FieldDef, FieldType},
    stmt::{Clause, Operator, Value},
};

/// Evaluates one clause against a stored field value.
///
/// Text comparisons ignore case. A blank clause value matches an empty field.
pub(crate) fn matches(field: &FieldDef, value: &Value, clause: &Clause) -> bool {
    match clause.operator {
        Operator::Empty => is_blank(value),
        Operator::NotEmpty => !is_blank(value),
        Operator::Contains => value
            .to_text()
            .to_lowercase()
            .contains(&clause.value.to_lowercase()),
        Operator::Like => like(&value.to_text(), &clause.value),
        Operator::NotLike => !like(&value.to_text(), &clause.value),
        op => match compare(field.ty, value, &clause.value) {
            Some(ordering) => match op {
                Operator::Equal => ordering.is_eq(),
                Operator::NotEqual => ordering.is_ne(),
                Operator::GreaterThan => ordering.is_gt(),
                Operator::LessThan => ordering.is_lt(),
                Operator::GreaterOrEqual => ordering.is_ge(),
                _ => ordering.is_le(),
            },
            None => op == Operator::NotEqual,
        },
    }
}

fn is_blank(value: &Value) -> bool {
    value.to_text().trim().is_empty()
}

/// Orders the stored value against clause text, or `None` when the two are
/// not comparable.
fn compare(ty: FieldType, value: &Value, text: &str) -> Option<Ordering> {
    match (ty, value) {
        (_, Value::Null) => text.trim().is_empty().then_some(Ordering::Equal),
        (FieldType::Number, Value::Number(number)) => {
            Value::parse_number(text).map(|other| number.cmp(&other))
        }
        (FieldType::Date, Value::DateTime(date_time)) => {
            Value::parse_date_time(text).map(|other| date_time.date().cmp(&other.date()))
        }
        (FieldType::DateTime, Value::DateTime(date_time)) => {
            Value::parse_date_time(text).map(|other| date_time.cmp(&other))
        }
        (FieldType::Logical, Value::Bool(flag)) => {
            Value::parse_bool(text).map(|other| flag.cmp(&other))
        }
        (_, value) => Some(value.to_text().to_lowercase().cmp(&text.to_lowercase())),
    }
}

/// SQL-style pattern match: `%` matches any run of characters and `_` any
/// single character.
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();

    // matched[j]: the text consumed so far matches pattern[..j]
    let mut matched = vec![false; pattern.len() + 1];
    matched[0] = true;
    for (j, &p) in pattern.iter().enumerate() {
        matched[j + 1] = matched[j] && p == '%';
    }

    for &c in &text {
        let mut next = vec![false; pattern.len() + 1];
        for (j, &p) in pattern.iter().enumerate() {
            next[j + 1] = match p {
                '%' => next[j] || matched[j + 1],
                '_' => matched[j],
                p => matched[j] && p == c,
            };
        }
        matched = next;
    }

    matched[pattern.len()]
}
