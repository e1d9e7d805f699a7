use std::cmp::Ordering;
use unadapter_core::{CleanedWhere, Connector, Direction, Operator, Record, SortBy, Value};

static NULL: Value = Value::Null;

fn field<'a>(record: &'a Record, name: &str) -> &'a Value {
    record.get(name).unwrap_or(&NULL)
}

/// Total order used for sorting, nulls and incomparable values first.
pub(crate) fn compare(a: &Value, b: &Value) -> Ordering {
    match a.partial_cmp(b) {
        Some(ordering) => ordering,
        None => match (a.is_null(), b.is_null()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        },
    }
}

fn condition(record: &Record, condition: &CleanedWhere) -> bool {
    let value = field(record, &condition.field);
    let expected = &condition.value;
    match condition.operator {
        Operator::Eq => value == expected,
        Operator::Ne => value != expected,
        Operator::Lt => value.partial_cmp(expected) == Some(Ordering::Less),
        Operator::Lte => matches!(
            value.partial_cmp(expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Gt => value.partial_cmp(expected) == Some(Ordering::Greater),
        Operator::Gte => matches!(
            value.partial_cmp(expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::In => match expected {
            Value::List(values) => values.contains(value),
            _ => false,
        },
        Operator::Contains => match (value, expected) {
            (Value::Varchar(v), Value::Varchar(e)) => v.contains(e.as_str()),
            (Value::List(values), e) => values.contains(e),
            _ => false,
        },
        Operator::StartsWith => match (value, expected) {
            (Value::Varchar(v), Value::Varchar(e)) => v.starts_with(e.as_str()),
            _ => false,
        },
        Operator::EndsWith => match (value, expected) {
            (Value::Varchar(v), Value::Varchar(e)) => v.ends_with(e.as_str()),
            _ => false,
        },
    }
}

/// AND conditions must all hold, at least one OR condition must hold when any is present.
pub(crate) fn matches(record: &Record, filter: &[CleanedWhere]) -> bool {
    let (or, and): (Vec<_>, Vec<_>) = filter.iter().partition(|c| c.connector == Connector::Or);
    and.iter().all(|c| condition(record, c)) && (or.is_empty() || or.iter().any(|c| condition(record, c)))
}

pub(crate) fn sort(rows: &mut [Record], sort_by: &SortBy) {
    rows.sort_by(|a, b| {
        let ordering = compare(field(a, &sort_by.field), field(b, &sort_by.field));
        match sort_by.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
}
