use crate::{CleanedWhere, Record, Value};

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Single line rendering of a record, used by the debug traces.
pub fn render_record(record: &Record) -> String {
    let mut out = String::from("{");
    separated_by(
        &mut out,
        record,
        |out, (k, v)| {
            out.push_str(k);
            out.push_str(": ");
            render_value(out, v);
        },
        ", ",
    );
    out.push('}');
    out
}

pub fn render_records(records: &[Record]) -> String {
    let mut out = String::from("[");
    separated_by(
        &mut out,
        records,
        |out, v| out.push_str(&render_record(v)),
        ", ",
    );
    out.push(']');
    out
}

pub fn render_where(conditions: Option<&[CleanedWhere]>) -> String {
    let Some(conditions) = conditions else {
        return "none".into();
    };
    let mut out = String::from("[");
    separated_by(
        &mut out,
        conditions,
        |out, v| out.push_str(&v.to_string()),
        ", ",
    );
    out.push(']');
    out
}

fn render_value(out: &mut String, value: &Value) {
    match value {
        Value::Varchar(v) => {
            out.push('"');
            out.push_str(v);
            out.push('"');
        }
        v => out.push_str(&v.to_string()),
    }
}

/// Build a [`Record`](crate::Record) from `key => value` pairs.
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(record.insert(::std::string::String::from($key), $crate::Value::from($value));)+
        record
    }};
}
