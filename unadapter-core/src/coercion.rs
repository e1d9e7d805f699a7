use crate::{FieldDescriptor, FieldKind, Result, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Native storage support declared by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub supports_booleans: bool,
    pub supports_dates: bool,
    pub supports_json: bool,
    pub supports_numeric_ids: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            supports_booleans: true,
            supports_dates: true,
            supports_json: false,
            supports_numeric_ids: true,
        }
    }
}

/// Outcome of one input coercion step.
#[derive(Debug)]
pub enum Coerced {
    /// The step applied, later steps are skipped.
    Done(Value),
    /// The step did not apply, try the next one.
    Next(Value),
}

pub type InputStep = fn(Value) -> Result<Coerced>;
pub type OutputStep = fn(Value) -> Value;

/// Capability coercions of one field, resolved once when the registry is built.
#[derive(Default, Debug, Clone)]
pub struct Coercion {
    input: Vec<InputStep>,
    output: Option<OutputStep>,
}

impl Coercion {
    pub fn resolve(
        key: &str,
        field: &FieldDescriptor,
        capabilities: &Capabilities,
        use_number_id: bool,
    ) -> Self {
        let identifier = field.is_identifier(key);
        let mut input: Vec<InputStep> = Vec::new();
        if identifier && use_number_id {
            input.push(numeric_id);
        } else {
            if !capabilities.supports_json && field.kind == FieldKind::Json {
                input.push(json_to_text);
            }
            if !capabilities.supports_dates && field.kind == FieldKind::Date {
                input.push(date_to_text);
            }
            if !capabilities.supports_booleans {
                input.push(boolean_to_integer);
            }
        }
        let output: Option<OutputStep> = if identifier {
            Some(identifier_to_text)
        } else {
            match field.kind {
                FieldKind::Json if !capabilities.supports_json => Some(text_to_json),
                FieldKind::Date if !capabilities.supports_dates => Some(text_to_date),
                FieldKind::Boolean if !capabilities.supports_booleans => Some(integer_to_boolean),
                _ => None,
            }
        };
        Self { input, output }
    }

    pub fn input(&self, mut value: Value) -> Result<Value> {
        for step in &self.input {
            match step(value)? {
                Coerced::Done(v) => return Ok(v),
                Coerced::Next(v) => value = v,
            }
        }
        Ok(value)
    }

    pub fn output(&self, value: Value) -> Value {
        match self.output {
            Some(step) => step(value),
            None => value,
        }
    }
}

fn numeric_id(value: Value) -> Result<Coerced> {
    Ok(Coerced::Done(value.to_number()?))
}

fn json_to_text(value: Value) -> Result<Coerced> {
    Ok(match value {
        v @ (Value::Json(..) | Value::List(..)) => Coerced::Done(Value::Varchar(v.to_json().to_string())),
        v => Coerced::Next(v),
    })
}

fn date_to_text(value: Value) -> Result<Coerced> {
    Ok(match value {
        Value::TimestampWithTimezone(v) => Coerced::Done(Value::Varchar(v.format(&Rfc3339)?)),
        v => Coerced::Next(v),
    })
}

fn boolean_to_integer(value: Value) -> Result<Coerced> {
    Ok(match value {
        Value::Boolean(v) => Coerced::Done(Value::Int64(v as i64)),
        v => Coerced::Next(v),
    })
}

fn identifier_to_text(value: Value) -> Value {
    value.to_id_string()
}

fn text_to_json(value: Value) -> Value {
    match value {
        Value::Varchar(v) => match serde_json::from_str(&v) {
            Ok(json) => Value::Json(json),
            Err(..) => Value::Varchar(v),
        },
        v => v,
    }
}

fn text_to_date(value: Value) -> Value {
    match value {
        Value::Varchar(v) => match OffsetDateTime::parse(&v, &Rfc3339) {
            Ok(date) => Value::TimestampWithTimezone(date),
            Err(..) => Value::Varchar(v),
        },
        v => v,
    }
}

fn integer_to_boolean(value: Value) -> Value {
    match value.as_i64() {
        Some(v) => Value::Boolean(v == 1),
        None => value,
    }
}
