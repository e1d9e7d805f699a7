use crate::{AdapterError, Result};
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// A record as exchanged with the application and with drivers.
///
/// A missing key is an absent ("undefined") value, a `Value::Null` entry is an explicit null.
pub type Record = BTreeMap<String, Value>;

/// Dynamically typed cell carried by a [`Record`].
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Varchar(String),
    TimestampWithTimezone(OffsetDateTime),
    Json(serde_json::Value),
    List(Vec<Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Int64(l), Self::Float64(r)) | (Self::Float64(r), Self::Int64(l)) => {
                *l as f64 == *r
            }
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l == r,
            (Self::Json(l), Self::Json(r)) => l == r,
            (Self::List(l), Self::List(r)) => l == r,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Boolean(l), Self::Boolean(r)) => l.partial_cmp(r),
            (Self::Int64(l), Self::Int64(r)) => l.partial_cmp(r),
            (Self::Float64(l), Self::Float64(r)) => l.partial_cmp(r),
            (Self::Int64(l), Self::Float64(r)) => (*l as f64).partial_cmp(r),
            (Self::Float64(l), Self::Int64(r)) => l.partial_cmp(&(*r as f64)),
            (Self::Varchar(l), Self::Varchar(r)) => l.partial_cmp(r),
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l.partial_cmp(r),
            _ => None,
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Varchar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::Float64(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(..) => "boolean",
            Value::Int64(..) => "integer",
            Value::Float64(..) => "float",
            Value::Varchar(..) => "string",
            Value::TimestampWithTimezone(..) => "timestamp",
            Value::Json(..) => "json",
            Value::List(..) => "list",
        }
    }

    /// Coerce into an integer, element-wise for lists. Null stays null.
    pub fn to_number(&self) -> Result<Value> {
        let result = match self {
            Value::Null => Value::Null,
            Value::Int64(v) => Value::Int64(*v),
            Value::Float64(v) if v.fract() == 0.0 => Value::Int64(*v as i64),
            Value::Float64(v) => Value::Float64(*v),
            Value::Boolean(v) => Value::Int64(*v as i64),
            Value::Varchar(v) => {
                let trimmed = v.trim();
                if let Ok(v) = trimmed.parse::<i64>() {
                    Value::Int64(v)
                } else if let Ok(v) = trimmed.parse::<f64>() {
                    Value::Float64(v)
                } else {
                    return Err(AdapterError::TypeMismatch(format!(
                        "Value `{v}` cannot be converted into a number"
                    ))
                    .into());
                }
            }
            Value::List(values) => {
                Value::List(values.iter().map(Value::to_number).collect::<Result<_>>()?)
            }
            v => {
                return Err(AdapterError::TypeMismatch(format!(
                    "Value of type {} cannot be converted into a number",
                    v.type_name()
                ))
                .into());
            }
        };
        Ok(result)
    }

    /// Render as the string form surfaced to callers for identifiers. Null stays null.
    pub fn to_id_string(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Varchar(..) => self.clone(),
            Value::List(values) => Value::List(values.iter().map(Value::to_id_string).collect()),
            v => Value::Varchar(v.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(v) => (*v).into(),
            Value::Int64(v) => (*v).into(),
            Value::Float64(v) => (*v).into(),
            Value::Varchar(v) => v.as_str().into(),
            Value::TimestampWithTimezone(v) => v
                .format(&Rfc3339)
                .map(Into::into)
                .unwrap_or(serde_json::Value::Null),
            Value::Json(v) => v.clone(),
            Value::List(values) => values.iter().map(Value::to_json).collect(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{}", *v as i64),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Varchar(v) => f.write_str(v),
            Value::TimestampWithTimezone(v) => match v.format(&Rfc3339) {
                Ok(v) => f.write_str(&v),
                Err(..) => write!(f, "{v}"),
            },
            Value::Json(v) => write!(f, "{v}"),
            Value::List(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from_value {
    ($source:ty, $destination:path $(, $conversion:expr)? $(,)?) => {
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                $destination($($conversion)?(value))
            }
        }
    };
}

impl_from_value!(bool, Value::Boolean);
impl_from_value!(i8, Value::Int64, i64::from);
impl_from_value!(i16, Value::Int64, i64::from);
impl_from_value!(i32, Value::Int64, i64::from);
impl_from_value!(i64, Value::Int64);
impl_from_value!(u8, Value::Int64, i64::from);
impl_from_value!(u16, Value::Int64, i64::from);
impl_from_value!(u32, Value::Int64, i64::from);
impl_from_value!(f32, Value::Float64, f64::from);
impl_from_value!(f64, Value::Float64);
impl_from_value!(String, Value::Varchar);
impl_from_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_from_value!(serde_json::Value, Value::Json);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}
