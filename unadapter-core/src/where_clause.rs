use crate::{AdapterError, Error, Registry, Result, Value};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    #[default]
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Contains,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::In => "in",
            Operator::Contains => "contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "eq" => Operator::Eq,
            "ne" => Operator::Ne,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "in" => Operator::In,
            "contains" => Operator::Contains,
            "starts_with" => Operator::StartsWith,
            "ends_with" => Operator::EndsWith,
            _ => {
                return Err(AdapterError::TypeMismatch(format!("Unknown operator `{s}`")).into());
            }
        })
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Display for Connector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        })
    }
}

/// Filter condition addressed by logical (or aliased) field name.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Where {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
    pub connector: Connector,
}

impl Where {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            connector: Connector::And,
        }
    }
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Eq, value)
    }
    pub fn or(mut self) -> Self {
        self.connector = Connector::Or;
        self
    }
}

/// Filter condition on a physical field with a storage ready value.
///
/// The only form drivers receive.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedWhere {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
    pub connector: Connector,
}

impl Display for CleanedWhere {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.connector, self.field, self.operator, self.value
        )
    }
}

/// Resolve fields to physical names and coerce identifier values, keeping the input order.
pub fn normalize_where(
    registry: &Registry,
    model: &str,
    conditions: Option<&[Where]>,
) -> Result<Option<Vec<CleanedWhere>>> {
    let Some(conditions) = conditions else {
        return Ok(None);
    };
    conditions
        .iter()
        .map(|condition| {
            if condition.operator == Operator::In && !matches!(condition.value, Value::List(..)) {
                return Err(AdapterError::TypeMismatch(format!(
                    "Value of `{}` must be a list for the `in` operator, found {}",
                    condition.field,
                    condition.value.type_name()
                ))
                .into());
            }
            let (key, descriptor) = registry.field(model, &condition.field)?;
            let field = descriptor
                .field_name
                .clone()
                .unwrap_or_else(|| key.to_string());
            // A non numeric identifier cannot match any row, it is passed through unchanged
            let value = if registry.use_number_id() && descriptor.is_identifier(key) {
                condition.value.to_number().unwrap_or_else(|e| {
                    log::debug!("Keeping `{}` as it is: {e:#}", condition.field);
                    condition.value.clone()
                })
            } else {
                condition.value.clone()
            };
            Ok(CleanedWhere {
                field,
                operator: condition.operator,
                value,
                connector: condition.connector,
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
