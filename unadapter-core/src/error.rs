use thiserror::Error;

/// Failure categories surfaced by the adapter layer.
///
/// Carried inside [`anyhow::Error`](crate::Error), callers classify with
/// `error.downcast_ref::<AdapterError>()`.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Model `{model}` not found in schema\nSchema: {snapshot}")]
    ModelNotFound { model: String, snapshot: String },
    #[error("Field `{field}` not found in model `{model}`\nSchema: {snapshot}")]
    FieldNotFound {
        model: String,
        field: String,
        snapshot: String,
    },
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Missing required field `{field}` in model `{model}`")]
    MissingRequiredField { model: String, field: String },
    #[error("Storage conflict: {0}")]
    StorageConflict(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaLookup,
    TypeMismatch,
    Configuration,
    MissingRequiredField,
    StorageConflict,
    Storage,
}

impl AdapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdapterError::ModelNotFound { .. } | AdapterError::FieldNotFound { .. } => {
                ErrorKind::SchemaLookup
            }
            AdapterError::TypeMismatch(..) => ErrorKind::TypeMismatch,
            AdapterError::Configuration(..) => ErrorKind::Configuration,
            AdapterError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            AdapterError::StorageConflict(..) => ErrorKind::StorageConflict,
            AdapterError::Storage(..) => ErrorKind::Storage,
        }
    }
}

/// Classify an error produced anywhere below the adapter, `None` for foreign errors.
pub fn error_kind(error: &crate::Error) -> Option<ErrorKind> {
    error.downcast_ref::<AdapterError>().map(AdapterError::kind)
}
