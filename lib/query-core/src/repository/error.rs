use thiserror::Error;

/// stable error surface of the data layer; storage-engine error shapes never
/// cross this boundary
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DataLayerError {
    #[error("Record not found")]
    RecordNotFound,

    #[error("Already exists")]
    AlreadyExists,

    #[error("Invalid reference to a related record")]
    InvalidReference,

    #[error("Invalid identifier `{}`", literal.as_deref().unwrap_or("?"))]
    InvalidIdentifier { literal: Option<String> },

    #[error("Operation `{operation}` failed")]
    OperationFailed { operation: String },
}

impl DataLayerError {
    pub fn operation_failed(operation: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
        }
    }
}
