//! Error types for the translation layer.

use thiserror::Error;

/// Coarse error categories reported to the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidExpression,
    InvalidConstantType,
    InvalidIdentifierName,
    InvalidDataType,
    InvalidEmbeddingDataType,
    NoColumnDefined,
    InvalidConstraintType,
    InvalidResult,
    Internal,
}

/// Errors that can occur while translating expressions, values or schemas.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    #[error("Unknown literal type: {0}")]
    UnknownLiteralType(String),

    #[error("Unknown expression type: {expression}")]
    UnknownExpressionType {
        expression: String,
        #[source]
        source: Box<TranslateError>,
    },

    #[error("Expression nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("Invalid constant type: {0}")]
    InvalidConstantType(String),

    #[error("Empty sparse vector")]
    EmptySparseVector,

    #[error("{0}")]
    InvalidIdentifierName(String),

    #[error("Invalid data type: {0}")]
    InvalidDataType(String),

    #[error("Unknown datatype: {0}")]
    UnknownDataType(String),

    #[error("Unknown element type: {0}")]
    UnknownEmbeddingElementType(String),

    #[error("Unknown index type: {0}")]
    UnknownSparseIndexType(String),

    #[error("Column definition without data type")]
    NoColumnTypeDefined,

    #[error("No element type for array")]
    NoArrayElementType,

    #[error("Unknown datatype: {0}, too many arguments")]
    TooManyArguments(String),

    #[error("Unknown constraint: {0}")]
    UnknownConstraintType(String),

    #[error("Duplicated constraint: {0}")]
    DuplicatedConstraint(String),

    #[error("Only one filter is allowed in search optional parameters")]
    DuplicateFilterOption,

    #[error("Invalid filter expression '{value}', type should be string, but got {actual}")]
    InvalidFilterType { value: String, actual: &'static str },

    #[error("Invalid result: {0}")]
    InvalidResult(String),

    #[error("Wire encoding error: {0}")]
    Wire(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranslateError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::InvalidExpression(_)
            | TranslateError::UnsupportedExpression(_)
            | TranslateError::UnknownLiteralType(_)
            | TranslateError::UnknownExpressionType { .. }
            | TranslateError::NestingTooDeep(_)
            | TranslateError::DuplicateFilterOption
            | TranslateError::InvalidFilterType { .. } => ErrorKind::InvalidExpression,

            TranslateError::InvalidConstantType(_) | TranslateError::EmptySparseVector => {
                ErrorKind::InvalidConstantType
            }

            TranslateError::InvalidIdentifierName(_) => ErrorKind::InvalidIdentifierName,

            TranslateError::InvalidDataType(_)
            | TranslateError::UnknownDataType(_)
            | TranslateError::NoArrayElementType
            | TranslateError::TooManyArguments(_) => ErrorKind::InvalidDataType,

            TranslateError::UnknownEmbeddingElementType(_)
            | TranslateError::UnknownSparseIndexType(_) => ErrorKind::InvalidEmbeddingDataType,

            TranslateError::NoColumnTypeDefined => ErrorKind::NoColumnDefined,

            TranslateError::UnknownConstraintType(_) | TranslateError::DuplicatedConstraint(_) => {
                ErrorKind::InvalidConstraintType
            }

            TranslateError::InvalidResult(_) => ErrorKind::InvalidResult,

            TranslateError::Wire(_) | TranslateError::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranslateError::DuplicatedConstraint("unique".to_string());
        assert_eq!(err.to_string(), "Duplicated constraint: unique");

        let err = TranslateError::TooManyArguments("[\"int\", \"8\"]".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown datatype: [\"int\", \"8\"], too many arguments"
        );

        let err = TranslateError::InvalidFilterType {
            value: "42".to_string(),
            actual: "integer",
        };
        assert_eq!(
            err.to_string(),
            "Invalid filter expression '42', type should be string, but got integer"
        );

        assert_eq!(TranslateError::EmptySparseVector.to_string(), "Empty sparse vector");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            TranslateError::EmptySparseVector.kind(),
            ErrorKind::InvalidConstantType
        );
        assert_eq!(
            TranslateError::NoColumnTypeDefined.kind(),
            ErrorKind::NoColumnDefined
        );
        assert_eq!(
            TranslateError::UnknownSparseIndexType("u8".to_string()).kind(),
            ErrorKind::InvalidEmbeddingDataType
        );

        let wrapped = TranslateError::UnknownExpressionType {
            expression: "x".to_string(),
            source: Box::new(TranslateError::UnsupportedExpression("x".to_string())),
        };
        assert_eq!(wrapped.kind(), ErrorKind::InvalidExpression);
        assert!(std::error::Error::source(&wrapped).is_some());
    }
}
