//! Error taxonomy for parameter queries.

use thiserror::Error;

/// Broad class of a [`ClientError`], used for exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed arguments, detected before touching the registry.
    Syntax,
    /// Well-formed request the registry cannot satisfy.
    Semantic,
    /// The registry itself could not be read.
    Registry,
    /// Writing output failed.
    Io,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("too many parameters: {} (maximum is {max})", .received.join(" "))]
    TooManyParameters { received: Vec<String>, max: usize },
    #[error("invalid {field}: {value} is not an integer")]
    InvalidInteger { field: String, value: String },
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("parameter has no value: {}", qualified_name(.name, *.subparam))]
    NoValue { name: String, subparam: Option<i64> },
    #[error(transparent)]
    Registry(Box<dyn std::error::Error + Send + Sync>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Wrap a failure coming from the parameter source without interpreting it.
    pub fn registry<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ClientError::Registry(Box::new(error))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::TooManyParameters { .. } | ClientError::InvalidInteger { .. } => {
                ErrorKind::Syntax
            }
            ClientError::UnknownParameter(_) | ClientError::NoValue { .. } => ErrorKind::Semantic,
            ClientError::Registry(_) => ErrorKind::Registry,
            ClientError::Io(_) => ErrorKind::Io,
        }
    }

    /// Short machine-readable code, used by JSON error output.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::TooManyParameters { .. } => "too_many_parameters",
            ClientError::InvalidInteger { .. } => "invalid_integer",
            ClientError::UnknownParameter(_) => "unknown_parameter",
            ClientError::NoValue { .. } => "no_value",
            ClientError::Registry(_) => "registry",
            ClientError::Io(_) => "io",
        }
    }
}

/// `name` or `name[subparam]`.
pub fn qualified_name(name: &str, subparam: Option<i64>) -> String {
    match subparam {
        Some(index) => format!("{}[{}]", name, index),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_value_message_without_subparam() {
        let err = ClientError::NoValue {
            name: "C".to_string(),
            subparam: None,
        };
        assert_eq!(err.to_string(), "parameter has no value: C");
        assert_eq!(err.kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_no_value_message_with_subparam() {
        let err = ClientError::NoValue {
            name: "C".to_string(),
            subparam: Some(5),
        };
        assert_eq!(err.to_string(), "parameter has no value: C[5]");
    }

    #[test]
    fn test_too_many_parameters_reports_maximum() {
        let err = ClientError::TooManyParameters {
            received: vec!["x".into(), "y".into(), "z".into()],
            max: 2,
        };
        assert_eq!(err.to_string(), "too many parameters: x y z (maximum is 2)");
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_registry_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "connection lost");
        let err = ClientError::registry(io);
        assert_eq!(err.to_string(), "connection lost");
        assert_eq!(err.kind(), ErrorKind::Registry);
    }
}
