use thiserror::Error;

/// Errors raised by the layers around the simulation (API, config, officials
/// pool, archive, localization). The per-minute simulation itself never fails.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Archive checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CoreError::DeserializationError(err.to_string())
        } else {
            CoreError::SerializationError(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::DeserializationError(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::IoError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        CoreError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_syntax_error_maps_to_deserialization() {
        let err: CoreError = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err().into();
        assert!(matches!(err, CoreError::DeserializationError(_)));
    }

    #[test]
    fn test_checksum_message() {
        let err = CoreError::ChecksumMismatch { expected: "ab".into(), found: "cd".into() };
        assert_eq!(err.to_string(), "Archive checksum mismatch: expected ab, found cd");
    }
}
