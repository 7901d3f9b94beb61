//! Common error handling utilities and conventions

/// Standard result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Core error types shared by the client crates
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl CoreError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::invalid_config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_becomes_invalid_config() {
        let err: CoreError = config::ConfigError::Message("missing base_url".into()).into();
        assert_eq!(err, CoreError::invalid_config("missing base_url"));
        assert_eq!(err.to_string(), "Invalid configuration: missing base_url");
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = CoreError::validation("box_size", "must be between 5 and 20, got 4");
        assert_eq!(err.to_string(), "Invalid box_size: must be between 5 and 20, got 4");
    }
}
