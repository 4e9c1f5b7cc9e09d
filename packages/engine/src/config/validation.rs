//! Core Configuration Utilities
//!
//! Validation, defaults and the configuration error type.

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid recursion depth: {0}")]
    InvalidDepth(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration conflict: {0}")]
    Conflict(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidDepth` - if the recursion depth is zero or exceeds its limit
    /// - `InvalidParameter` - if parameters are outside valid ranges
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a recursion depth limit
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidDepth` if:
    /// - The depth is zero
    /// - The depth exceeds `ConfigDefaults::MAX_RECURSION_DEPTH`
    pub fn validate_depth(depth: usize, name: &str) -> ConfigResult<()> {
        if depth == 0 {
            return Err(ConfigurationError::InvalidDepth(format!(
                "{name} cannot be zero"
            )));
        }

        if depth > ConfigDefaults::MAX_RECURSION_DEPTH {
            return Err(ConfigurationError::InvalidDepth(format!(
                "{name} cannot exceed {}",
                ConfigDefaults::MAX_RECURSION_DEPTH
            )));
        }

        Ok(())
    }

    /// Validate that a field name is usable as an object key
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the name is empty or
    /// only whitespace.
    pub fn validate_field_name(field: &str, name: &str) -> ConfigResult<()> {
        if field.trim().is_empty() {
            return Err(ConfigurationError::InvalidParameter(format!(
                "{name} cannot be empty"
            )));
        }

        Ok(())
    }

}

/// Common configuration defaults
pub struct ConfigDefaults;

impl ConfigDefaults {
    /// Largest accepted recursion limit; a capped traversal at this depth fits
    /// an 8 MiB thread stack.
    pub const MAX_RECURSION_DEPTH: usize = 512;
    pub const DEFAULT_TYPE_TAG_FIELD: &'static str = "@type";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_validation() {
        assert!(ConfigValidator::validate_depth(1, "depth").is_ok());
        assert!(ConfigValidator::validate_depth(0, "depth").is_err());
        assert!(
            ConfigValidator::validate_depth(ConfigDefaults::MAX_RECURSION_DEPTH + 1, "depth")
                .is_err()
        );
    }

    #[test]
    fn test_depth_validation_message() {
        let err = ConfigValidator::validate_depth(513, "max_recursion_depth")
            .expect_err("513 exceeds the cap");
        assert_eq!(
            err.to_string(),
            "Invalid recursion depth: max_recursion_depth cannot exceed 512"
        );
    }
}
