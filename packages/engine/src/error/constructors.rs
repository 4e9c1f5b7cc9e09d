//! Error constructor functions
//!
//! Factory helpers for creating `PathError` values with proper context.

use super::types::PathError;

/// Creates an `ArityMismatch` error
pub fn arity_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> PathError {
    PathError::ArityMismatch {
        context: context.into(),
        expected,
        actual,
    }
}

/// Creates an `UnprovidedRecursivePath` error
pub fn unprovided(name: impl Into<String>) -> PathError {
    PathError::UnprovidedRecursivePath { name: name.into() }
}

/// Creates a `DoubleProvision` error
pub fn double_provision(name: impl Into<String>) -> PathError {
    PathError::DoubleProvision { name: name.into() }
}

/// Creates an `UnmatchedDispatch` error
pub fn unmatched_dispatch(name: impl Into<String>, tag: impl Into<String>) -> PathError {
    PathError::UnmatchedDispatch {
        name: name.into(),
        tag: tag.into(),
    }
}

/// Creates a `DuplicateDispatch` error
pub fn duplicate_dispatch(name: impl Into<String>, tag: impl Into<String>) -> PathError {
    PathError::DuplicateDispatch {
        name: name.into(),
        tag: tag.into(),
    }
}

/// Creates a `MalformedPath` error
pub fn malformed(reason: impl Into<String>) -> PathError {
    PathError::MalformedPath(reason.into())
}

/// Creates an `InvalidParameter` error
pub fn invalid_parameter(navigator: impl Into<String>, message: impl Into<String>) -> PathError {
    PathError::InvalidParameter {
        navigator: navigator.into(),
        message: message.into(),
    }
}

/// Creates a `Navigation` error
pub fn navigation(navigator: impl Into<String>, message: impl Into<String>) -> PathError {
    PathError::Navigation {
        navigator: navigator.into(),
        message: message.into(),
    }
}

/// Creates a `RecursionLimit` error
pub fn recursion_limit(name: impl Into<String>, limit: usize) -> PathError {
    PathError::RecursionLimit {
        name: name.into(),
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorPhase;

    #[test]
    fn test_compile_time_classification() {
        assert_eq!(malformed("empty multi_path").phase(), ErrorPhase::Compile);
        assert_eq!(double_provision("tree").phase(), ErrorPhase::Compile);
        assert_eq!(duplicate_dispatch("accounts", "User").phase(), ErrorPhase::Compile);
    }

    #[test]
    fn test_run_time_classification() {
        assert_eq!(arity_mismatch("bind_parameters", 1, 0).phase(), ErrorPhase::Run);
        assert_eq!(unmatched_dispatch("accounts", "Robot").phase(), ErrorPhase::Run);
        assert_eq!(unprovided("tree").phase(), ErrorPhase::Run);
        assert!(!recursion_limit("tree", 4).is_compile_time());
    }

    #[test]
    fn test_messages_name_the_construct() {
        let err = unmatched_dispatch("accounts", "Robot");
        assert_eq!(
            err.to_string(),
            "protocol path 'accounts' has no dispatch entry for type 'Robot'"
        );

        let err = arity_mismatch("update function", 3, 2);
        assert!(err.is_arity_mismatch());
        assert!(err.to_string().contains("expected 3 argument(s), got 2"));
    }
}
