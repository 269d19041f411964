//! Error handling for the herd records core
//!
//! The purity classifier and genealogy builder are total and never fail.
//! Everything around them (stores, registration, configuration) reports
//! through [`HerdError`].

use thiserror::Error;

/// Main error type for herd record operations
#[derive(Error, Debug)]
pub enum HerdError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid purity grade '{0}': expected one of PO, F1, F2, F3, F4, F5, PC")]
    InvalidGrade(String),

    #[error("Invalid breed '{0}'")]
    InvalidBreed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HerdError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        HerdError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn duplicate(kind: &'static str, id: impl ToString) -> Self {
        HerdError::Duplicate {
            kind,
            id: id.to_string(),
        }
    }

    /// True for errors caused by the caller's input rather than the store
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HerdError::Validation(_) | HerdError::InvalidGrade(_) | HerdError::InvalidBreed(_)
        )
    }
}

/// Result type alias for herd operations
pub type Result<T> = std::result::Result<T, HerdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = HerdError::not_found("Animal", "BNN-0001");
        assert_eq!(err.to_string(), "Animal not found: BNN-0001");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_validation_is_client_error() {
        assert!(HerdError::Validation("mother must be female".into()).is_client_error());
        assert!(HerdError::InvalidGrade("F9".into()).is_client_error());
    }
}
