//! Error types for bedcheck.
//!
//! Uses `thiserror` for structured error types. The probe-level taxonomy
//! (denied / unavailable / transient) is recorded inside the ledger and never
//! raised; the variants here cover the failures that abort a profile run or
//! the process-level plumbing (I/O, export serialization).

use thiserror::Error;

/// Main error type for bedcheck operations.
#[derive(Error, Debug)]
pub enum BedcheckError {
    /// Named profile does not exist in the local AWS configuration.
    #[error("profile '{profile}' not found in AWS configuration")]
    ProfileNotFound { profile: String },

    /// No credential source could be located at all.
    #[error("no AWS credentials found")]
    CredentialsMissing,

    /// A credential source exists but failed to resolve.
    #[error("AWS credentials found but not valid: {reason}")]
    CredentialsInvalid { reason: String },

    /// Invalid flag combination or value.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O failure (export file, AWS config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for probe-boundary failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BedcheckError {
    /// One-line remediation hint surfaced alongside the error.
    #[must_use]
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::ProfileNotFound { .. } => {
                Some("List configured profiles with 'aws configure list-profiles'")
            }
            Self::CredentialsMissing => Some(
                "Run 'aws configure', or set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY",
            ),
            Self::CredentialsInvalid { .. } => {
                Some("Verify the credentials with 'aws sts get-caller-identity'")
            }
            Self::Config(_) => Some("Run 'bedcheck --help' for valid flag combinations"),
            Self::Io(_) | Self::Json(_) | Self::Other(_) => None,
        }
    }
}

/// Result type alias for bedcheck operations.
pub type Result<T> = std::result::Result<T, BedcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_not_found_message() {
        let err = BedcheckError::ProfileNotFound {
            profile: "staging".to_string(),
        };
        assert!(err.to_string().contains("staging"));
        assert!(err.remediation().is_some());
    }

    #[test]
    fn credential_errors_have_hints() {
        assert!(BedcheckError::CredentialsMissing.remediation().is_some());
        let err = BedcheckError::CredentialsInvalid {
            reason: "expired token".to_string(),
        };
        assert!(err.to_string().contains("expired token"));
        assert!(err.remediation().is_some());
    }
}
