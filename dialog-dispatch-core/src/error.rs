//! Normalized backend error shape
//!
//! Backend calls are external collaborators: they either succeed (the caller
//! dispatches the configured `on_success` action) or fail with an [`ApiError`]
//! that the error dialog family renders. The dialog framework itself never
//! throws; errors only ever travel as data inside actions.

use serde::{Deserialize, Serialize};

/// Normalized error returned by backend services
///
/// Matches the shape the error dialog expects: a numeric code, a
/// human-readable message, and optional remediation hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Backend error code
    pub code: u32,
    /// Human-readable message
    pub message: String,
    /// Suggested next step for the user, if the backend provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedial_action: Option<String>,
    /// Link to relevant documentation, if the backend provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl ApiError {
    /// Create an error with just a code and message.
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            remedial_action: None,
            documentation_url: None,
        }
    }

    /// Attach a remediation hint.
    pub fn with_remedial_action(mut self, action: impl Into<String>) -> Self {
        self.remedial_action = Some(action.into());
        self
    }

    /// Attach a documentation link.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApiError::new(2001, "Item is locked");
        assert_eq!(err.to_string(), "Item is locked (code 2001)");
    }

    #[test]
    fn test_serde_optional_fields() {
        let err = ApiError::new(500, "boom");
        let wire = serde_json::to_string(&err).unwrap();
        assert!(!wire.contains("remedial_action"));

        let full = ApiError::new(401, "Unauthorized")
            .with_remedial_action("Sign in again")
            .with_documentation_url("https://docs.example.com/errors/401");
        let wire = serde_json::to_string(&full).unwrap();
        let back: ApiError = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, full);
    }
}
