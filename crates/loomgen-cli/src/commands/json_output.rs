//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag so other tools can parse command
//! results programmatically.

use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Generation errors pass through their own `W...` codes.
pub mod error_codes {
    /// File could not be read or written
    pub const FILE_IO: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Generation error (wraps backend errors)
    pub const GENERATION_ERROR: &str = "CLI_003";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_004";
    /// PNG encode or write error
    pub const PNG_WRITE: &str = "CLI_005";
    /// Regenerated output did not match the recorded hashes
    pub const HASH_MISMATCH: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "W003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_field_is_omitted_when_unset() {
        let json = serde_json::to_string(&JsonError::new("CLI_001", "boom")).unwrap();
        assert!(!json.contains("file"));
    }
}
