//! Generation request type and validation.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Maximum number of text rows an artifact can carry.
pub const MAX_TEXT_ROWS: usize = 5;

/// Maximum characters per text row.
pub const MAX_ROW_CHARS: usize = 11;

/// A request to generate one artifact.
///
/// The seed is the sole entropy source for the whole pipeline. If a palette
/// name is given, rarity-weighted palette selection is bypassed and the named
/// palette is used directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRequest {
    /// 64-bit seed. Seed 0 is valid.
    pub seed: u64,

    /// Explicit palette choice; `None` means rarity-weighted selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette_name: Option<String>,

    /// Up to five rows of uppercase alphanumeric + space text.
    #[serde(default)]
    pub text_rows: Vec<String>,
}

impl ArtifactRequest {
    /// Create a request with no text and rarity-weighted palette selection.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            palette_name: None,
            text_rows: Vec::new(),
        }
    }

    /// Start building a request.
    pub fn builder(seed: u64) -> ArtifactRequestBuilder {
        ArtifactRequestBuilder {
            request: Self::new(seed),
        }
    }

    /// Validate row count, row lengths, and the character set.
    ///
    /// Rows are expected pre-sanitized to uppercase alphanumeric + space;
    /// anything else is rejected rather than silently coerced.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.text_rows.len() > MAX_TEXT_ROWS {
            return Err(SpecError::TooManyRows(self.text_rows.len()));
        }
        for (row, text) in self.text_rows.iter().enumerate() {
            let len = text.chars().count();
            if len > MAX_ROW_CHARS {
                return Err(SpecError::RowTooLong { row, len });
            }
            if let Some(ch) = text
                .chars()
                .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == ' '))
            {
                return Err(SpecError::InvalidCharacter { row, ch });
            }
        }
        Ok(())
    }
}

/// Builder for [`ArtifactRequest`].
pub struct ArtifactRequestBuilder {
    request: ArtifactRequest,
}

impl ArtifactRequestBuilder {
    /// Use the named palette instead of rarity-weighted selection.
    pub fn palette(mut self, name: impl Into<String>) -> Self {
        self.request.palette_name = Some(name.into());
        self
    }

    /// Append one text row.
    pub fn text_row(mut self, row: impl Into<String>) -> Self {
        self.request.text_rows.push(row.into());
        self
    }

    /// Finish building. Does not validate; call [`ArtifactRequest::validate`].
    pub fn build(self) -> ArtifactRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_request_passes() {
        let req = ArtifactRequest::builder(42)
            .palette("Tamil Cultural")
            .text_row("WELCOME")
            .build();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_text_is_valid() {
        assert!(ArtifactRequest::new(0).validate().is_ok());
    }

    #[test]
    fn six_rows_rejected() {
        let mut req = ArtifactRequest::new(1);
        req.text_rows = vec![String::new(); 6];
        assert_eq!(req.validate(), Err(SpecError::TooManyRows(6)));
    }

    #[test]
    fn long_row_rejected() {
        let req = ArtifactRequest::builder(1).text_row("TWELVECHARSX").build();
        assert_eq!(
            req.validate(),
            Err(SpecError::RowTooLong { row: 0, len: 12 })
        );
    }

    #[test]
    fn lowercase_rejected() {
        let req = ArtifactRequest::builder(1).text_row("hello").build();
        assert_eq!(
            req.validate(),
            Err(SpecError::InvalidCharacter { row: 0, ch: 'h' })
        );
    }

    #[test]
    fn request_roundtrips_through_json() {
        let req = ArtifactRequest::builder(7).text_row("HI").build();
        let json = serde_json::to_string(&req).unwrap();
        let back: ArtifactRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
    }
}
