//! Error types for request validation and table loading.

use thiserror::Error;

/// Errors raised while validating a request or loading external tables.
///
/// Every variant is a deterministic function of its input: the same invalid
/// input always fails with the same error. None are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The palette table has no entries at all.
    #[error("palette table is empty")]
    EmptyPaletteTable,

    /// The palette table has no Common-tier entry to fall back to.
    #[error("palette table has no Common-tier entry")]
    NoCommonPalette,

    /// A palette was requested by name but is not in the table.
    #[error("unknown palette: {0:?}")]
    UnknownPalette(String),

    /// More text rows than the artifact can hold.
    #[error("too many text rows: {0} (maximum 5)")]
    TooManyRows(usize),

    /// A single text row exceeds the character limit.
    #[error("text row {row} is {len} characters (maximum 11)")]
    RowTooLong { row: usize, len: usize },

    /// A text row contains a character outside uppercase alphanumeric + space.
    #[error("text row {row} contains invalid character {ch:?}")]
    InvalidCharacter { row: usize, ch: char },

    /// A palette table entry carries a malformed hex color.
    #[error("palette {palette:?} has invalid hex color {value:?}")]
    InvalidHexColor { palette: String, value: String },

    /// A palette table could not be parsed.
    #[error("failed to parse palette table: {0}")]
    MalformedTable(String),
}

impl SpecError {
    /// Stable error code string for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            SpecError::EmptyPaletteTable => "L001",
            SpecError::NoCommonPalette => "L002",
            SpecError::UnknownPalette(_) => "L003",
            SpecError::TooManyRows(_) => "L004",
            SpecError::RowTooLong { .. } => "L005",
            SpecError::InvalidCharacter { .. } => "L006",
            SpecError::InvalidHexColor { .. } => "L007",
            SpecError::MalformedTable(_) => "L008",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(SpecError::EmptyPaletteTable.code(), "L001");
        assert_eq!(
            SpecError::RowTooLong { row: 2, len: 14 }.code(),
            "L005"
        );
    }

    #[test]
    fn display_includes_context() {
        let err = SpecError::InvalidCharacter { row: 1, ch: '~' };
        assert!(err.to_string().contains("row 1"));
        assert!(err.to_string().contains('~'));
    }
}
