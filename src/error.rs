//! Error types for seed parsing and attribute resolution.
//!
//! This module provides error types for the two supported input modes:
//! hexadecimal seed strings and pre-resolved attribute records.

use std::fmt;

/// Errors that can occur while validating a seed or an attribute record.
///
/// All variants are caller errors: they are reported before any simulation
/// state is constructed, never papered over with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// The seed string is too short to supply every parameter field.
    TooShort {
        /// Length of the supplied seed string.
        length: usize,
        /// Minimum length required to cover all fixed offsets.
        required: usize,
    },
    /// A parsed region of the seed contains a non-hexadecimal character.
    InvalidHex {
        /// Byte index of the offending character.
        index: usize,
        /// The offending character.
        character: char,
    },
    /// An attribute record field holds a code outside its candidate table.
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// The out-of-range code.
        value: u64,
    },
    /// A color string in an attribute record could not be parsed.
    InvalidColor {
        /// The string that failed to parse.
        value: String,
    },
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::TooShort { length, required } => write!(
                f,
                "Seed is too short: {} hex characters supplied, {} required",
                length, required
            ),
            SeedError::InvalidHex { index, character } => write!(
                f,
                "Seed contains non-hexadecimal character {:?} at index {}",
                character, index
            ),
            SeedError::InvalidField { field, value } => write!(
                f,
                "Attribute record field {:?} holds out-of-range code {}",
                field, value
            ),
            SeedError::InvalidColor { value } => {
                write!(f, "Failed to parse color string {:?}", value)
            }
        }
    }
}

impl std::error::Error for SeedError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_too_short() {
        let err = SeedError::TooShort {
            length: 10,
            required: 22,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("22"));
    }

    #[test]
    fn test_display_invalid_hex() {
        let err = SeedError::InvalidHex {
            index: 3,
            character: 'g',
        };
        assert!(err.to_string().contains("'g'"));
    }
}
