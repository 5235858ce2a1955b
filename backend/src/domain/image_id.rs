//! Image identifier newtype.
//!
//! Image identifiers double as storage file stems, so the accepted alphabet
//! is restricted to characters that are safe in a path component. Anything
//! that could escape the storage directory is rejected at construction.

use serde::Serialize;

/// Longest accepted image identifier.
pub const MAX_IMAGE_ID_LENGTH: usize = 100;

/// Validation failures for [`ImageId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageIdValidationError {
    /// Identifiers must not be empty.
    #[error("image id must not be empty")]
    Empty,
    /// Identifiers are capped at [`MAX_IMAGE_ID_LENGTH`] characters.
    #[error("image id must be at most {MAX_IMAGE_ID_LENGTH} characters")]
    TooLong,
    /// Only `[A-Za-z0-9._-]` is accepted; `.` and `..` are reserved.
    #[error("image id contains characters outside [A-Za-z0-9._-]")]
    InvalidCharacters,
}

/// Identifier correlating a patrol record to a stored image blob.
///
/// ## Invariants
/// - 1 to [`MAX_IMAGE_ID_LENGTH`] characters from `[A-Za-z0-9._-]`.
/// - Never `.` or `..`, so it is always a plain file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Validate and construct an image identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ImageIdValidationError`] when the value is empty, too long,
    /// uses characters outside the safe alphabet, or is a dot segment.
    pub fn new(value: impl Into<String>) -> Result<Self, ImageIdValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ImageIdValidationError::Empty);
        }
        if value.chars().count() > MAX_IMAGE_ID_LENGTH {
            return Err(ImageIdValidationError::TooLong);
        }
        let safe = value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !safe || value == "." || value == ".." {
            return Err(ImageIdValidationError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ImageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Alphabet and length validation coverage.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::uuid_shaped("550e8400-e29b-41d4-a716-446655440000")]
    #[case::with_extension_like_suffix("scan_042.capture")]
    #[case::single_char("a")]
    fn accepts_safe_identifiers(#[case] value: &str) {
        let id = ImageId::new(value).expect("valid image id");
        assert_eq!(id.as_str(), value);
    }

    #[rstest]
    #[case::path_separator("a/b")]
    #[case::backslash("a\\b")]
    #[case::parent_dir("..")]
    #[case::current_dir(".")]
    #[case::space("a b")]
    #[case::null_byte("a\0b")]
    fn rejects_path_escapes(#[case] value: &str) {
        assert_eq!(
            ImageId::new(value),
            Err(ImageIdValidationError::InvalidCharacters)
        );
    }

    #[rstest]
    fn rejects_empty_and_overlong() {
        assert_eq!(ImageId::new(""), Err(ImageIdValidationError::Empty));
        assert_eq!(
            ImageId::new("x".repeat(MAX_IMAGE_ID_LENGTH + 1)),
            Err(ImageIdValidationError::TooLong)
        );
    }
}
