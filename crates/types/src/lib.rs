//! Validated identifier and filename types shared across the kiosk crates.
//!
//! Survey item identifiers and image filenames both arrive from outside the
//! core (admin submissions, stored JSON documents). These wrappers guarantee
//! their invariants once constructed, so the rest of the codebase never has
//! to re-check them.

/// Errors that can occur when creating a validated item identifier.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when validating an image filename.
#[derive(Debug, thiserror::Error)]
pub enum ImageNameError {
    /// The input filename was empty or contained only whitespace
    #[error("Image filename cannot be empty")]
    Empty,
    /// The filename contained a path separator
    #[error("Image filename must not contain path separators: '{0}'")]
    PathSeparator(String),
    /// The filename contained a parent-directory traversal sequence
    #[error("Image filename must not contain '..': '{0}'")]
    Traversal(String),
    /// The filename was hidden or had no extension
    #[error("Image filename must have a name and an extension: '{0}'")]
    MissingExtension(String),
}

/// A survey item identifier.
///
/// Item ids are supplied by the caller rather than generated, so this type
/// enforces the one invariant the system relies on: a trimmed, non-empty
/// string. Uniqueness within a survey is checked at the operation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new `ItemId` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ItemId::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A validated image filename for the blob store.
///
/// The blob store addresses images by caller-chosen filename, which makes the
/// filename an externally supplied path component. Construction therefore
/// rejects anything that could escape the images directory:
///
/// - path separators (`/`, `\`)
/// - parent-directory traversal (`..`)
/// - hidden names and names without an extension
///
/// Once constructed, an `ImageName` can be joined onto the images directory
/// without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageName(String);

impl ImageName {
    /// Validates and wraps an image filename.
    ///
    /// # Errors
    ///
    /// Returns [`ImageNameError`] if the trimmed input is empty, contains a
    /// path separator or `..`, starts with a dot, or has no extension.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ImageNameError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ImageNameError::Empty);
        }
        if trimmed.contains('/') || trimmed.contains('\\') {
            return Err(ImageNameError::PathSeparator(trimmed.to_owned()));
        }
        if trimmed.contains("..") {
            return Err(ImageNameError::Traversal(trimmed.to_owned()));
        }
        match trimmed.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !stem.starts_with('.') && !ext.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(ImageNameError::MissingExtension(trimmed.to_owned())),
        }
    }

    /// Returns the inner filename as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the filename's extension (the part after the last dot).
    pub fn extension(&self) -> &str {
        // Construction guarantees a non-empty extension exists.
        self.0.rsplit('.').next().unwrap_or_default()
    }
}

impl std::fmt::Display for ImageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ImageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ImageName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ImageName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ImageName::new(&s).map_err(serde::de::Error::custom)
    }
}
