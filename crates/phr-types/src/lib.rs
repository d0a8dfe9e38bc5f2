//! Validated primitive types shared by the PHR client crates.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("value cannot be blank")]
    Empty,
    /// A character that cannot appear in a URL path segment.
    #[error("identifier contains an invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// Text that is non-empty after trimming, such as a sign-in email or a password.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trim `input` and reject it if nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] for blank input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A server-assigned record identifier that is safe to interpolate into a request path.
///
/// Identifiers are opaque to the client. The only guarantees are that the value is
/// non-empty after trimming and contains no path separators, query delimiters or
/// whitespace, so `/prescriptions/{id}` can never collapse into `/prescriptions/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(NonEmptyText);

impl RecordId {
    /// Validates an identifier supplied by a caller.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] for blank input and [`TextError::InvalidCharacter`] if the
    /// trimmed value contains `/`, `?`, `#`, `%` or whitespace.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let text = NonEmptyText::new(input)?;
        if let Some(bad) = text
            .as_str()
            .chars()
            .find(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace())
        {
            return Err(TextError::InvalidCharacter(bad));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
