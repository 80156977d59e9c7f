use regex::Regex;

/// Pattern for the strain token: the text between the first pair of `|`
/// delimiters that encloses at least one character.
pub const STRAIN_TOKEN_PATTERN: &str = r"\|([^|]+)\|";

/// Separator between the fields of a strain token
pub const FIELD_DELIMITER: char = '/';

/// Extracts a key from a header with a regular expression.
///
/// The first capture group is the key; a pattern without groups uses the
/// whole match.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    regex: Regex,
}

impl KeyPattern {
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// The `|type/host/location/strain/year|` token used by influenza headers.
    #[must_use]
    pub fn strain_token() -> Self {
        Self::new(STRAIN_TOKEN_PATTERN).expect("strain token pattern is valid")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Extract the key from `header`, or `None` if the pattern does not match.
    #[must_use]
    pub fn extract<'a>(&self, header: &'a str) -> Option<&'a str> {
        let captures = self.regex.captures(header)?;
        captures.get(1).or_else(|| captures.get(0)).map(|m| m.as_str())
    }
}

/// A header together with the ordered fields of its strain token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredIdentifier {
    /// Header text without the `>` marker
    pub original_header: String,

    /// Token fields, conventionally type, host, location, strain and year
    pub fields: Vec<String>,
}

impl StructuredIdentifier {
    /// Parse a header, returning `None` when it carries no token.
    #[must_use]
    pub fn parse(header: &str, pattern: &KeyPattern) -> Option<Self> {
        let token = pattern.extract(header)?;
        Some(Self {
            original_header: header.to_string(),
            fields: token.split(FIELD_DELIMITER).map(str::to_string).collect(),
        })
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
