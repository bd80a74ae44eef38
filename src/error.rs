//! Error types.

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected character or end of input, or an invalid percent-encoded octet.
    ///
    /// The error index points to the first byte of the character or the end of input.
    /// For an invalid octet, it points to the first byte that is not a hexadecimal digit.
    UnexpectedCharOrEnd,
    /// Port that is not a decimal number in the range of `u16`.
    ///
    /// The error index points to the first byte of the port.
    InvalidPort,
    /// Invalid IP literal address.
    ///
    /// The error index points to the preceding left square bracket `'['`.
    InvalidIpLiteral,
}

/// An error occurred when parsing a URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// A component of a URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Component {
    /// The scheme.
    Scheme,
    /// The user name in the userinfo.
    User,
    /// The password in the userinfo.
    Password,
    /// The host.
    Host,
    /// The path.
    Path,
    /// The query.
    Query,
    /// The fragment.
    Fragment,
}

/// An error occurred when serializing URI components into a string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A component contains a character not allowed in it.
    ///
    /// `index` points to the first byte of the character within the component.
    UnexpectedChar {
        /// The offending component.
        component: Component,
        /// Index of the character within the component.
        index: usize,
    },
    /// The scheme is empty or does not start with a letter.
    InvalidScheme,
    /// Authority is present, but the path is not empty and does not start with `'/'`.
    NonemptyRootlessPath,
    /// Authority is not present, but the path starts with `"//"`.
    PathStartsWithDoubleSlash,
    /// Neither scheme nor authority is present, but the first path segment contains `':'`.
    FirstPathSegmentContainsColon,
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {}

/// An error occurred in [`normalize_str`](crate::normalize_str).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NormalizeStrError {
    /// The input failed to parse.
    Parse(ParseError),
    /// The normalized components failed to serialize.
    Build(BuildError),
}

impl From<ParseError> for NormalizeStrError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<BuildError> for NormalizeStrError {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NormalizeStrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Build(e) => Some(e),
        }
    }
}
