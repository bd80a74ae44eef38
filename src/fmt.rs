use crate::{
    component::UriComponents,
    error::{BuildError, Component, NormalizeStrError, ParseError, ParseErrorKind},
    normalize::Flags,
    pct_enc::EStr,
};
use core::fmt;

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::UnexpectedCharOrEnd => "unexpected character or end of input",
            ParseErrorKind::InvalidPort => "invalid port",
            ParseErrorKind::InvalidIpLiteral => "invalid IP literal",
        };
        write!(f, "{} at index {}", msg, self.index)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scheme => "scheme",
            Self::User => "user",
            Self::Password => "password",
            Self::Host => "host",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::UnexpectedChar { component, index } => {
                return write!(f, "unexpected character at index {index} of {component}");
            }
            Self::InvalidScheme => "scheme should be non-empty and start with a letter",
            Self::NonemptyRootlessPath => {
                "when authority is present, path should either be empty or start with '/'"
            }
            Self::PathStartsWithDoubleSlash => {
                "when authority is not present, path should not start with \"//\""
            }
            Self::FirstPathSegmentContainsColon => {
                "when neither scheme nor authority is present, first path segment should not contain ':'"
            }
        };
        f.write_str(msg)
    }
}

impl fmt::Display for NormalizeStrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "failed to parse: {e}"),
            Self::Build(e) => write!(f, "failed to serialize: {e}"),
        }
    }
}

impl fmt::Debug for UriComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UriComponents")
            .field("scheme", &self.scheme())
            .field("user", &self.user())
            .field("password", &self.password())
            .field("host", &self.host())
            .field("port", &self.port())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

/// Writes the components as a URI reference without checking them.
///
/// Use [`UriComponents::build`] to get an error instead when the
/// output would not be a valid URI reference.
impl fmt::Display for UriComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if self.has_authority_marker() {
            f.write_str("//")?;
            if self.user.is_some() || self.password.is_some() {
                f.write_str(self.user.as_deref().unwrap_or_default())?;
                if let Some(password) = &self.password {
                    write!(f, ":{password}")?;
                }
                f.write_str("@")?;
            }
            if let Some(host) = &self.host {
                f.write_str(host)?;
            }
            if let Some(port) = self.port {
                write!(f, ":{port}")?;
            }
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for EStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for EStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Flags(")?;
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i != 0 {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
        }
        f.write_str(")")
    }
}
