//! Module for normalization.

use crate::{
    component::UriComponents,
    error::NormalizeStrError,
    pct_enc::{self, EStr},
    resolve,
};
use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{
    iter::FusedIterator,
    ops::{BitOr, BitOrAssign, Sub, SubAssign},
};
use tracing::{debug, trace};

/// A set of normalization flags.
///
/// Each flag selects one transform. Flags are combined with `|` (or [`union`])
/// and removed with `-` (or [`difference`]); no flag implies another.
///
/// No matter how a set is built, the selected transforms always run in
/// the fixed order in which the flags are declared below. See
/// [`normalize`](normalize()) for that order and the reason behind it.
///
/// [`union`]: Self::union
/// [`difference`]: Self::difference
///
/// # Examples
///
/// ```
/// use uri_normalize::Flags;
///
/// let flags = Flags::JS_DEFAULTS | Flags::REMOVE_FRAGMENT;
/// assert!(flags.contains(Flags::STRIP_WWW | Flags::REMOVE_FRAGMENT));
///
/// let flags = flags - Flags::NORMALIZE_PROTOCOL;
/// assert!(!flags.contains(Flags::NORMALIZE_PROTOCOL));
/// ```
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Flags(u32);

impl Flags {
    // Normalizations that preserve semantics.

    /// Decodes percent-encoded octets of unreserved characters and
    /// uppercases the hexadecimal digits of the others.
    ///
    /// Applies to the user, password, host, path, query, and fragment.
    pub const PERCENT_ENCODINGS: Self = Self(1 << 0);

    /// Converts the scheme and host to ASCII lowercase.
    pub const LOWERCASE_SCHEME_AND_HOST: Self = Self(1 << 1);

    /// Removes dot segments from a non-empty path and then re-derives
    /// all components from the resulting URI reference.
    pub const REMOVE_DOT_SEGMENTS: Self = Self(1 << 2);

    /// Converts an empty path to `"/"` when a non-empty authority is present.
    pub const CONVERT_EMPTY_PATH: Self = Self(1 << 3);

    /// Removes port 80 when the scheme is `http` or `https`.
    ///
    /// Port 443 is not removed for `https`.
    pub const REMOVE_DEFAULT_PORT: Self = Self(1 << 4);

    // Normalizations that usually preserve semantics.

    /// Adds a trailing `'/'` to a path not ending with one.
    pub const ADD_TRAILING_SLASH: Self = Self(1 << 5);

    // Normalizations that change semantics.

    /// Removes the fragment.
    pub const REMOVE_FRAGMENT: Self = Self(1 << 6);

    /// Collapses consecutive slashes in a path other than `"/"`.
    pub const REMOVE_DUPLICATE_SLASHES: Self = Self(1 << 7);

    /// Sorts the query pairs by their decoded names, byte-wise.
    ///
    /// The sort is **not** stable: pairs with equal names may be reordered.
    pub const SORT_QUERY_PARAMETERS: Self = Self(1 << 8);

    /// Removes an empty query, dropping the `'?'`.
    pub const REMOVE_EMPTY_QUERY: Self = Self(1 << 9);

    /// Replaces the scheme `https` with `http`.
    pub const FORCE_HTTP: Self = Self(1 << 10);

    /// Replaces the scheme `http` with `https`.
    ///
    /// Takes precedence over [`FORCE_HTTP`](Self::FORCE_HTTP) when both are selected.
    pub const FORCE_HTTPS: Self = Self(1 << 11);

    /// Removes the user and password.
    pub const STRIP_AUTHENTICATION: Self = Self(1 << 12);

    /// Removes the scheme when it is `http` or `https`.
    pub const STRIP_PROTOCOL: Self = Self(1 << 13);

    /// Removes one leading `"www."` from the host, case-sensitively.
    pub const STRIP_WWW: Self = Self(1 << 14);

    /// Removes the query.
    pub const REMOVE_QUERY_PARAMETERS: Self = Self(1 << 15);

    /// Removes one trailing `'/'` from the path.
    pub const REMOVE_TRAILING_SLASH: Self = Self(1 << 16);

    /// Sets the scheme to `http` when it is absent.
    pub const NORMALIZE_PROTOCOL: Self = Self(1 << 17);

    /// All the normalizations that preserve semantics.
    pub const SEMANTICS_PRESERVING: Self = Self::PERCENT_ENCODINGS
        .union(Self::LOWERCASE_SCHEME_AND_HOST)
        .union(Self::REMOVE_DOT_SEGMENTS)
        .union(Self::CONVERT_EMPTY_PATH)
        .union(Self::REMOVE_DEFAULT_PORT);

    /// The default flags of the `normalize-url` JavaScript package.
    pub const JS_DEFAULTS: Self = Self::NORMALIZE_PROTOCOL
        .union(Self::STRIP_AUTHENTICATION)
        .union(Self::STRIP_WWW)
        .union(Self::REMOVE_TRAILING_SLASH)
        .union(Self::SORT_QUERY_PARAMETERS)
        .union(Self::LOWERCASE_SCHEME_AND_HOST)
        .union(Self::REMOVE_DEFAULT_PORT)
        .union(Self::REMOVE_DUPLICATE_SLASHES)
        .union(Self::REMOVE_EMPTY_QUERY)
        .union(Self::REMOVE_DOT_SEGMENTS);

    /// Flags used by [`Normalizer::default`].
    ///
    /// These are the semantics-preserving normalizations plus collapsing
    /// duplicate slashes, sorting the query, and removing an empty query
    /// and a trailing slash.
    pub const DEFAULT: Self = Self::SEMANTICS_PRESERVING
        .union(Self::REMOVE_DUPLICATE_SLASHES)
        .union(Self::SORT_QUERY_PARAMETERS)
        .union(Self::REMOVE_EMPTY_QUERY)
        .union(Self::REMOVE_TRAILING_SLASH);

    /// Returns an empty set of flags.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the set of all flags.
    #[must_use]
    pub const fn all() -> Self {
        Self((1 << NAMES.len()) - 1)
    }

    /// Returns the raw bits of the set.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Checks whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Checks whether the set contains all the flags in `other`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Checks whether the set contains any of the flags in `other`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the flags in `self` or in `other`.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the flags in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Looks up a single flag by its kebab-case name, such as `"strip-www"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_normalize::Flags;
    ///
    /// assert_eq!(Flags::from_name("remove-fragment"), Some(Flags::REMOVE_FRAGMENT));
    /// assert_eq!(Flags::from_name("remove_fragment"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| Self(1 << i))
    }

    /// Returns the kebab-case name of a single flag,
    /// or `None` if `self` does not contain exactly one flag.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        if self.0.count_ones() == 1 {
            NAMES.get(self.0.trailing_zeros() as usize).copied()
        } else {
            None
        }
    }

    /// Returns an iterator over the single flags in the set, in pipeline order.
    pub fn iter(self) -> Iter {
        Iter { bits: self.0 }
    }

    /// Returns an iterator over the names and single flags in the set, in pipeline order.
    pub fn iter_names(self) -> impl Iterator<Item = (&'static str, Self)> {
        self.iter().filter_map(|flag| flag.name().map(|name| (name, flag)))
    }
}

/// Names of the flags, indexed by bit position.
const NAMES: [&str; 18] = [
    "percent-encodings",
    "lowercase-scheme-and-host",
    "remove-dot-segments",
    "convert-empty-path",
    "remove-default-port",
    "add-trailing-slash",
    "remove-fragment",
    "remove-duplicate-slashes",
    "sort-query-parameters",
    "remove-empty-query",
    "force-http",
    "force-https",
    "strip-authentication",
    "strip-protocol",
    "strip-www",
    "remove-query-parameters",
    "remove-trailing-slash",
    "normalize-protocol",
];

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl Sub for Flags {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

impl SubAssign for Flags {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.difference(rhs);
    }
}

impl FromIterator<Flags> for Flags {
    fn from_iter<I: IntoIterator<Item = Flags>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::union)
    }
}

impl IntoIterator for Flags {
    type Item = Flags;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// An iterator over the single flags in a [`Flags`] set.
///
/// This struct is created by [`Flags::iter`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter {
    bits: u32,
}

impl Iterator for Iter {
    type Item = Flags;

    fn next(&mut self) -> Option<Flags> {
        if self.bits == 0 {
            return None;
        }
        let lowest = self.bits & self.bits.wrapping_neg();
        self.bits &= !lowest;
        Some(Flags(lowest))
    }
}

impl FusedIterator for Iter {}

/// A reusable URI normalizer with a fixed set of flags.
///
/// # Examples
///
/// ```
/// use uri_normalize::{Flags, Normalizer};
///
/// let normalizer = Normalizer::new(Flags::JS_DEFAULTS).with(Flags::REMOVE_FRAGMENT);
/// assert_eq!(
///     normalizer.normalize_str("HTTP://www.Example.com:80/a//b/?y=2&x=1#top").unwrap(),
///     "http://example.com/a/b?x=1&y=2"
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[must_use]
pub struct Normalizer {
    flags: Flags,
}

impl Normalizer {
    /// Creates a new `Normalizer` with the given flags.
    pub const fn new(flags: Flags) -> Self {
        Self { flags }
    }

    /// Adds flags to the normalizer.
    pub const fn with(mut self, flags: Flags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Removes flags from the normalizer.
    pub const fn without(mut self, flags: Flags) -> Self {
        self.flags = self.flags.difference(flags);
        self
    }

    /// Returns the flags of the normalizer.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Normalizes the given components.
    ///
    /// See [`normalize`](normalize()) for the exact behavior.
    #[must_use]
    pub fn normalize(&self, components: UriComponents) -> UriComponents {
        normalize(components, self.flags)
    }

    /// Parses, normalizes, and serializes a URI reference.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string fails to parse or the normalized
    /// components fail to serialize.
    pub fn normalize_str(&self, s: &str) -> Result<String, NormalizeStrError> {
        normalize_str(s, self.flags)
    }
}

impl Default for Normalizer {
    /// Creates a new `Normalizer` with [`Flags::DEFAULT`].
    fn default() -> Self {
        Self::new(Flags::DEFAULT)
    }
}

/// Normalizes URI components with the given flags.
///
/// The selected transforms run in the following fixed order, regardless
/// of how the flag set is built. A transform whose precondition does not
/// hold leaves the components unchanged, so this function never fails.
/// An empty flag set leaves the components unchanged.
///
/// 1. [`PERCENT_ENCODINGS`]. This runs first because the later steps
///    compare literal substrings and assume a canonical encoding.
/// 2. [`LOWERCASE_SCHEME_AND_HOST`].
/// 3. [`REMOVE_DOT_SEGMENTS`]. The components are serialized with the
///    resolved path and parsed again. If that fails, they are left unchanged.
/// 4. [`CONVERT_EMPTY_PATH`]. This runs after step 3, which may empty the path.
/// 5. [`REMOVE_DEFAULT_PORT`].
/// 6. [`ADD_TRAILING_SLASH`]. Combined with step 17, no trailing slash is left.
/// 7. [`REMOVE_FRAGMENT`].
/// 8. [`REMOVE_DUPLICATE_SLASHES`].
/// 9. [`SORT_QUERY_PARAMETERS`].
/// 10. [`REMOVE_EMPTY_QUERY`].
/// 11. [`FORCE_HTTP`].
/// 12. [`FORCE_HTTPS`].
/// 13. [`STRIP_AUTHENTICATION`].
/// 14. [`STRIP_PROTOCOL`].
/// 15. [`STRIP_WWW`]. This is case-sensitive; step 2 makes it otherwise.
/// 16. [`REMOVE_QUERY_PARAMETERS`].
/// 17. [`REMOVE_TRAILING_SLASH`].
/// 18. [`NORMALIZE_PROTOCOL`].
///
/// [`PERCENT_ENCODINGS`]: Flags::PERCENT_ENCODINGS
/// [`LOWERCASE_SCHEME_AND_HOST`]: Flags::LOWERCASE_SCHEME_AND_HOST
/// [`REMOVE_DOT_SEGMENTS`]: Flags::REMOVE_DOT_SEGMENTS
/// [`CONVERT_EMPTY_PATH`]: Flags::CONVERT_EMPTY_PATH
/// [`REMOVE_DEFAULT_PORT`]: Flags::REMOVE_DEFAULT_PORT
/// [`ADD_TRAILING_SLASH`]: Flags::ADD_TRAILING_SLASH
/// [`REMOVE_FRAGMENT`]: Flags::REMOVE_FRAGMENT
/// [`REMOVE_DUPLICATE_SLASHES`]: Flags::REMOVE_DUPLICATE_SLASHES
/// [`SORT_QUERY_PARAMETERS`]: Flags::SORT_QUERY_PARAMETERS
/// [`REMOVE_EMPTY_QUERY`]: Flags::REMOVE_EMPTY_QUERY
/// [`FORCE_HTTP`]: Flags::FORCE_HTTP
/// [`FORCE_HTTPS`]: Flags::FORCE_HTTPS
/// [`STRIP_AUTHENTICATION`]: Flags::STRIP_AUTHENTICATION
/// [`STRIP_PROTOCOL`]: Flags::STRIP_PROTOCOL
/// [`STRIP_WWW`]: Flags::STRIP_WWW
/// [`REMOVE_QUERY_PARAMETERS`]: Flags::REMOVE_QUERY_PARAMETERS
/// [`REMOVE_TRAILING_SLASH`]: Flags::REMOVE_TRAILING_SLASH
/// [`NORMALIZE_PROTOCOL`]: Flags::NORMALIZE_PROTOCOL
///
/// # Examples
///
/// ```
/// use uri_normalize::{normalize, Flags, UriComponents};
///
/// let uri = UriComponents::parse("http://example.com/foo/./bar/baz/../qux")?;
/// let uri = normalize(uri, Flags::REMOVE_DOT_SEGMENTS);
/// assert_eq!(uri.build().unwrap(), "http://example.com/foo/bar/qux");
/// # Ok::<_, uri_normalize::ParseError>(())
/// ```
#[must_use]
pub fn normalize(mut components: UriComponents, flags: Flags) -> UriComponents {
    apply(&mut components, flags);
    components
}

/// Parses, normalizes, and serializes a URI reference.
///
/// # Errors
///
/// Returns `Err` if the string fails to parse or the normalized
/// components fail to serialize.
///
/// # Examples
///
/// ```
/// use uri_normalize::{normalize_str, Flags};
///
/// assert_eq!(
///     normalize_str("HTTP://example.com/foo%2a/./bar/..//baz/?b=v&a=v", Flags::DEFAULT).unwrap(),
///     "http://example.com/foo%2A/baz?a=v&b=v"
/// );
/// ```
pub fn normalize_str(s: &str, flags: Flags) -> Result<String, NormalizeStrError> {
    let components = UriComponents::parse(s)?;
    Ok(normalize(components, flags).build()?)
}

/// A transform, returning whether anything is changed.
type Step = fn(&mut UriComponents) -> bool;

/// The transforms in the order they must run.
///
/// Later steps depend on the output of earlier ones, so this order
/// is independent of the bit positions of the flags.
const PIPELINE: [(Flags, Step); 18] = [
    (Flags::PERCENT_ENCODINGS, percent_encodings),
    (Flags::LOWERCASE_SCHEME_AND_HOST, lowercase_scheme_and_host),
    (Flags::REMOVE_DOT_SEGMENTS, remove_dot_segments),
    (Flags::CONVERT_EMPTY_PATH, convert_empty_path),
    (Flags::REMOVE_DEFAULT_PORT, remove_default_port),
    (Flags::ADD_TRAILING_SLASH, add_trailing_slash),
    (Flags::REMOVE_FRAGMENT, remove_fragment),
    (Flags::REMOVE_DUPLICATE_SLASHES, remove_duplicate_slashes),
    (Flags::SORT_QUERY_PARAMETERS, sort_query_parameters),
    (Flags::REMOVE_EMPTY_QUERY, remove_empty_query),
    (Flags::FORCE_HTTP, force_http),
    (Flags::FORCE_HTTPS, force_https),
    (Flags::STRIP_AUTHENTICATION, strip_authentication),
    (Flags::STRIP_PROTOCOL, strip_protocol),
    (Flags::STRIP_WWW, strip_www),
    (Flags::REMOVE_QUERY_PARAMETERS, remove_query_parameters),
    (Flags::REMOVE_TRAILING_SLASH, remove_trailing_slash),
    (Flags::NORMALIZE_PROTOCOL, normalize_protocol),
];

pub(crate) fn apply(c: &mut UriComponents, flags: Flags) {
    for (flag, step) in PIPELINE {
        if flags.contains(flag) && step(c) {
            trace!(step = flag.name().unwrap_or_default(), "normalization step applied");
        }
    }
}

fn is_http_or_https(scheme: &Option<String>) -> bool {
    matches!(scheme.as_deref(), Some("http" | "https"))
}

fn normalize_pct(s: &mut String) -> bool {
    let out = match pct_enc::normalize_triplets(s) {
        Cow::Borrowed(_) => return false,
        Cow::Owned(out) => out,
    };
    *s = out;
    true
}

fn normalize_pct_opt(s: &mut Option<String>) -> bool {
    s.as_mut().map_or(false, normalize_pct)
}

fn percent_encodings(c: &mut UriComponents) -> bool {
    // Every field must be visited, hence no short-circuiting.
    normalize_pct_opt(&mut c.user)
        | normalize_pct_opt(&mut c.password)
        | normalize_pct_opt(&mut c.host)
        | normalize_pct(&mut c.path)
        | normalize_pct_opt(&mut c.query)
        | normalize_pct_opt(&mut c.fragment)
}

fn lowercase_opt(s: &mut Option<String>) -> bool {
    match s {
        Some(s) if s.bytes().any(|x| x.is_ascii_uppercase()) => {
            s.make_ascii_lowercase();
            true
        }
        _ => false,
    }
}

fn lowercase_scheme_and_host(c: &mut UriComponents) -> bool {
    lowercase_opt(&mut c.scheme) | lowercase_opt(&mut c.host)
}

fn remove_dot_segments(c: &mut UriComponents) -> bool {
    if c.path.is_empty() {
        return false;
    }

    let mut resolved = c.clone();
    resolved.path = resolve::remove_dot_segments(&c.path);
    // Keep a leading empty segment from being taken as an authority.
    if !resolved.has_authority_marker() && resolved.path.starts_with("//") {
        resolved.path.insert_str(0, "/.");
    }

    let rederived = match resolved.build() {
        Ok(s) => UriComponents::parse(&s),
        Err(e) => {
            debug!(error = %e, "failed to serialize components with dot segments removed");
            return false;
        }
    };
    match rederived {
        Ok(rederived) if rederived != *c => {
            *c = rederived;
            true
        }
        Ok(_) => false,
        Err(e) => {
            debug!(error = %e, "failed to re-derive components with dot segments removed");
            false
        }
    }
}

fn convert_empty_path(c: &mut UriComponents) -> bool {
    if c.has_authority() && c.path.is_empty() {
        c.path.push('/');
        true
    } else {
        false
    }
}

fn remove_default_port(c: &mut UriComponents) -> bool {
    if is_http_or_https(&c.scheme) && c.port == Some(80) {
        c.port = None;
        true
    } else {
        false
    }
}

fn add_trailing_slash(c: &mut UriComponents) -> bool {
    if c.path.ends_with('/') {
        false
    } else {
        c.path.push('/');
        true
    }
}

fn remove_fragment(c: &mut UriComponents) -> bool {
    c.fragment.take().is_some()
}

fn remove_duplicate_slashes(c: &mut UriComponents) -> bool {
    if c.path == "/" || !c.path.contains("//") {
        return false;
    }

    let mut buf = String::with_capacity(c.path.len());
    let mut prev_slash = false;
    for ch in c.path.chars() {
        let is_slash = ch == '/';
        if !(is_slash && prev_slash) {
            buf.push(ch);
        }
        prev_slash = is_slash;
    }
    c.path = buf;
    true
}

fn sort_query_parameters(c: &mut UriComponents) -> bool {
    let sorted = match c.query.as_deref() {
        Some(query) if !query.is_empty() => {
            let mut pairs: Vec<(Cow<'_, [u8]>, &str)> = query
                .split('&')
                .map(|pair| {
                    let name = pair.split_once('=').map_or(pair, |(name, _)| name);
                    (EStr::new_validated(name).decode().to_bytes(), pair)
                })
                .collect();
            pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));

            let sorted = pairs
                .iter()
                .map(|(_, pair)| *pair)
                .collect::<Vec<_>>()
                .join("&");
            if sorted == query {
                return false;
            }
            sorted
        }
        _ => return false,
    };
    c.query = Some(sorted);
    true
}

fn remove_empty_query(c: &mut UriComponents) -> bool {
    if c.query.as_deref() == Some("") {
        c.query = None;
        true
    } else {
        false
    }
}

fn force_http(c: &mut UriComponents) -> bool {
    replace_scheme(c, "https", "http")
}

fn force_https(c: &mut UriComponents) -> bool {
    replace_scheme(c, "http", "https")
}

fn replace_scheme(c: &mut UriComponents, from: &str, to: &str) -> bool {
    if c.scheme.as_deref() == Some(from) {
        c.scheme = Some(to.into());
        true
    } else {
        false
    }
}

fn strip_authentication(c: &mut UriComponents) -> bool {
    c.user.take().is_some() | c.password.take().is_some()
}

fn strip_protocol(c: &mut UriComponents) -> bool {
    if is_http_or_https(&c.scheme) {
        c.scheme = None;
        true
    } else {
        false
    }
}

fn strip_www(c: &mut UriComponents) -> bool {
    match &mut c.host {
        Some(host) if host.starts_with("www.") => {
            host.replace_range(..4, "");
            true
        }
        _ => false,
    }
}

fn remove_query_parameters(c: &mut UriComponents) -> bool {
    c.query.take().is_some()
}

fn remove_trailing_slash(c: &mut UriComponents) -> bool {
    if c.path.ends_with('/') {
        c.path.pop();
        true
    } else {
        false
    }
}

fn normalize_protocol(c: &mut UriComponents) -> bool {
    if c.scheme.is_none() {
        c.scheme = Some("http".into());
        true
    } else {
        false
    }
}
