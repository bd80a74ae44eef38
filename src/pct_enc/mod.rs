//! Percent-encoding utilities.

pub mod table;

pub use table::Table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{cmp::Ordering, hash, iter::FusedIterator, str};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// Percent-encoded string slices.
///
/// The underlying string of an `EStr` slice is guaranteed to have every
/// percent character `'%'` followed by two hexadecimal digits. No other
/// restriction is placed on it: whether the unencoded characters are
/// allowed in a particular component is checked when serializing.
///
/// # Comparison
///
/// `EStr` slices are compared [lexicographically](Ord#lexicographical-comparison)
/// by their byte values. Normalization is **not** performed prior to comparison.
///
/// # Examples
///
/// Parse key-value pairs from a query string into a hash map:
///
/// ```
/// use std::collections::HashMap;
/// use uri_normalize::{pct_enc::EStr, UriComponents};
///
/// let uri = UriComponents::parse("?name=%E5%BC%A0%E4%B8%89&speech=%C2%A1Ol%C3%A9%21")?;
/// let map: HashMap<_, _> = uri
///     .query()
///     .unwrap()
///     .split('&')
///     .map(|s| s.split_once('=').unwrap_or((s, EStr::EMPTY)))
///     .map(|(k, v)| (k.decode().to_string_lossy(), v.decode().to_string_lossy()))
///     .collect();
/// assert_eq!(map["name"], "张三");
/// assert_eq!(map["speech"], "¡Olé!");
/// # Ok::<_, uri_normalize::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Converts a string slice to an `EStr` slice.
    ///
    /// # Panics
    ///
    /// Panics if the string contains an incomplete or non-hexadecimal
    /// percent-encoded octet. For a non-panicking variant, use [`new`](Self::new).
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Self {
        match Self::new(s) {
            Some(s) => s,
            None => panic!("improperly encoded string"),
        }
    }

    /// Converts a string slice to an `EStr` slice, returning `None`
    /// if the string contains an incomplete or non-hexadecimal
    /// percent-encoded octet.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Self> {
        if is_properly_encoded(s.as_bytes()) {
            Some(Self::new_validated(s))
        } else {
            None
        }
    }

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator used to decode the `EStr` slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_normalize::pct_enc::EStr;
    ///
    /// let dec = EStr::new_or_panic("%C2%A1Hola%21").decode();
    /// assert_eq!(*dec.clone().to_bytes(), [0xc2, 0xa1, 0x48, 0x6f, 0x6c, 0x61, 0x21]);
    /// assert_eq!(dec.to_string().unwrap(), "¡Hola!");
    /// ```
    pub fn decode(&self) -> Decode<'_> {
        Decode::new(&self.inner)
    }

    /// Returns an iterator over subslices of the `EStr` slice separated by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_normalize::pct_enc::EStr;
    ///
    /// assert!(EStr::new_or_panic("a,b,c").split(',').eq(["a", "b", "c"]));
    /// assert!(EStr::new_or_panic(",").split(',').eq(["", ""]));
    /// assert!(EStr::EMPTY.split(',').eq([""]));
    /// ```
    pub fn split(&self, delim: char) -> Split<'_> {
        assert!(
            table::RESERVED.allows(delim),
            "splitting with non-reserved character"
        );
        Split {
            inner: self.inner.split(delim),
        }
    }

    /// Splits the `EStr` slice on the first occurrence of the given delimiter and
    /// returns prefix before delimiter and suffix after delimiter.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert!(
            table::RESERVED.allows(delim),
            "splitting with non-reserved character"
        );
        self.inner
            .split_once(delim)
            .map(|(a, b)| (Self::new_validated(a), Self::new_validated(b)))
    }
}

impl AsRef<Self> for EStr {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl AsRef<str> for EStr {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<EStr> for str {
    fn eq(&self, other: &EStr) -> bool {
        self == &other.inner
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialOrd for EStr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EStr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl Default for &EStr {
    /// Creates an empty `EStr` slice.
    fn default() -> Self {
        EStr::EMPTY
    }
}

const fn is_properly_encoded(s: &[u8]) -> bool {
    let mut i = 0;
    while i < s.len() {
        if s[i] == b'%' {
            if i + 2 >= s.len() || !is_hexdig_pair(s[i + 1], s[i + 2]) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

pub(crate) const fn is_hexdig(x: u8) -> bool {
    OCTET_TABLE_LO[x as usize] != 0xff
}

pub(crate) const fn is_hexdig_pair(x: u8, y: u8) -> bool {
    OCTET_TABLE_LO[x as usize] | OCTET_TABLE_LO[y as usize] != 0xff
}

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// An iterator used to decode an [`EStr`] slice.
///
/// This struct is created by [`EStr::decode`]. Normally you'll use the methods below
/// instead of iterating over a `Decode` manually, unless you need precise control
/// over allocation.
///
/// See the [`DecodedChunk`] type for documentation of the items yielded by this iterator.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Decode<'a> {
    source: &'a str,
}

/// An item returned by the [`Decode`] iterator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodedChunk<'a> {
    /// An unencoded subslice.
    Unencoded(&'a str),
    /// A percent-encoded octet, decoded (for example, `"%20"` decoded as `0x20`).
    PctDecoded(u8),
}

impl<'a> Decode<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn next_if_unencoded(&mut self) -> Option<&'a str> {
        let i = self
            .source
            .bytes()
            .position(|x| x == b'%')
            .unwrap_or(self.source.len());

        if i == 0 {
            None
        } else {
            let s;
            (s, self.source) = self.source.split_at(i);
            Some(s)
        }
    }

    /// Decodes the slice to bytes.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    #[must_use]
    pub fn to_bytes(self) -> Cow<'a, [u8]> {
        if !self.source.contains('%') {
            return Cow::Borrowed(self.source.as_bytes());
        }

        let decoded_len = self.source.len() - self.source.matches('%').count() * 2;
        let mut buf = Vec::with_capacity(decoded_len);
        for chunk in self {
            match chunk {
                DecodedChunk::Unencoded(s) => buf.extend_from_slice(s.as_bytes()),
                DecodedChunk::PctDecoded(x) => buf.push(x),
            }
        }
        Cow::Owned(buf)
    }

    /// Attempts to decode the slice to a string.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    ///
    /// # Errors
    ///
    /// Returns `Err` containing the decoded bytes if they are not valid UTF-8.
    pub fn to_string(self) -> Result<Cow<'a, str>, Vec<u8>> {
        match self.to_bytes() {
            Cow::Borrowed(bytes) => match str::from_utf8(bytes) {
                Ok(s) => Ok(Cow::Borrowed(s)),
                Err(_) => Err(bytes.to_vec()),
            },
            Cow::Owned(bytes) => String::from_utf8(bytes)
                .map(Cow::Owned)
                .map_err(|e| e.into_bytes()),
        }
    }

    /// Decodes the slice to a string, replacing any invalid UTF-8 sequences with
    /// [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
    ///
    /// [U+FFFD]: char::REPLACEMENT_CHARACTER
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    #[must_use]
    pub fn to_string_lossy(self) -> Cow<'a, str> {
        match self.to_bytes() {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => match String::from_utf8(bytes) {
                Ok(s) => Cow::Owned(s),
                Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            },
        }
    }
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            None
        } else if let Some(s) = self.next_if_unencoded() {
            Some(DecodedChunk::Unencoded(s))
        } else {
            let s;
            (s, self.source) = self.source.split_at(3);
            let x = decode_octet(s.as_bytes()[1], s.as_bytes()[2]);
            Some(DecodedChunk::PctDecoded(x))
        }
    }
}

impl FusedIterator for Decode<'_> {}

/// An iterator over subslices of an [`EStr`] slice separated by a delimiter.
///
/// This struct is created by [`EStr::split`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Split<'a> {
    inner: str::Split<'a, char>,
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a EStr;

    fn next(&mut self) -> Option<&'a EStr> {
        self.inner.next().map(EStr::new_validated)
    }
}

impl<'a> DoubleEndedIterator for Split<'a> {
    fn next_back(&mut self) -> Option<&'a EStr> {
        self.inner.next_back().map(EStr::new_validated)
    }
}

impl FusedIterator for Split<'_> {}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// Percent-encodes a string slice with the given table and appends
/// the result to a buffer.
///
/// Every byte not allowed unencoded by the table is encoded with
/// uppercase hexadecimal digits, including `'%'`.
///
/// # Examples
///
/// ```
/// use uri_normalize::pct_enc::{self, table};
///
/// let mut buf = String::new();
/// pct_enc::encode(&mut buf, "a b&c=d", table::QUERY_PAIR);
/// assert_eq!(buf, "a%20b%26c%3Dd");
/// ```
pub fn encode(buf: &mut String, s: &str, table: Table) {
    buf.reserve(s.len());
    for x in s.bytes() {
        if table.allows_ascii(x) {
            buf.push(x as char);
        } else {
            buf.push_str(encode_byte(x));
        }
    }
}

/// Normalizes the percent-encoded octets in a string slice.
///
/// An octet that decodes to an [unreserved] character is decoded, and any
/// other octet has its hexadecimal digits uppercased. Unencoded characters
/// are left untouched, as are `'%'` characters not starting a complete octet.
///
/// Returns the input borrowed when nothing is changed.
///
/// [unreserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.3
///
/// # Examples
///
/// ```
/// use uri_normalize::pct_enc;
///
/// assert_eq!(pct_enc::normalize_triplets("%7efoo%2f%41"), "~foo%2FA");
/// assert_eq!(pct_enc::normalize_triplets("%2F"), "%2F");
/// ```
#[must_use]
pub fn normalize_triplets(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let needs_change = |i: usize| {
        let (hi, lo) = (bytes[i + 1], bytes[i + 2]);
        table::UNRESERVED.allows_ascii(decode_octet(hi, lo))
            || hi.is_ascii_lowercase()
            || lo.is_ascii_lowercase()
    };

    let mut i = 0;
    let mut first_change = None;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() && is_hexdig_pair(bytes[i + 1], bytes[i + 2]) {
            if needs_change(i) {
                first_change = Some(i);
                break;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let Some(start) = first_change else {
        return Cow::Borrowed(s);
    };

    let mut buf = String::with_capacity(s.len());
    buf.push_str(&s[..start]);

    let mut i = start;
    let mut last = start;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() && is_hexdig_pair(bytes[i + 1], bytes[i + 2]) {
            buf.push_str(&s[last..i]);
            let x = decode_octet(bytes[i + 1], bytes[i + 2]);
            if table::UNRESERVED.allows_ascii(x) {
                buf.push(x as char);
            } else {
                buf.push_str(encode_byte(x));
            }
            i += 3;
            last = i;
        } else {
            i += 1;
        }
    }
    buf.push_str(&s[last..]);
    Cow::Owned(buf)
}
