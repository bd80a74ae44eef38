use crate::{
    component::UriComponents,
    error::{ParseError, ParseErrorKind},
    pct_enc::{
        self,
        table::{self, Table},
    },
};
use alloc::string::{String, ToString};
use core::ops::{Deref, DerefMut};

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        })
    };
}

pub(crate) fn parse(s: &str) -> Result<UriComponents> {
    let mut parser = Parser {
        src: s,
        reader: Reader::new(s.as_bytes()),
        out: UriComponents::default(),
    };
    parser.parse_from_scheme()?;
    Ok(parser.out)
}

/// URI reference parser.
///
/// # Invariants
///
/// `pos <= len`, `pos` is on the boundary of a UTF-8 code point.
///
/// # Preconditions and guarantees
///
/// Before parsing, ensure that `pos == 0` and `out` is default initialized.
///
/// Start and finish parsing by calling `parse_from_scheme`.
/// When parsing succeeds, every component written to `out` is validated
/// against its table and every percent-encoded octet in it is complete.
struct Parser<'a> {
    src: &'a str,
    reader: Reader<'a>,
    out: UriComponents,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl DerefMut for Parser<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    #[cold]
    fn invalid_pct(&self, i: usize) -> Result<bool> {
        let mut i = i + 1;
        if let Some(&x) = self.bytes.get(i) {
            if pct_enc::is_hexdig(x) {
                i += 1;
            }
        }
        err!(i, UnexpectedCharOrEnd);
    }

    /// Reads as many bytes allowed by the table as possible.
    ///
    /// Returns `Ok(true)` if anything is read.
    fn read(&mut self, table: Table) -> Result<bool> {
        let start = self.pos;
        let mut i = self.pos;

        while i < self.len() {
            let x = self.bytes[i];
            if table.allows_pct_encoded() && x == b'%' {
                let [hi, lo, ..] = self.bytes[i + 1..] else {
                    return self.invalid_pct(i);
                };
                if !pct_enc::is_hexdig_pair(hi, lo) {
                    return self.invalid_pct(i);
                }
                i += 3;
            } else if table.allows_ascii(x) {
                i += 1;
            } else {
                break;
            }
        }

        // INVARIANT: Only ASCII bytes are skipped.
        self.pos = i;
        Ok(self.pos > start)
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    /// Returns the index of the first byte at or after `pos` that is
    /// one of the given delimiters, or the end of input.
    fn find_any(&self, delims: &[u8]) -> usize {
        self.bytes[self.pos..]
            .iter()
            .position(|x| delims.contains(x))
            .map_or(self.len(), |i| self.pos + i)
    }
}

impl Parser<'_> {
    fn slice(&self, start: usize, end: usize) -> String {
        self.src[start..end].to_string()
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        let mut has_scheme = false;
        // Only an ASCII letter can start a scheme.
        if matches!(self.peek(0), Some(x) if table::ALPHA.allows_ascii(x)) {
            let mut i = 1;
            while matches!(self.peek(i), Some(x) if table::SCHEME.allows_ascii(x)) {
                i += 1;
            }
            if self.peek(i) == Some(b':') {
                self.out.scheme = Some(self.slice(0, i));
                // INVARIANT: Skipping the scheme and ":" is fine.
                self.skip(i + 1);
                has_scheme = true;
            }
        }

        let has_authority = self.read_str("//");
        if has_authority {
            self.parse_authority()?;
        }

        self.parse_path(!has_scheme && !has_authority)?;

        if self.read_str("?") {
            let start = self.pos;
            self.read(table::QUERY)?;
            self.out.query = Some(self.slice(start, self.pos));
        }

        if self.read_str("#") {
            let start = self.pos;
            self.read(table::FRAGMENT)?;
            self.out.fragment = Some(self.slice(start, self.pos));
        }

        if self.has_remaining() {
            err!(self.pos, UnexpectedCharOrEnd);
        }
        Ok(())
    }

    fn parse_authority(&mut self) -> Result<()> {
        let src = self.src;
        let start = self.pos;
        self.read(table::USERINFO)?;

        if self.read_str("@") {
            let userinfo = &src[start..self.pos - 1];
            match userinfo.split_once(':') {
                Some((user, password)) => {
                    self.out.user = Some(user.to_string());
                    self.out.password = Some(password.to_string());
                }
                None => self.out.user = Some(userinfo.to_string()),
            }
        } else {
            // Nothing read as userinfo. Start over for the host.
            self.pos = start;
        }

        let host_start = self.pos;
        if self.read_str("[") {
            let addr_start = self.pos;
            if self.read(table::IP_LITERAL).is_err()
                || self.pos == addr_start
                || !self.read_str("]")
            {
                err!(host_start, InvalidIpLiteral);
            }
        } else {
            self.read(table::REG_NAME)?;
        }
        self.out.host = Some(self.slice(host_start, self.pos));

        if self.read_str(":") {
            let port_start = self.pos;
            let port_end = self.find_any(b"/?#");
            let port = &src[port_start..port_end];

            if !port.is_empty() {
                if !port.bytes().all(|x| x.is_ascii_digit()) {
                    err!(port_start, InvalidPort);
                }
                match port.parse() {
                    Ok(port) => self.out.port = Some(port),
                    Err(_) => err!(port_start, InvalidPort),
                }
            }
            // INVARIANT: The port is ASCII.
            self.skip(port_end - port_start);
        }

        if !matches!(self.peek(0), None | Some(b'/' | b'?' | b'#')) {
            err!(self.pos, UnexpectedCharOrEnd);
        }
        Ok(())
    }

    fn parse_path(&mut self, first_segment_no_colon: bool) -> Result<()> {
        let src = self.src;
        let start = self.pos;
        self.read(table::PATH)?;
        let path = &src[start..self.pos];

        if first_segment_no_colon {
            let first_segment = path.split('/').next().unwrap_or_default();
            if let Some(i) = first_segment.find(':') {
                err!(start + i, UnexpectedCharOrEnd);
            }
        }

        self.out.path = path.to_string();
        Ok(())
    }
}
