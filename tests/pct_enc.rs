use std::borrow::Cow;
use uri_normalize::pct_enc::{self, table::*, DecodedChunk, EStr, Table};

const RAW: &str = "te😃a 测1`~!@试#$%st^&+=";
const ENCODED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";

#[test]
fn enc_dec() {
    let mut buf = String::new();
    pct_enc::encode(&mut buf, RAW, QUERY);
    assert_eq!(buf, ENCODED);

    let s = EStr::new(ENCODED).unwrap();
    assert_eq!(s.decode().to_bytes(), RAW.as_bytes());
    assert_eq!(s.decode().to_string().unwrap(), RAW);

    let s = EStr::new_or_panic("%2D%E6%B5");
    assert_eq!(*s.decode().to_bytes(), [0x2d, 0xe6, 0xb5]);
    assert_eq!(s.decode().to_string().unwrap_err(), [0x2d, 0xe6, 0xb5]);
    assert_eq!(s.decode().to_string_lossy(), "-\u{fffd}");

    // No allocation without percent-encoded octets.
    assert!(matches!(
        EStr::new_or_panic("abc").decode().to_bytes(),
        Cow::Borrowed(b"abc")
    ));

    let chunks: Vec<_> = EStr::new_or_panic("a%20b%2F").decode().collect();
    assert_eq!(
        chunks,
        [
            DecodedChunk::Unencoded("a"),
            DecodedChunk::PctDecoded(b' '),
            DecodedChunk::Unencoded("b"),
            DecodedChunk::PctDecoded(b'/'),
        ]
    );
}

#[test]
fn new() {
    assert!(EStr::new("").is_some());
    assert!(EStr::new("a b%2d").is_some());
    assert!(EStr::new("%2d%").is_none());
    assert!(EStr::new("%2d%f").is_none());
    assert!(EStr::new("%2d%fg").is_none());
    assert_eq!(EStr::new("%41").unwrap(), "%41");
    assert!(EStr::EMPTY.is_empty());
    assert_eq!(EStr::new_or_panic("%41b").len(), 4);
}

#[test]
#[should_panic]
fn new_or_panic() {
    let _ = EStr::new_or_panic("%zz");
}

#[test]
fn split() {
    let s = EStr::new_or_panic("id=3&name=%E5%BC%A0%E4%B8%89");
    let mut split = s.split('&');

    let it = split.next().unwrap();
    assert_eq!(it, "id=3");

    let (k, v) = it.split_once('=').unwrap();
    assert_eq!(k, "id");
    assert_eq!(v, "3");

    let it = split.next().unwrap();
    assert_eq!(it.decode().to_string().unwrap(), "name=张三");

    let (k, v) = it.split_once('=').unwrap();
    assert_eq!(k.decode().to_string().unwrap(), "name");
    assert_eq!(v.decode().to_string().unwrap(), "张三");

    assert!(split.next().is_none());
    assert!(s.split_once('#').is_none());
    assert!(s.split('&').rev().eq(["name=%E5%BC%A0%E4%B8%89", "id=3"]));
}

#[test]
#[should_panic]
fn split_with_unreserved() {
    let _ = EStr::EMPTY.split('a');
}

#[test]
fn normalize_triplets() {
    assert_eq!(pct_enc::normalize_triplets("%7efoo%2f%41"), "~foo%2FA");
    assert_eq!(pct_enc::normalize_triplets("%2e%2E%5f%2D"), ".._-");
    assert_eq!(pct_enc::normalize_triplets("%c3%a9"), "%C3%A9");
    assert_eq!(pct_enc::normalize_triplets("%3a%3A"), "%3A%3A");

    for s in ["", "abc", "%2F", "%C3%A9", "100%", "%%2F", "a%2"] {
        assert!(matches!(pct_enc::normalize_triplets(s), Cow::Borrowed(x) if x == s), "{s}");
    }
}

#[test]
fn table() {
    assert!(QUERY.allows('?'));
    assert!(QUERY.allows('/'));
    assert!(!QUERY.allows('#'));
    assert!(!QUERY.allows('%'));
    assert!(!QUERY.allows('é'));
    assert!(QUERY.allows_pct_encoded());
    assert!(!QUERY_PAIR.allows('&'));
    assert!(!QUERY_PAIR.allows('='));
    assert!(!QUERY_PAIR.allows('+'));
    assert!(QUERY_PAIR.is_subset(QUERY));

    assert!(!SCHEME.allows_pct_encoded());
    assert!(!IP_LITERAL.allows_pct_encoded());
    assert!(UNRESERVED.is_subset(PCHAR));
    assert!(PCHAR.is_subset(PATH));
    assert!(!PATH.is_subset(PCHAR));
    assert!(!USERINFO.allows('@'));
    assert!(USERINFO.allows(':'));
    assert!(!REG_NAME.allows(':'));

    let t = Table::new(b"ab").or(Table::new(b"c"));
    assert!(t.allows('c'));
    assert!(!t.sub(Table::new(b"a")).allows('a'));
    assert!(!t.allows_pct_encoded());
    assert!(t.or_pct_encoded().allows_pct_encoded());

    // Allowing percent-encoded octets doesn't allow zero bytes.
    assert!(!QUERY.allows('\0'));
}
