use uri_normalize::{ParseErrorKind, UriComponents};

#[test]
fn parse_absolute() {
    let u = UriComponents::parse("file:///etc/hosts").unwrap();
    assert_eq!(u.scheme(), Some("file"));
    assert!(u.user().is_none());
    assert!(u.password().is_none());
    assert_eq!(u.host().unwrap(), "");
    assert_eq!(u.port(), None);
    assert_eq!(u.path(), "/etc/hosts");
    assert!(u.query().is_none());
    assert!(u.fragment().is_none());
    assert!(!u.has_authority());

    let u = UriComponents::parse("ftp://ftp.is.co.za/rfc/rfc1808.txt").unwrap();
    assert_eq!(u.scheme(), Some("ftp"));
    assert_eq!(u.host().unwrap(), "ftp.is.co.za");
    assert_eq!(u.path(), "/rfc/rfc1808.txt");
    assert!(u.has_authority());

    let u = UriComponents::parse("http://www.ietf.org/rfc/rfc2396.txt").unwrap();
    assert_eq!(u.scheme(), Some("http"));
    assert_eq!(u.host().unwrap(), "www.ietf.org");
    assert_eq!(u.path(), "/rfc/rfc2396.txt");

    let u = UriComponents::parse("ldap://[2001:db8::7]/c=GB?objectClass?one").unwrap();
    assert_eq!(u.scheme(), Some("ldap"));
    assert_eq!(u.host().unwrap(), "[2001:db8::7]");
    assert_eq!(u.path(), "/c=GB");
    assert_eq!(u.query().unwrap(), "objectClass?one");

    let u = UriComponents::parse("mailto:John.Doe@example.com").unwrap();
    assert_eq!(u.scheme(), Some("mailto"));
    assert!(u.host().is_none());
    assert_eq!(u.path(), "John.Doe@example.com");
    assert!(!u.has_authority());

    let u = UriComponents::parse("tel:+1-816-555-1212").unwrap();
    assert_eq!(u.scheme(), Some("tel"));
    assert_eq!(u.path(), "+1-816-555-1212");

    let u = UriComponents::parse("telnet://192.0.2.16:80/").unwrap();
    assert_eq!(u.scheme(), Some("telnet"));
    assert_eq!(u.host().unwrap(), "192.0.2.16");
    assert_eq!(u.port(), Some(80));
    assert_eq!(u.path(), "/");

    let u = UriComponents::parse("urn:oasis:names:specification:docbook:dtd:xml:4.1.2").unwrap();
    assert_eq!(u.scheme(), Some("urn"));
    assert_eq!(u.path(), "oasis:names:specification:docbook:dtd:xml:4.1.2");

    let u = UriComponents::parse("foo://user:pa:ss@host:8042/over?name=ferret#nose").unwrap();
    assert_eq!(u.user().unwrap(), "user");
    assert_eq!(u.password().unwrap(), "pa:ss");
    assert_eq!(u.host().unwrap(), "host");
    assert_eq!(u.port(), Some(8042));
    assert_eq!(u.fragment().unwrap(), "nose");
}

#[test]
fn parse_relative() {
    let u = UriComponents::parse("").unwrap();
    assert_eq!(u, UriComponents::new());
    assert_eq!(u.path(), "");

    let u = UriComponents::parse("?#").unwrap();
    assert!(u.scheme().is_none());
    assert_eq!(u.path(), "");
    assert_eq!(u.query().unwrap(), "");
    assert_eq!(u.fragment().unwrap(), "");

    let u = UriComponents::parse("../a/b?q").unwrap();
    assert!(u.scheme().is_none());
    assert_eq!(u.path(), "../a/b");
    assert_eq!(u.query().unwrap(), "q");

    let u = UriComponents::parse("//example.com").unwrap();
    assert!(u.scheme().is_none());
    assert_eq!(u.host().unwrap(), "example.com");
    assert_eq!(u.path(), "");

    // A colon after the first segment is fine.
    let u = UriComponents::parse("a/b:c").unwrap();
    assert_eq!(u.path(), "a/b:c");
    let u = UriComponents::parse("./a:b").unwrap();
    assert_eq!(u.path(), "./a:b");
}

#[test]
fn parse_authority() {
    // An empty userinfo still has the `'@'`.
    let u = UriComponents::parse("//@host").unwrap();
    assert_eq!(u.user().unwrap(), "");
    assert!(u.password().is_none());
    assert_eq!(u.host().unwrap(), "host");
    assert!(u.has_authority());

    let u = UriComponents::parse("//:pass@host").unwrap();
    assert_eq!(u.user().unwrap(), "");
    assert_eq!(u.password().unwrap(), "pass");

    // An empty host is not an authority.
    let u = UriComponents::parse("http://").unwrap();
    assert_eq!(u.host().unwrap(), "");
    assert!(!u.has_authority());

    // An empty port is absent.
    let u = UriComponents::parse("http://example.com:/").unwrap();
    assert_eq!(u.port(), None);
    assert_eq!(u.build().unwrap(), "http://example.com/");

    let u = UriComponents::parse("http://:8080").unwrap();
    assert_eq!(u.host().unwrap(), "");
    assert_eq!(u.port(), Some(8080));
    assert!(u.has_authority());

    let u = UriComponents::parse("http://[::1]:65535/x").unwrap();
    assert_eq!(u.host().unwrap(), "[::1]");
    assert_eq!(u.port(), Some(65535));

    let u = UriComponents::parse("http://[v1.fe80::a+en1]").unwrap();
    assert_eq!(u.host().unwrap(), "[v1.fe80::a+en1]");

    let u = UriComponents::parse("http://ex%2fample.com").unwrap();
    assert_eq!(u.host().unwrap(), "ex%2fample.com");
}

#[test]
fn parse_error() {
    fn fail(s: &str, index: usize, kind: ParseErrorKind) {
        let e = UriComponents::parse(s).unwrap_err();
        assert_eq!((e.index(), e.kind()), (index, kind), "{s}");
    }

    use ParseErrorKind::*;

    // Empty scheme
    fail(":hello", 0, UnexpectedCharOrEnd);
    // Scheme starting with a digit, taken as a path
    fail("3ttp://a.com", 4, UnexpectedCharOrEnd);
    // Colon in the first segment of a relative reference
    fail("1a:b", 2, UnexpectedCharOrEnd);

    // Unexpected character
    fail("sindresorhus.com ", 16, UnexpectedCharOrEnd);
    fail("Ãªxample.com", 0, UnexpectedCharOrEnd);
    fail("http://sindresorhus.com/?foo=bar*|<>", 33, UnexpectedCharOrEnd);
    fail("http://a b/", 8, UnexpectedCharOrEnd);
    fail("http://a@b@c/", 10, UnexpectedCharOrEnd);
    fail("#a#b", 2, UnexpectedCharOrEnd);

    // Invalid percent-encoded octet
    fail("%zz", 1, UnexpectedCharOrEnd);
    fail("%a", 2, UnexpectedCharOrEnd);
    fail("%", 1, UnexpectedCharOrEnd);
    fail("https://foo.com/%FAIL%/07/94/ca/55.jpg", 22, UnexpectedCharOrEnd);
    fail("http://%x@example.com", 8, UnexpectedCharOrEnd);

    // Invalid port
    fail("http://example.com:65536/", 19, InvalidPort);
    fail("http://example.com:8o/", 19, InvalidPort);
    fail("http://example.com:-1", 19, InvalidPort);
    fail("http://example.com:+80", 19, InvalidPort);

    // Invalid IP literal
    fail("http://[::1/", 7, InvalidIpLiteral);
    fail("http://[]/", 7, InvalidIpLiteral);
    fail("http://[::1", 7, InvalidIpLiteral);
    fail("http://[a%41]/", 7, InvalidIpLiteral);
    // Characters after the IP literal
    fail("http://[::1]x/", 12, UnexpectedCharOrEnd);
}

#[test]
fn parse_from_str() {
    let u: UriComponents = "http://example.com/?a".parse().unwrap();
    assert_eq!(u.query().unwrap(), "a");
    assert!("http://a b".parse::<UriComponents>().is_err());
}

#[test]
fn query_pairs() {
    let u = UriComponents::parse("?a=1&b&=&c=x=y&&a=%32").unwrap();
    let pairs: Vec<_> = u
        .query_pairs()
        .unwrap()
        .map(|(k, v)| (k.as_str(), v.map(|v| v.as_str())))
        .collect();
    assert_eq!(
        pairs,
        [
            ("a", Some("1")),
            ("b", None),
            ("", Some("")),
            ("c", Some("x=y")),
            ("", None),
            ("a", Some("%32")),
        ]
    );

    let u = UriComponents::parse("?").unwrap();
    assert_eq!(u.query_pairs().unwrap().count(), 0);

    let u = UriComponents::parse("/").unwrap();
    assert!(u.query_pairs().is_none());
}
