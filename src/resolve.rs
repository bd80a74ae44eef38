use alloc::{string::String, vec::Vec};

/// Removes dot segments from a path with the algorithm from
/// [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4).
///
/// A `".."` segment with no preceding segment to remove is dropped.
/// Percent-encoded dots count as dots. A path ending with a dot segment
/// keeps its trailing slash, and a leading slash is always kept.
pub(crate) fn remove_dot_segments(path: &str) -> String {
    let (root, rest) = match path.strip_prefix('/') {
        Some(rest) => ("/", rest),
        None => ("", path),
    };

    let mut out: Vec<&str> = Vec::new();
    let mut segs = rest.split('/').peekable();

    while let Some(seg) = segs.next() {
        let is_last = segs.peek().is_none();
        match classify_segment(seg) {
            SegKind::Dot => {}
            SegKind::DoubleDot => {
                out.pop();
            }
            SegKind::Normal => {
                out.push(seg);
                continue;
            }
        }
        if is_last {
            out.push("");
        }
    }

    let mut buf = String::with_capacity(path.len());
    buf.push_str(root);
    for (i, seg) in out.iter().enumerate() {
        if i != 0 {
            buf.push('/');
        }
        buf.push_str(seg);
    }
    buf
}

enum SegKind {
    Dot,
    DoubleDot,
    Normal,
}

fn classify_segment(mut seg: &str) -> SegKind {
    if seg.is_empty() {
        return SegKind::Normal;
    }
    if let Some(rem) = seg.strip_prefix('.') {
        seg = rem;
    } else if let Some(rem) = seg.strip_prefix("%2E") {
        seg = rem;
    } else if let Some(rem) = seg.strip_prefix("%2e") {
        seg = rem;
    } else {
        return SegKind::Normal;
    }
    if seg.is_empty() {
        SegKind::Dot
    } else if seg == "." || seg == "%2E" || seg == "%2e" {
        SegKind::DoubleDot
    } else {
        SegKind::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::remove_dot_segments;

    #[test]
    fn dot_segments() {
        // Examples from Section 5.2.4 of RFC 3986.
        assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
        assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");

        assert_eq!(remove_dot_segments("/foo/./bar/baz/../qux"), "/foo/bar/qux");
        assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
        assert_eq!(remove_dot_segments("/a/."), "/a/");
        assert_eq!(remove_dot_segments("/a//../b"), "/a/b");
        assert_eq!(remove_dot_segments("/"), "/");
        assert_eq!(remove_dot_segments("/a/b/"), "/a/b/");

        // Underflow.
        assert_eq!(remove_dot_segments("/.."), "/");
        assert_eq!(remove_dot_segments("/../../g"), "/g");
        assert_eq!(remove_dot_segments("../a"), "a");
        assert_eq!(remove_dot_segments("a/.."), "");

        // Percent-encoded dots.
        assert_eq!(remove_dot_segments("/a/b/c/%2E/%2E./%2e%2E/d"), "/a/d");

        // Not dot segments.
        assert_eq!(remove_dot_segments("/.a/..b/.../c."), "/.a/..b/.../c.");

        // A leading empty segment may surface.
        assert_eq!(remove_dot_segments("/.//g"), "//g");
    }
}
