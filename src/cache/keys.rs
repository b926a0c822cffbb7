//! Cache key derivation for stored pages.
//!
//! A page is addressed by the URL path split into directory segments plus a
//! basename; the basename may carry a bracketed, sanitized query-string
//! suffix. [`join`] is the single path-composition rule used everywhere a
//! cache path is built from parts.

/// Basename used when the URL path has no non-empty segments (`/`).
pub const INDEX_BASENAME: &str = "__index";

/// Characters allowed to survive query-string sanitization.
///
/// Everything else is stripped so a hostile query string cannot smuggle
/// path separators or traversal sequences into the stored file name.
fn is_safe_query_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '=' | '&' | '-')
}

/// Derived location of a cache entry relative to the cache root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageKey {
    /// Directory segments under the cache root. Never contains empties.
    pub directory: Vec<String>,
    /// File basename without extension. Never empty.
    pub basename: String,
}

/// Derive the cache key for a URL path and optional raw query string.
///
/// Repeated slashes collapse, the last non-empty segment becomes the
/// basename (or [`INDEX_BASENAME`] when none remain), and a present,
/// non-empty query string appends `[<sanitized>]` to the basename.
pub fn encode(url_path: &str, raw_query: Option<&str>) -> PageKey {
    let mut segments: Vec<&str> = url_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let mut basename = segments.pop().unwrap_or(INDEX_BASENAME).to_string();

    if let Some(query) = raw_query
        && !query.is_empty()
    {
        basename.push('[');
        basename.push_str(&sanitize_query(query));
        basename.push(']');
    }

    PageKey {
        directory: segments.into_iter().map(str::to_string).collect(),
        basename,
    }
}

/// Strip every character outside `[A-Za-z0-9_=&-]` from a raw query string.
pub fn sanitize_query(raw: &str) -> String {
    raw.chars().filter(|ch| is_safe_query_char(*ch)).collect()
}

/// Join path parts with `/`, trimming slashes from every part and dropping
/// empties. When the base started with `/` the result is re-prefixed so the
/// absolute or relative form of the configured root is preserved.
pub fn join<'a, I>(base: &str, parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let absolute = base.starts_with('/');

    let mut joined = String::new();
    push_segment(&mut joined, base);
    for part in parts {
        push_segment(&mut joined, part);
    }

    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

fn push_segment(out: &mut String, piece: &str) {
    let trimmed = piece.trim_matches('/');
    if trimmed.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push('/');
    }
    out.push_str(trimmed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_splits_directory_and_basename() {
        let key = encode("/blog/2024/my-post", None);
        assert_eq!(key.directory, vec!["blog".to_string(), "2024".to_string()]);
        assert_eq!(key.basename, "my-post");
    }

    #[test]
    fn encode_collapses_repeated_and_trailing_slashes() {
        let key = encode("//a///b//", None);
        assert_eq!(key.directory, vec!["a".to_string()]);
        assert_eq!(key.basename, "b");
    }

    #[test]
    fn encode_root_path_uses_index_token() {
        let key = encode("/", None);
        assert!(key.directory.is_empty());
        assert_eq!(key.basename, INDEX_BASENAME);
    }

    #[test]
    fn encode_empty_path_uses_index_token() {
        let key = encode("", None);
        assert_eq!(key.basename, INDEX_BASENAME);
    }

    #[test]
    fn encode_appends_query_suffix() {
        let key = encode("/api/items", Some("id=5&sort=asc"));
        assert_eq!(key.basename, "items[id=5&sort=asc]");
    }

    #[test]
    fn encode_ignores_empty_query() {
        let key = encode("/api/items", Some(""));
        assert_eq!(key.basename, "items");
    }

    #[test]
    fn query_suffix_on_index_basename() {
        let key = encode("/", Some("page=2"));
        assert_eq!(key.basename, "__index[page=2]");
    }

    #[test]
    fn sanitize_query_strips_traversal_attempts() {
        let sanitized = sanitize_query("id=5&path=../../etc/passwd%00");
        assert_eq!(sanitized, "id=5&path=etcpasswd00");
        assert!(sanitized.chars().all(is_safe_query_char));
    }

    #[test]
    fn sanitize_query_keeps_full_safe_alphabet() {
        let raw = "a-b_c=1&d=2";
        assert_eq!(sanitize_query(raw), raw);
    }

    #[test]
    fn join_preserves_absolute_base() {
        assert_eq!(
            join("/var/cache", ["blog", "my-post.html"]),
            "/var/cache/blog/my-post.html"
        );
    }

    #[test]
    fn join_preserves_relative_base() {
        assert_eq!(join("public/static-cache", ["a"]), "public/static-cache/a");
    }

    #[test]
    fn join_trims_and_drops_empty_parts() {
        assert_eq!(join("/root/", ["/a/", "", "b//"]), "/root/a/b");
    }

    #[test]
    fn join_with_no_parts_normalizes_base() {
        assert_eq!(join("/root/", std::iter::empty()), "/root");
    }
}
