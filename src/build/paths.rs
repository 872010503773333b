//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - Slugs (the identity of a post)
//! - URL paths (where a post is served, relative to the site)
//! - Canonical URLs (absolute, including the site origin)
//! - Output file paths (where files are written in the output directory)

use std::path::{Path, PathBuf};

/// Directory under the output root that holds one directory per post.
pub const POSTS_DIR: &str = "posts";

/// File name written for every page (post or index).
pub const INDEX_FILE: &str = "index.html";

/// Convert a slug to the site-relative URL of its post.
///
/// # Examples
/// ```ignore
/// post_url("/blog/posts/", "hello") => "/blog/posts/hello/"
/// post_url("/blog/posts", "hello") => "/blog/posts/hello/"
/// ```
pub fn post_url(url_prefix: &str, slug: &str) -> String {
    let mut url = url_prefix.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str(slug);
    url.push('/');
    url
}

/// Convert a slug to the absolute canonical URL of its post.
///
/// # Examples
/// ```ignore
/// canonical_url("https://example.com/", "/blog/posts/", "hello")
///     => "https://example.com/blog/posts/hello/"
/// ```
pub fn canonical_url(base_url: &str, url_prefix: &str, slug: &str) -> String {
    format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        post_url(url_prefix, slug)
    )
}

/// Directory a post's page is written into.
/// "hello" -> "output_dir/posts/hello"
pub fn post_output_dir(output_dir: &Path, slug: &str) -> PathBuf {
    output_dir.join(POSTS_DIR).join(slug)
}

/// File a post's page is written to.
/// "hello" -> "output_dir/posts/hello/index.html"
pub fn post_output_path(output_dir: &Path, slug: &str) -> PathBuf {
    post_output_dir(output_dir, slug).join(INDEX_FILE)
}

/// File the blog index is written to.
pub fn index_output_path(output_dir: &Path) -> PathBuf {
    output_dir.join(INDEX_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_url() {
        assert_eq!(post_url("/blog/posts/", "hello"), "/blog/posts/hello/");
        assert_eq!(post_url("/blog/posts", "hello"), "/blog/posts/hello/");
        assert_eq!(post_url("/", "hello"), "/hello/");
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(
            canonical_url("https://example.com", "/blog/posts/", "hello"),
            "https://example.com/blog/posts/hello/"
        );
        assert_eq!(
            canonical_url("https://example.com/", "/blog/posts/", "hello"),
            "https://example.com/blog/posts/hello/"
        );
    }

    #[test]
    fn test_post_output_path() {
        let output = Path::new("/site/blog");
        assert_eq!(
            post_output_path(output, "hello"),
            PathBuf::from("/site/blog/posts/hello/index.html")
        );
    }

    #[test]
    fn test_index_output_path() {
        assert_eq!(
            index_output_path(Path::new("/site/blog")),
            PathBuf::from("/site/blog/index.html")
        );
    }
}
