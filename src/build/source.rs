use std::path::{Path, PathBuf};

use tracing::{debug, error};

use super::front_matter::{FrontMatterError, ParsedContent, parse_front_matter};
use super::post::{Post, PostError};
use crate::config::SiteConfig;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("content directory does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("content path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {}: {source}", .path.display())]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} content file(s) failed to load:\n{}", .0.len(), format_errors(.0))]
    Content(Vec<ContentError>),
}

/// Why a single content file could not become a post.
#[derive(thiserror::Error, Debug)]
pub enum ContentErrorKind {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Post(#[from] PostError),
}

/// A per-file content error, tagged with the file it came from.
#[derive(thiserror::Error, Debug)]
#[error("{}: {kind}", .path.display())]
pub struct ContentError {
    pub path: PathBuf,
    pub kind: ContentErrorKind,
}

fn format_errors(errors: &[ContentError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Content source
// =============================================================================

/// A directory of markdown posts.
#[derive(Debug, Clone)]
pub struct ContentSource {
    /// The content directory
    pub local_path: PathBuf,
}

impl ContentSource {
    /// Open a content directory, validating that it exists.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            return Err(SourceError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(SourceError::NotADirectory(path.to_path_buf()));
        }
        Ok(Self {
            local_path: path.to_path_buf(),
        })
    }

    /// List the markdown files in the directory, in file-name order.
    ///
    /// Hidden files and subdirectories are skipped.
    pub async fn discover(&self) -> Result<Vec<PathBuf>, SourceError> {
        let dir = &self.local_path;
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| SourceError::ReadDir {
                path: dir.clone(),
                source: e,
            })?;

        let mut files = Vec::new();
        loop {
            let entry = entries
                .next_entry()
                .await
                .map_err(|e| SourceError::ReadEntry {
                    path: dir.clone(),
                    source: e,
                })?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            let file_name = entry.file_name();
            if file_name.to_string_lossy().starts_with('.') {
                continue;
            }
            if path.is_file() && is_markdown(&path) {
                files.push(path);
            }
        }

        // Directory iteration order is platform-dependent
        files.sort();
        Ok(files)
    }

    /// Read every markdown file and build its post.
    ///
    /// All files are attempted; if any fail, every failure is logged and
    /// returned together so one run reports the whole set.
    pub async fn load_posts(&self, config: &SiteConfig) -> Result<Vec<Post>, SourceError> {
        let files = self.discover().await?;
        debug!(count = files.len(), dir = %self.local_path.display(), "discovered content files");

        let mut posts = Vec::with_capacity(files.len());
        let mut errors = Vec::new();

        for path in files {
            match load_post(&path, config).await {
                Ok(post) => {
                    debug!(slug = %post.slug, kind = %post.post_type, "loaded post");
                    posts.push(post);
                }
                Err(kind) => {
                    let err = ContentError { path, kind };
                    error!("{err}");
                    errors.push(err);
                }
            }
        }

        if errors.is_empty() {
            Ok(posts)
        } else {
            Err(SourceError::Content(errors))
        }
    }
}

/// Read one content file and split it into front matter and body.
pub async fn read_content_file(path: &Path) -> Result<ParsedContent, ContentErrorKind> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(parse_front_matter(&raw)?)
}

async fn load_post(path: &Path, config: &SiteConfig) -> Result<Post, ContentErrorKind> {
    let parsed = read_content_file(path).await?;
    Ok(Post::from_parsed(parsed, path.to_path_buf(), config)?)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| matches!(e.as_str(), "md" | "markdown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_post(dir: &Path, file: &str, slug: &str, date: &str) {
        std::fs::write(
            dir.join(file),
            format!("---\nslug: {slug}\ntitle: {slug}\ndate: {date}\ntype: generated\n---\nBody\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("post.md")));
        assert!(is_markdown(Path::new("post.MD")));
        assert!(is_markdown(Path::new("post.markdown")));
        assert!(!is_markdown(Path::new("image.png")));
        assert!(!is_markdown(Path::new("README")));
    }

    #[test]
    fn test_open_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            ContentSource::open(&missing),
            Err(SourceError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_open_file_is_not_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.md");
        std::fs::write(&file, "").unwrap();
        assert!(matches!(
            ContentSource::open(&file),
            Err(SourceError::NotADirectory(_))
        ));
    }

    #[tokio::test]
    async fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.md"), "").unwrap();
        std::fs::write(dir.path().join("a.markdown"), "").unwrap();
        std::fs::write(dir.path().join(".hidden.md"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.md")).unwrap();

        let source = ContentSource::open(dir.path()).unwrap();
        let files = source.discover().await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.markdown", "b.md"]);
    }

    #[tokio::test]
    async fn test_load_posts() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "first.md", "first", "2025-01-01");
        write_post(dir.path(), "second.md", "second", "2025-02-01");

        let source = ContentSource::open(dir.path()).unwrap();
        let posts = source.load_posts(&SiteConfig::default()).await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_load_posts_collects_all_errors() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "good.md", "good", "2025-01-01");
        std::fs::write(dir.path().join("no-front-matter.md"), "# Title\n").unwrap();
        std::fs::write(
            dir.path().join("no-date.md"),
            "---\nslug: x\ntitle: X\ntype: generated\n---\n",
        )
        .unwrap();

        let source = ContentSource::open(dir.path()).unwrap();
        let err = source.load_posts(&SiteConfig::default()).await.unwrap_err();
        match err {
            SourceError::Content(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(matches!(
                    errors[0].kind,
                    ContentErrorKind::Post(PostError::MissingField("date"))
                ));
                assert!(matches!(
                    errors[1].kind,
                    ContentErrorKind::FrontMatter(FrontMatterError::Missing)
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
