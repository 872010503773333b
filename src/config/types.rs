//! Configuration type definitions.
//!
//! These types are pure data - no I/O or complex logic. Every field has a
//! default so a project can build without any config file at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// =============================================================================
// Site configuration
// =============================================================================

/// Everything the pipeline needs to know about a site.
///
/// Built once per run and passed by reference into every stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site origin used for canonical URLs (e.g., "https://example.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// URL path under which posts are served (e.g., "/blog/posts/")
    #[serde(default = "default_post_url_prefix")]
    pub post_url_prefix: String,
    /// Directory containing the markdown posts
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Directory containing the post and index templates
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    /// File name of the post template inside `templates_dir`
    #[serde(default = "default_post_template")]
    pub post_template: String,
    /// File name of the index template inside `templates_dir`
    #[serde(default = "default_index_template")]
    pub index_template: String,
    /// Output root. The index lands at `<output_dir>/index.html`,
    /// generated posts at `<output_dir>/posts/<slug>/index.html`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// What to do with placeholders that have no matching field
    #[serde(default)]
    pub placeholders: PlaceholderPolicy,
    /// Whether to verify that manual posts' pages exist on disk
    #[serde(default)]
    pub manual_pages: ManualPageCheck,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

fn default_base_url() -> String {
    "https://example.com".to_string()
}

fn default_post_url_prefix() -> String {
    "/blog/posts/".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content/blog")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_post_template() -> String {
    "blog-post.html".to_string()
}

fn default_index_template() -> String {
    "blog-index.html".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public/blog")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            post_url_prefix: default_post_url_prefix(),
            content_dir: default_content_dir(),
            templates_dir: default_templates_dir(),
            post_template: default_post_template(),
            index_template: default_index_template(),
            output_dir: default_output_dir(),
            placeholders: PlaceholderPolicy::default(),
            manual_pages: ManualPageCheck::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// A config rooted at `root`: content, templates and output all live
    /// under that directory using the default relative layout.
    pub fn rooted_at(root: &Path) -> Self {
        let mut config = Self::default();
        config.resolve_paths(root);
        config
    }

    /// Resolve relative directory paths against a base path
    /// (typically the config file's directory).
    pub fn resolve_paths(&mut self, base_path: &Path) {
        for path in [
            &mut self.content_dir,
            &mut self.templates_dir,
            &mut self.output_dir,
        ] {
            if path.is_relative() {
                *path = base_path.join(&*path);
            }
        }
    }

    /// Path to the post template file.
    pub fn post_template_path(&self) -> PathBuf {
        self.templates_dir.join(&self.post_template)
    }

    /// Path to the index template file.
    pub fn index_template_path(&self) -> PathBuf {
        self.templates_dir.join(&self.index_template)
    }
}

// =============================================================================
// Policies
// =============================================================================

/// How the substitution engine treats `{{key}}` tokens with no matching field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderPolicy {
    /// Leave the token verbatim in the output.
    #[default]
    Permissive,
    /// Fail the build, naming every unresolved key.
    Strict,
}

/// Existence check for the pre-authored pages of manual posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManualPageCheck {
    /// Don't look.
    Off,
    /// Log a warning for every missing page.
    #[default]
    Warn,
    /// Fail the build on the first missing page.
    Error,
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "gfm".to_string(),
        "tables".to_string(),
        "strikethrough".to_string(),
        "tasklists".to_string(),
        "footnotes".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}
