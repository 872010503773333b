//! Document types for pipeline processing.

use crate::build::post::Post;

/// A generated post being processed through the pipeline.
///
/// Wraps the loaded `Post` with mutable state that evolves
/// through pipeline stages:
///
/// 1. Initially: `content` = raw markdown body
/// 2. After markdown: `content` = HTML fragment
/// 3. After template: `output_html` = final page HTML
#[derive(Debug)]
pub struct ProcessingDocument<'a> {
    /// The post (metadata and raw body)
    pub post: &'a Post,

    /// Content being processed.
    ///
    /// Starts as the post's markdown body.
    /// After markdown stage: HTML fragment (just the content, no page wrapper).
    pub content: String,

    /// Final HTML output after template rendering.
    ///
    /// None until the template stage populates it.
    pub output_html: Option<String>,
}

impl<'a> ProcessingDocument<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            post,
            content: post.body.clone(),
            output_html: None,
        }
    }

    pub fn slug(&self) -> &str {
        &self.post.slug
    }
}
