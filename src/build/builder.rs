use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, info};

use super::markdown::{MarkdownError, markdown_options};
use super::paths::index_output_path;
use super::pipeline::{Pipeline, PipelineContext, PipelineError, ProcessingDocument};
use super::post::Post;
use super::source::{ContentSource, SourceError};
use super::template::{TemplateError, TemplateSet};
use crate::config::SiteConfig;

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("content error: {0}")]
    Source(#[from] SourceError),

    #[error("markdown config error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("duplicate slug '{slug}' in {} and {}", .first.display(), .second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a successful build produced.
#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
    /// Posts rendered to HTML by this run
    pub generated: usize,
    /// Posts listed in the index whose pages are maintained by hand
    pub manual: usize,
    /// Every file written, in write order
    pub written: Vec<PathBuf>,
}

/// Runs the full blog build for one site configuration.
pub struct Builder {
    config: SiteConfig,
}

impl Builder {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Load templates -> TemplateSet
        // 2. Read content -> Post[]
        // 3. Render and write generated posts
        // 4. Assemble the index from all posts
        //
        // Everything that can fail on input is checked before the first
        // write, so a bad template or post leaves the output untouched.

        // Step 1: Templates
        let templates = TemplateSet::load(&self.config).await?;
        let markdown_options = markdown_options(&self.config.markdown)?;
        debug!(dir = %self.config.templates_dir.display(), "loaded templates");

        // Step 2: Content
        let source = ContentSource::open(&self.config.content_dir)?;
        let posts = source.load_posts(&self.config).await?;
        check_unique_slugs(&posts)?;

        let generated = posts.iter().filter(|p| p.is_generated()).count();
        let manual = posts.len() - generated;
        info!(
            generated,
            manual,
            dir = %self.config.content_dir.display(),
            "found {} post(s)",
            posts.len()
        );

        // Step 3: Output directory
        let output_dir = self.config.output_dir.clone();
        tokio::fs::create_dir_all(&output_dir)
            .await
            .map_err(|source| BuildError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;

        // Step 4: Run the pipeline over generated posts, then the index
        let mut docs: Vec<ProcessingDocument<'_>> = posts
            .iter()
            .filter(|p| p.is_generated())
            .map(ProcessingDocument::new)
            .collect();

        let pipeline = Pipeline::default_pipeline();
        debug!(stages = ?pipeline.stage_names(), "running pipeline");

        let mut ctx = PipelineContext::new(&self.config, &templates, markdown_options, &posts);
        pipeline.run(&mut docs, &mut ctx)?;

        Ok(BuildResult {
            index_path: index_output_path(&output_dir),
            output_dir,
            generated,
            manual,
            written: ctx.written,
        })
    }
}

/// Two posts with the same slug would write the same page.
fn check_unique_slugs(posts: &[Post]) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, &Post> = HashMap::new();
    for post in posts {
        if let Some(first) = seen.insert(post.slug.as_str(), post) {
            return Err(BuildError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.source_path.clone(),
                second: post.source_path.clone(),
            });
        }
    }
    Ok(())
}
