//! Pipeline context for sharing state across stages.

use std::path::{Path, PathBuf};

use pulldown_cmark::Options;

use crate::build::post::Post;
use crate::build::template::TemplateSet;
use crate::config::SiteConfig;

/// Shared context for pipeline stages.
pub struct PipelineContext<'a> {
    /// Site configuration (paths, URLs, policies)
    pub config: &'a SiteConfig,

    /// Post and index templates
    pub templates: &'a TemplateSet,

    /// Parser options derived from the markdown config
    pub markdown_options: Options,

    /// Every loaded post, generated and manual, in enumeration order
    pub posts: &'a [Post],

    /// Files written so far in this run
    pub written: Vec<PathBuf>,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        config: &'a SiteConfig,
        templates: &'a TemplateSet,
        markdown_options: Options,
        posts: &'a [Post],
    ) -> Self {
        Self {
            config,
            templates,
            markdown_options,
            posts,
            written: Vec::new(),
        }
    }

    /// Directory where output files are written.
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Write a file, creating parent directories as needed.
    ///
    /// Existing directories are fine and existing files are overwritten:
    /// every run is a full rebuild.
    pub fn write_file(&mut self, path: &Path, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        self.written.push(path.to_path_buf());
        Ok(())
    }
}
