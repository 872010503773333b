//! Build pipeline for post processing.
//!
//! The pipeline transforms generated posts through a series of stages:
//! 1. Markdown rendering (body to HTML)
//! 2. Template rendering (post template wrapper)
//! 3. File writing (output to disk)
//!
//! Build-wide stages run after all posts are processed and see every
//! post, generated or manual:
//! 1. Manual page check (optional existence check)
//! 2. Index assembly (sorted cards into the index template)

mod context;
mod document;
mod error;
mod stages;

pub use context::PipelineContext;
pub use document::ProcessingDocument;
pub use error::PipelineError;

use stages::{IndexStage, ManualPageStage, MarkdownStage, TemplateStage, WriteStage};

/// A stage in the post processing pipeline.
///
/// Stages transform documents sequentially. Each stage receives all documents
/// and can modify them in place before passing to the next stage.
pub trait Stage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Process documents through this stage.
    ///
    /// Documents are passed by mutable reference so stages can transform
    /// their content in place. The `ctx` provides access to configuration,
    /// templates and the full post list.
    fn process(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError>;
}

/// A stage that runs once after all documents are processed.
pub trait FinalizeStage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Run finalization after all documents are processed and written.
    fn finalize(&self, ctx: &mut PipelineContext<'_>) -> Result<(), PipelineError>;
}

/// The post processing pipeline.
///
/// The default pipeline is: markdown → template → write, then
/// manual-pages → index.
pub struct Pipeline {
    /// Per-document stages
    stages: Vec<Box<dyn Stage>>,
    /// Build-wide stages (run once after all documents)
    finalize_stages: Vec<Box<dyn FinalizeStage>>,
}

impl Pipeline {
    fn new() -> Self {
        Self {
            stages: Vec::new(),
            finalize_stages: Vec::new(),
        }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(MarkdownStage);
        pipeline.add_stage(TemplateStage);
        pipeline.add_stage(WriteStage);
        pipeline.add_finalize_stage(ManualPageStage);
        pipeline.add_finalize_stage(IndexStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Add a finalize stage (runs after all documents are processed).
    pub fn add_finalize_stage<S: FinalizeStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.finalize_stages.push(Box::new(stage));
        self
    }

    /// Run the pipeline on a set of documents.
    pub fn run(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), documents = docs.len(), "running stage");
            stage.process(docs, ctx)?;
        }

        for stage in &self.finalize_stages {
            tracing::debug!(stage = stage.name(), "running finalize stage");
            stage.finalize(ctx)?;
        }

        Ok(())
    }

    /// Get the names of all stages in order, finalize stages last.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages
            .iter()
            .map(|s| s.name())
            .chain(self.finalize_stages.iter().map(|s| s.name()))
            .collect()
    }
}
