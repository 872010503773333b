//! Markdown rendering stage.

use crate::build::markdown::render_markdown;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that renders each post's markdown body to HTML.
///
/// After this stage, `doc.content` contains the HTML fragment.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            doc.content = render_markdown(&doc.content, ctx.markdown_options);
        }

        Ok(())
    }
}
