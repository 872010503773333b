//! File writing stage.

use tracing::info;

use crate::build::paths::post_output_path;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that writes rendered posts to `<output_dir>/posts/<slug>/index.html`,
/// creating the post directory if needed and overwriting any previous page.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            let html = doc.output_html.as_ref().ok_or_else(|| {
                PipelineError::stage(
                    "write",
                    format!(
                        "post '{}' has no output HTML (was template stage run?)",
                        doc.slug()
                    ),
                )
            })?;

            let output_path = post_output_path(ctx.output_dir(), doc.slug());
            ctx.write_file(&output_path, html)
                .map_err(|e| PipelineError::write(&output_path, e))?;
            info!(slug = doc.slug(), path = %output_path.display(), "generated post");
        }

        Ok(())
    }
}
