//! Blog index stage.

use tracing::info;

use crate::build::index::render_posts_list;
use crate::build::paths::index_output_path;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError};
use crate::build::template::{TemplateContext, render};

/// Stage that writes the blog index.
///
/// Every post, generated or manual, gets a card; cards are ordered newest
/// first and substituted into the index template as `postsList`.
pub struct IndexStage;

impl FinalizeStage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    fn finalize(&self, ctx: &mut PipelineContext<'_>) -> Result<(), PipelineError> {
        let mut fields = TemplateContext::new();
        fields.insert("postsList", render_posts_list(ctx.posts));

        let html = render(
            &ctx.templates.index,
            &ctx.config.index_template,
            &fields,
            ctx.config.placeholders,
        )?;

        let output_path = index_output_path(ctx.output_dir());
        ctx.write_file(&output_path, &html)
            .map_err(|e| PipelineError::write(&output_path, e))?;
        info!(posts = ctx.posts.len(), path = %output_path.display(), "wrote blog index");

        Ok(())
    }
}
