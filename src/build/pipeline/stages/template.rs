//! Post template rendering stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::template::render;

/// Stage that applies the post template to rendered content.
///
/// The substitution mapping holds every post field plus the rendered
/// HTML under `content`. After this stage, `doc.output_html` contains
/// the complete page.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            let mut fields = doc.post.template_context();
            fields.insert("content", doc.content.as_str());

            let name = format!("{} (post '{}')", ctx.config.post_template, doc.slug());
            let html = render(
                &ctx.templates.post,
                &name,
                &fields,
                ctx.config.placeholders,
            )?;

            doc.output_html = Some(html);
        }

        Ok(())
    }
}
