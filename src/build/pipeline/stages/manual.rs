//! Manual page existence check.

use tracing::{debug, warn};

use crate::build::paths::post_output_path;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError};
use crate::config::ManualPageCheck;

/// Stage that verifies manual posts have a page at the usual location.
///
/// Manual pages are never written by the pipeline, so a missing one
/// means the index would link to nothing.
pub struct ManualPageStage;

impl FinalizeStage for ManualPageStage {
    fn name(&self) -> &'static str {
        "manual-pages"
    }

    fn finalize(&self, ctx: &mut PipelineContext<'_>) -> Result<(), PipelineError> {
        let check = ctx.config.manual_pages;

        for post in ctx.posts.iter().filter(|p| !p.is_generated()) {
            debug!(slug = %post.slug, "skipping (manual)");
            if check == ManualPageCheck::Off {
                continue;
            }

            let path = post_output_path(ctx.output_dir(), &post.slug);
            if path.is_file() {
                continue;
            }

            match check {
                ManualPageCheck::Error => {
                    return Err(PipelineError::MissingManualPage {
                        slug: post.slug.clone(),
                        path,
                    });
                }
                _ => warn!(
                    slug = %post.slug,
                    path = %path.display(),
                    "manual post has no page; its index link will be broken"
                ),
            }
        }

        Ok(())
    }
}
