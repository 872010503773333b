//! Default pipeline stages.
//!
//! Per generated post:
//!
//! 1. **MarkdownStage** - Convert the markdown body to HTML
//! 2. **TemplateStage** - Substitute post fields and content into the post template
//! 3. **WriteStage** - Write the page to `posts/<slug>/index.html`
//!
//! Once per build:
//!
//! 1. **ManualPageStage** - Check that manual posts' pages exist
//! 2. **IndexStage** - Render the sorted card list into the index template

mod index;
mod manual;
mod markdown;
mod template;
mod write;

pub use index::IndexStage;
pub use manual::ManualPageStage;
pub use markdown::MarkdownStage;
pub use template::TemplateStage;
pub use write::WriteStage;
