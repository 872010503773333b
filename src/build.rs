mod builder;
pub mod front_matter;
pub mod index;
pub mod markdown;
pub mod paths;
pub mod pipeline;
pub mod post;
pub mod source;
pub mod template;

pub use builder::{BuildError, BuildResult, Builder};
