//! A one-shot static blog generator.
//!
//! Reads markdown posts with YAML front matter, renders the generated ones
//! through a post template, and assembles a newest-first index of every
//! post through an index template.
//!
//! ```no_run
//! # async fn run() -> Result<(), postpress::BuildError> {
//! let config = postpress::SiteConfig::rooted_at(std::path::Path::new("site"));
//! let result = postpress::Builder::new(config).build().await?;
//! println!("wrote {}", result.index_path.display());
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod config;

pub use build::{BuildError, BuildResult, Builder};
pub use config::SiteConfig;
