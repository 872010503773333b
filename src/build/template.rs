//! Template loading and placeholder substitution.
//!
//! Templates are plain HTML with `{{key}}` tokens. Substitution is a single
//! left-to-right pass: every occurrence of a known key is replaced, values
//! are inserted verbatim and never rescanned, and tokens naming unknown keys
//! are handled according to the [`PlaceholderPolicy`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::{PlaceholderPolicy, SiteConfig};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid"));

#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("missing template {}: {source}", .path.display())]
    Missing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unresolved placeholders in {template}: {}", .keys.join(", "))]
    Unresolved { template: String, keys: Vec<String> },
}

// =============================================================================
// Template set
// =============================================================================

/// The two templates the pipeline renders through.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Wraps a single generated post (`content` plus post fields)
    pub post: String,
    /// Wraps the list of post cards (`postsList`)
    pub index: String,
}

impl TemplateSet {
    /// Load both templates from the configured templates directory.
    ///
    /// Either file being absent or unreadable is fatal.
    pub async fn load(config: &SiteConfig) -> Result<Self, TemplateError> {
        let post = read_template(&config.post_template_path()).await?;
        let index = read_template(&config.index_template_path()).await?;
        Ok(Self { post, index })
    }
}

async fn read_template(path: &Path) -> Result<String, TemplateError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TemplateError::Missing {
            path: path.to_path_buf(),
            source,
        })
}

// =============================================================================
// Substitution
// =============================================================================

/// Flat key → value mapping used to fill a template.
///
/// A key mapped to `None` is known but empty and renders as "";
/// a key not in the mapping at all is unresolved.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: HashMap<String, Option<String>>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Some(value.into()));
    }

    /// Set a key whose value may be absent.
    pub fn insert_optional(&mut self, key: impl Into<String>, value: Option<String>) {
        self.values.insert(key.into(), value);
    }

    /// `None` if the key is unknown, `Some("")` if it is known but empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|value| value.as_deref().unwrap_or_default())
    }
}

/// Output of a substitution pass.
#[derive(Debug)]
pub struct Substitution {
    pub output: String,
    /// Keys with no entry in the context, in first-seen order
    pub unresolved: Vec<String>,
}

/// Replace every `{{key}}` whose key is in `context`, leaving the rest verbatim.
pub fn substitute(template: &str, context: &TemplateContext) -> Substitution {
    let mut unresolved: Vec<String> = Vec::new();

    let output = PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match context.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => {
                if !unresolved.iter().any(|key| key == &caps[1]) {
                    unresolved.push(caps[1].to_string());
                }
                caps[0].to_string()
            }
        })
        .into_owned();

    Substitution { output, unresolved }
}

/// Substitute and apply the placeholder policy.
///
/// `name` identifies the template in error messages.
pub fn render(
    template: &str,
    name: &str,
    context: &TemplateContext,
    policy: PlaceholderPolicy,
) -> Result<String, TemplateError> {
    let Substitution { output, unresolved } = substitute(template, context);

    if policy == PlaceholderPolicy::Strict && !unresolved.is_empty() {
        return Err(TemplateError::Unresolved {
            template: name.to_string(),
            keys: unresolved,
        });
    }

    Ok(output)
}
