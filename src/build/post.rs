use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};

use super::front_matter::{FieldValue, Metadata, ParsedContent};
use super::paths::{canonical_url, post_url};
use super::template::TemplateContext;
use crate::config::SiteConfig;

/// Human-readable date format, e.g. "January 26, 2025".
const HUMAN_DATE_FORMAT: &str = "%B %-d, %Y";

/// Front matter keys with a fixed meaning. Everything else is an extra.
const KNOWN_FIELDS: &[&str] = &[
    "slug",
    "title",
    "description",
    "category",
    "date",
    "dateModified",
    "type",
];

#[derive(thiserror::Error, Debug)]
pub enum PostError {
    #[error("missing required front matter field '{0}'")]
    MissingField(&'static str),

    #[error("front matter field '{0}' must be a single value, not a list")]
    NotText(&'static str),

    #[error("invalid {field} '{value}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid type '{0}': expected 'generated' or 'manual'")]
    InvalidType(String),

    #[error("invalid slug '{0}': must be a single non-empty path segment")]
    InvalidSlug(String),
}

/// Who produces a post's HTML page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostType {
    /// Rendered from the markdown body by this pipeline
    Generated,
    /// Authored by hand; only listed in the index
    Manual,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Generated => "generated",
            PostType::Manual => "manual",
        }
    }
}

impl FromStr for PostType {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "generated" => Ok(PostType::Generated),
            "manual" => Ok(PostType::Manual),
            other => Err(PostError::InvalidType(other.to_string())),
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blog post, built from one content file.
///
/// Read-only after construction; rebuilt from disk on every run.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique identity; names the output directory and URL segment
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Publish date, used for index ordering
    pub date: NaiveDate,
    /// `date` exactly as written in the front matter
    pub date_iso: String,
    pub date_modified: NaiveDate,
    /// `dateModified` as written, or `date_iso` when absent
    pub date_modified_iso: String,
    pub post_type: PostType,
    /// Site-relative URL, e.g. "/blog/posts/hello/"
    pub url: String,
    /// Absolute URL including the site origin
    pub canonical_url: String,
    /// Front matter fields without a fixed meaning
    pub extra: Metadata,
    /// Markdown body (only rendered for generated posts)
    pub body: String,
    /// The content file this post was read from
    pub source_path: PathBuf,
}

impl Post {
    /// Build a post from parsed front matter, deriving dates and URLs.
    pub fn from_parsed(
        parsed: ParsedContent,
        source_path: PathBuf,
        config: &SiteConfig,
    ) -> Result<Self, PostError> {
        let ParsedContent { mut metadata, body } = parsed;

        let slug = required_text(&metadata, "slug")?;
        validate_slug(&slug)?;
        let title = required_text(&metadata, "title")?;
        let post_type: PostType = required_text(&metadata, "type")?.parse()?;
        let description = optional_text(&metadata, "description")?;
        let category = optional_text(&metadata, "category")?;

        let date_iso = required_text(&metadata, "date")?;
        let date = parse_date("date", &date_iso)?;
        let date_modified_iso =
            optional_text(&metadata, "dateModified")?.unwrap_or_else(|| date_iso.clone());
        let date_modified = parse_date("dateModified", &date_modified_iso)?;

        metadata.retain(|key, _| !KNOWN_FIELDS.contains(&key.as_str()));

        Ok(Self {
            url: post_url(&config.post_url_prefix, &slug),
            canonical_url: canonical_url(&config.base_url, &config.post_url_prefix, &slug),
            slug,
            title,
            description,
            category,
            date,
            date_iso,
            date_modified,
            date_modified_iso,
            post_type,
            extra: metadata,
            body,
            source_path,
        })
    }

    pub fn is_generated(&self) -> bool {
        self.post_type == PostType::Generated
    }

    /// Publish date in human form, e.g. "January 26, 2025".
    pub fn display_date(&self) -> String {
        self.date.format(HUMAN_DATE_FORMAT).to_string()
    }

    /// Modification date in human form.
    pub fn display_date_modified(&self) -> String {
        self.date_modified.format(HUMAN_DATE_FORMAT).to_string()
    }

    /// All post fields as a substitution mapping.
    ///
    /// Extra front matter fields are added first so they can never
    /// shadow a derived field.
    pub fn template_context(&self) -> TemplateContext {
        let mut ctx = TemplateContext::new();
        for (key, value) in &self.extra {
            ctx.insert(key.as_str(), value.to_template_value());
        }

        ctx.insert("slug", self.slug.as_str());
        ctx.insert("title", self.title.as_str());
        ctx.insert_optional("description", self.description.clone());
        ctx.insert_optional("category", self.category.clone());
        ctx.insert("type", self.post_type.as_str());
        ctx.insert("date", self.display_date());
        ctx.insert("dateISO", self.date_iso.as_str());
        ctx.insert("dateModified", self.display_date_modified());
        ctx.insert("dateModifiedISO", self.date_modified_iso.as_str());
        ctx.insert("url", self.url.as_str());
        ctx.insert("canonicalUrl", self.canonical_url.as_str());
        ctx
    }
}

fn required_text(metadata: &Metadata, field: &'static str) -> Result<String, PostError> {
    optional_text(metadata, field)?.ok_or(PostError::MissingField(field))
}

fn optional_text(metadata: &Metadata, field: &'static str) -> Result<Option<String>, PostError> {
    match metadata.get(field) {
        None => Ok(None),
        Some(FieldValue::Text(value)) => {
            let value = value.trim();
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
        Some(FieldValue::List(_)) => Err(PostError::NotText(field)),
    }
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, PostError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .ok_or_else(|| PostError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// A slug names a directory under the output root, so it must not escape it.
fn validate_slug(slug: &str) -> Result<(), PostError> {
    if slug == "." || slug == ".." || slug.contains(['/', '\\']) {
        return Err(PostError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}
