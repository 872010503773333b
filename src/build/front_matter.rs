use std::collections::BTreeMap;

use serde_yaml::Value;

/// Line that opens and closes a front matter block.
const DELIMITER: &str = "---";

#[derive(thiserror::Error, Debug)]
pub enum FrontMatterError {
    #[error("missing front matter: file must start with a '---' line")]
    Missing,

    #[error("unterminated front matter: no closing '---' line")]
    Unterminated,

    #[error("front matter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter must be a key/value mapping")]
    NotAMapping,

    #[error("front matter key {0:?} is not a string")]
    InvalidKey(Value),

    #[error("front matter field '{key}' must be a string or a list of strings")]
    UnsupportedValue { key: String },
}

/// A single front matter value: a scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Flatten to one string for template substitution.
    /// Lists are joined with ", ".
    pub fn to_template_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

/// Front matter metadata, keyed by field name.
pub type Metadata = BTreeMap<String, FieldValue>;

/// Result of splitting a content file into front matter and body.
#[derive(Debug)]
pub struct ParsedContent {
    /// The parsed front matter
    pub metadata: Metadata,
    /// The markdown body without the front matter block
    pub body: String,
}

/// Parse front matter from markdown content.
///
/// Front matter is a YAML block delimited by `---` lines at the start of
/// the file:
///
/// ```markdown
/// ---
/// slug: hello-world
/// title: Hello World
/// date: 2025-01-26
/// type: generated
/// ---
///
/// ## Content starts here
/// ```
///
/// Unlike a permissive reader, a file without a well-formed block is an
/// error: posts without metadata can't be placed in the index.
pub fn parse_front_matter(content: &str) -> Result<ParsedContent, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let content = content.trim_start_matches(['\r', '\n']);

    let mut lines = content.split_inclusive('\n');
    let opening = lines.next().ok_or(FrontMatterError::Missing)?;
    if opening.trim_end() != DELIMITER {
        return Err(FrontMatterError::Missing);
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let metadata = parse_metadata(&content[yaml_start..offset])?;
            let body = content[offset + line.len()..]
                .trim_start_matches(['\r', '\n'])
                .to_string();
            return Ok(ParsedContent { metadata, body });
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Parse the YAML between the delimiters into flat metadata.
fn parse_metadata(yaml: &str) -> Result<Metadata, FrontMatterError> {
    // An empty block is valid; required fields are checked later
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: Value = serde_yaml::from_str(yaml)?;

    let mapping = match value {
        Value::Null => return Ok(Metadata::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let key = match key {
            Value::String(key) => key,
            other => return Err(FrontMatterError::InvalidKey(other)),
        };

        let field = match value {
            Value::Null => continue,
            Value::Sequence(items) => {
                let items = items
                    .into_iter()
                    .map(scalar_to_string)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| FrontMatterError::UnsupportedValue { key: key.clone() })?;
                FieldValue::List(items)
            }
            scalar => FieldValue::Text(
                scalar_to_string(scalar)
                    .ok_or_else(|| FrontMatterError::UnsupportedValue { key: key.clone() })?,
            ),
        };
        metadata.insert(key, field);
    }

    Ok(metadata)
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
