//! Configuration loading from files and environment variables.
//!
//! Sources, lowest precedence first: struct defaults, the YAML config
//! file, then `POSTPRESS_*` environment variables. CLI flags are applied
//! on top by the command that loads the config.

use std::path::{Path, PathBuf};

use super::{ConfigError, SiteConfig};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "postpress.yaml";

const ENV_PREFIX: &str = "POSTPRESS";

impl SiteConfig {
    /// Load the config from the command line argument.
    ///
    /// An explicitly named file must exist; the default `postpress.yaml`
    /// is optional. Relative directories are resolved against the config
    /// file's directory.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let required = config_file.is_some();
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        let mut config = Self::load_from_file(&config_file, required)?;
        config.resolve_paths(&base_path_from_config(&config_file));
        config.validate()?;
        Ok(config)
    }

    /// Load the config from a file path, layering environment overrides on top.
    fn load_from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        Self::load_layered(path, required, environment())
    }

    fn load_layered(
        path: &Path,
        required: bool,
        env: config::Environment,
    ) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        Ok(config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml).required(required))
            .add_source(env)
            .build()?
            .try_deserialize::<SiteConfig>()?)
    }

    /// Reject values that would produce broken URLs or paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "invalid config: 'base_url' must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }
        if !self.post_url_prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "invalid config: 'post_url_prefix' must start with '/' (got '{}')",
                self.post_url_prefix
            )));
        }
        if self.post_template.is_empty() || self.index_template.is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'post_template' and 'index_template' must name files".to_string(),
            ));
        }
        Ok(())
    }
}

/// `POSTPRESS_*` variables, `__` between nested keys.
///
/// `POSTPRESS_MARKDOWN__EXTENSIONS` takes a comma-separated list.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("markdown.extensions")
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ManualPageCheck, PlaceholderPolicy};

    #[test]
    fn test_base_path_from_config() {
        assert_eq!(
            base_path_from_config(Path::new("/project/postpress.yaml")),
            PathBuf::from("/project")
        );
        assert_eq!(
            base_path_from_config(Path::new("postpress.yaml")),
            PathBuf::from("")
        );
    }

    #[test]
    fn test_load_from_file_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("postpress.yaml");
        std::fs::write(
            &config_path,
            "base_url: https://blog.test\ncontent_dir: posts\nplaceholders: strict\n",
        )
        .unwrap();

        let config = SiteConfig::load_from_arg(Some(&config_path)).unwrap();
        assert_eq!(config.base_url, "https://blog.test");
        assert_eq!(config.content_dir, dir.path().join("posts"));
        assert_eq!(config.templates_dir, dir.path().join("templates"));
        assert_eq!(config.placeholders, PlaceholderPolicy::Strict);
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("postpress.yaml");
        std::fs::write(
            &config_path,
            "base_url: https://file.test\nmanual_pages: warn\nmarkdown:\n  extensions: [tables]\n",
        )
        .unwrap();

        let config = SiteConfig::load_layered(
            &config_path,
            true,
            env(&[
                ("POSTPRESS_BASE_URL", "https://env.test"),
                ("POSTPRESS_MANUAL_PAGES", "error"),
                ("POSTPRESS_MARKDOWN__EXTENSIONS", "gfm,footnotes"),
                ("OTHER_BASE_URL", "https://ignored.test"),
            ]),
        )
        .unwrap();

        assert_eq!(config.base_url, "https://env.test");
        assert_eq!(config.manual_pages, ManualPageCheck::Error);
        assert_eq!(config.markdown.extensions, vec!["gfm", "footnotes"]);
    }

    #[test]
    fn test_file_values_kept_without_environment() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("postpress.yaml");
        std::fs::write(&config_path, "base_url: https://file.test\n").unwrap();

        let config = SiteConfig::load_layered(&config_path, true, env(&[])).unwrap();
        assert_eq!(config.base_url, "https://file.test");
        assert_eq!(config.manual_pages, ManualPageCheck::Warn);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SiteConfig::load_from_arg(Some(&dir.path().join("nope.yaml")));
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = SiteConfig {
            base_url: "example.com".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_relative_prefix() {
        let config = SiteConfig {
            post_url_prefix: "blog/posts/".to_string(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
