use postpress::{Builder, SiteConfig, config::PlaceholderPolicy};

use crate::BuildArgs;

pub async fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let mut config = SiteConfig::load_from_arg(args.config_file.as_deref())?;
    apply_overrides(&mut config, args)?;
    config.validate()?;

    let builder = Builder::new(config);
    let result = builder.build().await?;

    println!(
        "Built blog to {} ({} generated, {} manual, {} file(s) written)",
        result.output_dir.display(),
        result.generated,
        result.manual,
        result.written.len()
    );

    Ok(())
}

/// CLI flags take precedence over the config file and environment.
/// Relative paths given on the command line are relative to the
/// working directory, not the config file.
fn apply_overrides(config: &mut SiteConfig, args: &BuildArgs) -> Result<(), anyhow::Error> {
    let cwd = std::env::current_dir()?;

    if let Some(dir) = &args.content_dir {
        config.content_dir = cwd.join(dir);
    }
    if let Some(dir) = &args.templates_dir {
        config.templates_dir = cwd.join(dir);
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = cwd.join(dir);
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if args.strict {
        config.placeholders = PlaceholderPolicy::Strict;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args() -> BuildArgs {
        BuildArgs {
            config_file: None,
            content_dir: None,
            templates_dir: None,
            output_dir: None,
            base_url: None,
            strict: false,
        }
    }

    #[test]
    fn test_no_flags_keep_loaded_config() {
        let root = PathBuf::from("/site");
        let mut config = SiteConfig::rooted_at(&root);
        apply_overrides(&mut config, &args()).unwrap();

        assert_eq!(config.output_dir, root.join("public/blog"));
        assert_eq!(config.placeholders, PlaceholderPolicy::Permissive);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = SiteConfig::rooted_at(&PathBuf::from("/site"));
        let args = BuildArgs {
            output_dir: Some(PathBuf::from("out")),
            content_dir: Some(PathBuf::from("/abs/posts")),
            base_url: Some("https://cli.test".to_string()),
            strict: true,
            ..args()
        };
        apply_overrides(&mut config, &args).unwrap();

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.output_dir, cwd.join("out"));
        assert_eq!(config.content_dir, PathBuf::from("/abs/posts"));
        assert_eq!(config.templates_dir, PathBuf::from("/site/templates"));
        assert_eq!(config.base_url, "https://cli.test");
        assert_eq!(config.placeholders, PlaceholderPolicy::Strict);
    }
}
