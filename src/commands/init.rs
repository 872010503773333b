use std::path::{Path, PathBuf};

use postpress::SiteConfig;
use postpress::config::DEFAULT_CONFIG_FILE;

use crate::InitArgs;

const POST_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{title}}</title>
  <meta name="description" content="{{description}}">
  <link rel="canonical" href="{{canonicalUrl}}">
</head>
<body>
  <article class="blog-post">
    <header>
      <span class="blog-post-category">{{category}}</span>
      <h1>{{title}}</h1>
      <time datetime="{{dateISO}}">{{date}}</time>
      <meta itemprop="dateModified" content="{{dateModifiedISO}}">
    </header>
    {{content}}
  </article>
  <a href="../../">&larr; All posts</a>
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Blog</title>
</head>
<body>
  <main class="blog-index">
{{postsList}}
  </main>
</body>
</html>
"#;

const SAMPLE_POST: &str = r#"---
slug: hello-world
title: Hello World
description: The first post on this blog.
category: News
date: 2025-01-26
type: generated
---

## Welcome

This post was rendered from markdown by postpress.
Edit it in the content directory and run `postpress build`.
"#;

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    println!("Initializing project in {}", path.display());

    let defaults = SiteConfig::default();
    let config = SiteConfig::rooted_at(&path);
    let config_text = serde_yaml::to_string(&defaults)?;

    let files: [(PathBuf, &str); 4] = [
        (path.join(DEFAULT_CONFIG_FILE), config_text.as_str()),
        (config.post_template_path(), POST_TEMPLATE),
        (config.index_template_path(), INDEX_TEMPLATE),
        (config.content_dir.join("hello-world.md"), SAMPLE_POST),
    ];

    // Check everything first so a partial scaffold never happens
    if let Some((existing, _)) = files.iter().find(|(file, _)| file.exists()) {
        return Err(anyhow::anyhow!(
            "Refusing to overwrite existing file {}",
            existing.display()
        ));
    }

    for (file, contents) in &files {
        write_new(file, contents).await?;
        println!("Created {}", file.display());
    }

    Ok(())
}

async fn write_new(file: &Path, contents: &str) -> Result<(), anyhow::Error> {
    if let Some(parent) = file.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(file, contents).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_scaffold_builds() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            create: false,
        };
        run(&args).await.unwrap();

        let config =
            SiteConfig::load_from_arg(Some(&dir.path().join(DEFAULT_CONFIG_FILE))).unwrap();
        let result = postpress::Builder::new(config).build().await.unwrap();
        assert_eq!(result.generated, 1);

        let page = std::fs::read_to_string(
            dir.path().join("public/blog/posts/hello-world/index.html"),
        )
        .unwrap();
        assert!(page.contains("<h2>Welcome</h2>"));
        assert!(!page.contains("{{"));
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "base_url: https://mine.test\n")
            .unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            create: false,
        };

        assert!(run(&args).await.is_err());
        assert!(!dir.path().join("templates").exists());
    }

    #[tokio::test]
    async fn test_init_missing_dir_without_create() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().join("new-blog"),
            create: false,
        };
        assert!(run(&args).await.is_err());
    }
}
