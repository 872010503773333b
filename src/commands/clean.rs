use std::path::Path;

use postpress::SiteConfig;
use postpress::build::paths::{index_output_path, post_output_dir};
use postpress::build::source::ContentSource;

use crate::CleanArgs;

pub async fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let config = SiteConfig::load_from_arg(args.config_file.as_deref())?;

    // Only generated posts are ours to delete; manual pages live
    // alongside them and must survive.
    let source = ContentSource::open(&config.content_dir)?;
    let posts = source.load_posts(&config).await?;

    for post in posts.iter().filter(|p| p.is_generated()) {
        let dir = post_output_dir(&config.output_dir, &post.slug);
        remove(&dir, args.dry_run, true).await?;
    }

    remove(&index_output_path(&config.output_dir), args.dry_run, false).await?;

    Ok(())
}

async fn remove(path: &Path, dry_run: bool, is_dir: bool) -> Result<(), anyhow::Error> {
    if !path.exists() {
        return Ok(());
    }

    if dry_run {
        println!("Would delete {}", path.display());
        return Ok(());
    }

    if is_dir {
        tokio::fs::remove_dir_all(path).await?;
    } else {
        tokio::fs::remove_file(path).await?;
    }
    println!("Deleted {}", path.display());

    Ok(())
}
