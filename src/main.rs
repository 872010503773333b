use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "postpress", version, about)]
struct Args {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// The command to execute
    #[command(subcommand)]
    command: PostpressCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file (default: postpress.yaml, if present)
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Override the markdown content directory
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Override the templates directory
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Override the output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Override the site base URL used for canonical links
    #[arg(long)]
    base_url: Option<String>,

    /// Fail on template placeholders with no matching field
    #[arg(long, default_value = "false")]
    strict: bool,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file (default: postpress.yaml, if present)
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Print what would be deleted without deleting it
    #[arg(short, long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum PostpressCommand {
    /// Scaffold a new blog project
    Init(InitArgs),

    /// Render generated posts and the blog index
    Build(BuildArgs),

    /// Delete generated posts and the blog index
    Clean(CleanArgs),
}

/// Map the `-v` count to a log level. Warnings and errors always show.
fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout only
/// carries command output.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let level = log_level(verbose);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        PostpressCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        PostpressCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        PostpressCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
