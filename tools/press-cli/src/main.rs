//! Press CLI - Command line tool for the press publishing integration.
//!
//! Commands:
//! - `press revalidate` - Run a status transition through the dispatcher
//! - `press extract` - List Kaltura blocks in stored content
//! - `press render` - Render an embed container, optionally mounting it
//! - `press schema` - Print the query schema
//! - `press config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, ExtractArgs, RenderArgs, RevalidateArgs};
use logging::LogFormat;

/// Press CLI - Revalidate published content and inspect video embeds
#[derive(Parser)]
#[command(name = "press")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a status transition through the revalidation dispatcher
    Revalidate(RevalidateArgs),

    /// List Kaltura blocks in a content file
    Extract(ExtractArgs),

    /// Render an embed container
    Render(RenderArgs),

    /// Print the Kaltura block query schema
    Schema,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format)?;

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Revalidate(args) => commands::revalidate::run(args, &ctx).await,
        Commands::Extract(args) => commands::extract::run(args, &ctx).await,
        Commands::Render(args) => commands::render::run(args, &ctx).await,
        Commands::Schema => commands::schema::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
