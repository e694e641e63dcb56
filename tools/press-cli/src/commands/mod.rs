//! CLI command implementations.

pub mod config;
pub mod extract;
pub mod render;
pub mod revalidate;
pub mod schema;

use clap::{Args, Subcommand, ValueEnum};
use press_core::{ContentStatus, ContentType};

/// Arguments for the revalidate command.
#[derive(Args)]
pub struct RevalidateArgs {
    /// Status before the transition.
    #[arg(long)]
    pub from: ContentStatus,

    /// Status after the transition.
    #[arg(long)]
    pub to: ContentStatus,

    /// Content type.
    #[arg(long = "type", default_value = "post")]
    pub content_type: ContentType,

    /// Content id.
    #[arg(long, default_value = "0")]
    pub id: u64,

    /// Content slug.
    #[arg(long, default_value = "")]
    pub slug: String,

    /// Content title, used when the slug is empty.
    #[arg(long, default_value = "")]
    pub title: String,

    /// Record the request instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Input format for the extract command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Serialized post content with block comment delimiters.
    Markup,
    /// Parsed block tree as JSON.
    Tree,
}

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// File to read.
    pub file: String,

    /// Input format.
    #[arg(short, long, value_enum, default_value_t = InputFormat::Markup)]
    pub input: InputFormat,
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Provider account id.
    #[arg(long)]
    pub partner: String,

    /// Media id.
    #[arg(long)]
    pub entry: String,

    /// Poster image URL.
    #[arg(long)]
    pub poster: Option<String>,

    /// Start playback on load.
    #[arg(long)]
    pub autoplay: bool,

    /// Mount without asking for consent.
    #[arg(long)]
    pub no_consent: bool,

    /// Run the mount lifecycle and print the mounted markup.
    #[arg(long)]
    pub live: bool,

    /// With --live, click the allow control after the container is seen.
    #[arg(long, requires = "live")]
    pub allow: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
