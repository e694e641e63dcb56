//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};
use crate::output::yes_no;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    let resolved = ctx.config.revalidate_config();

    if ctx.output.is_json() {
        let mut shown = ctx.config.clone();
        if shown.revalidate.secret.is_some() {
            shown.revalidate.secret = Some("***".to_string());
        }
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using environment and defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[revalidate]");
    ctx.output.kv(
        "endpoint",
        resolved.endpoint.as_deref().unwrap_or("(not set)"),
    );
    ctx.output.kv("secret", if resolved.secret.is_some() { "***" } else { "(not set)" });
    ctx.output.kv("route_prefix", &resolved.route_prefix);
    ctx.output.kv("timeout", &format!("{}s", resolved.timeout.as_secs()));
    ctx.output.kv("enabled", yes_no(resolved.is_enabled()));

    let options = ctx.config.embed.mount_options();
    ctx.output.info("");
    ctx.output.info("[embed]");
    ctx.output.kv("root_margin", &options.root_margin.to_css());
    ctx.output.kv("decline_policy", &format!("{:?}", options.decline_policy));
    ctx.output.kv("block_name", ctx.config.embed.extractor().block_name());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect configuration errors and warnings.
fn check(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let resolved = config.revalidate_config();

    if let Some(endpoint) = &resolved.endpoint {
        if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            errors.push(format!("revalidate.endpoint '{}' is not an http(s) URL", endpoint));
        } else if endpoint.starts_with("http://") {
            warnings.push("revalidate.endpoint sends the secret over plain http".to_string());
        }
    }

    if !resolved.is_enabled() {
        warnings.push(
            "revalidate.secret or revalidate.endpoint is unset; revalidation is disabled"
                .to_string(),
        );
    }

    if !resolved.route_prefix.starts_with('/') {
        errors.push("revalidate.route_prefix must start with '/'".to_string());
    } else if !resolved.route_prefix.ends_with('/') {
        warnings.push("revalidate.route_prefix usually ends with '/'".to_string());
    }

    if config.revalidate.timeout_secs == Some(0) {
        errors.push("revalidate.timeout_secs must be greater than 0".to_string());
    }

    if let Some(block_name) = &config.embed.block_name {
        if !block_name.contains('/') {
            warnings.push(format!(
                "embed.block_name '{}' has no namespace; blocks are stored as 'ns/name'",
                block_name
            ));
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml: &str) -> CliConfig {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_check_complete_config() {
        let (errors, warnings) = check(&config(
            "[revalidate]\nsecret = \"S\"\nendpoint = \"https://e/revalidate\"\n",
        ));
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_check_errors() {
        let (errors, _) = check(&config(
            "[revalidate]\nsecret = \"S\"\nendpoint = \"ftp://e\"\nroute_prefix = \"articles/\"\ntimeout_secs = 0\n",
        ));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_check_warnings() {
        let (errors, warnings) = check(&config(
            "[revalidate]\nsecret = \"S\"\nendpoint = \"http://e\"\nroute_prefix = \"/news\"\n\n[embed]\nblock_name = \"video\"\n",
        ));
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 3);
    }
}
