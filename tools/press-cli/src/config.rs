//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use press_blocks::{BlockTreeExtractor, KALTURA_BLOCK_NAME};
use press_embed::{DeclinePolicy, MountOptions, RootMargin};
use press_revalidate::{RevalidateConfig, RevalidateSettings};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Revalidation endpoint configuration.
    #[serde(default)]
    pub revalidate: RevalidateSettings,

    /// Embed and block configuration.
    #[serde(default)]
    pub embed: EmbedSettings,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Resolve revalidation config; the environment fills unset values.
    pub fn revalidate_config(&self) -> RevalidateConfig {
        RevalidateConfig::from_settings(&self.revalidate)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Embed and block configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedSettings {
    /// Forward margin for visibility, in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_margin_px: Option<u32>,

    /// What to do with observation after a declined signal.
    #[serde(default)]
    pub decline_policy: DeclinePolicy,

    /// Block name to extract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_name: Option<String>,
}

impl EmbedSettings {
    /// Mount controller options.
    pub fn mount_options(&self) -> MountOptions {
        let options = MountOptions::default().with_decline_policy(self.decline_policy);
        match self.root_margin_px {
            Some(px) => options.with_root_margin(RootMargin(px)),
            None => options,
        }
    }

    /// Block extractor.
    pub fn extractor(&self) -> BlockTreeExtractor {
        BlockTreeExtractor::for_block(self.block_name.as_deref().unwrap_or(KALTURA_BLOCK_NAME))
    }
}

/// Generate a default press.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Press integration configuration

[revalidate]
# Falls back to REVALIDATE_SECRET / REVALIDATE_URL when unset.
# secret = "change-me"
# endpoint = "https://frontend.example/api/revalidate"
route_prefix = "/articles/"
timeout_secs = 5

[embed]
root_margin_px = 200
# "stop-observing" or "keep-observing"
decline_policy = "stop-observing"
block_name = "{block}"
"#,
        block = KALTURA_BLOCK_NAME
    )
}
