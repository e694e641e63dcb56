//! Server-side container markup.

use serde::{Deserialize, Serialize};

use crate::config::EmbedConfig;
use crate::html::{escape_attr, escape_text};

/// Class carried by every embed container.
pub const CONTAINER_CLASS: &str = "press-kaltura-container";
/// Class of the consent prompt inside a container.
pub const CONSENT_CLASS: &str = "press-kaltura-consent";
/// Value of `data-video`, used by the front end to find containers.
pub const VIDEO_KIND: &str = "kaltura";
/// Attribute marking the allow control.
pub const CONSENT_BUTTON_ATTR: &str = "data-consent-button";

/// User-facing text of the consent prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentCopy {
    /// Explanation shown above the button.
    pub message: String,
    /// Label of the allow button.
    pub button_label: String,
}

impl Default for ConsentCopy {
    fn default() -> Self {
        Self {
            message: "To play this video, please allow media from our provider.".to_string(),
            button_label: "Allow & Play".to_string(),
        }
    }
}

/// Render the consent prompt markup.
pub fn consent_prompt(copy: &ConsentCopy) -> String {
    format!(
        "<div class=\"{}\"><div><p>{}</p><button type=\"button\" {}=\"1\">{}</button></div></div>",
        CONSENT_CLASS,
        escape_text(&copy.message),
        CONSENT_BUTTON_ATTR,
        escape_text(&copy.button_label),
    )
}

/// Render the placeholder container for an embed.
///
/// The container carries the config as data attributes; the prompt is only
/// included when consent is required.
pub fn render_container(config: &EmbedConfig, copy: &ConsentCopy) -> String {
    let data: String = config
        .data_attributes()
        .into_iter()
        .map(|(key, value)| format!(" data-{}=\"{}\"", key, escape_attr(&value)))
        .collect();

    let placeholder = if config.consent_required {
        consent_prompt(copy)
    } else {
        String::new()
    };

    format!(
        "<div class=\"{}\" data-video=\"{}\"{}>{}</div>",
        CONTAINER_CLASS, VIDEO_KIND, data, placeholder
    )
}
