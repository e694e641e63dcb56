//! Embed parameters and their data-attribute encoding.

use serde::{Deserialize, Serialize};

use crate::container::EmbedContainer;

/// Dataset key for the provider account (`data-partnerid`).
pub const DATA_PARTNER_ID: &str = "partnerid";
/// Dataset key for the media entry (`data-entryid`).
pub const DATA_ENTRY_ID: &str = "entryid";
/// Dataset key for the poster image (`data-poster`).
pub const DATA_POSTER: &str = "poster";
/// Dataset key for the autoplay flag (`data-autoplay`).
pub const DATA_AUTOPLAY: &str = "autoplay";
/// Dataset key for the consent flag (`data-consent`).
pub const DATA_CONSENT: &str = "consent";

/// Parameters of a single embed.
///
/// Created by the authoring side, rendered into a container's data attributes
/// and read back exactly once when the container is set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Provider account (Kaltura partner id).
    pub provider_account_id: String,
    /// Media entry id.
    pub media_id: String,
    /// Poster image shown behind the frame while it loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Start playback as soon as the frame loads.
    #[serde(default)]
    pub autoplay: bool,
    /// Require an explicit allow action before loading third-party content.
    #[serde(default = "default_consent_required")]
    pub consent_required: bool,
}

fn default_consent_required() -> bool {
    true
}

impl EmbedConfig {
    /// Create a config with consent required and no poster.
    pub fn new(provider_account_id: impl Into<String>, media_id: impl Into<String>) -> Self {
        Self {
            provider_account_id: provider_account_id.into(),
            media_id: media_id.into(),
            poster_url: None,
            autoplay: false,
            consent_required: true,
        }
    }

    /// Set the poster image. An empty URL clears it.
    pub fn with_poster(mut self, poster_url: impl Into<String>) -> Self {
        let poster_url = poster_url.into();
        self.poster_url = (!poster_url.is_empty()).then_some(poster_url);
        self
    }

    /// Set the autoplay flag.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Set whether consent is required.
    pub fn with_consent_required(mut self, consent_required: bool) -> Self {
        self.consent_required = consent_required;
        self
    }

    /// Decode from a container's data attributes.
    ///
    /// Missing identifiers decode as empty strings; flags are set only by `"1"`.
    pub fn from_container<C: EmbedContainer + ?Sized>(container: &C) -> Self {
        let flag = |key: &str| container.data(key).as_deref() == Some("1");

        Self {
            provider_account_id: container.data(DATA_PARTNER_ID).unwrap_or_default(),
            media_id: container.data(DATA_ENTRY_ID).unwrap_or_default(),
            poster_url: container.data(DATA_POSTER).filter(|p| !p.is_empty()),
            autoplay: flag(DATA_AUTOPLAY),
            consent_required: flag(DATA_CONSENT),
        }
    }

    /// Encode as `(dataset key, value)` pairs, in render order.
    pub fn data_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            (DATA_ENTRY_ID, self.media_id.clone()),
            (DATA_PARTNER_ID, self.provider_account_id.clone()),
            (DATA_AUTOPLAY, flag_value(self.autoplay).to_string()),
            (DATA_CONSENT, flag_value(self.consent_required).to_string()),
        ];
        if let Some(poster) = &self.poster_url {
            attrs.push((DATA_POSTER, poster.clone()));
        }
        attrs
    }
}

fn flag_value(flag: bool) -> &'static str {
    if flag {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DetachedContainer;

    #[test]
    fn test_data_attributes_roundtrip_through_container() {
        let config = EmbedConfig::new("1234", "1_abcd")
            .with_poster("https://img.example/p.jpg")
            .with_autoplay(true)
            .with_consent_required(false);

        let container = DetachedContainer::from_config(&config);
        assert_eq!(EmbedConfig::from_container(&container), config);
    }

    #[test]
    fn test_missing_attributes_decode_to_empty() {
        let container = DetachedContainer::new();
        let config = EmbedConfig::from_container(&container);

        assert_eq!(config.provider_account_id, "");
        assert_eq!(config.media_id, "");
        assert_eq!(config.poster_url, None);
        assert!(!config.autoplay);
        assert!(!config.consent_required);
    }

    #[test]
    fn test_flags_require_exact_one() {
        let container = DetachedContainer::new()
            .with_data(DATA_AUTOPLAY, "true")
            .with_data(DATA_CONSENT, "1");
        let config = EmbedConfig::from_container(&container);

        assert!(!config.autoplay);
        assert!(config.consent_required);
    }

    #[test]
    fn test_empty_poster_is_none() {
        let config = EmbedConfig::new("1", "2").with_poster("");
        assert_eq!(config.poster_url, None);
        assert!(config.data_attributes().iter().all(|(k, _)| *k != DATA_POSTER));
    }

    #[test]
    fn test_deserialize_defaults_consent_on() {
        let config: EmbedConfig =
            serde_json::from_str(r#"{"provider_account_id":"1","media_id":"2"}"#).unwrap();
        assert!(config.consent_required);
        assert!(!config.autoplay);
    }
}
