//! Extracted block records.

use press_embed::EmbedConfig;
use serde::{Deserialize, Serialize};

/// Normalized attributes of one Kaltura block, as served to queries.
///
/// Serialized with the field names of the `KalturaBlock` query type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Provider account id (`partnerId`).
    #[serde(rename = "partnerId")]
    pub provider_account_id: String,
    /// Media id (`entryId`).
    #[serde(rename = "entryId")]
    pub media_id: String,
    /// Poster image URL, empty when unset.
    #[serde(rename = "poster")]
    pub poster_url: String,
    pub autoplay: bool,
    #[serde(rename = "consentRequired")]
    pub consent_required: bool,
}

impl From<BlockRecord> for EmbedConfig {
    fn from(record: BlockRecord) -> Self {
        EmbedConfig::new(record.provider_account_id, record.media_id)
            .with_poster(record.poster_url)
            .with_autoplay(record.autoplay)
            .with_consent_required(record.consent_required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BlockRecord {
        BlockRecord {
            provider_account_id: "123".to_string(),
            media_id: "1_abc".to_string(),
            poster_url: String::new(),
            autoplay: true,
            consent_required: false,
        }
    }

    #[test]
    fn test_query_field_names() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "partnerId": "123",
                "entryId": "1_abc",
                "poster": "",
                "autoplay": true,
                "consentRequired": false
            })
        );
    }

    #[test]
    fn test_into_embed_config() {
        let config = EmbedConfig::from(record());
        assert_eq!(config.provider_account_id, "123");
        assert_eq!(config.media_id, "1_abc");
        assert_eq!(config.poster_url, None);
        assert!(config.autoplay);
        assert!(!config.consent_required);
    }
}
