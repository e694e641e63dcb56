//! Provider iframe URL construction.

use crate::config::EmbedConfig;

/// Kaltura secure CDN host.
pub const EMBED_HOST: &str = "https://cdnapisec.kaltura.com";

/// Player configuration used for every embed.
pub const DEFAULT_UICONF_ID: u64 = 23448213;

/// Builds the fully-qualified iframe URL for an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedUrlBuilder {
    host: String,
    uiconf_id: u64,
}

impl Default for EmbedUrlBuilder {
    fn default() -> Self {
        Self {
            host: EMBED_HOST.to_string(),
            uiconf_id: DEFAULT_UICONF_ID,
        }
    }
}

impl EmbedUrlBuilder {
    /// Create a builder for the default host and player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different player configuration.
    pub fn with_uiconf_id(mut self, uiconf_id: u64) -> Self {
        self.uiconf_id = uiconf_id;
        self
    }

    /// Use a different host (no trailing slash needed).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the URL for an account, entry and autoplay flag.
    pub fn build(&self, provider_account_id: &str, media_id: &str, autoplay: bool) -> String {
        let partner = encode_uri_component(provider_account_id);
        format!(
            "{host}/p/{partner}/sp/{partner}00/embedIframeJs/uiconf_id/{uiconf}/partner_id/{partner}?entry_id={entry}&autoPlay={autoplay}",
            host = self.host,
            partner = partner,
            uiconf = self.uiconf_id,
            entry = encode_uri_component(media_id),
            autoplay = autoplay,
        )
    }

    /// Build the URL for a decoded config.
    pub fn build_for(&self, config: &EmbedConfig) -> String {
        self.build(&config.provider_account_id, &config.media_id, config.autoplay)
    }
}

/// Build the embed URL with the default host and player.
pub fn embed_url(provider_account_id: &str, media_id: &str, autoplay: bool) -> String {
    EmbedUrlBuilder::new().build(provider_account_id, media_id, autoplay)
}

/// Percent-encode a URI component, leaving `A-Z a-z 0-9 - _ . ! ~ * ' ( )` intact.
pub fn encode_uri_component(value: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(value.len());
    for &b in value.as_bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}
