//! The live embed frame that replaces a container's placeholder.

use crate::html::{escape_attr, escape_css_string};

/// Permissions granted to the provider frame.
pub const FRAME_ALLOW: &str = "autoplay; fullscreen; encrypted-media; picture-in-picture";
/// Referrer policy of the provider frame.
pub const FRAME_REFERRER_POLICY: &str = "no-referrer-when-downgrade";
/// Native loading hint of the provider frame.
pub const FRAME_LOADING: &str = "lazy";
/// Aspect ratio reserved by the wrapper.
pub const WRAPPER_ASPECT_RATIO: &str = "16/9";

/// A provider frame inside a positioning wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFrame {
    /// Frame source URL.
    pub src: String,
    /// Poster shown as the wrapper background until the frame paints.
    pub poster_url: Option<String>,
}

impl EmbedFrame {
    /// Create a frame for a source URL.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            poster_url: None,
        }
    }

    /// Show a poster behind the frame.
    pub fn with_poster(mut self, poster_url: Option<String>) -> Self {
        self.poster_url = poster_url.filter(|p| !p.is_empty());
        self
    }

    /// Fixed frame attributes, excluding `src` and `style`.
    pub fn frame_attributes(&self) -> [(&'static str, &'static str); 3] {
        [
            ("allow", FRAME_ALLOW),
            ("referrerpolicy", FRAME_REFERRER_POLICY),
            ("loading", FRAME_LOADING),
        ]
    }

    /// Inline style that makes the frame fill the wrapper.
    pub fn frame_style(&self) -> String {
        "position:absolute;inset:0;width:100%;height:100%;border:0".to_string()
    }

    /// Inline style of the wrapper.
    pub fn wrapper_style(&self) -> String {
        let mut style = format!("position:relative;aspect-ratio:{}", WRAPPER_ASPECT_RATIO);
        if let Some(poster) = &self.poster_url {
            style.push_str(&format!(
                ";background-image:url(\"{}\");background-size:cover;background-position:center",
                escape_css_string(poster)
            ));
        }
        style
    }

    /// Render wrapper and frame as markup.
    pub fn to_html(&self) -> String {
        let attrs: String = self
            .frame_attributes()
            .iter()
            .map(|(k, v)| format!(" {}=\"{}\"", k, escape_attr(v)))
            .collect();

        format!(
            "<div style=\"{}\"><iframe{} src=\"{}\" style=\"{}\"></iframe></div>",
            escape_attr(&self.wrapper_style()),
            attrs,
            escape_attr(&self.src),
            escape_attr(&self.frame_style()),
        )
    }
}
