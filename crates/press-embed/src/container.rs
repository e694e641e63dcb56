//! Host seams: the container element and the visibility observer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EmbedConfig;
use crate::frame::EmbedFrame;
use crate::render::{consent_prompt, ConsentCopy};

/// The element that will host the live frame.
///
/// Implementations wrap a real DOM node (or an in-memory stand-in). The
/// controller only reads data attributes once and writes the frame once.
pub trait EmbedContainer {
    /// Read a `data-*` attribute by dataset key (`"partnerid"` for `data-partnerid`).
    fn data(&self, key: &str) -> Option<String>;

    /// Whether the placeholder contains an allow control.
    fn has_consent_control(&self) -> bool;

    /// Replace the placeholder contents with the live frame.
    fn replace_contents(&mut self, frame: &EmbedFrame);
}

/// Forward margin around the viewport, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootMargin(pub u32);

impl RootMargin {
    /// Margin as a CSS length, e.g. `"200px"`.
    pub fn to_css(&self) -> String {
        format!("{}px", self.0)
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self(200)
    }
}

/// Watches one container for proximity to the viewport.
pub trait VisibilityObserver {
    /// Start watching with the given margin.
    fn observe(&mut self, margin: RootMargin);

    /// Stop watching. No further signals are delivered.
    fn disconnect(&mut self);
}

/// One visibility signal for the observed container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEntry {
    /// Whether the container is within the margin of the viewport.
    pub is_intersecting: bool,
}

impl VisibilityEntry {
    /// An entry reporting the container near the viewport.
    pub fn intersecting() -> Self {
        Self {
            is_intersecting: true,
        }
    }

    /// An entry reporting the container away from the viewport.
    pub fn outside() -> Self {
        Self {
            is_intersecting: false,
        }
    }
}

/// In-memory container, used for server-side previews and tests.
#[derive(Debug, Clone, Default)]
pub struct DetachedContainer {
    data: BTreeMap<String, String>,
    inner_html: String,
    consent_control: bool,
    replacements: usize,
}

impl DetachedContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container the way the server renders it for a config.
    pub fn from_config(config: &EmbedConfig) -> Self {
        let mut container = Self::new();
        for (key, value) in config.data_attributes() {
            container.data.insert(key.to_string(), value);
        }
        if config.consent_required {
            container.inner_html = consent_prompt(&ConsentCopy::default());
            container.consent_control = true;
        }
        container
    }

    /// Set a data attribute.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Set whether the placeholder carries an allow control.
    pub fn with_consent_control(mut self, present: bool) -> Self {
        self.consent_control = present;
        self
    }

    /// Current contents.
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Number of times the contents were replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl EmbedContainer for DetachedContainer {
    fn data(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn has_consent_control(&self) -> bool {
        self.consent_control
    }

    fn replace_contents(&mut self, frame: &EmbedFrame) {
        self.inner_html = frame.to_html();
        self.consent_control = false;
        self.replacements += 1;
    }
}

/// Observer whose signals are delivered by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualObserver {
    margin: Option<RootMargin>,
    observing: bool,
    disconnects: usize,
}

impl ManualObserver {
    /// Whether the observer is currently watching.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Margin passed to the last `observe` call.
    pub fn margin(&self) -> Option<RootMargin> {
        self.margin
    }

    /// Number of `disconnect` calls that stopped an active observation.
    pub fn disconnects(&self) -> usize {
        self.disconnects
    }
}

impl VisibilityObserver for ManualObserver {
    fn observe(&mut self, margin: RootMargin) {
        self.margin = Some(margin);
        self.observing = true;
    }

    fn disconnect(&mut self) {
        if self.observing {
            self.observing = false;
            self.disconnects += 1;
        }
    }
}
