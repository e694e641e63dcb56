//! Lazy, consent-gated video embed for the press platform.
//!
//! This crate provides:
//! - `EmbedConfig` - Embed parameters carried by a container's data attributes
//! - `EmbedUrlBuilder` - Provider iframe URL construction
//! - `ConsentGate` - Per-container consent state
//! - `MountController` - Visibility-driven, at-most-once mount of the live frame
//! - `render_container` - Server-side placeholder markup
//!
//! # Example
//!
//! ```ignore
//! use press_embed::{DetachedContainer, ManualObserver, MountController, MountOptions};
//!
//! let container = DetachedContainer::from_config(&config);
//! let mut controller =
//!     MountController::setup(container, ManualObserver::default(), MountOptions::default());
//!
//! controller.on_visibility(&[VisibilityEntry::intersecting()]);
//! controller.on_consent_click();
//! ```

mod config;
mod consent;
mod container;
mod controller;
mod frame;
mod html;
mod render;
mod url;

pub use config::*;
pub use consent::*;
pub use container::*;
pub use controller::*;
pub use frame::*;
pub use html::{escape_attr, escape_text};
pub use render::*;
pub use url::*;
