//! Cache revalidation for published content.
//!
//! When a content item lands on `publish`, the rendering tier is told which
//! path to regenerate with a single signed JSON POST.
//!
//! This crate provides:
//! - `RevalidateConfig` - Secret, endpoint, route prefix and timeout
//! - `RevalidationDispatcher` - Transition filtering, request building, outcome classification
//! - `Transport` / `HttpTransport` - Outbound HTTP seam
//! - `slugify` / `PathFilter` - Target path resolution
//!
//! # Example
//!
//! ```ignore
//! use press_revalidate::{HttpTransport, RevalidateConfig, RevalidationDispatcher};
//!
//! let dispatcher = RevalidationDispatcher::new(RevalidateConfig::from_env(), HttpTransport::new()?);
//! let outcome = dispatcher.on_status_transition(&event).await;
//! ```

mod config;
mod dispatcher;
mod error;
mod path;
mod request;
mod transport;

pub use config::*;
pub use dispatcher::*;
pub use error::*;
pub use path::*;
pub use request::*;
pub use transport::*;
