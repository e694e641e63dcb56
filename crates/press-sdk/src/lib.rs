//! Public SDK for the press publishing integration.
//!
//! This crate re-exports all integration functionality:
//!
//! ```ignore
//! use press_sdk::prelude::*;
//!
//! let config = RevalidateConfig::from_env();
//! let dispatcher = RevalidationDispatcher::new(config, HttpTransport::new()?);
//!
//! // On every content transition:
//! let outcome = dispatcher.on_status_transition(&event).await;
//!
//! // When serving structured queries:
//! let records = KalturaBlocksResolver::new(store).resolve(&NodeSource::new(id));
//! ```

pub use press_blocks;
pub use press_core;
pub use press_embed;
pub use press_revalidate;

/// Prelude for convenient imports.
pub mod prelude {
    pub use press_blocks::*;
    pub use press_core::*;
    pub use press_embed::*;
    pub use press_revalidate::*;
}
