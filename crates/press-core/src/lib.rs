//! Core content model for the press platform.
//!
//! This crate provides the types every other crate agrees on:
//! - `ContentStatus` - Lifecycle status of a content item
//! - `ContentType` - Kind of content item
//! - `ContentHandle` - The slice of a content item the platform needs
//! - `ContentTransitionEvent` - A single status change reported by the host

mod content;
mod transition;

pub use content::*;
pub use transition::*;
