//! Block tree parsing and the Kaltura block query surface.
//!
//! This crate provides:
//! - `BlockNode` / `parse_blocks` - The host's content tree and its serialized form
//! - `KalturaAttributes` - Typed decoding of loosely typed block attributes
//! - `BlockTreeExtractor` - Depth-first collection of embed records
//! - `register_kaltura_schema` / `KalturaBlocksResolver` - Structured query wiring
//!
//! # Example
//!
//! ```ignore
//! use press_blocks::{parse_blocks, BlockTreeExtractor};
//!
//! let tree = parse_blocks(&post_content);
//! let records = BlockTreeExtractor::new().extract(&tree);
//! ```

mod attrs;
mod error;
mod extract;
mod node;
mod parser;
mod record;
mod resolver;
mod schema;

pub use attrs::*;
pub use error::BlockError;
pub use extract::*;
pub use node::*;
pub use parser::*;
pub use record::*;
pub use resolver::*;
pub use schema::*;
