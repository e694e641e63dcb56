//! Block tree extraction.

use crate::attrs::KalturaAttributes;
use crate::node::BlockNode;
use crate::record::BlockRecord;

/// Block name of the Kaltura video block.
pub const KALTURA_BLOCK_NAME: &str = "press/kaltura-video";

/// Collects Kaltura block records from a content tree.
///
/// Traversal is depth-first pre-order, so records come out in document
/// order. Extraction holds no state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTreeExtractor {
    block_name: String,
}

impl Default for BlockTreeExtractor {
    fn default() -> Self {
        Self::for_block(KALTURA_BLOCK_NAME)
    }
}

impl BlockTreeExtractor {
    /// Create an extractor for the Kaltura block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor for a differently named block with the same
    /// attributes.
    pub fn for_block(block_name: impl Into<String>) -> Self {
        Self {
            block_name: block_name.into(),
        }
    }

    /// Block name this extractor matches.
    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    /// Collect one record per matching block, at any depth.
    pub fn extract(&self, tree: &[BlockNode]) -> Vec<BlockRecord> {
        tree.iter().fold(Vec::new(), |mut records, node| {
            if node.is(&self.block_name) {
                records.push(KalturaAttributes::decode(&node.attrs).into_record());
            }
            records.extend(self.extract(&node.inner_blocks));
            records
        })
    }
}
