//! Resolver for the `kalturaBlocks` field.

use std::collections::HashMap;

use crate::extract::BlockTreeExtractor;
use crate::parser::parse_blocks;
use crate::record::BlockRecord;

/// Read access to stored post content.
pub trait ContentStore: Send + Sync {
    /// Serialized content of an item, or `None` when it does not exist.
    fn stored_content(&self, id: u64) -> Option<String>;
}

impl ContentStore for HashMap<u64, String> {
    fn stored_content(&self, id: u64) -> Option<String> {
        self.get(&id).cloned()
    }
}

/// The query node a field is resolved on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeSource {
    /// Database id of the node, when it has one.
    pub id: Option<u64>,
}

impl NodeSource {
    pub fn new(id: u64) -> Self {
        Self { id: Some(id) }
    }
}

/// Resolves `kalturaBlocks` by loading, parsing and extracting.
#[derive(Debug, Clone)]
pub struct KalturaBlocksResolver<S> {
    store: S,
    extractor: BlockTreeExtractor,
}

impl<S: ContentStore> KalturaBlocksResolver<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            extractor: BlockTreeExtractor::new(),
        }
    }

    /// Use a different extractor.
    pub fn with_extractor(mut self, extractor: BlockTreeExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Records for a node; empty when the node has no id or no stored
    /// content.
    pub fn resolve(&self, source: &NodeSource) -> Vec<BlockRecord> {
        let Some(id) = source.id else {
            return Vec::new();
        };
        let Some(content) = self.store.stored_content(id) else {
            tracing::debug!(id, "no stored content for node");
            return Vec::new();
        };
        self.extractor.extract(&parse_blocks(&content))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HashMap<u64, String> {
        let mut store = HashMap::new();
        store.insert(
            7,
            concat!(
                r#"<!-- wp:press/kaltura-video {"partnerId":"1","entryId":"1_a"} /-->"#,
                r#"<!-- wp:group --><!-- wp:press/kaltura-video {"partnerId":"1","entryId":"1_b"} /--><!-- /wp:group -->"#,
            )
            .to_string(),
        );
        store.insert(8, "<p>No blocks here</p>".to_string());
        store
    }

    #[test]
    fn test_resolve_in_document_order() {
        let resolver = KalturaBlocksResolver::new(store());
        let records = resolver.resolve(&NodeSource::new(7));

        let ids: Vec<_> = records.iter().map(|r| r.media_id.as_str()).collect();
        assert_eq!(ids, vec!["1_a", "1_b"]);
    }

    #[test]
    fn test_resolve_without_blocks() {
        let resolver = KalturaBlocksResolver::new(store());
        assert!(resolver.resolve(&NodeSource::new(8)).is_empty());
    }

    #[test]
    fn test_resolve_missing_node() {
        let resolver = KalturaBlocksResolver::new(store());
        assert!(resolver.resolve(&NodeSource::new(99)).is_empty());
        assert!(resolver.resolve(&NodeSource::default()).is_empty());
    }
}
