//! Content tree nodes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::BlockError;

/// Loosely typed block attributes, as stored by the host.
pub type BlockAttrs = Map<String, Value>;

/// One node of a parsed content tree.
///
/// Field names follow the host's parsed-block JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Fully qualified block name; `None` for freeform HTML.
    #[serde(rename = "blockName", default)]
    pub name: Option<String>,
    /// Block attributes.
    #[serde(default, deserialize_with = "attrs_or_empty")]
    pub attrs: BlockAttrs,
    /// Nested blocks, in document order.
    #[serde(rename = "innerBlocks", default)]
    pub inner_blocks: Vec<BlockNode>,
    /// Markup between the block delimiters, excluding nested blocks.
    #[serde(rename = "innerHTML", default)]
    pub inner_html: String,
}

impl BlockNode {
    /// Create a named block.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create a freeform HTML node.
    pub fn freeform(html: impl Into<String>) -> Self {
        Self {
            inner_html: html.into(),
            ..Default::default()
        }
    }

    /// Set the attributes.
    pub fn with_attrs(mut self, attrs: BlockAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Append a nested block.
    pub fn with_child(mut self, child: BlockNode) -> Self {
        self.inner_blocks.push(child);
        self
    }

    /// Whether this node has the given block name.
    pub fn is(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Whether this node is freeform HTML.
    pub fn is_freeform(&self) -> bool {
        self.name.is_none()
    }

    /// Decode a tree from the host's parsed-block JSON (an array of nodes).
    pub fn tree_from_json(json: &str) -> Result<Vec<BlockNode>, BlockError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The host encodes empty attributes as `[]`; anything but an object is empty.
fn attrs_or_empty<'de, D>(deserializer: D) -> Result<BlockAttrs, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_from_host_json() {
        let json = r#"[
            {"blockName": "core/group", "attrs": [], "innerBlocks": [
                {"blockName": "press/kaltura-video", "attrs": {"entryId": "1_a"}, "innerBlocks": [], "innerHTML": ""}
            ], "innerHTML": "<div></div>"},
            {"blockName": null, "attrs": {}, "innerBlocks": [], "innerHTML": "\n\n"}
        ]"#;
        let tree = BlockNode::tree_from_json(json).unwrap();

        assert_eq!(tree.len(), 2);
        assert!(tree[0].is("core/group"));
        assert!(tree[0].attrs.is_empty());
        assert_eq!(tree[0].inner_blocks[0].attrs["entryId"], "1_a");
        assert!(tree[1].is_freeform());
    }

    #[test]
    fn test_missing_fields_default() {
        let tree = BlockNode::tree_from_json(r#"[{"blockName": "core/paragraph"}]"#).unwrap();
        assert!(tree[0].inner_blocks.is_empty());
        assert!(tree[0].inner_html.is_empty());
    }

    #[test]
    fn test_invalid_tree() {
        assert!(matches!(
            BlockNode::tree_from_json("{\"blockName\": 1}"),
            Err(BlockError::InvalidTree(_))
        ));
    }
}
