//! Serialized block grammar.
//!
//! Blocks are delimited by HTML comments:
//!
//! ```text
//! <!-- wp:ns/name {"key":"value"} -->inner<!-- /wp:ns/name -->
//! <!-- wp:ns/void {"key":"value"} /-->
//! ```
//!
//! Names without a namespace belong to `core/`. Markup outside any block
//! becomes a freeform node.

use serde_json::Value;

use crate::node::{BlockAttrs, BlockNode};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const DEFAULT_NAMESPACE: &str = "core";

#[derive(Debug, PartialEq)]
enum Token {
    Open {
        name: String,
        attrs: BlockAttrs,
        void: bool,
    },
    Close {
        name: String,
    },
}

/// Parse serialized post content into a block tree.
///
/// Parsing never fails. Comments that are not block delimiters stay part of
/// the surrounding markup, unclosed blocks are closed at the end of input,
/// and closers that match no open block are kept as markup.
pub fn parse_blocks(document: &str) -> Vec<BlockNode> {
    let mut builder = TreeBuilder::default();
    let mut rest = document;

    while let Some(start) = rest.find(COMMENT_OPEN) {
        let (text, comment) = rest.split_at(start);
        builder.push_text(text);

        let body = &comment[COMMENT_OPEN.len()..];
        let Some(end) = body.find(COMMENT_CLOSE) else {
            builder.push_text(comment);
            rest = "";
            break;
        };
        let token_len = COMMENT_OPEN.len() + end + COMMENT_CLOSE.len();

        match parse_token(&body[..end]) {
            Some(Token::Open { name, attrs, void }) => {
                let node = BlockNode::new(name).with_attrs(attrs);
                if void {
                    builder.push_node(node);
                } else {
                    builder.open(node);
                }
            }
            Some(Token::Close { name }) if builder.is_open(&name) => builder.close(),
            Some(Token::Close { name }) => {
                tracing::trace!(block = %name, "unmatched block closer kept as markup");
                builder.push_text(&comment[..token_len]);
            }
            None => builder.push_text(&comment[..token_len]),
        }

        rest = &comment[token_len..];
    }

    builder.push_text(rest);
    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    output: Vec<BlockNode>,
    stack: Vec<BlockNode>,
}

impl TreeBuilder {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(parent) = self.stack.last_mut() {
            parent.inner_html.push_str(text);
            return;
        }
        match self.output.last_mut() {
            Some(last) if last.is_freeform() => last.inner_html.push_str(text),
            _ => self.output.push(BlockNode::freeform(text)),
        }
    }

    fn push_node(&mut self, node: BlockNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.inner_blocks.push(node),
            None => self.output.push(node),
        }
    }

    fn open(&mut self, node: BlockNode) {
        self.stack.push(node);
    }

    fn is_open(&self, name: &str) -> bool {
        self.stack.last().is_some_and(|node| node.is(name))
    }

    fn close(&mut self) {
        if let Some(node) = self.stack.pop() {
            self.push_node(node);
        }
    }

    fn finish(mut self) -> Vec<BlockNode> {
        while !self.stack.is_empty() {
            self.close();
        }
        self.output
    }
}

fn parse_token(body: &str) -> Option<Token> {
    let body = body.trim();

    if let Some(name) = body.strip_prefix("/wp:") {
        let name = qualify(name.trim())?;
        return Some(Token::Close { name });
    }

    let rest = body.strip_prefix("wp:")?;
    let (rest, void) = match rest.strip_suffix('/') {
        Some(rest) => (rest.trim_end(), true),
        None => (rest, false),
    };

    let (name, json) = match rest.find(char::is_whitespace) {
        Some(split) => (&rest[..split], rest[split..].trim()),
        None => (rest, ""),
    };
    let name = qualify(name)?;

    let attrs = if json.is_empty() {
        BlockAttrs::new()
    } else {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(attrs)) => attrs,
            _ => {
                tracing::trace!(block = %name, "invalid block attributes, kept as markup");
                return None;
            }
        }
    };

    Some(Token::Open { name, attrs, void })
}

/// Validate a block name and add the default namespace when missing.
fn qualify(name: &str) -> Option<String> {
    let (namespace, local) = match name.split_once('/') {
        Some((namespace, local)) => (namespace, local),
        None => (DEFAULT_NAMESPACE, name),
    };
    if is_name_part(namespace) && is_name_part(local) {
        Some(format!("{}/{}", namespace, local))
    } else {
        None
    }
}

fn is_name_part(part: &str) -> bool {
    let mut chars = part.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_block_with_attrs() {
        let tree = parse_blocks(
            r#"<!-- wp:press/kaltura-video {"partnerId":"123","entryId":"1_abc"} /-->"#,
        );
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is("press/kaltura-video"));
        assert_eq!(tree[0].attrs["partnerId"], "123");
        assert_eq!(tree[0].attrs["entryId"], "1_abc");
    }

    #[test]
    fn test_default_namespace() {
        let tree = parse_blocks("<!-- wp:paragraph --><p>Hi</p><!-- /wp:paragraph -->");
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is("core/paragraph"));
        assert_eq!(tree[0].inner_html, "<p>Hi</p>");
    }

    #[test]
    fn test_nested_blocks() {
        let doc = concat!(
            "<!-- wp:group -->",
            "<div>",
            "<!-- wp:columns --><!-- wp:column -->",
            r#"<!-- wp:press/kaltura-video {"entryId":"1_deep"} /-->"#,
            "<!-- /wp:column --><!-- /wp:columns -->",
            "</div>",
            "<!-- /wp:group -->",
        );
        let tree = parse_blocks(doc);

        assert_eq!(tree.len(), 1);
        let group = &tree[0];
        assert!(group.is("core/group"));
        assert_eq!(group.inner_html, "<div></div>");
        let column = &group.inner_blocks[0].inner_blocks[0];
        assert!(column.is("core/column"));
        assert_eq!(column.inner_blocks[0].attrs["entryId"], "1_deep");
    }

    #[test]
    fn test_freeform_between_blocks() {
        let tree = parse_blocks("<p>intro</p>\n<!-- wp:separator /-->\n<p>outro</p>");
        assert_eq!(tree.len(), 3);
        assert!(tree[0].is_freeform());
        assert_eq!(tree[0].inner_html, "<p>intro</p>\n");
        assert!(tree[1].is("core/separator"));
        assert_eq!(tree[2].inner_html, "\n<p>outro</p>");
    }

    #[test]
    fn test_plain_comments_stay_markup() {
        let tree = parse_blocks("<p>a</p><!-- just a note --><p>b</p>");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].inner_html, "<p>a</p><!-- just a note --><p>b</p>");
    }

    #[test]
    fn test_invalid_attrs_stay_markup() {
        let tree = parse_blocks("<!-- wp:press/kaltura-video {not json} /-->");
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is_freeform());

        let tree = parse_blocks(r#"<!-- wp:press/kaltura-video ["list"] /-->"#);
        assert!(tree[0].is_freeform());
    }

    #[test]
    fn test_invalid_names_stay_markup() {
        assert!(parse_blocks("<!-- wp:Bad/Name /-->")[0].is_freeform());
        assert!(parse_blocks("<!-- wp:a/b/c /-->")[0].is_freeform());
        assert!(parse_blocks("<!-- wp: /-->")[0].is_freeform());
    }

    #[test]
    fn test_unclosed_block_closed_at_end() {
        let tree = parse_blocks("<!-- wp:group --><p>open");
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is("core/group"));
        assert_eq!(tree[0].inner_html, "<p>open");
    }

    #[test]
    fn test_stray_closer_kept_as_markup() {
        let tree = parse_blocks("<p>x</p><!-- /wp:group -->");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].inner_html, "<p>x</p><!-- /wp:group -->");
    }

    #[test]
    fn test_unterminated_comment() {
        let tree = parse_blocks("<p>x</p><!-- wp:group");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].inner_html, "<p>x</p><!-- wp:group");
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_blocks("").is_empty());
    }

    #[test]
    fn test_attrs_containing_slash() {
        let tree = parse_blocks(
            r#"<!-- wp:press/kaltura-video {"poster":"https://cdn.example/p.jpg"} /-->"#,
        );
        assert_eq!(tree[0].attrs["poster"], "https://cdn.example/p.jpg");
    }
}
