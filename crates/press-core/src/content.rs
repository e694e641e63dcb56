//! Content items and their lifecycle vocabulary.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a content item as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentStatus {
    /// Saved but not visible.
    Draft,
    /// Publicly visible.
    Publish,
    /// Awaiting review.
    Pending,
    /// Visible to authorised users only.
    Private,
    /// Scheduled for later publication.
    Future,
    /// Moved to the trash.
    Trash,
    /// Created by the editor before the first save.
    AutoDraft,
    /// Inherits its status from a parent (revisions, attachments).
    Inherit,
    /// No previous status; the item was just created.
    New,
    /// Any status this crate has no name for.
    Other(String),
}

impl ContentStatus {
    /// Get the host's name for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Publish => "publish",
            Self::Pending => "pending",
            Self::Private => "private",
            Self::Future => "future",
            Self::Trash => "trash",
            Self::AutoDraft => "auto-draft",
            Self::Inherit => "inherit",
            Self::New => "new",
            Self::Other(name) => name,
        }
    }

    /// Check if the item is publicly visible in this status.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Publish)
    }
}

impl FromStr for ContentStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "draft" => Self::Draft,
            "publish" => Self::Publish,
            "pending" => Self::Pending,
            "private" => Self::Private,
            "future" => Self::Future,
            "trash" => Self::Trash,
            "auto-draft" => Self::AutoDraft,
            "inherit" => Self::Inherit,
            "new" => Self::New,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for ContentStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<ContentStatus> for String {
    fn from(status: ContentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Post,
    Page,
    Attachment,
    /// A stored revision of another item.
    Revision,
    /// Custom content type.
    Other(String),
}

impl ContentType {
    /// Get the host's name for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Page => "page",
            Self::Attachment => "attachment",
            Self::Revision => "revision",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for ContentType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "post" => Self::Post,
            "page" => Self::Page,
            "attachment" => Self::Attachment,
            "revision" => Self::Revision,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for ContentType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<ContentType> for String {
    fn from(kind: ContentType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The parts of a content item the platform reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentHandle {
    /// Host identifier.
    pub id: u64,
    /// Content type.
    pub content_type: ContentType,
    /// URL slug; empty when the host has not assigned one yet.
    #[serde(default)]
    pub slug: String,
    /// Title, used to derive a slug when none is set.
    #[serde(default)]
    pub title: String,
}

impl ContentHandle {
    /// Create a handle with no slug or title.
    pub fn new(id: u64, content_type: ContentType) -> Self {
        Self {
            id,
            content_type,
            slug: String::new(),
            title: String::new(),
        }
    }

    /// Set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Check if this handle is a stored revision.
    pub fn is_revision(&self) -> bool {
        self.content_type == ContentType::Revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_known_names() {
        assert_eq!("publish".parse::<ContentStatus>(), Ok(ContentStatus::Publish));
        assert_eq!("auto-draft".parse::<ContentStatus>(), Ok(ContentStatus::AutoDraft));
        assert_eq!("inherit".parse::<ContentStatus>(), Ok(ContentStatus::Inherit));
    }

    #[test]
    fn test_status_unknown_name_is_kept() {
        let status: ContentStatus = "request-pending".parse().unwrap();
        assert_eq!(status, ContentStatus::Other("request-pending".to_string()));
        assert_eq!(status.to_string(), "request-pending");
    }

    #[test]
    fn test_status_serde_uses_host_names() {
        let json = serde_json::to_string(&ContentStatus::AutoDraft).unwrap();
        assert_eq!(json, r#""auto-draft""#);

        let status: ContentStatus = serde_json::from_str(r#""future""#).unwrap();
        assert_eq!(status, ContentStatus::Future);
    }

    #[test]
    fn test_content_type_revision() {
        let handle = ContentHandle::new(7, "revision".parse().unwrap());
        assert!(handle.is_revision());
        assert!(!ContentHandle::new(7, ContentType::Post).is_revision());
    }

    #[test]
    fn test_handle_deserialize_defaults() {
        let handle: ContentHandle =
            serde_json::from_str(r#"{"id": 3, "content_type": "page"}"#).unwrap();
        assert_eq!(handle.content_type, ContentType::Page);
        assert!(handle.slug.is_empty());
        assert!(handle.title.is_empty());
    }
}
