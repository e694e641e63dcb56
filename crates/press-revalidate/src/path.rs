//! Target path resolution.

use press_core::ContentHandle;

/// Overrides the computed revalidation path for a content item.
pub trait PathFilter: Send + Sync {
    /// Return the path to revalidate, given the computed default.
    fn filter(&self, path: String, content: &ContentHandle) -> String;
}

impl<F> PathFilter for F
where
    F: Fn(String, &ContentHandle) -> String + Send + Sync,
{
    fn filter(&self, path: String, content: &ContentHandle) -> String {
        self(path, content)
    }
}

/// Default path for a content item: prefix + slug, or a slug derived from
/// the title when the item has none yet.
pub fn default_path(prefix: &str, content: &ContentHandle) -> String {
    let slug = if content.slug.is_empty() {
        slugify(&content.title)
    } else {
        content.slug.clone()
    };
    format!("{}{}", prefix, slug)
}

/// Turn a title into a URL slug.
///
/// Tags are stripped, ASCII is lowercased, whitespace, `.` and `/` become
/// dashes, anything outside `[a-z0-9_-]` is dropped, and dash runs collapse.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_tag = false;

    for c in title.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_ascii_alphanumeric() => slug.push(c.to_ascii_lowercase()),
            '_' => slug.push('_'),
            c if c.is_whitespace() || c == '-' || c == '.' || c == '/' => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }

    slug.trim_matches('-').to_string()
}
