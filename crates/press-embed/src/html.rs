//! Minimal HTML escaping for generated markup.

/// Escape a value for use inside a double- or single-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for use as element text.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for a double-quoted CSS string such as `url("...")`.
pub(crate) fn escape_css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(
            escape_attr(r#"a"b'c<d>&"#),
            "a&quot;b&#039;c&lt;d&gt;&amp;"
        );
        assert_eq!(escape_attr("plain-123"), "plain-123");
    }

    #[test]
    fn test_escape_text_keeps_quotes() {
        assert_eq!(escape_text(r#"Allow & "Play""#), r#"Allow &amp; "Play""#);
    }

    #[test]
    fn test_escape_css_string() {
        assert_eq!(escape_css_string(r#"a"b\c"#), r#"a\"b\\c"#);
    }
}
