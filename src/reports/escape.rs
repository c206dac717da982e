//! Markdown escaping for report text.
//!
//! Titles, descriptions and code snippets come straight from the scanning
//! service and routinely contain `|`, backticks and brackets (Java
//! signatures, manifest XML). They must be escaped before they land in a
//! Markdown table or list.

/// How one character is rewritten in a given Markdown context.
fn escape_with(s: &str, newline: &str, extra: &[char]) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\r' => {}
            '\n' => result.push_str(newline),
            '\\' | '`' | '[' | ']' | '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            c if extra.contains(&c) => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// Escape text for a Markdown table cell.
///
/// ```
/// use mobscan::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a | b"), "a \\| b");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// ```
#[must_use]
pub fn escape_markdown_table(s: &str) -> String {
    escape_with(s, " ", &['|'])
}

/// Escape text for inline Markdown (headings, bold labels).
///
/// ```
/// use mobscan::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("**bold**"), "\\*\\*bold\\*\\*");
/// ```
#[must_use]
pub fn escape_markdown_inline(s: &str) -> String {
    escape_with(s, " ", &['*', '_', '#', '!', '~', '|'])
}

/// Escape text for a Markdown list item; newlines become `; `.
#[must_use]
pub fn escape_markdown_list(s: &str) -> String {
    escape_with(s, "; ", &['*'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_cells() {
        assert_eq!(escape_markdown_table("hello"), "hello");
        assert_eq!(
            escape_markdown_table("android:exported=\"true\" | <activity>"),
            "android:exported=\"true\" \\| \\<activity\\>"
        );
        assert_eq!(escape_markdown_table("row1\r\n| new | row |"), "row1 \\| new \\| row \\|");
    }

    #[test]
    fn test_trailing_backslash_cannot_swallow_pipe() {
        let cell = escape_markdown_table("C:\\app\\ | x");
        assert_eq!(cell, "C:\\\\app\\\\ \\| x");
        assert_eq!(escape_markdown_table("dir\\|next"), "dir\\\\\\|next");
        assert_eq!(escape_markdown_list("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_inline() {
        assert_eq!(escape_markdown_inline("_debug_ #1"), "\\_debug\\_ \\#1");
        assert_eq!(escape_markdown_inline("[link](url)"), "\\[link\\](url)");
    }

    #[test]
    fn test_list() {
        assert_eq!(escape_markdown_list("multi\nline"), "multi; line");
        assert_eq!(
            escape_markdown_list("String key = `AKIA...`"),
            "String key = \\`AKIA...\\`"
        );
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(escape_markdown_table("日本語 🎉"), "日本語 🎉");
        assert_eq!(escape_markdown_inline(""), "");
    }
}
