//! Markdown to HTML conversion for post content.
//!
//! Standard CommonMark only: headings, paragraphs, emphasis, lists, links,
//! and code spans/blocks translate to their usual HTML equivalents. No
//! custom extensions are enabled.

use pulldown_cmark::{html, Options, Parser};

/// Render a post's markdown source as an HTML fragment.
pub fn markdown_to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::empty());
    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let html = markdown_to_html("# Hello\nThis is a test");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>This is a test</p>"));
    }

    #[test]
    fn test_emphasis_and_list() {
        let html = markdown_to_html("*em* and **strong**\n\n- one\n- two");
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<strong>strong</strong>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_link_and_code() {
        let html = markdown_to_html("[site](https://example.com) and `code`");
        assert!(html.contains(r#"<a href="https://example.com">site</a>"#));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(markdown_to_html(""), "");
    }
}
