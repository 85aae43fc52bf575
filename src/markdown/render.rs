use pulldown_cmark::{Options, Parser, html};

use crate::markdown::{Markdown, writer};

/// Default [`Markdown`] implementation: CommonMark rendering via
/// `pulldown-cmark`, HTML to Markdown via the serializer in
/// [`writer`](super::writer).
#[derive(Debug, Clone, Copy, Default)]
pub struct Cmark;

impl Markdown for Cmark {
    fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::empty());
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }

    fn to_markdown(&self, src: &str) -> String {
        writer::write_document(&crate::html::parse(src))
    }
}

#[cfg(test)]
mod tests {
    use super::Cmark;
    use crate::markdown::Markdown;

    #[test]
    fn test_paragraph_to_html() {
        assert_eq!(Cmark.to_html("Hello"), "<p>Hello</p>\n");
    }

    #[test]
    fn test_heading_to_html() {
        assert_eq!(Cmark.to_html("## Title"), "<h2>Title</h2>\n");
    }

    #[test]
    fn test_list_to_html_tolerates_one_space_indent() {
        let html = Cmark.to_html(" - One\n - Two");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>One</li>"));
        assert!(html.contains("<li>Two</li>"));
    }

    #[test]
    fn test_paragraph_to_markdown() {
        assert_eq!(Cmark.to_markdown("<p>Hello</p>"), "Hello");
    }

    #[test]
    fn test_heading_to_markdown() {
        assert_eq!(Cmark.to_markdown("<h2>Title</h2>"), "## Title");
    }

    #[test]
    fn test_list_to_markdown() {
        assert_eq!(
            Cmark.to_markdown("<ul><li>One</li><li>Two</li></ul>"),
            "- One\n- Two"
        );
    }

    #[test]
    fn test_inline_markup_to_markdown() {
        assert_eq!(
            Cmark.to_markdown("<p>Say <strong>hi</strong> to <em>them</em></p>"),
            "Say **hi** to *them*"
        );
    }

    #[test]
    fn test_link_to_markdown() {
        assert_eq!(
            Cmark.to_markdown(r#"<p><a href="https://example.com">link</a></p>"#),
            "[link](https://example.com)"
        );
    }

    #[test]
    fn test_inline_round_trip() {
        let markdown = Cmark.to_markdown("<p>Say <strong>hi</strong></p>");
        assert_eq!(Cmark.to_html(&markdown), "<p>Say <strong>hi</strong></p>\n");
    }
}
