//! HTML to Markdown serialization over the lenient DOM.
//!
//! Covers the vocabulary a rich-text editing surface produces: paragraphs,
//! headings, lists (nested), blockquotes and the usual inline markup.
//! Anything else is unwrapped to its inline content.

use itertools::Itertools;

use crate::html::Node;

pub(crate) fn write_document(nodes: &[Node]) -> String {
    nodes.iter().filter_map(write_block).join("\n\n")
}

fn write_block(node: &Node) -> Option<String> {
    let block = match node {
        Node::Text(text) => collapse_whitespace(&decode(text)).trim().to_string(),
        Node::Element { tag, children, .. } => match tag.to_ascii_lowercase().as_str() {
            "p" => inline(children).trim().to_string(),
            "ul" => write_list(children, false, 0),
            "ol" => write_list(children, true, 0),
            "blockquote" => write_document(children)
                .lines()
                .map(|line| format!("> {line}"))
                .join("\n"),
            "hr" => "---".to_string(),
            "br" => String::new(),
            tag => match heading_level(tag) {
                Some(level) => format!("{} {}", "#".repeat(level), inline(children).trim()),
                None => inline(children).trim().to_string(),
            },
        },
    };
    (!block.is_empty()).then_some(block)
}

fn heading_level(tag: &str) -> Option<usize> {
    tag.strip_prefix('h')
        .and_then(|level| level.parse::<usize>().ok())
        .filter(|level| (1..=6).contains(level))
}

fn write_list(items: &[Node], ordered: bool, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut lines = Vec::new();
    let mut index = 0usize;
    for item in items {
        let Node::Element { tag, children, .. } = item else {
            continue;
        };
        if !tag.eq_ignore_ascii_case("li") {
            continue;
        }
        index += 1;
        let marker = if ordered {
            format!("{index}. ")
        } else {
            "- ".to_string()
        };
        let (nested, content): (Vec<&Node>, Vec<&Node>) = children.iter().partition(|child| {
            matches!(child.tag(), Some(tag) if tag.eq_ignore_ascii_case("ul") || tag.eq_ignore_ascii_case("ol"))
        });
        let text = inline_iter(content.iter().copied()).trim().to_string();
        lines.push(format!("{indent}{marker}{text}"));
        for list in nested {
            if let Node::Element { tag, children, .. } = list {
                let block = write_list(children, tag.eq_ignore_ascii_case("ol"), depth + 1);
                if !block.is_empty() {
                    lines.push(block);
                }
            }
        }
    }
    lines.join("\n")
}

fn inline(nodes: &[Node]) -> String {
    inline_iter(nodes.iter())
}

fn inline_iter<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> String {
    let mut out = String::new();
    for node in nodes {
        write_inline(&mut out, node);
    }
    out
}

fn write_inline(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&collapse_whitespace(&decode(text))),
        Node::Element {
            tag,
            attrs,
            children,
        } => match tag.to_ascii_lowercase().as_str() {
            "strong" | "b" => wrap(out, "**", children),
            "em" | "i" => wrap(out, "*", children),
            "code" => wrap(out, "`", children),
            "a" => {
                out.push('[');
                for child in children {
                    write_inline(out, child);
                }
                out.push_str("](");
                out.push_str(attrs.get("href").map(String::as_str).unwrap_or_default());
                out.push(')');
            }
            "img" => {
                out.push_str("![");
                out.push_str(attrs.get("alt").map(String::as_str).unwrap_or_default());
                out.push_str("](");
                out.push_str(attrs.get("src").map(String::as_str).unwrap_or_default());
                out.push(')');
            }
            "br" => out.push_str("  \n"),
            _ => {
                for child in children {
                    write_inline(out, child);
                }
            }
        },
    }
}

fn wrap(out: &mut String, marker: &str, children: &[Node]) {
    out.push_str(marker);
    for child in children {
        write_inline(out, child);
    }
    out.push_str(marker);
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
