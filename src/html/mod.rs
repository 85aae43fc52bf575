//! Lenient HTML fragment parsing.
//!
//! Editor submissions are not well-formed documents, so parsing goes through
//! a forgiving parser and falls back to treating the whole input as text
//! when even that fails. Text nodes keep their source entity encoding; it is
//! decoded once, by whoever consumes the text.

use indexmap::IndexMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: String,
        attrs: IndexMap<String, String>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }
}

pub fn parse(src: &str) -> Vec<Node> {
    let dom = match html_parser::Dom::parse(src) {
        Ok(dom) => dom,
        // the parser rejects some fragments it accepts inside a document
        // wrapper, a bare <body> root among them; retry wrapped before
        // degrading to text
        Err(e) => match html_parser::Dom::parse(&format!("<html>{src}</html>")) {
            Ok(dom) => dom,
            Err(_) => {
                warn!(%e, "failed to parse html, treating input as text");
                return vec![Node::Text(src.to_string())];
            }
        },
    };
    dom.children.into_iter().filter_map(convert).collect()
}

fn convert(node: html_parser::Node) -> Option<Node> {
    match node {
        html_parser::Node::Comment(_) => None,
        html_parser::Node::Text(text) => Some(Node::Text(text)),
        html_parser::Node::Element(html_parser::Element {
            id,
            name,
            children,
            attributes,
            classes,
            ..
        }) => {
            let mut attrs = attributes
                .into_iter()
                .map(|(name, value)| (name, value.unwrap_or_default()))
                .collect::<IndexMap<String, String>>();
            if let Some(id) = id {
                attrs.insert("id".to_string(), id);
            }
            if !classes.is_empty() {
                attrs.insert("class".to_string(), classes.join(" "));
            }
            let children = children.into_iter().filter_map(convert).collect();
            Some(Node::Element {
                tag: name,
                attrs,
                children,
            })
        }
    }
}

/// Locate the effective body root of a parsed fragment.
///
/// A full document wraps content in `<html>`/`<body>`; a fragment does not.
/// Descends through a top-level `<html>` wrapper and then into its `<body>`
/// child. When no such wrapper exists the parsed forest itself is the root.
pub fn body_children(nodes: Vec<Node>) -> Vec<Node> {
    descend(descend(nodes, "html"), "body")
}

fn descend(nodes: Vec<Node>, wrapper: &str) -> Vec<Node> {
    let wrapped = nodes
        .iter()
        .any(|node| matches!(node.tag(), Some(tag) if tag.eq_ignore_ascii_case(wrapper)));
    if !wrapped {
        return nodes;
    }
    nodes
        .into_iter()
        .find_map(|node| match node {
            Node::Element { tag, children, .. } if tag.eq_ignore_ascii_case(wrapper) => {
                Some(children)
            }
            _ => None,
        })
        .unwrap_or_default()
}

const VOID_TAGS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize a single node back to an HTML string.
pub fn serialize(node: &Node) -> String {
    let mut out = String::new();
    write(&mut out, node);
    out
}

fn write(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
            }
            if children.is_empty() && VOID_TAGS.contains(&tag.as_str()) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in children {
                write(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
