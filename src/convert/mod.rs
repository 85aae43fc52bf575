//! The two-way conversion between editor HTML and block documents.

use itertools::Itertools;
use serde_json::Value;
use tracing::warn;

use crate::{
    Error,
    block::{Block, BlockDocument, VideoSource},
    html::{self, Node},
    markdown::{Cmark, Markdown},
};

/// Converts editor-submitted HTML fragments into block documents and stored
/// block documents back into renderable HTML.
///
/// The Markdown transform pair is an injected collaborator; [`Converter::new`]
/// wires in the default [`Cmark`] implementation.
pub struct Converter<M = Cmark> {
    markdown: M,
}

impl Converter<Cmark> {
    pub fn new() -> Self {
        Self { markdown: Cmark }
    }
}

impl Default for Converter<Cmark> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Markdown> Converter<M> {
    pub fn with_markdown(markdown: M) -> Self {
        Self { markdown }
    }

    /// Convert an HTML fragment to block-document JSON.
    pub fn encode_to_blocks(&self, fragment: &str) -> Result<String, Error> {
        self.encode(fragment).to_json()
    }

    /// Convert a stored value to HTML for display.
    ///
    /// An empty value passes through untouched, without a parse attempt.
    pub fn decode_to_html(&self, value: &str) -> Result<String, Error> {
        if value.is_empty() {
            return Ok(value.to_string());
        }
        let document = BlockDocument::from_json(value)?;
        Ok(self.render(&document))
    }

    /// Decompose an HTML fragment into blocks, one per supported top-level
    /// element of the effective body root, in document order.
    ///
    /// Unsupported elements are dropped, keeping editor submissions always
    /// convertible. The drop is logged because it loses content.
    pub fn encode(&self, fragment: &str) -> BlockDocument {
        let nodes = html::body_children(html::parse(fragment));
        let mut blocks = Vec::new();
        for node in &nodes {
            match node {
                Node::Text(text) if text.trim().is_empty() => {}
                Node::Text(_) => warn!("stray top-level text dropped"),
                Node::Element { tag, .. } => match tag.to_ascii_lowercase().as_str() {
                    "p" => blocks.push(Block::Text {
                        text: self.node_markdown(node),
                    }),
                    "h2" => blocks.push(Block::Heading {
                        text: heading_text(&self.node_markdown(node)),
                    }),
                    "ul" => blocks.push(Block::List {
                        text: indent_lines(&self.node_markdown(node)),
                    }),
                    tag => warn!(tag, "unsupported top-level tag dropped"),
                },
            }
        }
        BlockDocument { blocks }
    }

    fn node_markdown(&self, node: &Node) -> String {
        self.markdown.to_markdown(&html::serialize(node))
    }

    /// Render a block document, blocks in order, concatenated with no
    /// separator.
    pub fn render(&self, document: &BlockDocument) -> String {
        let mut out = String::new();
        for block in &document.blocks {
            self.render_block(&mut out, block);
        }
        out
    }

    fn render_block(&self, out: &mut String, block: &Block) {
        match block {
            Block::Heading { text } => {
                out.push_str(&self.markdown.to_html(&format!("## {text}")));
            }
            Block::Video {
                source: VideoSource::Youtube,
                remote_id,
            } => {
                out.push_str("<iframe class=\"youtube\" src=\"//www.youtube.com/embed/");
                out.push_str(&html_escape::encode_double_quoted_attribute(remote_id));
                out.push_str("\" frameborder=\"0\" allowfullscreen></iframe>");
            }
            Block::Video {
                source: VideoSource::Other(source),
                ..
            } => {
                warn!(%source, "unsupported video source dropped");
            }
            Block::Embed { html } => out.push_str(html),
            Block::Quote { text, city } => {
                out.push_str("<blockquote>");
                out.push_str(&self.markdown.to_html(text));
                if let Some(city) = city.as_deref().filter(|city| !city.is_empty()) {
                    out.push_str("<cite>");
                    out.push_str(&html_escape::encode_text(city));
                    out.push_str("</cite>");
                }
                out.push_str("</blockquote>");
            }
            Block::Text { text } | Block::List { text } => {
                out.push_str(&self.markdown.to_html(text));
            }
            Block::Unknown { kind, data } => {
                // unknown types fall back to plain Markdown text, never fail
                match data.get("text").and_then(Value::as_str) {
                    Some(text) => out.push_str(&self.markdown.to_html(text)),
                    None => warn!(%kind, "unknown block type without text dropped"),
                }
            }
        }
    }
}

/// The Markdown transform spells an `<h2>` as `## ...`; the stored heading
/// keeps the bare text because rendering prefixes the hashes again.
fn heading_text(markdown: &str) -> String {
    let stripped = markdown.trim_start_matches('#');
    if stripped.len() == markdown.len() {
        return markdown.to_string();
    }
    stripped.strip_prefix(' ').unwrap_or(stripped).to_string()
}

/// List blocks store every line, first included, with one leading space; a
/// quirk of the original stored format kept for compatibility.
fn indent_lines(markdown: &str) -> String {
    markdown.lines().map(|line| format!(" {line}")).join("\n")
}
