//! The stored representation of a rich-content field: an ordered sequence of
//! typed blocks inside a `{"data": [...]}` envelope.
//!
//! Textual payloads (`text`, `heading`, `list`, `quote.text`) always hold
//! Markdown source, never raw HTML. Blocks go through a raw intermediate on
//! the wire so unrecognized types survive a decode/encode round trip and
//! malformed payloads surface as [`ValidationError`] with the block index
//! instead of a generic serde fault.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, ValidationDetail, ValidationError};

/// Hosting service a video block points at. Only youtube has a rendering;
/// other sources are carried through but render nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VideoSource {
    Youtube,
    Other(String),
}

impl From<String> for VideoSource {
    fn from(value: String) -> Self {
        match value.as_str() {
            "youtube" => Self::Youtube,
            _ => Self::Other(value),
        }
    }
}

impl From<VideoSource> for String {
    fn from(value: VideoSource) -> Self {
        match value {
            VideoSource::Youtube => "youtube".to_string(),
            VideoSource::Other(source) => source,
        }
    }
}

/// One semantic unit of rich content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text {
        text: String,
    },
    Heading {
        text: String,
    },
    List {
        text: String,
    },
    Video {
        source: VideoSource,
        remote_id: String,
    },
    Embed {
        html: String,
    },
    Quote {
        text: String,
        city: Option<String>,
    },
    /// A type this converter does not know. Preserved verbatim so documents
    /// written by a newer editor survive a round trip through here.
    Unknown {
        kind: String,
        data: Value,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPayload {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct VideoPayload {
    source: VideoSource,
    remote_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct EmbedPayload {
    html: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct QuotePayload {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: String,
    data: Value,
}

impl Block {
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Heading { .. } => "heading",
            Self::List { .. } => "list",
            Self::Video { .. } => "video",
            // the wire format predates the shorter name
            Self::Embed { .. } => "embedly",
            Self::Quote { .. } => "quote",
            Self::Unknown { kind, .. } => kind,
        }
    }

    fn from_raw(raw: RawBlock, index: usize) -> Result<Self, ValidationError> {
        let RawBlock { kind, data } = raw;
        let block = match kind.as_str() {
            "text" => {
                let TextPayload { text } = payload(&kind, data, index, &["text"])?;
                Self::Text { text }
            }
            "heading" => {
                let TextPayload { text } = payload(&kind, data, index, &["text"])?;
                Self::Heading { text }
            }
            "list" => {
                let TextPayload { text } = payload(&kind, data, index, &["text"])?;
                Self::List { text }
            }
            "video" => {
                let VideoPayload { source, remote_id } =
                    payload(&kind, data, index, &["source", "remote_id"])?;
                Self::Video { source, remote_id }
            }
            "embed" | "embedly" => {
                let EmbedPayload { html } = payload(&kind, data, index, &["html"])?;
                Self::Embed { html }
            }
            "quote" => {
                let QuotePayload { text, city } = payload(&kind, data, index, &["text"])?;
                Self::Quote { text, city }
            }
            _ => Self::Unknown { kind, data },
        };
        Ok(block)
    }

    fn to_raw(&self) -> Result<RawBlock, serde_json::Error> {
        let data = match self {
            Self::Text { text } | Self::Heading { text } | Self::List { text } => {
                serde_json::to_value(TextPayload { text: text.clone() })?
            }
            Self::Video { source, remote_id } => serde_json::to_value(VideoPayload {
                source: source.clone(),
                remote_id: remote_id.clone(),
            })?,
            Self::Embed { html } => serde_json::to_value(EmbedPayload { html: html.clone() })?,
            Self::Quote { text, city } => serde_json::to_value(QuotePayload {
                text: text.clone(),
                city: city.clone(),
            })?,
            Self::Unknown { data, .. } => data.clone(),
        };
        Ok(RawBlock {
            kind: self.kind().to_string(),
            data,
        })
    }
}

fn payload<T: DeserializeOwned>(
    kind: &str,
    data: Value,
    index: usize,
    required: &[&'static str],
) -> Result<T, ValidationError> {
    if data.is_object() {
        let missing = required
            .iter()
            .copied()
            .find(|field| data.get(field).is_none());
        if let Some(field) = missing {
            return Err(ValidationError {
                index,
                kind: kind.to_string(),
                detail: ValidationDetail::MissingField(field),
            });
        }
    }
    serde_json::from_value(data).map_err(|source| ValidationError {
        index,
        kind: kind.to_string(),
        detail: ValidationDetail::InvalidPayload(source),
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    data: Vec<RawBlock>,
}

/// An ordered block sequence. Document order is rendering order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockDocument {
    pub blocks: Vec<Block>,
}

impl BlockDocument {
    pub fn from_json(src: &str) -> Result<Self, Error> {
        let Envelope { data } = serde_json::from_str(src).map_err(Error::Decode)?;
        let blocks = data
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Block::from_raw(raw, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { blocks })
    }

    pub fn to_json(&self) -> Result<String, Error> {
        let data = self
            .blocks
            .iter()
            .map(Block::to_raw)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::Encode)?;
        serde_json::to_string(&Envelope { data }).map_err(Error::Encode)
    }
}

impl FromIterator<Block> for BlockDocument {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}
