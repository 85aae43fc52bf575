//! Converter between rich-text editor HTML fragments and ordered
//! structured-block documents (`{"data": [{"type": ..., "data": {...}}]}`).
//!
//! The converter is a pure synchronous transformation. Persistence and
//! rendering of the surrounding field belong to the caller; this crate only
//! transforms the string payload on the way in (HTML to blocks) and out
//! (blocks to HTML).

pub mod block;
pub mod convert;
pub mod html;
pub mod markdown;

pub use block::{Block, BlockDocument, VideoSource};
pub use convert::Converter;
pub use markdown::{Cmark, Markdown};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed block document: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to serialize block document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A block carried a payload that does not satisfy its type's contract.
/// Carries the position of the offending block so callers can point at it.
#[derive(Debug, thiserror::Error)]
#[error("block {index} ({kind}): {detail}")]
pub struct ValidationError {
    pub index: usize,
    pub kind: String,
    pub detail: ValidationDetail,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationDetail {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid payload: {0}")]
    InvalidPayload(serde_json::Error),
}

#[cfg(test)]
mod tests;
