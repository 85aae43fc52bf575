pub mod render;
mod writer;

pub use render::Cmark;

/// The Markdown transform pair the converter depends on.
///
/// Injected rather than called statically so tests can substitute a fake
/// transform. The contract is round-trip stability over the vocabulary the
/// converter actually emits (`p`, `h2`, `ul`/`li`, inline emphasis), not full
/// CommonMark compliance.
pub trait Markdown {
    /// Render Markdown source to HTML.
    fn to_html(&self, markdown: &str) -> String;

    /// Convert an HTML fragment to Markdown source.
    fn to_markdown(&self, html: &str) -> String;
}

impl<M: Markdown + ?Sized> Markdown for &M {
    fn to_html(&self, markdown: &str) -> String {
        (**self).to_html(markdown)
    }

    fn to_markdown(&self, html: &str) -> String {
        (**self).to_markdown(html)
    }
}
