//! Render backend trait for output-format-specific markup.

use crate::images::OrderedImage;

/// Output format for rendered nodes.
///
/// The generic [`MarkdownRenderer`](crate::MarkdownRenderer) walks the node
/// list and calls one function per node variant and per inline span kind.
/// Block functions receive their inline content already rendered by the
/// span functions of the same backend.
pub trait RenderBackend {
    /// Unformatted text.
    fn text(text: &str, out: &mut String);

    /// Bold span.
    fn bold(text: &str, out: &mut String);

    /// Italic span.
    fn italic(text: &str, out: &mut String);

    /// Inline code span.
    fn code(text: &str, out: &mut String);

    /// Link span. `new_tab` is set for external links when the renderer is
    /// configured to open them in a new tab.
    fn link(text: &str, href: &str, new_tab: bool, out: &mut String);

    /// Heading of level 2 or 3 with an optional anchor id.
    fn heading(level: u8, id: Option<&str>, content: &str, out: &mut String);

    /// Single paragraph.
    fn paragraph(content: &str, out: &mut String);

    /// List with rendered items.
    fn list(ordered: bool, items: &[String], out: &mut String);

    /// Table with rendered cells.
    ///
    /// When `headers` is non-empty every row has exactly `headers.len()`
    /// cells: missing cells are empty strings and surplus cells are dropped.
    fn table(headers: &[String], rows: &[Vec<String>], out: &mut String);

    /// Blockquote with one rendered entry per source line.
    fn blockquote(lines: &[String], out: &mut String);

    /// Image replacing a paragraph that holds only an image placeholder.
    fn image_block(image: &OrderedImage, src: &str, out: &mut String);

    /// Image replacing a placeholder inside running text.
    fn image_inline(image: &OrderedImage, src: &str, out: &mut String);
}
