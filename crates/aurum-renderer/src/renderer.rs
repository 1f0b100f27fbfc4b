//! Generic post renderer with pluggable backend.

use std::marker::PhantomData;

use crate::backend::RenderBackend;
use crate::images::{ImageSet, OrderedImage, Segment, lone_token, segments};
use crate::inline::format_inline;
use crate::node::{InlineSpan, Node, plain_text};
use crate::scanner::scan;
use crate::state::{HeadingAnchors, TocEntry};
use crate::util::is_external;

/// Result of rendering a post body.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered output of the configured backend.
    pub html: String,
    /// Parsed content nodes, in source order.
    pub nodes: Vec<Node>,
    /// Heading outline.
    pub toc: Vec<TocEntry>,
    /// Non-fatal problems found while rendering.
    pub warnings: Vec<String>,
}

/// Post renderer with pluggable backend.
///
/// Parsing is delegated to the block scanner; the renderer maps the
/// resulting nodes through [`RenderBackend`], assigns heading anchors and
/// replaces `{{image:N}}` placeholders.
///
/// Rendering takes `&self` and keeps no state between calls, so a configured
/// renderer can be shared and reused.
///
/// # Example
///
/// ```
/// use aurum_renderer::{HtmlBackend, MarkdownRenderer, OrderedImage};
///
/// let renderer = MarkdownRenderer::<HtmlBackend>::new()
///     .with_images(vec![OrderedImage::new("chart.png", "Price chart")]);
/// let result = renderer.render("## Today\n{{image:0}}\nRates are **up**.");
///
/// assert_eq!(
///     result.html,
///     concat!(
///         r#"<h2 id="today">Today</h2>"#,
///         r#"<figure><img src="chart.png" alt="Price chart" loading="lazy"></figure>"#,
///         "<p>Rates are <strong>up</strong>.</p>",
///     )
/// );
/// ```
pub struct MarkdownRenderer<B: RenderBackend> {
    images: Vec<OrderedImage>,
    image_base_url: Option<String>,
    heading_ids: bool,
    external_links_new_tab: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a renderer with heading ids and new-tab external links enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            image_base_url: None,
            heading_ids: true,
            external_links_new_tab: true,
            _backend: PhantomData,
        }
    }

    /// Set the ordered image list referenced by `{{image:N}}` tokens.
    #[must_use]
    pub fn with_images(mut self, images: Vec<OrderedImage>) -> Self {
        self.images = images;
        self
    }

    /// Set the base URL that relative image URLs are joined onto.
    #[must_use]
    pub fn with_image_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.image_base_url = Some(base_url.into());
        self
    }

    /// Enable or disable `id` attributes on headings.
    ///
    /// The outline in [`RenderResult::toc`] is produced either way.
    #[must_use]
    pub fn with_heading_ids(mut self, enabled: bool) -> Self {
        self.heading_ids = enabled;
        self
    }

    /// Enable or disable opening external links in a new tab.
    #[must_use]
    pub fn with_external_links_new_tab(mut self, enabled: bool) -> Self {
        self.external_links_new_tab = enabled;
        self
    }

    /// Render a post body.
    pub fn render(&self, markdown: &str) -> RenderResult {
        let scan = scan(markdown);
        let mut ctx = RenderContext::<B>::new(self);

        if let Some(line) = scan.unterminated_fence {
            ctx.warnings.push(format!(
                "line {line}: unterminated code fence, remaining content skipped"
            ));
        }

        for node in &scan.nodes {
            ctx.node(node);
        }

        tracing::debug!(
            nodes = scan.nodes.len(),
            warnings = ctx.warnings.len(),
            "Rendered document"
        );

        RenderResult {
            html: ctx.output,
            nodes: scan.nodes,
            toc: ctx.anchors.take_toc(),
            warnings: ctx.warnings,
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state of a single render call.
struct RenderContext<'r, B: RenderBackend> {
    renderer: &'r MarkdownRenderer<B>,
    images: ImageSet<'r>,
    anchors: HeadingAnchors,
    output: String,
    warnings: Vec<String>,
}

impl<'r, B: RenderBackend> RenderContext<'r, B> {
    fn new(renderer: &'r MarkdownRenderer<B>) -> Self {
        Self {
            renderer,
            images: ImageSet::new(&renderer.images, renderer.image_base_url.as_deref()),
            anchors: HeadingAnchors::new(),
            output: String::with_capacity(4096),
            warnings: Vec::new(),
        }
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Heading { level, text } => {
                let content = self.spans(text);
                let id = self.anchors.register(*level, plain_text(text));
                let id = self.renderer.heading_ids.then_some(id.as_str());
                B::heading(*level, id, &content, &mut self.output);
            }
            Node::Paragraph { text } => {
                if let [InlineSpan::PlainText(only)] = text.as_slice()
                    && let Some(index) = lone_token(only)
                {
                    self.image_block(index, only.trim());
                } else {
                    let content = self.spans(text);
                    B::paragraph(&content, &mut self.output);
                }
            }
            Node::List { ordered, items } => {
                let items: Vec<String> = items.iter().map(|item| self.spans(item)).collect();
                B::list(*ordered, &items, &mut self.output);
            }
            Node::Table { headers, rows } => {
                let headers: Vec<String> = headers.iter().map(|cell| self.cell(cell)).collect();
                let width = headers.len();
                let rows: Vec<Vec<String>> = rows
                    .iter()
                    .map(|row| {
                        let mut cells: Vec<String> = row.iter().map(|cell| self.cell(cell)).collect();
                        if width > 0 {
                            cells.resize(width, String::new());
                        }
                        cells
                    })
                    .collect();
                B::table(&headers, &rows, &mut self.output);
            }
            Node::Blockquote { lines } => {
                let lines: Vec<String> = lines.iter().map(|line| self.spans(line)).collect();
                B::blockquote(&lines, &mut self.output);
            }
        }
    }

    /// Render a table cell, applying inline formatting at render time.
    fn cell(&mut self, raw: &str) -> String {
        self.spans(&format_inline(raw))
    }

    /// Render a formatted line into a fresh buffer.
    fn spans(&mut self, spans: &[InlineSpan]) -> String {
        let mut out = String::new();
        for span in spans {
            match span {
                InlineSpan::PlainText(text) => self.text(text, &mut out),
                InlineSpan::Bold(text) => B::bold(text, &mut out),
                InlineSpan::Italic(text) => B::italic(text, &mut out),
                InlineSpan::Code(text) => B::code(text, &mut out),
                InlineSpan::Link { text, href } => {
                    let new_tab = self.renderer.external_links_new_tab && is_external(href);
                    B::link(text, href, new_tab, &mut out);
                }
            }
        }
        out
    }

    /// Render plain text, replacing inline image placeholders.
    fn text(&mut self, text: &str, out: &mut String) {
        for segment in segments(text) {
            match segment {
                Segment::Text(text) => B::text(text, out),
                Segment::Image { index, token } => match self.images.get(index) {
                    Some((image, src)) => B::image_inline(image, &src, out),
                    None => self.missing_image(token),
                },
            }
        }
    }

    /// Replace an image-only paragraph.
    fn image_block(&mut self, index: Option<usize>, token: &str) {
        match self.images.get(index) {
            Some((image, src)) => B::image_block(image, &src, &mut self.output),
            None => self.missing_image(token),
        }
    }

    fn missing_image(&mut self, token: &str) {
        let available = self.images.len();
        tracing::warn!(token, available, "Image placeholder out of range, removed");
        self.warnings.push(format!(
            "{token} references a missing image ({available} available), removed"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlBackend;
    use pretty_assertions::assert_eq;

    fn render_html(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new().render(markdown)
    }

    fn render_with_images(markdown: &str, images: Vec<OrderedImage>) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new()
            .with_images(images)
            .render(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        let result = render_html("Hello, world!");
        assert_eq!(result.html, "<p>Hello, world!</p>");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_heading_with_id() {
        let result = render_html("## Section Title");
        assert_eq!(result.html, r#"<h2 id="section-title">Section Title</h2>"#);
        assert_eq!(result.toc.len(), 1);
        assert_eq!(result.toc[0].level, 2);
        assert_eq!(result.toc[0].title, "Section Title");
        assert_eq!(result.toc[0].id, "section-title");
    }

    #[test]
    fn test_heading_ids_disabled_keeps_toc() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_heading_ids(false)
            .render("### Sub");
        assert_eq!(result.html, "<h3>Sub</h3>");
        assert_eq!(result.toc[0].id, "sub");
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let result = render_html("## FAQ\n## FAQ\n## FAQ");
        let ids: Vec<&str> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["faq", "faq-1", "faq-2"]);
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render_html("## Install `npm`");
        assert_eq!(
            result.html,
            r#"<h2 id="install-npm">Install <code>npm</code></h2>"#
        );
        assert_eq!(result.toc[0].title, "Install npm");
    }

    #[test]
    fn test_emphasis() {
        let result = render_html("*italic* and **bold**");
        assert_eq!(
            result.html,
            "<p><em>italic</em> and <strong>bold</strong></p>"
        );
    }

    #[test]
    fn test_lists() {
        let result = render_html("- Item 1\n- Item 2\n\n1. First\n2. Second");
        assert_eq!(
            result.html,
            "<ul><li>Item 1</li><li>Item 2</li></ul><ol><li>First</li><li>Second</li></ol>"
        );
    }

    #[test]
    fn test_table_cells_are_formatted() {
        let result = render_html("| Plan | Rate |\n|---|---|\n| **PPF** | 7.1% |");
        assert_eq!(
            result.html,
            "<table><thead><tr><th>Plan</th><th>Rate</th></tr></thead>\
             <tbody><tr><td><strong>PPF</strong></td><td>7.1%</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_table_short_and_long_rows() {
        let result = render_html("| A | B |\n| 1 |\n| 1 | 2 | 3 |");
        assert_eq!(
            result.html,
            "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td></td></tr><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
        // The node keeps the rows as written.
        assert_eq!(
            result.nodes,
            vec![Node::Table {
                headers: vec!["A".to_owned(), "B".to_owned()],
                rows: vec![
                    vec!["1".to_owned()],
                    vec!["1".to_owned(), "2".to_owned(), "3".to_owned()],
                ],
            }]
        );
    }

    #[test]
    fn test_blockquote_label() {
        let result = render_html("> **Note**: rates change daily\n> Check again");
        assert_eq!(
            result.html,
            "<blockquote><p>Note: rates change daily</p><p>Check again</p></blockquote>"
        );
    }

    #[test]
    fn test_links() {
        let result = render_html("See [EMI](/calculators/emi) or [RBI](https://rbi.org.in)");
        assert_eq!(
            result.html,
            concat!(
                r#"<p>See <a href="/calculators/emi">EMI</a> or "#,
                r#"<a href="https://rbi.org.in" target="_blank" rel="noopener noreferrer">RBI</a></p>"#
            )
        );
    }

    #[test]
    fn test_links_same_tab_when_disabled() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_external_links_new_tab(false)
            .render("[RBI](https://rbi.org.in)");
        assert_eq!(result.html, r#"<p><a href="https://rbi.org.in">RBI</a></p>"#);
    }

    #[test]
    fn test_html_is_escaped() {
        let result = render_html("<script>alert(1)</script>");
        assert_eq!(
            result.html,
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_code_fence_skipped() {
        let result = render_html("```\nconst x = 1;\n```\nHello");
        assert_eq!(result.html, "<p>Hello</p>");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unterminated_fence_warning() {
        let result = render_html("Hello\n```\nlost");
        assert_eq!(result.html, "<p>Hello</p>");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("line 2"));
    }

    #[test]
    fn test_empty_input() {
        for input in ["", "   \n  \n"] {
            let result = render_html(input);
            assert!(result.html.is_empty());
            assert!(result.nodes.is_empty());
            assert!(result.toc.is_empty());
        }
    }

    #[test]
    fn test_image_only_paragraph() {
        let result = render_with_images(
            "{{image:1}}",
            vec![
                OrderedImage::new("a.png", "A"),
                OrderedImage::new("b.png", "B").with_caption("Second"),
            ],
        );
        assert_eq!(
            result.html,
            r#"<figure><img src="b.png" alt="B" loading="lazy"><figcaption>Second</figcaption></figure>"#
        );
    }

    #[test]
    fn test_inline_image() {
        let result = render_with_images(
            "Chart {{image:0}} above",
            vec![OrderedImage::new("a.png", "A")],
        );
        assert_eq!(
            result.html,
            r#"<p>Chart <img src="a.png" alt="A" loading="lazy"> above</p>"#
        );
    }

    #[test]
    fn test_image_base_url() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_images(vec![OrderedImage::new("posts/a.png", "A")])
            .with_image_base_url("https://img.example.com")
            .render("{{image:0}}");
        assert_eq!(
            result.html,
            r#"<figure><img src="https://img.example.com/posts/a.png" alt="A" loading="lazy"></figure>"#
        );
    }

    #[test]
    fn test_missing_image_removed_with_warning() {
        let result = render_with_images("{{image:3}}\nText {{image:5}} here", vec![]);
        assert_eq!(result.html, "<p>Text  here</p>");
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("{{image:3}}"));
        assert!(result.warnings[1].contains("{{image:5}}"));
    }

    #[test]
    fn test_image_token_in_code_span_untouched() {
        let result = render_with_images(
            "Use `{{image:0}}` to embed",
            vec![OrderedImage::new("a.png", "A")],
        );
        assert_eq!(
            result.html,
            "<p>Use <code>{{image:0}}</code> to embed</p>"
        );
    }

    #[test]
    fn test_image_token_in_fence_untouched() {
        let result = render_with_images(
            "```\n{{image:0}}\n```",
            vec![OrderedImage::new("a.png", "A")],
        );
        assert!(result.html.is_empty());
    }

    #[test]
    fn test_image_token_in_list_item() {
        let result = render_with_images("- {{image:0}}", vec![OrderedImage::new("a.png", "A")]);
        assert_eq!(
            result.html,
            r#"<ul><li><img src="a.png" alt="A" loading="lazy"></li></ul>"#
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new();
        let doc = "## A\n## A\n- x\n| h |\n| c |\n> q";
        let first = renderer.render(doc);
        let second = renderer.render(doc);
        assert_eq!(first.html, second.html);
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.toc, second.toc);
    }

    #[test]
    fn test_default_renderer() {
        let renderer = MarkdownRenderer::<HtmlBackend>::default();
        assert_eq!(renderer.render("Hello").html, "<p>Hello</p>");
    }
}
