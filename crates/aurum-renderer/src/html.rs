//! HTML backend for post rendering.
//!
//! Produces semantic HTML5 suitable for embedding in a blog page template.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::images::OrderedImage;
use crate::state::escape_html;

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<h2 id>`/`<h3 id>` headings
/// - `<table>` with `<thead>`/`<tbody>`
/// - `<blockquote>` with one `<p>` per quoted line
/// - `<figure>` for image-only paragraphs, `<img>` for inline images
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn text(text: &str, out: &mut String) {
        out.push_str(&escape_html(text));
    }

    fn bold(text: &str, out: &mut String) {
        write!(out, "<strong>{}</strong>", escape_html(text)).unwrap();
    }

    fn italic(text: &str, out: &mut String) {
        write!(out, "<em>{}</em>", escape_html(text)).unwrap();
    }

    fn code(text: &str, out: &mut String) {
        write!(out, "<code>{}</code>", escape_html(text)).unwrap();
    }

    fn link(text: &str, href: &str, new_tab: bool, out: &mut String) {
        let target = if new_tab {
            r#" target="_blank" rel="noopener noreferrer""#
        } else {
            ""
        };
        write!(
            out,
            r#"<a href="{}"{target}>{}</a>"#,
            escape_html(href),
            escape_html(text)
        )
        .unwrap();
    }

    fn heading(level: u8, id: Option<&str>, content: &str, out: &mut String) {
        match id {
            Some(id) => write!(
                out,
                r#"<h{level} id="{}">{content}</h{level}>"#,
                escape_html(id)
            )
            .unwrap(),
            None => write!(out, "<h{level}>{content}</h{level}>").unwrap(),
        }
    }

    fn paragraph(content: &str, out: &mut String) {
        write!(out, "<p>{content}</p>").unwrap();
    }

    fn list(ordered: bool, items: &[String], out: &mut String) {
        let tag = if ordered { "ol" } else { "ul" };
        write!(out, "<{tag}>").unwrap();
        for item in items {
            write!(out, "<li>{item}</li>").unwrap();
        }
        write!(out, "</{tag}>").unwrap();
    }

    fn table(headers: &[String], rows: &[Vec<String>], out: &mut String) {
        out.push_str("<table>");
        if !headers.is_empty() {
            out.push_str("<thead><tr>");
            for cell in headers {
                write!(out, "<th>{cell}</th>").unwrap();
            }
            out.push_str("</tr></thead>");
        }
        out.push_str("<tbody>");
        for row in rows {
            out.push_str("<tr>");
            for cell in row {
                write!(out, "<td>{cell}</td>").unwrap();
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
    }

    fn blockquote(lines: &[String], out: &mut String) {
        out.push_str("<blockquote>");
        for line in lines {
            write!(out, "<p>{line}</p>").unwrap();
        }
        out.push_str("</blockquote>");
    }

    fn image_block(image: &OrderedImage, src: &str, out: &mut String) {
        out.push_str("<figure>");
        Self::image_inline(image, src, out);
        if let Some(caption) = image.caption.as_deref().filter(|c| !c.is_empty()) {
            write!(out, "<figcaption>{}</figcaption>", escape_html(caption)).unwrap();
        }
        out.push_str("</figure>");
    }

    fn image_inline(image: &OrderedImage, src: &str, out: &mut String) {
        write!(
            out,
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            escape_html(src),
            escape_html(&image.alt)
        )
        .unwrap();
    }
}
