//! Line-based markdown renderer for blog posts with pluggable backends.
//!
//! Post bodies use a small markdown subset: `##`/`###` headings, `-`/`*` and
//! `1.` lists, pipe tables, `>` blockquotes, fenced code blocks (which are
//! skipped) and inline bold, italic, code and link spans. Anything else is
//! rendered as a plain paragraph; the renderer never fails.
//!
//! # Architecture
//!
//! - [`parse`] runs the block scanner and returns typed [`Node`]s with
//!   [`InlineSpan`]s already resolved.
//! - [`MarkdownRenderer`] maps nodes through a [`RenderBackend`], assigns
//!   heading anchors and replaces `{{image:N}}` placeholders with entries
//!   of an [`OrderedImage`] list.
//! - [`HtmlBackend`] produces semantic HTML5.
//!
//! # Example
//!
//! ```
//! use aurum_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .render("## Gold rate\n- **22K**: ₹6,650\n- **24K**: ₹7,255");
//!
//! assert_eq!(result.toc[0].id, "gold-rate");
//! assert!(result.html.contains("<li><strong>22K</strong>: ₹6,650</li>"));
//! ```

mod backend;
mod blocks;
mod html;
mod images;
mod inline;
mod node;
mod renderer;
mod scanner;
mod state;
mod util;

pub use backend::RenderBackend;
pub use html::HtmlBackend;
pub use images::OrderedImage;
pub use inline::format_inline;
pub use node::{InlineSpan, Node, plain_text};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use scanner::parse;
pub use state::{TocEntry, escape_html};
pub use util::resolve_url;
