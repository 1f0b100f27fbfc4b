//! Line-based block scanner.
//!
//! Every source line is trimmed and classified into exactly one [`LineKind`].
//! When more than one kind could apply, the first matching check wins in this
//! order: fence, table row, blockquote, heading, list item, paragraph.
//!
//! Aggregates (tables, lists, blockquotes) are kept in the scanner [`State`]
//! and flushed into a [`Node`] as soon as a line they cannot accept arrives,
//! or when the input ends.

use std::sync::LazyLock;

use regex::Regex;

use crate::blocks::{BlockquoteBuilder, ListBuilder, TableBuilder};
use crate::inline::format_inline;
use crate::node::Node;

// Markers consume a single whitespace character; any further indentation
// stays in the item text.
static UNORDERED_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s").expect("invalid unordered list regex"));

// ASCII digits only, `\d` would also match Devanagari or Arabic-Indic numerals.
static ORDERED_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").expect("invalid ordered list regex"));

const BYTE_ORDER_MARK: char = '\u{feff}';

const FENCE_MARKER: &str = "```";

/// Classification of a single trimmed source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    Fence,
    TableRow(&'a str),
    /// Blockquote content with `>` and one optional space removed.
    Blockquote(&'a str),
    Heading {
        level: u8,
        text: &'a str,
    },
    ListItem {
        ordered: bool,
        text: &'a str,
    },
    Paragraph(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with(FENCE_MARKER) {
        return LineKind::Fence;
    }
    if line.starts_with('|') {
        return LineKind::TableRow(line);
    }
    if let Some(quoted) = line.strip_prefix('>') {
        return LineKind::Blockquote(quoted.strip_prefix(' ').unwrap_or(quoted));
    }
    if let Some(text) = line.strip_prefix("## ") {
        return LineKind::Heading { level: 2, text };
    }
    if let Some(text) = line.strip_prefix("### ") {
        return LineKind::Heading { level: 3, text };
    }
    if let Some(marker) = UNORDERED_ITEM_PATTERN.find(line) {
        return LineKind::ListItem {
            ordered: false,
            text: &line[marker.end()..],
        };
    }
    if let Some(marker) = ORDERED_ITEM_PATTERN.find(line) {
        return LineKind::ListItem {
            ordered: true,
            text: &line[marker.end()..],
        };
    }
    LineKind::Paragraph(line)
}

/// Scanner state. Aggregate states own the builder for the open node.
#[derive(Debug, Default)]
enum State {
    #[default]
    Default,
    InTable(TableBuilder),
    InList(ListBuilder),
    InBlockquote(BlockquoteBuilder),
    /// Inside a fenced code block opened on the given 1-indexed line.
    InCodeFence(usize),
}

impl State {
    /// Whether the open aggregate can take a line of this kind.
    fn accepts(&self, kind: &LineKind<'_>) -> bool {
        match self {
            Self::Default => true,
            Self::InTable(_) => matches!(kind, LineKind::TableRow(_) | LineKind::Blank),
            Self::InList(list) => {
                matches!(kind, LineKind::ListItem { ordered, .. } if *ordered == list.ordered())
            }
            Self::InBlockquote(_) => matches!(kind, LineKind::Blockquote(_)),
            Self::InCodeFence(_) => false,
        }
    }
}

/// Output of a full scan.
#[derive(Debug, Default)]
pub(crate) struct Scan {
    pub(crate) nodes: Vec<Node>,
    /// Line of a code fence that was never closed.
    pub(crate) unterminated_fence: Option<usize>,
}

/// State machine turning source lines into nodes.
#[derive(Debug, Default)]
pub(crate) struct BlockScanner {
    state: State,
    nodes: Vec<Node>,
    line_num: usize,
}

impl BlockScanner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed one source line.
    pub(crate) fn push_line(&mut self, raw: &str) {
        self.line_num += 1;
        let line = raw.trim();

        if matches!(self.state, State::InCodeFence(_)) {
            if line.starts_with(FENCE_MARKER) {
                self.state = State::Default;
            }
            return;
        }

        let kind = classify(line);
        if !self.state.accepts(&kind) {
            self.flush();
        }

        match kind {
            LineKind::Blank => {}
            LineKind::Fence => self.state = State::InCodeFence(self.line_num),
            LineKind::TableRow(row) => {
                if let State::InTable(table) = &mut self.state {
                    table.push_row(row);
                } else {
                    let mut table = TableBuilder::new();
                    table.push_row(row);
                    self.state = State::InTable(table);
                }
            }
            LineKind::Blockquote(text) => {
                if let State::InBlockquote(quote) = &mut self.state {
                    quote.push_line(text);
                } else {
                    let mut quote = BlockquoteBuilder::new();
                    quote.push_line(text);
                    self.state = State::InBlockquote(quote);
                }
            }
            LineKind::Heading { level, text } => self.nodes.push(Node::Heading {
                level,
                text: format_inline(text),
            }),
            LineKind::ListItem { ordered, text } => {
                if let State::InList(list) = &mut self.state {
                    list.push_item(text);
                } else {
                    let mut list = ListBuilder::new(ordered);
                    list.push_item(text);
                    self.state = State::InList(list);
                }
            }
            LineKind::Paragraph(text) => self.nodes.push(Node::Paragraph {
                text: format_inline(text),
            }),
        }
    }

    /// Finalize the open aggregate, if any, and return to the default state.
    fn flush(&mut self) {
        let node = match std::mem::take(&mut self.state) {
            State::Default => None,
            State::InTable(table) => table.finish(),
            State::InList(list) => Some(list.finish()),
            State::InBlockquote(quote) => Some(quote.finish()),
            State::InCodeFence(line) => {
                // Fences swallow everything, they are never flushed mid-scan.
                self.state = State::InCodeFence(line);
                None
            }
        };
        if let Some(node) = node {
            tracing::debug!(line = self.line_num, "Flushed aggregate");
            self.nodes.push(node);
        }
    }

    /// Flush any open aggregate and return the collected nodes.
    pub(crate) fn finish(mut self) -> Scan {
        let unterminated_fence = if let State::InCodeFence(line) = self.state {
            tracing::debug!(line, "Unterminated code fence skipped to end of input");
            Some(line)
        } else {
            self.flush();
            None
        };
        Scan {
            nodes: self.nodes,
            unterminated_fence,
        }
    }
}

/// Scan a whole document.
pub(crate) fn scan(markdown: &str) -> Scan {
    let markdown = markdown.strip_prefix(BYTE_ORDER_MARK).unwrap_or(markdown);
    let mut scanner = BlockScanner::new();
    for line in markdown.split('\n') {
        scanner.push_line(line);
    }
    scanner.finish()
}

/// Parse markdown text into content nodes.
///
/// This never fails: unsupported syntax degrades to paragraphs, and the
/// empty or whitespace-only string yields no nodes.
///
/// # Example
///
/// ```
/// use aurum_renderer::{InlineSpan, Node, parse};
///
/// let nodes = parse("## Title");
/// assert_eq!(
///     nodes,
///     vec![Node::Heading {
///         level: 2,
///         text: vec![InlineSpan::PlainText("Title".to_owned())],
///     }]
/// );
/// ```
pub fn parse(markdown: &str) -> Vec<Node> {
    scan(markdown).nodes
}
