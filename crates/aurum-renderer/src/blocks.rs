//! Aggregate builders for multi-line nodes.
//!
//! Each builder collects raw lines while the scanner stays in the matching
//! state and turns them into a finished [`Node`] on flush.

use std::sync::LazyLock;

use regex::Regex;

use crate::inline::format_inline;
use crate::node::Node;

/// Pipe table separator row, e.g. `|---|:---:|`.
static SEPARATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s\-:|]+\|$").expect("invalid separator regex"));

/// Leading `**Label**:` in a blockquote line.
static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+)\*\*:").expect("invalid label regex"));

/// Split a pipe row into trimmed, non-empty cells.
fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Check whether a pipe row is a header separator.
pub(crate) fn is_separator_row(line: &str) -> bool {
    SEPARATOR_PATTERN.is_match(line)
}

/// Collects a contiguous run of `|` lines.
#[derive(Debug, Default)]
pub(crate) struct TableBuilder {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl TableBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a `|` line. Separator rows are dropped; the first other row
    /// becomes the header.
    pub(crate) fn push_row(&mut self, line: &str) {
        if is_separator_row(line) {
            return;
        }
        let cells = split_cells(line);
        if self.headers.is_none() {
            self.headers = Some(cells);
        } else {
            self.rows.push(cells);
        }
    }

    /// Finish the table. A run made only of separator rows yields nothing.
    pub(crate) fn finish(self) -> Option<Node> {
        let headers = self.headers?;
        Some(Node::Table {
            headers,
            rows: self.rows,
        })
    }
}

/// Collects a contiguous run of same-kind list items.
#[derive(Debug)]
pub(crate) struct ListBuilder {
    ordered: bool,
    items: Vec<String>,
}

impl ListBuilder {
    pub(crate) fn new(ordered: bool) -> Self {
        Self {
            ordered,
            items: Vec::new(),
        }
    }

    pub(crate) fn ordered(&self) -> bool {
        self.ordered
    }

    pub(crate) fn push_item(&mut self, text: &str) {
        self.items.push(text.to_owned());
    }

    pub(crate) fn finish(self) -> Node {
        Node::List {
            ordered: self.ordered,
            items: self.items.iter().map(|item| format_inline(item)).collect(),
        }
    }
}

/// Collects a contiguous run of `>` lines.
#[derive(Debug, Default)]
pub(crate) struct BlockquoteBuilder {
    lines: Vec<String>,
}

impl BlockquoteBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a line with the `>` marker and one following space already removed.
    pub(crate) fn push_line(&mut self, text: &str) {
        self.lines.push(text.to_owned());
    }

    /// Finish the blockquote, unwrapping `**Label**:` prefixes before
    /// formatting each line.
    pub(crate) fn finish(self) -> Node {
        let lines = self
            .lines
            .iter()
            .map(|line| format_inline(&LABEL_PATTERN.replace(line, "${1}:")))
            .collect();
        Node::Blockquote { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::InlineSpan;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_cells_drops_boundary_cells() {
        assert_eq!(split_cells("| 22K | ₹6,650 |"), vec!["22K", "₹6,650"]);
    }

    #[test]
    fn test_split_cells_drops_empty_interior_cells() {
        assert_eq!(split_cells("| a |  | c |"), vec!["a", "c"]);
    }

    #[test]
    fn test_separator_rows() {
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row("| :--- | ---: |"));
        assert!(is_separator_row("|:-:|"));
        assert!(!is_separator_row("| A | B |"));
        assert!(!is_separator_row("|---|--- "));
    }

    #[test]
    fn test_table_builder() {
        let mut table = TableBuilder::new();
        table.push_row("| City | 22K | 24K |");
        table.push_row("|------|-----|-----|");
        table.push_row("| Mumbai | 6650 | 7255 |");
        table.push_row("| Delhi | 6665 |");

        assert_eq!(
            table.finish(),
            Some(Node::Table {
                headers: vec!["City".to_owned(), "22K".to_owned(), "24K".to_owned()],
                rows: vec![
                    vec!["Mumbai".to_owned(), "6650".to_owned(), "7255".to_owned()],
                    vec!["Delhi".to_owned(), "6665".to_owned()],
                ],
            })
        );
    }

    #[test]
    fn test_table_builder_separator_only() {
        let mut table = TableBuilder::new();
        table.push_row("|---|---|");
        assert_eq!(table.finish(), None);
    }

    #[test]
    fn test_list_builder_formats_items() {
        let mut list = ListBuilder::new(true);
        list.push_item("**EMI** calculator");
        list.push_item("plain");

        assert_eq!(
            list.finish(),
            Node::List {
                ordered: true,
                items: vec![
                    vec![
                        InlineSpan::Bold("EMI".to_owned()),
                        InlineSpan::PlainText(" calculator".to_owned()),
                    ],
                    vec![InlineSpan::PlainText("plain".to_owned())],
                ],
            }
        );
    }

    #[test]
    fn test_blockquote_label_unwrap() {
        let mut quote = BlockquoteBuilder::new();
        quote.push_line("**Note**: hello");

        assert_eq!(
            quote.finish(),
            Node::Blockquote {
                lines: vec![vec![InlineSpan::PlainText("Note: hello".to_owned())]],
            }
        );
    }

    #[test]
    fn test_blockquote_label_unwrap_only_at_line_start() {
        let mut quote = BlockquoteBuilder::new();
        quote.push_line("see **Tip**: later");

        assert_eq!(
            quote.finish(),
            Node::Blockquote {
                lines: vec![vec![
                    InlineSpan::PlainText("see ".to_owned()),
                    InlineSpan::Bold("Tip".to_owned()),
                    InlineSpan::PlainText(": later".to_owned()),
                ]],
            }
        );
    }

    #[test]
    fn test_blockquote_keeps_lines_separate() {
        let mut quote = BlockquoteBuilder::new();
        quote.push_line("first");
        quote.push_line("");
        quote.push_line("*second*");

        assert_eq!(
            quote.finish(),
            Node::Blockquote {
                lines: vec![
                    vec![InlineSpan::PlainText("first".to_owned())],
                    vec![],
                    vec![InlineSpan::Italic("second".to_owned())],
                ],
            }
        );
    }
}
