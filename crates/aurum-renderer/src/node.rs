//! Content node model produced by the block scanner.

/// Inline fragment of formatted text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InlineSpan {
    /// Unformatted text.
    PlainText(String),
    /// `**bold**`
    Bold(String),
    /// `*italic*`
    Italic(String),
    /// `` `code` ``
    Code(String),
    /// `[text](href)`
    Link { text: String, href: String },
}

impl InlineSpan {
    /// Visible text of the span, without markup or link target.
    pub fn text(&self) -> &str {
        match self {
            Self::PlainText(text) | Self::Bold(text) | Self::Italic(text) | Self::Code(text) => {
                text
            }
            Self::Link { text, .. } => text,
        }
    }
}

/// Concatenate the visible text of a formatted line.
pub fn plain_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

/// Top-level content unit of a rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Node {
    /// `## ` or `### ` heading. Level is always 2 or 3.
    Heading { level: u8, text: Vec<InlineSpan> },
    /// A single non-special source line.
    Paragraph { text: Vec<InlineSpan> },
    /// Contiguous run of same-kind list items.
    List {
        ordered: bool,
        items: Vec<Vec<InlineSpan>>,
    },
    /// Pipe table. Cells keep their raw text and are formatted at render time.
    ///
    /// Rows are stored exactly as split and may be shorter or longer than
    /// `headers`.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Contiguous `>` lines, each formatted independently.
    Blockquote { lines: Vec<Vec<InlineSpan>> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_markup() {
        let spans = vec![
            InlineSpan::PlainText("Buy ".to_owned()),
            InlineSpan::Bold("22K".to_owned()),
            InlineSpan::PlainText(" at ".to_owned()),
            InlineSpan::Link {
                text: "today's rate".to_owned(),
                href: "/gold-rate".to_owned(),
            },
        ];
        assert_eq!(plain_text(&spans), "Buy 22K at today's rate");
    }

    #[test]
    fn test_plain_text_empty() {
        assert_eq!(plain_text(&[]), "");
    }
}
