//! Inline span formatting.
//!
//! A line is scanned left to right. At each step every span pattern is
//! matched against the remaining text and the match starting earliest wins;
//! on equal starts the order is link, bold, italic, code. Spans never nest:
//! `**bold *italic* text**` yields an italic span surrounded by plain text
//! that still contains the bold markers.

use std::sync::LazyLock;

use regex::Regex;

use crate::node::InlineSpan;

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("invalid link regex"));

static BOLD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("invalid bold regex"));

/// Italic body anchored at a candidate `*`.
///
/// The surrounding "not preceded by `*`" and "not followed by `*`" checks are
/// done by [`find_italic`] since `regex` has no lookaround.
static ITALIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\*([^*]+)\*").expect("invalid italic regex"));

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("invalid code regex"));

/// A span pattern match within the remaining text.
struct SpanMatch {
    start: usize,
    end: usize,
    span: InlineSpan,
}

/// Split a line into formatted spans.
///
/// Empty input yields an empty vector. Text that matches no pattern is
/// returned as a single [`InlineSpan::PlainText`].
///
/// # Example
///
/// ```
/// use aurum_renderer::{InlineSpan, format_inline};
///
/// let spans = format_inline("Rates **rose** today");
/// assert_eq!(
///     spans,
///     vec![
///         InlineSpan::PlainText("Rates ".to_owned()),
///         InlineSpan::Bold("rose".to_owned()),
///         InlineSpan::PlainText(" today".to_owned()),
///     ]
/// );
/// ```
pub fn format_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(found) = earliest_match(rest) {
        if found.start > 0 {
            spans.push(InlineSpan::PlainText(rest[..found.start].to_owned()));
        }
        spans.push(found.span);
        rest = &rest[found.end..];
    }

    if !rest.is_empty() {
        spans.push(InlineSpan::PlainText(rest.to_owned()));
    }

    spans
}

/// Earliest-starting match among all span patterns.
fn earliest_match(text: &str) -> Option<SpanMatch> {
    if text.is_empty() {
        return None;
    }

    // min_by_key keeps the first of equal minimums, which gives the
    // link > bold > italic > code priority on ties.
    [
        find_link(text),
        find_bold(text),
        find_italic(text),
        find_code(text),
    ]
    .into_iter()
    .flatten()
    .min_by_key(|m| m.start)
}

fn find_link(text: &str) -> Option<SpanMatch> {
    let caps = LINK_PATTERN.captures(text)?;
    let whole = caps.get(0)?;
    Some(SpanMatch {
        start: whole.start(),
        end: whole.end(),
        span: InlineSpan::Link {
            text: caps[1].to_owned(),
            href: caps[2].to_owned(),
        },
    })
}

fn find_bold(text: &str) -> Option<SpanMatch> {
    let caps = BOLD_PATTERN.captures(text)?;
    let whole = caps.get(0)?;
    Some(SpanMatch {
        start: whole.start(),
        end: whole.end(),
        span: InlineSpan::Bold(caps[1].to_owned()),
    })
}

/// Find `*text*` that is neither preceded nor followed by another `*`.
///
/// The body cannot contain `*`, so the closing marker is always the next
/// `*` after the opening one. A candidate that fails the neighbour checks
/// cannot match any other way and the scan moves on to the next `*`.
fn find_italic(text: &str) -> Option<SpanMatch> {
    let bytes = text.as_bytes();

    text.match_indices('*').find_map(|(start, _)| {
        if start > 0 && bytes[start - 1] == b'*' {
            return None;
        }
        let caps = ITALIC_PATTERN.captures(&text[start..])?;
        let end = start + caps.get(0)?.end();
        if bytes.get(end) == Some(&b'*') {
            return None;
        }
        Some(SpanMatch {
            start,
            end,
            span: InlineSpan::Italic(caps[1].to_owned()),
        })
    })
}

fn find_code(text: &str) -> Option<SpanMatch> {
    let caps = CODE_PATTERN.captures(text)?;
    let whole = caps.get(0)?;
    Some(SpanMatch {
        start: whole.start(),
        end: whole.end(),
        span: InlineSpan::Code(caps[1].to_owned()),
    })
}
