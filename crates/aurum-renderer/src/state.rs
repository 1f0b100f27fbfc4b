//! Per-render state shared by the generic renderer.

use std::collections::{HashMap, HashSet};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (2 or 3).
    pub level: u8,
    /// Heading text without markup.
    pub title: String,
    /// Anchor id, unique within the document.
    pub id: String,
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Turn heading text into a URL fragment.
///
/// Alphanumerics are lowercased, runs of whitespace, `-` and `_` become a
/// single `-`, everything else is dropped.
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}

/// Assigns unique heading ids and records the outline.
#[derive(Debug, Default)]
pub(crate) struct HeadingAnchors {
    used: HashSet<String>,
    next_suffix: HashMap<String, usize>,
    toc: Vec<TocEntry>,
}

impl HeadingAnchors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a heading and return its id.
    ///
    /// Repeated titles get `-1`, `-2`, ... suffixes.
    pub(crate) fn register(&mut self, level: u8, title: String) -> String {
        let base = slugify(&title);
        let mut suffix = self.next_suffix.get(&base).copied().unwrap_or(0);
        let mut id = if suffix == 0 {
            base.clone()
        } else {
            format!("{base}-{suffix}")
        };
        while self.used.contains(&id) {
            suffix += 1;
            id = format!("{base}-{suffix}");
        }
        self.next_suffix.insert(base, suffix + 1);
        self.used.insert(id.clone());
        self.toc.push(TocEntry {
            level,
            title,
            id: id.clone(),
        });
        id
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}
