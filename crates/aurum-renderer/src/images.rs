//! Image placeholder substitution.
//!
//! Post bodies reference images by position with `{{image:N}}` tokens, where
//! `N` is a zero-based index into the ordered image list handed to the
//! renderer. Substitution runs while rendering nodes, after block parsing, so
//! tokens inside skipped code fences or inside code/bold/italic/link spans are
//! never replaced.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::util::resolve_url;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{image:([0-9]+)\}\}").expect("invalid image token regex"));

static ONLY_TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{image:([0-9]+)\}\}$").expect("invalid image token regex"));

/// Image attached to a post, addressed by its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedImage {
    /// Image URL, absolute or relative to the configured base URL.
    pub url: String,
    /// Alternative text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub alt: String,
    /// Optional caption shown under block images.
    #[cfg_attr(feature = "serde", serde(default))]
    pub caption: Option<String>,
}

impl OrderedImage {
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            caption: None,
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Piece of plain text split around placeholder tokens.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    /// Placeholder token. `index` is `None` when the number does not fit.
    Image { index: Option<usize>, token: &'a str },
}

/// Split text into plain runs and placeholder tokens.
pub(crate) fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in TOKEN_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            out.push(Segment::Text(&text[last..whole.start()]));
        }
        out.push(Segment::Image {
            index: caps[1].parse().ok(),
            token: whole.as_str(),
        });
        last = whole.end();
    }

    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }
    out
}

/// Index of a text that consists of exactly one placeholder token.
///
/// The outer `Option` tells whether the text is a lone token at all.
pub(crate) fn lone_token(text: &str) -> Option<Option<usize>> {
    let caps = ONLY_TOKEN_PATTERN.captures(text.trim())?;
    Some(caps[1].parse().ok())
}

/// Images available to a render, with URL resolution.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ImageSet<'a> {
    images: &'a [OrderedImage],
    base_url: Option<&'a str>,
}

impl<'a> ImageSet<'a> {
    pub(crate) fn new(images: &'a [OrderedImage], base_url: Option<&'a str>) -> Self {
        Self { images, base_url }
    }

    pub(crate) fn len(&self) -> usize {
        self.images.len()
    }

    /// Look up an image and its resolved source URL.
    pub(crate) fn get(&self, index: Option<usize>) -> Option<(&'a OrderedImage, Cow<'a, str>)> {
        let image = self.images.get(index?)?;
        let src = resolve_url(&image.url, self.base_url);
        Some((image, src))
    }
}
