//! Main normalization pipeline.
//!
//! Parses the input with html5ever's error-tolerant tree builder, picks the
//! working root, runs the heading, list and paragraph passes over it and
//! serializes the result.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalizer::heading::normalize_headings;
use crate::normalizer::list::flatten_lists;
use crate::normalizer::paragraph::terminate_paragraphs;
use crate::normalizer::utility::dom::{find_child_element, is_element};
use crate::normalizer::utility::serialization::{into_string, serialize_children, serialize_node};
use crate::options::NormalizeOptions;

/// Elements whose content the tokenizer reads as text, so tags inside them are not tags.
const RAW_TEXT_ELEMENTS: [&str; 9] = [
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes", "noscript",
];

/// Matches a comment, a raw-text element or a `<body>`/`<html>` start tag.
///
/// Comments and raw-text elements are consumed whole, so a `<body>` inside
/// them never reaches the last alternative.
static DOCUMENT_TAG: Lazy<Regex> = Lazy::new(|| {
    let raw_text: Vec<String> = RAW_TEXT_ELEMENTS
        .iter()
        .map(|tag| format!(r"<{tag}[\s/>].*?(?:</{tag}\s*>|\z)"))
        .collect();
    let pattern = format!(r"(?is)<!--.*?(?:-->|\z)|{}|<(body|html)[\s/>]", raw_text.join("|"));
    Regex::new(&pattern).expect("valid document tag regex")
});

/// Which of `<body>` and `<html>` the input spells out as real tags.
#[derive(Debug, Default, Clone, Copy)]
struct ExplicitTags {
    body: bool,
    html: bool,
}

impl ExplicitTags {
    fn scan(html: &str) -> Self {
        let mut found = Self::default();
        for caps in DOCUMENT_TAG.captures_iter(html) {
            let Some(tag) = caps.get(1) else {
                continue;
            };
            if tag.as_str().eq_ignore_ascii_case("body") {
                found.body = true;
            } else {
                found.html = true;
            }
            if found.body && found.html {
                break;
            }
        }
        found
    }
}

/// Which part of the parsed tree was normalized and emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingRootKind {
    /// The input had a `<body>`; only the body element is emitted.
    Body,
    /// The input had `<html>` but no `<body>`; the whole document is emitted.
    Document,
    /// Bare markup; emitted without the parser's implied wrappers.
    Fragment,
}

/// Counts describing what a normalization run changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeSummary {
    /// Part of the tree that was normalized.
    pub root: WorkingRootKind,
    /// Headings found (all of them end up at the canonical level).
    pub headings: usize,
    /// List containers removed, nested ones included.
    pub lists_flattened: usize,
    /// Paragraphs synthesized from list items.
    pub paragraphs_created: usize,
    /// Paragraphs that received a trailing line break.
    pub paragraphs_terminated: usize,
}

enum WorkingRoot {
    Body(Handle),
    Document(Handle),
    Fragment(Handle),
}

impl WorkingRoot {
    fn select(dom: &RcDom, html: &str) -> Self {
        let html_element = find_child_element(&dom.document, "html");
        let explicit = ExplicitTags::scan(html);

        if explicit.body {
            if let Some(body) = html_element.as_ref().and_then(|el| find_child_element(el, "body")) {
                return Self::Body(body);
            }
        }
        if explicit.html {
            return Self::Document(dom.document.clone());
        }
        Self::Fragment(html_element.unwrap_or_else(|| dom.document.clone()))
    }

    const fn kind(&self) -> WorkingRootKind {
        match self {
            Self::Body(_) => WorkingRootKind::Body,
            Self::Document(_) => WorkingRootKind::Document,
            Self::Fragment(_) => WorkingRootKind::Fragment,
        }
    }

    const fn handle(&self) -> &Handle {
        match self {
            Self::Body(handle) | Self::Document(handle) | Self::Fragment(handle) => handle,
        }
    }

    fn serialize(&self) -> String {
        let mut buf = Vec::new();
        match self {
            Self::Body(body) => serialize_node(body, &mut buf),
            Self::Document(document) => serialize_children(document, &mut buf),
            Self::Fragment(root) => {
                // Unwrap the implied <head>/<body>; anything else at this level is kept as is.
                for child in root.children.borrow().iter() {
                    if is_element(child, "head") || is_element(child, "body") {
                        serialize_children(child, &mut buf);
                    } else {
                        serialize_node(child, &mut buf);
                    }
                }
            }
        }
        into_string(buf)
    }
}

/// Normalizes HTML with the default options.
///
/// Headings become `<h2>`, unordered lists become paragraphs and every
/// paragraph ends with a line break. Never fails; `""` yields `""`.
///
/// # Example
///
/// ```
/// use html_normalizer_rs::transform_html;
///
/// let html = "<h3>Title</h3><ul><li>One</li><li>Two</li></ul>";
/// assert_eq!(transform_html(html), "<h2>Title</h2><p>One\n</p><p>Two\n</p>");
/// ```
#[must_use]
pub fn transform_html(html: &str) -> String {
    normalize_html(html, &NormalizeOptions::default())
}

/// Normalizes HTML using the provided options.
#[must_use]
pub fn normalize_html(html: &str, options: &NormalizeOptions) -> String {
    normalize_html_with_summary(html, options).0
}

/// Normalizes HTML and reports what was changed.
#[tracing::instrument(level = "debug", skip_all, fields(input_len = html.len()))]
#[must_use]
pub fn normalize_html_with_summary(html: &str, options: &NormalizeOptions) -> (String, NormalizeSummary) {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    let root = WorkingRoot::select(&dom, html);
    let working = root.handle();

    let headings = normalize_headings(working, options.heading_level);
    let lists = flatten_lists(working, options);
    let paragraphs_terminated = if options.paragraph_breaks {
        terminate_paragraphs(working)
    } else {
        0
    };

    let summary = NormalizeSummary {
        root: root.kind(),
        headings,
        lists_flattened: lists.lists,
        paragraphs_created: lists.paragraphs,
        paragraphs_terminated,
    };
    tracing::debug!(
        root = ?summary.root,
        headings = summary.headings,
        lists = summary.lists_flattened,
        paragraphs = summary.paragraphs_created,
        terminated = summary.paragraphs_terminated,
        "normalized document"
    );

    (root.serialize(), summary)
}
