//! High-performance HTML normalization for downstream rendering.
//!
//! The normalizer parses arbitrary (possibly malformed) HTML with html5ever and
//! rewrites it into a simpler shape:
//!
//! - only `<body>` content is kept when the document has a body,
//! - every `<h1>`..`<h6>` becomes a single canonical heading level,
//! - unordered lists are flattened into one `<p>` per item, nested lists
//!   expanded in document order,
//! - every paragraph ends with a line break.
//!
//! ```
//! use html_normalizer_rs::{HeadingLevel, NormalizeOptions, normalize_html};
//!
//! let options = NormalizeOptions::default().with_heading_level(HeadingLevel::H3);
//! let html = "<h1>Intro</h1><ul><li>Item 1<ul><li>Nested</li></ul></li></ul>";
//! assert_eq!(
//!     normalize_html(html, &options),
//!     "<h3>Intro</h3><p>Item 1\n</p><p>Nested\n</p>"
//! );
//! ```

pub mod encoding;
pub mod error;
pub mod normalizer;
pub mod options;

pub use encoding::{charset_from_content_type, decode_html_bytes, is_known_encoding};
pub use error::{NormalizeError, Result};
pub use normalizer::{NormalizeSummary, WorkingRootKind, normalize_html, normalize_html_with_summary, transform_html};
pub use options::{HeadingLevel, NormalizeOptions};

/// Decodes raw bytes and normalizes the resulting HTML.
///
/// `encoding` is a WHATWG encoding label such as `"utf-8"` or `"windows-1252"`;
/// when `None` the encoding is sniffed from a BOM or `<meta charset>`.
///
/// # Errors
///
/// Returns [`NormalizeError::UnknownEncoding`] if `encoding` is not a known label.
pub fn normalize_bytes(bytes: &[u8], encoding: Option<&str>, options: &NormalizeOptions) -> Result<String> {
    let html = decode_html_bytes(bytes, encoding)?;
    Ok(normalize_html(&html, options))
}
