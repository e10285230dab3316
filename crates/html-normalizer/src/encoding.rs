//! Decoding of raw HTML bytes into text.

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::error::{NormalizeError, Result};

/// How far into the document a `<meta charset>` declaration is looked for.
const META_SNIFF_LIMIT: usize = 1024;

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_\-:.]+)"#).expect("valid meta charset regex")
});

/// Decodes HTML bytes to a `String`.
///
/// With an explicit `label` that encoding is used (a byte order mark still wins,
/// as browsers do). Without one, the encoding comes from a BOM, then from a
/// `<meta charset>` near the start of the document, and finally defaults to
/// UTF-8. Malformed sequences become U+FFFD rather than failing.
///
/// # Errors
///
/// Returns [`NormalizeError::UnknownEncoding`] if `label` is not a WHATWG label.
pub fn decode_html_bytes(bytes: &[u8], label: Option<&str>) -> Result<String> {
    let encoding = match label {
        Some(label) => {
            Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| NormalizeError::UnknownEncoding(label.to_string()))?
        }
        None => sniff_encoding(bytes),
    };

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced malformed byte sequences while decoding");
    }
    Ok(text.into_owned())
}

/// Whether `label` names an encoding [`decode_html_bytes`] accepts.
#[must_use]
pub fn is_known_encoding(label: &str) -> bool {
    Encoding::for_label(label.trim().as_bytes()).is_some()
}

/// Extracts the `charset` parameter from an HTTP `Content-Type` value.
///
/// ```
/// use html_normalizer_rs::charset_from_content_type;
///
/// assert_eq!(charset_from_content_type("text/html; charset=\"windows-1252\""), Some("windows-1252"));
/// assert_eq!(charset_from_content_type("text/html"), None);
/// ```
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then_some(value)
    })
}

fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    META_CHARSET
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}
