//! Paragraph termination.

use markup5ever_rcdom::Handle;

use crate::normalizer::utility::dom::{append_child, descendants, is_element, new_text};

/// Line break appended to every paragraph.
pub(crate) const PARAGRAPH_BREAK: &str = "\n";

/// Append [`PARAGRAPH_BREAK`] to every `<p>` under `root`. Returns how many were touched.
pub(crate) fn terminate_paragraphs(root: &Handle) -> usize {
    let paragraphs: Vec<Handle> = descendants(root)
        .into_iter()
        .filter(|node| is_element(node, "p"))
        .collect();

    for paragraph in &paragraphs {
        append_child(paragraph, new_text(PARAGRAPH_BREAK));
    }

    paragraphs.len()
}
