//! Heading normalization.

use markup5ever_rcdom::Handle;

use crate::normalizer::utility::dom::{descendants, element_name, rename_element};
use crate::options::{HEADING_TAGS, HeadingLevel};

/// Rewrite every `h1`..`h6` under `root` to `level`, keeping children and attributes.
///
/// Returns the number of headings visited, including ones already at `level`.
pub(crate) fn normalize_headings(root: &Handle, level: HeadingLevel) -> usize {
    let target = level.tag_name();
    let headings: Vec<Handle> = descendants(root)
        .into_iter()
        .filter(|node| element_name(node).is_some_and(is_heading_tag))
        .collect();

    for heading in &headings {
        let already_canonical = element_name(heading).is_some_and(|name| name.eq_ignore_ascii_case(target));
        if !already_canonical {
            rename_element(heading, target);
        }
    }

    headings.len()
}

fn is_heading_tag(tag_name: &str) -> bool {
    HEADING_TAGS.iter().any(|heading| tag_name.eq_ignore_ascii_case(heading))
}
