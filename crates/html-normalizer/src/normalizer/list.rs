//! List flattening.
//!
//! Each list container is replaced by one `<p>` per list item, holding the
//! item's direct text. Lists nested inside an item are expanded right after
//! that item's paragraph, so document order is kept at every depth.

use html5ever::Namespace;
use markup5ever_rcdom::{Handle, NodeData};

use crate::normalizer::text::direct_text;
use crate::normalizer::utility::dom::{
    append_child, detach, element_name, insert_after, is_element, new_element, new_text, outermost_matching,
};
use crate::options::NormalizeOptions;

/// Counts produced by [`flatten_lists`].
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FlattenStats {
    /// List containers removed, nested ones included.
    pub(crate) lists: usize,
    /// Paragraphs synthesized from list items.
    pub(crate) paragraphs: usize,
}

/// Replace every list container under `root` with paragraphs.
pub(crate) fn flatten_lists(root: &Handle, options: &NormalizeOptions) -> FlattenStats {
    let is_list = |node: &Handle| element_name(node).is_some_and(|name| options.is_list_container(name));
    let mut stats = FlattenStats::default();

    for list in outermost_matching(root, &is_list) {
        let mut paragraphs = Vec::new();
        collect_item_paragraphs(&list, &is_list, &mut paragraphs, &mut stats);
        stats.paragraphs += paragraphs.len();
        if insert_after(&list, paragraphs) {
            detach(&list);
        }
    }

    stats
}

/// Work left to do while expanding one outermost list.
enum Pending {
    /// A list container whose children are still to be expanded.
    List(Handle),
    /// A child of a list container, with the namespace new paragraphs get.
    Child(Handle, Namespace),
}

fn collect_item_paragraphs<F>(list: &Handle, is_list: &F, out: &mut Vec<Handle>, stats: &mut FlattenStats)
where
    F: Fn(&Handle) -> bool,
{
    // Entries are popped in document order, so nested lists land right after their item.
    let mut stack = vec![Pending::List(list.clone())];
    while let Some(pending) = stack.pop() {
        match pending {
            Pending::List(container) => {
                stats.lists += 1;
                let NodeData::Element { name, .. } = &container.data else {
                    continue;
                };
                let ns = name.ns.clone();
                stack.extend(
                    container
                        .children
                        .borrow()
                        .iter()
                        .rev()
                        .map(|child| Pending::Child(child.clone(), ns.clone())),
                );
            }
            Pending::Child(child, ns) => {
                if is_element(&child, "li") {
                    let paragraph = new_element(ns, "p");
                    let text = direct_text(&child);
                    if !text.is_empty() {
                        append_child(&paragraph, new_text(&text));
                    }
                    out.push(paragraph);
                } else if is_list(&child) {
                    // A list placed directly inside another list, without an item around it.
                    stack.push(Pending::List(child));
                    continue;
                }
                stack.extend(outermost_matching(&child, is_list).into_iter().rev().map(Pending::List));
            }
        }
    }
}
