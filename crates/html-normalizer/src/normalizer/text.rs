//! Text extraction helpers.

use markup5ever_rcdom::{Handle, NodeData};

/// Direct text of an element, excluding text inside nested elements.
///
/// Each direct text child is trimmed and the pieces are concatenated without a
/// separator, so `<li>Item 1<ul>..</ul></li>` yields `"Item 1"`.
pub(crate) fn direct_text(node: &Handle) -> String {
    let mut text = String::new();
    for child in node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            text.push_str(contents.borrow().trim());
        }
    }
    text
}
