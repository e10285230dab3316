//! Tree mutation helpers over `markup5ever_rcdom`.
//!
//! Every node is owned by its parent's `children` vector and points back to the
//! parent through a weak handle. The helpers here keep both sides of that link
//! consistent when nodes are inserted, replaced or detached.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use html5ever::tendril::StrTendril;
use html5ever::{LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData};

/// Local tag name of an element node, or `None` for non-elements.
pub(crate) fn element_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Check whether `node` is an element with the given local name.
pub(crate) fn is_element(node: &Handle, tag_name: &str) -> bool {
    element_name(node).is_some_and(|name| name.eq_ignore_ascii_case(tag_name))
}

/// Parent of `node`, if it is still attached.
pub(crate) fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(Weak::upgrade);
    node.parent.set(weak);
    parent
}

fn index_in_parent(parent: &Handle, node: &Handle) -> Option<usize> {
    parent
        .children
        .borrow()
        .iter()
        .position(|child| Rc::ptr_eq(child, node))
}

/// All descendants of `root` in document order, excluding `root` itself.
pub(crate) fn descendants(root: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        out.push(node);
    }
    out
}

/// Outermost descendants of `root` matching `pred`, in document order.
///
/// Matching nodes are not descended into, so a match nested inside another
/// match is never returned.
pub(crate) fn outermost_matching<F>(root: &Handle, pred: &F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        if pred(&node) {
            out.push(node);
        } else {
            stack.extend(node.children.borrow().iter().rev().cloned());
        }
    }
    out
}

/// First child element of `node` with the given name.
pub(crate) fn find_child_element(node: &Handle, tag_name: &str) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|child| is_element(child, tag_name))
        .cloned()
}

/// Create a detached element with no attributes.
pub(crate) fn new_element(ns: Namespace, tag_name: &str) -> Handle {
    Node::new(NodeData::Element {
        name: QualName::new(None, ns, LocalName::from(tag_name)),
        attrs: RefCell::new(Vec::new()),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

/// Create a detached text node.
pub(crate) fn new_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(text)),
    })
}

/// Append `child` as the last child of `parent`.
pub(crate) fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Insert `nodes` as siblings immediately after `anchor`, keeping their order.
///
/// Returns `false` (and inserts nothing) when `anchor` has no parent.
pub(crate) fn insert_after(anchor: &Handle, nodes: Vec<Handle>) -> bool {
    let Some(parent) = parent_of(anchor) else {
        return false;
    };
    let Some(index) = index_in_parent(&parent, anchor) else {
        return false;
    };
    for node in &nodes {
        node.parent.set(Some(Rc::downgrade(&parent)));
    }
    let mut children = parent.children.borrow_mut();
    let tail = children.split_off(index + 1);
    children.extend(nodes);
    children.extend(tail);
    true
}

/// Remove `node` from its parent. Its subtree is dropped with it unless held elsewhere.
pub(crate) fn detach(node: &Handle) {
    let Some(parent) = parent_of(node) else {
        return;
    };
    if let Some(index) = index_in_parent(&parent, node) {
        parent.children.borrow_mut().remove(index);
    }
    node.parent.set(None);
}

/// Move every child of `from` to the end of `to`.
pub(crate) fn reparent_children(from: &Handle, to: &Handle) {
    let moved: Vec<Handle> = from.children.borrow_mut().drain(..).collect();
    for child in moved {
        append_child(to, child);
    }
}

/// Put `replacement` at `node`'s position in its parent and detach `node`.
pub(crate) fn replace_node(node: &Handle, replacement: Handle) -> bool {
    let Some(parent) = parent_of(node) else {
        return false;
    };
    let Some(index) = index_in_parent(&parent, node) else {
        return false;
    };
    replacement.parent.set(Some(Rc::downgrade(&parent)));
    parent.children.borrow_mut()[index] = replacement;
    node.parent.set(None);
    true
}

/// Replace an element with an identical one carrying a different local name.
///
/// Attributes, children and position are preserved. Returns the new node, or
/// `None` if `node` is not an attached element.
pub(crate) fn rename_element(node: &Handle, tag_name: &str) -> Option<Handle> {
    let NodeData::Element {
        name,
        attrs,
        template_contents,
        mathml_annotation_xml_integration_point,
    } = &node.data
    else {
        return None;
    };
    parent_of(node)?;

    let renamed = Node::new(NodeData::Element {
        name: QualName::new(name.prefix.clone(), name.ns.clone(), LocalName::from(tag_name)),
        attrs: RefCell::new(attrs.borrow().clone()),
        template_contents: RefCell::new(template_contents.borrow_mut().take()),
        mathml_annotation_xml_integration_point: *mathml_annotation_xml_integration_point,
    });
    reparent_children(node, &renamed);
    replace_node(node, renamed.clone());
    Some(renamed)
}
