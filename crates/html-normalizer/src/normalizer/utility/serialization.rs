//! Serialization of rcdom subtrees back to HTML text.

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use markup5ever_rcdom::{Handle, SerializableHandle};

/// Serialize `handle` itself (start tag, children, end tag) into `out`.
pub(crate) fn serialize_node(handle: &Handle, out: &mut Vec<u8>) {
    serialize_with_scope(handle, TraversalScope::IncludeNode, out);
}

/// Serialize only the children of `handle` into `out`.
pub(crate) fn serialize_children(handle: &Handle, out: &mut Vec<u8>) {
    serialize_with_scope(handle, TraversalScope::ChildrenOnly(None), out);
}

fn serialize_with_scope(handle: &Handle, scope: TraversalScope, out: &mut Vec<u8>) {
    let opts = SerializeOpts {
        traversal_scope: scope,
        ..SerializeOpts::default()
    };
    if let Err(err) = serialize(out, &SerializableHandle::from(handle.clone()), opts) {
        tracing::warn!(error = %err, "failed to serialize normalized subtree");
    }
}

/// Convert serializer output into a `String`.
pub(crate) fn into_string(buf: Vec<u8>) -> String {
    match String::from_utf8(buf) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
