//! Shared helpers for walking, mutating and serializing the DOM.

pub(crate) mod dom;
pub(crate) mod serialization;
