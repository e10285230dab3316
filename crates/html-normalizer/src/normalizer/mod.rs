//! HTML normalization passes and the pipeline that drives them.

pub(crate) mod heading;
pub(crate) mod list;
pub mod main;
pub(crate) mod paragraph;
pub(crate) mod text;
pub(crate) mod utility;

pub use main::{NormalizeSummary, WorkingRootKind, normalize_html, normalize_html_with_summary, transform_html};
