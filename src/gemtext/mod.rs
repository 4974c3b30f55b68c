//! Pure Gemtext generation from the document tree.
//!
//! This module renders a [`Node`](crate::model::Node) tree to Gemtext. The
//! design separates pure rendering logic from I/O:
//!
//! - [`escape`]: entity decoding and line flattening
//! - [`markers`]: superscript markers for deferred links and footnotes
//! - [`registry`]: node kind → render rule dispatch
//! - [`render`]: the render rules and the per-document side channel
//! - [`config`]: document-level configuration
//!
//! The export layer ([`crate::export`]) handles attribute overrides and
//! writing the result.
//!
//! ## Design Notes
//!
//! Gemtext allows one construct per line and has no inline link syntax:
//!
//! - **Deferred links**: an inline link leaves its text plus a superscript
//!   number (`site¹`) and is listed at the end as `=> target ¹ site`
//! - **Footnotes**: replaced by a superscript letter (`ᵃ`) and listed after
//!   the links as `ᵃ text`
//! - **Bare links** become their own `=> url` line, isolated by blank lines
//! - **Internal references** (`#fragment`) keep only their text
//! - **Unsupported kinds** abort the render; nothing is silently dropped

mod config;
mod escape;
mod markers;
mod registry;
mod render;

pub use config::{DEFAULT_TITLE_SEPARATOR, GemtextConfig, ImageBasePolicy};
pub use escape::{
    ENTITY_TABLE, collapse_line_breaks, decode_entities, flatten_runs, is_link_line,
    tidy_paragraph,
};
pub use markers::{SUPERSCRIPT_DIGITS, SUPERSCRIPT_LETTERS, footnote_marker, link_marker};
pub use registry::{RenderFn, renderer_for, supported_kinds};
pub use render::{SideChannel, Transducer};
