//! # gemtext-render
//!
//! Render structured document trees (sections, paragraphs, lists, quotes,
//! images, inline emphasis, links, footnotes) to Gemtext, the line-oriented
//! markup of the Gemini protocol.
//!
//! ## Features
//!
//! - One construct per line: paragraphs are flattened, quotes collapsed
//! - Inline links are deferred to a links appendix and marked with superscript
//!   numbers (`site¹`)
//! - Footnotes are deferred to a footnotes appendix and marked with
//!   superscript letters (`ᵃ`)
//! - Document configuration through attributes (`links-heading`,
//!   `image-base-url`, ...)
//! - Unsupported node kinds are a hard error, never silently dropped
//!
//! ## Quick Start
//!
//! ```
//! use gemtext_render::{Node, convert};
//!
//! let doc = Node::document(
//!     "Field notes: Spring",
//!     vec![Node::paragraph(vec![
//!         "Read the ".into(),
//!         Node::link("gemini://example.org/guide", "guide").into(),
//!         " first.".into(),
//!         Node::footnote(vec!["Or don't.".into()]).into(),
//!     ])],
//! )
//! .with_attribute("links-heading", "Links");
//!
//! let gmi = convert(&doc)?;
//! assert_eq!(
//!     gmi,
//!     "# Field notes (Spring)\n\
//!      \n\
//!      Read the guide¹ first.ᵃ\n\
//!      \n\
//!      ## Links\n\
//!      => gemini://example.org/guide ¹ guide\n\
//!      \n\
//!      ᵃ Or don't.\n"
//! );
//! # Ok::<(), gemtext_render::Error>(())
//! ```
//!
//! ## Working with Trees
//!
//! Trees are usually produced by a markup parser and handed over as
//! [`Node`] values (or as JSON with the `serde` feature). The root's
//! attributes are the document scope: header fields (`revdate`, `author`,
//! `keywords`, ...) and rendering configuration both live there, and
//! [`export::GemtextExporter`] can overlay host-supplied overrides.

pub mod error;
pub mod export;
pub mod gemtext;
pub mod model;

pub use error::{Error, Result};
pub use export::{Exporter, GemtextExporter};
pub use model::{AttrValue, Attributes, Child, Node, NodeKind};

/// Render a document tree to Gemtext with no attribute overrides.
pub fn convert(root: &Node) -> Result<String> {
    GemtextExporter::new().convert(root)
}
