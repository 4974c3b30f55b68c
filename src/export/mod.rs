//! Export module for writing documents as Gemtext.
//!
//! Provides the `Exporter` trait and the Gemtext implementation.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_attribute()` / `with_attribute_spec()` layer document attribute overrides
//! - `export()` writes to any `Write` destination
//!
//! # Example
//!
//! ```
//! use gemtext_render::Node;
//! use gemtext_render::export::{Exporter, GemtextExporter};
//!
//! let doc = Node::document("Notes", vec![Node::paragraph(vec!["Hello".into()])]);
//! let mut out = Vec::new();
//! GemtextExporter::new()
//!     .with_attribute("links-heading", "Links")
//!     .export(&doc, &mut out)?;
//! assert_eq!(String::from_utf8(out).unwrap(), "# Notes\n\nHello\n");
//! # Ok::<(), gemtext_render::Error>(())
//! ```

use std::io::Write;

use crate::error::Result;
use crate::model::Node;

mod gemini;

pub use gemini::{BACKEND, FILETYPE, GemtextExporter, OUTFILESUFFIX};

/// Trait for exporting documents to a specific format.
///
/// The writer can be:
/// - `std::fs::File` for disk output
/// - `Vec<u8>` for in-memory output
/// - `std::io::Stdout` or any other type implementing `Write`
pub trait Exporter {
    /// Export the document rooted at `root` to the provided writer.
    ///
    /// Nothing is written when rendering fails.
    fn export<W: Write>(&self, root: &Node, writer: &mut W) -> Result<()>;
}
