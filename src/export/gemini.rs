//! Gemtext exporter.
//!
//! Resolves the document scope (root attributes overlaid with host
//! overrides), renders the tree, and writes the result.

use std::io::Write;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::gemtext::{GemtextConfig, Transducer};
use crate::model::{AttrValue, Attributes, Node};

use super::Exporter;

/// Backend name the converter registers under.
pub const BACKEND: &str = "gemini";
/// File type of the produced output.
pub const FILETYPE: &str = "gmi";
/// Suffix for output files.
pub const OUTFILESUFFIX: &str = ".gmi";

/// Gemtext format exporter.
///
/// # Example
///
/// ```
/// use gemtext_render::Node;
/// use gemtext_render::export::GemtextExporter;
///
/// let doc = Node::document(
///     "Log",
///     vec![Node::paragraph(vec![
///         "Visit ".into(),
///         Node::link("gemini://example.org", "my capsule").into(),
///     ])],
/// );
/// let gmi = GemtextExporter::new().convert(&doc)?;
/// assert_eq!(
///     gmi,
///     "# Log\n\nVisit my capsule¹\n\n=> gemini://example.org ¹ my capsule\n"
/// );
/// # Ok::<(), gemtext_render::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GemtextExporter {
    /// Attribute overrides applied on top of the document's own attributes.
    attributes: Attributes,
}

impl GemtextExporter {
    /// Create a new exporter with no attribute overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a single document attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Parse a `key=value` override (`key` alone sets a flag, `key!` unsets it).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttribute`] when the key is empty.
    pub fn with_attribute_spec(self, spec: &str) -> Result<Self> {
        let (key, value) = match spec.split_once('=') {
            Some((key, value)) => (key.trim(), AttrValue::from(value)),
            None => match spec.trim().strip_suffix('!') {
                Some(key) => (key, AttrValue::Bool(false)),
                None => (spec.trim(), AttrValue::Bool(true)),
            },
        };
        if key.is_empty() {
            return Err(Error::InvalidAttribute(format!("`{spec}` has no attribute name")));
        }
        Ok(self.with_attribute(key, value))
    }

    /// Attribute overrides configured so far.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Render the document rooted at `root`.
    pub fn convert(&self, root: &Node) -> Result<String> {
        self.convert_with_transform(root, None)
    }

    /// Render `root` under an explicit transform name instead of its kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKind`] when the transform (or the kind of
    /// any descendant) has no render rule, and
    /// [`Error::MissingConfiguration`] under the strict image policy.
    pub fn convert_with_transform(&self, root: &Node, transform: Option<&str>) -> Result<String> {
        let scope = root.attributes.overlaid(&self.attributes);
        let config = GemtextConfig::from_attributes(&scope)?;
        debug!(kind = %root.kind, nodes = root.node_count(), "convert");

        let mut transducer = Transducer::new(&scope, &config);
        transducer.convert(root, transform)
    }
}

impl Exporter for GemtextExporter {
    fn export<W: Write>(&self, root: &Node, writer: &mut W) -> Result<()> {
        let output = self.convert(root)?;
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        info!(bytes = output.len(), "wrote gemtext");
        Ok(())
    }
}
