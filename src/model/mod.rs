//! Document tree consumed by the renderer.
//!
//! This module contains:
//! - Node kinds (the closed set of names a host can hand over)
//! - Nodes and their children (text leaves or nested nodes)
//! - String-keyed attributes, scoped to a node or to the document root
//!
//! Parsing source markup into this tree is the host's job. With the `serde`
//! feature the tree can be exchanged as JSON, where a child is either a bare
//! string (text) or an object (node).

mod attributes;
mod node;

pub use attributes::{AttrValue, Attributes};
pub use node::{Child, Node, NodeKind};
