//! Node kind → render rule dispatch.

use crate::error::Result;
use crate::model::{Node, NodeKind};

use super::render::{Transducer, rules};

/// A render rule: turns one node (and, through the transducer, its
/// descendants) into Gemtext.
pub type RenderFn = fn(&mut Transducer<'_>, &Node) -> Result<String>;

/// Look up the render rule for a node kind.
///
/// Returns `None` for kinds that have no Gemtext rendering. `list_item` is
/// among them: items are rendered by their parent list.
pub fn renderer_for(kind: NodeKind) -> Option<RenderFn> {
    match kind {
        NodeKind::Document => Some(rules::document),
        NodeKind::Embedded | NodeKind::Preamble => Some(rules::passthrough),
        NodeKind::Section => Some(rules::section),
        NodeKind::Paragraph => Some(rules::paragraph),
        NodeKind::Ulist => Some(rules::ulist),
        NodeKind::Quote => Some(rules::quote),
        NodeKind::Literal | NodeKind::Listing => Some(rules::literal),
        NodeKind::Image => Some(rules::image),
        NodeKind::InlineQuoted => Some(rules::inline_quoted),
        NodeKind::InlineAnchor => Some(rules::inline_anchor),
        NodeKind::InlineFootnote => Some(rules::inline_footnote),

        NodeKind::ListItem
        | NodeKind::Admonition
        | NodeKind::Olist
        | NodeKind::Dlist
        | NodeKind::Colist
        | NodeKind::Table
        | NodeKind::Sidebar
        | NodeKind::Example
        | NodeKind::Open
        | NodeKind::Verse
        | NodeKind::Video
        | NodeKind::Audio
        | NodeKind::Toc
        | NodeKind::Stem
        | NodeKind::ThematicBreak
        | NodeKind::PageBreak
        | NodeKind::FloatingTitle
        | NodeKind::InlineBreak
        | NodeKind::InlineImage
        | NodeKind::InlineKbd
        | NodeKind::InlineButton
        | NodeKind::InlineMenu
        | NodeKind::InlineIndexterm
        | NodeKind::InlineCallout => None,
    }
}

/// Kinds that have a render rule, in declaration order.
pub fn supported_kinds() -> impl Iterator<Item = NodeKind> {
    NodeKind::ALL
        .into_iter()
        .filter(|kind| renderer_for(*kind).is_some())
}
