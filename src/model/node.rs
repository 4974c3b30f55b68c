//! Document tree node types.

use std::fmt;

use super::attributes::{AttrValue, Attributes};

/// Kind of a document node.
///
/// The set is closed: it mirrors the node names an AsciiDoc-style host hands
/// to a converter. Only some kinds have a render rule (see
/// [`crate::gemtext::renderer_for`]); the rest exist so a tree can carry them
/// and fail loudly instead of being silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    /// Root of a standalone document (header, body and appendices).
    Document,
    /// Root of an embedded (header-less) conversion.
    Embedded,
    Section,
    Paragraph,
    /// Content before the first section.
    Preamble,
    /// Unordered list.
    Ulist,
    /// Item of a list. Rendered by its parent list.
    ListItem,
    /// Block quote with optional attribution/citetitle.
    Quote,
    /// Literal block (raw lines).
    Literal,
    /// Listing / source block (raw lines).
    Listing,
    /// Block image.
    Image,
    /// Inline emphasis/strong/etc.
    InlineQuoted,
    /// Inline cross reference or link.
    InlineAnchor,
    /// Inline footnote.
    InlineFootnote,

    // Kinds without a render rule.
    Admonition,
    Olist,
    Dlist,
    Colist,
    Table,
    Sidebar,
    Example,
    Open,
    Verse,
    Video,
    Audio,
    Toc,
    Stem,
    ThematicBreak,
    PageBreak,
    FloatingTitle,
    InlineBreak,
    InlineImage,
    InlineKbd,
    InlineButton,
    InlineMenu,
    InlineIndexterm,
    InlineCallout,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 37] = [
        NodeKind::Document,
        NodeKind::Embedded,
        NodeKind::Section,
        NodeKind::Paragraph,
        NodeKind::Preamble,
        NodeKind::Ulist,
        NodeKind::ListItem,
        NodeKind::Quote,
        NodeKind::Literal,
        NodeKind::Listing,
        NodeKind::Image,
        NodeKind::InlineQuoted,
        NodeKind::InlineAnchor,
        NodeKind::InlineFootnote,
        NodeKind::Admonition,
        NodeKind::Olist,
        NodeKind::Dlist,
        NodeKind::Colist,
        NodeKind::Table,
        NodeKind::Sidebar,
        NodeKind::Example,
        NodeKind::Open,
        NodeKind::Verse,
        NodeKind::Video,
        NodeKind::Audio,
        NodeKind::Toc,
        NodeKind::Stem,
        NodeKind::ThematicBreak,
        NodeKind::PageBreak,
        NodeKind::FloatingTitle,
        NodeKind::InlineBreak,
        NodeKind::InlineImage,
        NodeKind::InlineKbd,
        NodeKind::InlineButton,
        NodeKind::InlineMenu,
        NodeKind::InlineIndexterm,
        NodeKind::InlineCallout,
    ];

    /// The node name used by hosts and in transform requests.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Embedded => "embedded",
            NodeKind::Section => "section",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Preamble => "preamble",
            NodeKind::Ulist => "ulist",
            NodeKind::ListItem => "list_item",
            NodeKind::Quote => "quote",
            NodeKind::Literal => "literal",
            NodeKind::Listing => "listing",
            NodeKind::Image => "image",
            NodeKind::InlineQuoted => "inline_quoted",
            NodeKind::InlineAnchor => "inline_anchor",
            NodeKind::InlineFootnote => "inline_footnote",
            NodeKind::Admonition => "admonition",
            NodeKind::Olist => "olist",
            NodeKind::Dlist => "dlist",
            NodeKind::Colist => "colist",
            NodeKind::Table => "table",
            NodeKind::Sidebar => "sidebar",
            NodeKind::Example => "example",
            NodeKind::Open => "open",
            NodeKind::Verse => "verse",
            NodeKind::Video => "video",
            NodeKind::Audio => "audio",
            NodeKind::Toc => "toc",
            NodeKind::Stem => "stem",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::PageBreak => "page_break",
            NodeKind::FloatingTitle => "floating_title",
            NodeKind::InlineBreak => "inline_break",
            NodeKind::InlineImage => "inline_image",
            NodeKind::InlineKbd => "inline_kbd",
            NodeKind::InlineButton => "inline_button",
            NodeKind::InlineMenu => "inline_menu",
            NodeKind::InlineIndexterm => "inline_indexterm",
            NodeKind::InlineCallout => "inline_callout",
        }
    }

    /// Look up a kind by its node name.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether nodes of this kind live inside running text.
    pub fn is_inline(self) -> bool {
        self.name().starts_with("inline_")
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A child of a node: either literal text or a nested node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Child {
    Text(String),
    Node(Node),
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

/// A node in the source document tree.
///
/// Kind-specific fields are optional and only read by the render rule of the
/// matching kind: `level` for sections, `target` for anchors and images,
/// `role` for anchors (`bare`), `variant` for inline quotes (`strong`,
/// `emphasis`, ...) and `lines` for literal and listing blocks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Attributes::is_empty"))]
    pub attributes: Attributes,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Child>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub level: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub target: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub role: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", default, skip_serializing_if = "Option::is_none")
    )]
    pub variant: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub lines: Vec<String>,
}

impl Node {
    /// Create an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            children: Vec::new(),
            title: None,
            level: None,
            target: None,
            role: None,
            variant: None,
            lines: Vec::new(),
        }
    }

    /// Standalone document root.
    pub fn document(title: impl Into<String>, blocks: Vec<Node>) -> Self {
        Self::new(NodeKind::Document)
            .with_title(title)
            .with_children(blocks.into_iter().map(Child::Node))
    }

    pub fn section(level: u8, title: impl Into<String>, blocks: Vec<Node>) -> Self {
        let mut node = Self::new(NodeKind::Section)
            .with_title(title)
            .with_children(blocks.into_iter().map(Child::Node));
        node.level = Some(level);
        node
    }

    pub fn paragraph(children: Vec<Child>) -> Self {
        Self::new(NodeKind::Paragraph).with_children(children)
    }

    pub fn preamble(blocks: Vec<Node>) -> Self {
        Self::new(NodeKind::Preamble).with_children(blocks.into_iter().map(Child::Node))
    }

    /// Unordered list; each entry becomes a `list_item` node.
    pub fn ulist(items: Vec<Vec<Child>>) -> Self {
        Self::new(NodeKind::Ulist).with_children(
            items
                .into_iter()
                .map(|item| Child::Node(Self::new(NodeKind::ListItem).with_children(item))),
        )
    }

    pub fn quote(blocks: Vec<Node>) -> Self {
        Self::new(NodeKind::Quote).with_children(blocks.into_iter().map(Child::Node))
    }

    pub fn literal<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = Self::new(NodeKind::Literal);
        node.lines = lines.into_iter().map(Into::into).collect();
        node
    }

    pub fn image(target: impl Into<String>) -> Self {
        Self::new(NodeKind::Image).with_target(target)
    }

    /// Inline quoted text of the given type (`strong`, `emphasis`, ...).
    pub fn quoted(variant: impl Into<String>, children: Vec<Child>) -> Self {
        let mut node = Self::new(NodeKind::InlineQuoted).with_children(children);
        node.variant = Some(variant.into());
        node
    }

    /// Inline link with the given target and text.
    pub fn link(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NodeKind::InlineAnchor)
            .with_target(target)
            .with_children([Child::Text(text.into())])
    }

    /// Bare link (URL standing on its own in the source text).
    pub fn bare_link(target: impl Into<String>) -> Self {
        let target = target.into();
        Self::new(NodeKind::InlineAnchor)
            .with_role("bare")
            .with_children([Child::Text(target.clone())])
            .with_target(target)
    }

    pub fn footnote(children: Vec<Child>) -> Self {
        Self::new(NodeKind::InlineFootnote).with_children(children)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.attributes.set(key, value);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Child>) -> Self {
        self.children.extend(children);
        self
    }

    /// Nested nodes, skipping text children.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|child| match child {
            Child::Node(node) => Some(node),
            Child::Text(_) => None,
        })
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.child_nodes().map(Node::node_count).sum::<usize>()
    }
}
