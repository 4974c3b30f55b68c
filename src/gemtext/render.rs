//! Core tree → Gemtext rendering.
//!
//! Gemtext has no inline links and no inline footnotes, so both are deferred:
//! the render rules for anchors and footnotes append a formatted appendix line
//! to the transducer's [`SideChannel`] and leave a superscript marker in the
//! running text. The document rule flushes the side channel into appendices
//! once the whole body has been rendered.
//!
//! Markers are allocated from the number of entries already recorded, so the
//! rules must run exactly once per node, in document order. Nothing here is
//! cached or reordered.

use std::mem;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::model::{Attributes, Child, Node, NodeKind};

use super::config::{GemtextConfig, ImageBasePolicy};
use super::escape::{
    collapse_line_breaks, decode_entities, flatten_runs, is_link_line, tidy_paragraph,
};
use super::markers::{SUPERSCRIPT_LETTERS, footnote_marker, link_marker};
use super::registry::renderer_for;

/// Deferred appendix lines collected during one document render.
///
/// Both logs are append-only; entry N belongs to the Nth occurrence of its
/// construct in the rendered body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideChannel {
    /// Link appendix lines (`=> target marker description`).
    pub links: Vec<String>,
    /// Footnote appendix lines (`marker text`).
    pub footnotes: Vec<String>,
}

impl SideChannel {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.footnotes.is_empty()
    }
}

/// One step of the path from the root to the node being rendered.
#[derive(Debug, Clone, Copy)]
struct Crumb {
    kind: NodeKind,
    /// Position among the parent's children (`None` for a render root).
    index: Option<usize>,
}

/// Renders nodes to Gemtext.
///
/// A transducer borrows the document-scoped attributes and configuration
/// (both read-only) and owns the side channel for the render in progress.
/// Create one per top-level conversion; nothing is shared between instances.
pub struct Transducer<'a> {
    attributes: &'a Attributes,
    config: &'a GemtextConfig,
    pending: SideChannel,
    path: Vec<Crumb>,
}

impl<'a> Transducer<'a> {
    /// Create a transducer over the given document scope.
    pub fn new(attributes: &'a Attributes, config: &'a GemtextConfig) -> Self {
        Self {
            attributes,
            config,
            pending: SideChannel::default(),
            path: Vec::new(),
        }
    }

    /// Entries recorded so far and not yet flushed by a document render.
    pub fn pending(&self) -> &SideChannel {
        &self.pending
    }

    /// Convert a render root.
    ///
    /// Any appendix entries still pending after the root has been rendered
    /// (an `embedded` root, or a bare block rendered on its own) are flushed
    /// onto the end of the output, so deferred links are never dropped.
    pub fn convert(&mut self, root: &Node, transform: Option<&str>) -> Result<String> {
        let mut output = self.render_as(root, transform)?;
        let leftover = mem::take(&mut self.pending);
        self.push_appendices(&mut output, &leftover);
        Ok(output)
    }

    /// Render a node with the rule for its own kind.
    pub fn render(&mut self, node: &Node) -> Result<String> {
        self.dispatch(node, None, None)
    }

    /// Render a node under an explicit transform name (`None` = its kind).
    pub fn render_as(&mut self, node: &Node, transform: Option<&str>) -> Result<String> {
        self.dispatch(node, None, transform)
    }

    /// Render the children of a node and concatenate them in order.
    ///
    /// Text children have their line breaks collapsed and entities decoded.
    pub fn content(&mut self, node: &Node) -> Result<String> {
        let mut output = String::new();
        for (index, child) in node.children.iter().enumerate() {
            match child {
                Child::Text(text) => output.push_str(&self.text(text)),
                Child::Node(child) => output.push_str(&self.dispatch(child, Some(index), None)?),
            }
        }
        Ok(output)
    }

    fn dispatch(
        &mut self,
        node: &Node,
        index: Option<usize>,
        transform: Option<&str>,
    ) -> Result<String> {
        self.path.push(Crumb {
            kind: node.kind,
            index,
        });

        let requested = match transform {
            Some(name) => NodeKind::from_name(name),
            None => Some(node.kind),
        };
        let result = match requested.and_then(renderer_for) {
            Some(rule) => {
                trace!(kind = %node.kind, transform, "render node");
                rule(self, node)
            }
            None => Err(Error::UnsupportedKind {
                transform: transform.unwrap_or(node.kind.name()).to_string(),
                kind: node.kind.name().to_string(),
                context: self.context(),
            }),
        };

        self.path.pop();
        result
    }

    /// Structural path of the node being rendered, e.g.
    /// `document > section[1] > table[0]`.
    fn context(&self) -> String {
        self.path
            .iter()
            .map(|crumb| match crumb.index {
                Some(index) => format!("{}[{}]", crumb.kind, index),
                None => crumb.kind.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Normalize a run of inline text.
    fn text(&self, text: &str) -> String {
        decode_entities(&collapse_line_breaks(text)).into_owned()
    }

    fn record_link(&mut self, target: &str, description: &str) -> String {
        let marker = link_marker(self.pending.links.len());
        debug!(index = self.pending.links.len(), %marker, url = target, "defer link");
        self.pending
            .links
            .push(format!("=> {target} {marker} {description}"));
        marker
    }

    fn record_footnote(&mut self, text: &str) -> String {
        let recorded = self.pending.footnotes.len();
        if recorded == SUPERSCRIPT_LETTERS.len() {
            warn!(
                index = recorded,
                "footnote alphabet exhausted, using multi-letter markers"
            );
        }
        let marker = footnote_marker(recorded);
        debug!(index = recorded, %marker, "defer footnote");
        self.pending.footnotes.push(format!("{marker} {text}"));
        marker
    }

    fn push_appendices(&self, output: &mut String, pending: &SideChannel) {
        if pending.is_empty() {
            return;
        }
        debug!(
            links = pending.links.len(),
            footnotes = pending.footnotes.len(),
            "flush appendices"
        );
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        push_appendix(output, self.config.links_heading.as_deref(), &pending.links);
        push_appendix(
            output,
            self.config.footnotes_heading.as_deref(),
            &pending.footnotes,
        );
    }
}

fn push_appendix(output: &mut String, heading: Option<&str>, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    output.push('\n');
    if let Some(heading) = heading {
        output.push_str("## ");
        output.push_str(&decode_entities(heading));
        output.push('\n');
    }
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
}

/// Split `raw` at the last `separator` into `main (subtitle)`.
fn display_title(raw: &str, separator: &str) -> String {
    match raw.rsplit_once(separator) {
        Some((main, subtitle)) if !main.is_empty() && !subtitle.is_empty() => {
            format!("{main} ({subtitle})")
        }
        _ => raw.to_string(),
    }
}

/// Join `base` and a host-relative `path` without doubling the slash.
fn join_base_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// The per-kind render rules.
///
/// Each rule has the [`RenderFn`](super::RenderFn) signature and is reached
/// only through [`renderer_for`].
pub(crate) mod rules {
    use super::*;

    pub(crate) fn document(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let attrs = t.attributes;
        let config = t.config;

        let title = node
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .map(|raw| decode_entities(&display_title(raw, &config.title_separator)).into_owned());

        let mut byline: Vec<&str> = Vec::new();
        byline.extend(attrs.get_str("revdate"));
        byline.extend(attrs.get_str("revremark"));
        if let Some(author) = attrs.get_str("author") {
            byline.extend(config.author_prefix.as_deref());
            byline.push(author);
        }
        let byline = decode_entities(&byline.join(" ")).into_owned();

        let meta = attrs.get_str("keywords").map(|keywords| {
            let meta = match config.keywords_prefix.as_deref() {
                Some(prefix) => format!("{prefix} {keywords}"),
                None => keywords.to_string(),
            };
            decode_entities(&meta).into_owned()
        });

        // Fresh side channel for this document; the caller's is restored
        // whether or not the body renders.
        let outer = mem::take(&mut t.pending);
        let body = t.content(node);
        let pending = mem::replace(&mut t.pending, outer);
        let body = body?;

        let mut output = String::with_capacity(body.len() + 256);
        if let Some(title) = title {
            output.push_str("# ");
            output.push_str(&title);
            output.push('\n');
        }
        if !byline.is_empty() {
            output.push_str(&byline);
            output.push('\n');
        }
        if let Some(meta) = meta {
            output.push_str(&meta);
            output.push('\n');
        }
        output.push('\n');
        output.push_str(&body);
        t.push_appendices(&mut output, &pending);

        Ok(output)
    }

    /// Structural wrappers (`preamble`, `embedded`).
    pub(crate) fn passthrough(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        t.content(node)
    }

    pub(crate) fn section(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let level = usize::from(node.level.unwrap_or(1));
        let title = decode_entities(node.title.as_deref().unwrap_or_default()).into_owned();
        let content = t.content(node)?;
        Ok(format!("{} {}\n{}", "#".repeat(level + 1), title, content))
    }

    pub(crate) fn paragraph(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let content = t.content(node)?;
        Ok(tidy_paragraph(&content))
    }

    pub(crate) fn ulist(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();

        for (index, child) in node.children.iter().enumerate() {
            let child = match child {
                Child::Node(child) => child,
                Child::Text(raw) => {
                    // Loose text between items is an item of its own.
                    let text = t.text(raw);
                    if !text.trim().is_empty() {
                        lines.push(format!("* {}", text.trim()));
                    }
                    continue;
                }
            };
            if child.kind != NodeKind::ListItem {
                // Anything else in a list renders as its own lines.
                let rendered = t.dispatch(child, Some(index), None)?;
                lines.extend(rendered.lines().map(str::to_string));
                continue;
            }

            t.path.push(Crumb {
                kind: child.kind,
                index: Some(index),
            });
            let item = list_item(t, child);
            t.path.pop();
            lines.extend(item?);
        }

        if lines.is_empty() {
            return Ok(String::new());
        }
        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }

    /// Lines for one list item: its text as `* ` lines, then the lines of
    /// any nested list. Other attached blocks are folded into the item text.
    /// A bare link in the item keeps its own `=>` line and splits the text
    /// around it.
    fn list_item(t: &mut Transducer<'_>, item: &Node) -> Result<Vec<String>> {
        let mut text = String::new();
        let mut nested: Vec<String> = Vec::new();

        for (index, child) in item.children.iter().enumerate() {
            match child {
                Child::Text(raw) => text.push_str(&t.text(raw)),
                Child::Node(child) if child.kind.is_inline() => {
                    text.push_str(&t.dispatch(child, Some(index), None)?);
                }
                Child::Node(child) => {
                    let rendered = t.dispatch(child, Some(index), None)?;
                    if child.kind == NodeKind::Ulist {
                        nested.extend(rendered.lines().map(str::to_string));
                    } else {
                        text.push(' ');
                        text.push_str(&rendered);
                    }
                }
            }
        }

        let mut lines: Vec<String> = flatten_runs(&text)
            .into_iter()
            .map(|run| {
                if is_link_line(&run) {
                    run
                } else {
                    format!("* {run}")
                }
            })
            .collect();
        if lines.is_empty() {
            lines.push("* ".to_string());
        }
        lines.extend(nested);
        Ok(lines)
    }

    /// Quotes collapse to one `>` line, split only around bare links. Text
    /// leaves were decoded on the way in, so only the byline is decoded here.
    pub(crate) fn quote(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let content = t.content(node)?;
        let attribution = node.attributes.get_str("attribution").map(decode_entities);
        let citetitle = node.attributes.get_str("citetitle").map(decode_entities);

        let byline = match (attribution, citetitle) {
            (Some(attribution), Some(citetitle)) => format!(" -- {attribution}, {citetitle}"),
            (Some(byline), None) | (None, Some(byline)) => format!(" -- {byline}"),
            (None, None) => String::new(),
        };

        let mut lines: Vec<String> = flatten_runs(&content)
            .into_iter()
            .map(|run| {
                if is_link_line(&run) {
                    run
                } else {
                    format!("> {run}")
                }
            })
            .collect();
        // The byline follows the last quoted text; after a link it gets a
        // quote line of its own.
        match lines.last() {
            None => lines.push(format!("> {byline}")),
            Some(last) if is_link_line(last) => {
                if !byline.is_empty() {
                    lines.push(format!(">{byline}"));
                }
            }
            Some(_) => {
                let last = lines.len() - 1;
                lines[last].push_str(&byline);
            }
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }

    /// Literal and listing blocks: raw lines inside a preformatted fence.
    pub(crate) fn literal(_t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let alt = node
            .attributes
            .get_str("language")
            .or(node.title.as_deref())
            .unwrap_or_default();

        let mut output = format!("```{alt}\n");
        if node.lines.is_empty() {
            // Trees built without raw lines carry the block text as children.
            let raw: String = node
                .children
                .iter()
                .filter_map(|child| match child {
                    Child::Text(text) => Some(text.as_str()),
                    Child::Node(_) => None,
                })
                .collect();
            for line in raw.lines() {
                output.push_str(line);
                output.push('\n');
            }
        } else {
            for line in &node.lines {
                output.push_str(line);
                output.push('\n');
            }
        }
        output.push_str("```\n");
        Ok(output)
    }

    pub(crate) fn image(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let caption = node
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .or_else(|| node.attributes.get_str("alt"));

        let raw_target = node
            .target
            .as_deref()
            .or_else(|| node.attributes.get_str("target"))
            .unwrap_or_default();

        let target = if raw_target.starts_with('/') {
            match (t.config.image_base_url.as_deref(), t.config.image_base_policy) {
                (Some(base), _) => join_base_url(base, raw_target),
                (None, ImageBasePolicy::Strict) => {
                    return Err(Error::MissingConfiguration {
                        key: "image-base-url".to_string(),
                        detail: format!("image target `{raw_target}` is host-relative"),
                    });
                }
                (None, ImageBasePolicy::Lenient) => {
                    warn!(
                        image = raw_target,
                        "host-relative image without image-base-url"
                    );
                    raw_target.to_string()
                }
            }
        } else {
            raw_target.to_string()
        };

        let line = match caption {
            Some(caption) => format!("=> {target} {caption}\n"),
            None => format!("=> {target}\n"),
        };
        Ok(decode_entities(&line).into_owned())
    }

    pub(crate) fn inline_quoted(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let text = t.content(node)?;
        Ok(match node.variant.as_deref() {
            Some("strong") => format!("*{text}*"),
            Some("emphasis") => format!("_{text}_"),
            _ => text,
        })
    }

    pub(crate) fn inline_anchor(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        let target = decode_entities(node.target.as_deref().unwrap_or_default()).into_owned();
        let mut text = t.content(node)?;
        if text.is_empty() {
            text = target.trim_start_matches('#').to_string();
        }

        // Same-document reference: nothing to link to in flat output.
        if target.starts_with('#') {
            return Ok(text);
        }

        if node.role.as_deref() == Some("bare") {
            return Ok(format!("\n\n=> {target}\n\n"));
        }

        let description = node
            .attributes
            .get_str("title")
            .map(|title| decode_entities(title).into_owned())
            .unwrap_or_else(|| text.clone());
        let marker = t.record_link(&target, &description);
        Ok(format!("{text}{marker}"))
    }

    pub(crate) fn inline_footnote(t: &mut Transducer<'_>, node: &Node) -> Result<String> {
        // A bare link keeps its own line inside the appendix entry.
        let text = flatten_runs(&t.content(node)?).join("\n");
        Ok(t.record_footnote(&text))
    }
}
