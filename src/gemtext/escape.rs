//! Text normalization for line-oriented output.
//!
//! These functions handle residual entity references left behind by the
//! source markup's substitutions, and the collapsing of line structure that
//! Gemtext cannot represent.

use std::borrow::Cow;

use memchr::memchr;

/// Entity references replaced by [`decode_entities`].
///
/// The table is deliberately finite: it covers what AsciiDoc-style
/// replacements and special-character substitutions produce. Anything else
/// that looks like an entity is left as written.
pub const ENTITY_TABLE: &[(&str, &str)] = &[
    ("&#8216;", "\u{2018}"),
    ("&#8217;", "\u{2019}"),
    ("&#8220;", "\u{201C}"),
    ("&#8221;", "\u{201D}"),
    ("&#8211;", "\u{2013}"),
    ("&#8212;", "\u{2014}"),
    ("&#8230;", "\u{2026}"),
    ("&#8201;", "\u{2009}"),
    ("&#8203;", ""),
    ("&#8592;", "\u{2190}"),
    ("&#8594;", "\u{2192}"),
    ("&#8656;", "\u{21D0}"),
    ("&#8658;", "\u{21D2}"),
    ("&#169;", "\u{00A9}"),
    ("&#174;", "\u{00AE}"),
    ("&#8482;", "\u{2122}"),
    ("&#160;", "\u{00A0}"),
    ("&#39;", "'"),
    ("&quot;", "\""),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Replace the entity references listed in [`ENTITY_TABLE`].
///
/// Returns the input unchanged (borrowed) when it contains no `&`.
///
/// # Examples
///
/// ```
/// use gemtext_render::gemtext::decode_entities;
///
/// assert_eq!(decode_entities("It&#8217;s"), "It\u{2019}s");
/// assert_eq!(decode_entities("&unknown; stays"), "&unknown; stays");
/// ```
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(text);
    };

    let mut result = String::with_capacity(text.len());
    result.push_str(&text[..first]);
    let mut pos = first;

    while pos < text.len() {
        // `pos` always sits on an `&` here.
        let rest = &text[pos..];
        match ENTITY_TABLE
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, replacement)) => {
                result.push_str(replacement);
                pos += entity.len();
            }
            None => {
                result.push('&');
                pos += 1;
            }
        }

        let next = memchr(b'&', &bytes[pos..]).map_or(text.len(), |i| pos + i);
        result.push_str(&text[pos..next]);
        pos = next;
    }

    Cow::Owned(result)
}

/// Collapse line breaks in a run of inline text to single spaces.
///
/// Whitespace around each break is folded into that one space; other
/// whitespace is kept as written.
///
/// # Examples
///
/// ```
/// use gemtext_render::gemtext::collapse_line_breaks;
///
/// assert_eq!(collapse_line_breaks("Hello\nworld"), "Hello world");
/// assert_eq!(collapse_line_breaks("a  \r\n  b"), "a b");
/// ```
pub fn collapse_line_breaks(text: &str) -> Cow<'_, str> {
    if memchr(b'\n', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut lines = text.split('\n').peekable();
    let mut first = true;
    while let Some(line) = lines.next() {
        let is_last = lines.peek().is_none();
        let mut line = line;
        if !first {
            line = line.trim_start();
        }
        if !is_last {
            line = line.trim_end();
        }
        if !first && !result.is_empty() && !line.is_empty() {
            result.push(' ');
        }
        result.push_str(line);
        first = false;
    }
    Cow::Owned(result)
}

/// Flatten rendered block content into runs of single-line text.
///
/// Non-empty lines are trimmed and joined with single spaces. A link line
/// (`=> ...`) ends the current run and is kept as a run of its own, so a
/// flattened bare link still reaches the client as a link.
///
/// # Examples
///
/// ```
/// use gemtext_render::gemtext::flatten_runs;
///
/// assert_eq!(flatten_runs("first\n\nsecond\n"), vec!["first second"]);
/// assert_eq!(
///     flatten_runs("see\n\n=> gemini://x\n\nmore"),
///     vec!["see", "=> gemini://x", "more"]
/// );
/// ```
pub fn flatten_runs(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if is_link_line(line) {
            if !run.is_empty() {
                runs.push(run.join(" "));
                run.clear();
            }
            runs.push(line.to_string());
        } else {
            run.push(line);
        }
    }
    if !run.is_empty() {
        runs.push(run.join(" "));
    }
    runs
}

/// Whether a trimmed line is a Gemtext link line.
pub fn is_link_line(line: &str) -> bool {
    line.starts_with("=> ")
}

/// Tidy the rendered content of a paragraph.
///
/// Lines are trimmed, blank lines at either end are dropped, and runs of
/// blank lines collapse to one. Every line, including the last, ends with a
/// newline. Empty input stays empty.
pub fn tidy_paragraph(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 1);
    let mut pending_blank = false;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            pending_blank = !result.is_empty();
            continue;
        }
        if pending_blank {
            result.push('\n');
            pending_blank = false;
        }
        result.push_str(line);
        result.push('\n');
    }

    result
}
