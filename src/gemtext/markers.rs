//! Superscript markers correlating inline references with appendix lines.
//!
//! Both encodings are pure functions of the number of entries already
//! recorded, so a marker depends only on its position in traversal order.

/// Superscript digits `⁰` through `⁹`.
pub const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Superscript letters used for footnote markers.
pub const SUPERSCRIPT_LETTERS: [char; 16] = [
    'ᵃ', 'ᵇ', 'ᶜ', 'ᵈ', 'ᵉ', 'ᶠ', 'ᵍ', 'ʰ', 'ᶦ', 'ʲ', 'ᵏ', 'ˡ', 'ᵐ', 'ⁿ', 'ᵒ', 'ᵖ',
];

/// Marker for the link recorded after `recorded` earlier links.
///
/// The link number (`recorded + 1`) is written in decimal, one superscript
/// glyph per digit.
///
/// # Examples
///
/// ```
/// use gemtext_render::gemtext::link_marker;
///
/// assert_eq!(link_marker(0), "¹");
/// assert_eq!(link_marker(9), "¹⁰");
/// ```
pub fn link_marker(recorded: usize) -> String {
    (recorded + 1)
        .to_string()
        .bytes()
        .map(|digit| SUPERSCRIPT_DIGITS[usize::from(digit - b'0')])
        .collect()
}

/// Marker for the footnote recorded after `recorded` earlier footnotes.
///
/// The first sixteen footnotes get one letter each. Past the alphabet the
/// marker continues in bijective base 16 (`ᵃᵃ`, `ᵃᵇ`, ...), so markers
/// never repeat within a document.
///
/// # Examples
///
/// ```
/// use gemtext_render::gemtext::footnote_marker;
///
/// assert_eq!(footnote_marker(0), "ᵃ");
/// assert_eq!(footnote_marker(15), "ᵖ");
/// assert_eq!(footnote_marker(16), "ᵃᵃ");
/// ```
pub fn footnote_marker(recorded: usize) -> String {
    let base = SUPERSCRIPT_LETTERS.len();
    let mut n = recorded + 1;
    let mut glyphs = Vec::new();
    while n > 0 {
        n -= 1;
        glyphs.push(SUPERSCRIPT_LETTERS[n % base]);
        n /= base;
    }
    glyphs.into_iter().rev().collect()
}
