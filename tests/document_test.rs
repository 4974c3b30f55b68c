//! Document-level rendering tests.
//!
//! Tests for whole documents: header lines, body concatenation, deferred
//! link and footnote appendices, and error propagation.

use gemtext_render::export::GemtextExporter;
use gemtext_render::gemtext::footnote_marker;
use gemtext_render::{Error, Node, NodeKind, convert};

fn primer() -> Node {
    let preamble = Node::preamble(vec![Node::paragraph(vec![
        "Welcome to the ".into(),
        Node::link("gemini://a.example", "first").into(),
        " and ".into(),
        Node::link("https://b.example", "second").into(),
        " capsules.".into(),
        Node::footnote(vec!["A footnote.".into()]).into(),
    ])]);

    let usage = Node::section(
        1,
        "Usage",
        vec![
            Node::ulist(vec![vec!["One".into()], vec!["Two".into()]]),
            Node::quote(vec![Node::paragraph(vec!["Be brief.".into()])])
                .with_attribute("attribution", "Anon"),
            Node::image("/i.png").with_attribute("alt", "Logo"),
            Node::paragraph(vec![Node::link("#usage", "back to top").into()]),
        ],
    );

    let code = Node::section(1, "Code", vec![Node::literal(["a < b"])]);

    Node::document("Gemini: A Primer", vec![preamble, usage, code])
        .with_attribute("revdate", "2024-05-01")
        .with_attribute("revremark", "Draft")
        .with_attribute("author", "Ada Lovelace")
        .with_attribute("author-prefix", "by")
        .with_attribute("keywords", "gemini, smolweb")
        .with_attribute("keywords-prefix", "Tags:")
        .with_attribute("links-heading", "Links")
        .with_attribute("footnotes-heading", "Notes")
}

// ============================================================================
// Full Documents
// ============================================================================

#[test]
fn test_full_document() {
    let expected = "\
# Gemini (A Primer)
2024-05-01 Draft by Ada Lovelace
Tags: gemini, smolweb

Welcome to the first¹ and second² capsules.ᵃ
## Usage
* One
* Two
> Be brief. -- Anon
=> /i.png Logo
back to top
## Code
```
a < b
```

## Links
=> gemini://a.example ¹ first
=> https://b.example ² second

## Notes
ᵃ A footnote.
";
    assert_eq!(convert(&primer()).unwrap(), expected);
}

#[test]
fn test_render_is_idempotent() {
    let doc = primer();
    let first = convert(&doc).unwrap();
    let second = convert(&doc).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_side_channel_does_not_leak_between_renders() {
    let exporter = GemtextExporter::new();
    let one = Node::document(
        "One",
        vec![Node::paragraph(vec![Node::link("https://one", "one").into()])],
    );
    let two = Node::document(
        "Two",
        vec![Node::paragraph(vec![Node::link("https://two", "two").into()])],
    );

    exporter.convert(&one).unwrap();
    let out = exporter.convert(&two).unwrap();
    assert_eq!(out, "# Two\n\ntwo¹\n\n=> https://two ¹ two\n");
}

#[test]
fn test_document_without_appendices() {
    let doc = Node::document("Plain", vec![Node::paragraph(vec!["Just text.".into()])]);
    assert_eq!(convert(&doc).unwrap(), "# Plain\n\nJust text.\n");
}

#[test]
fn test_appendices_without_headings() {
    let doc = Node::document(
        "T",
        vec![Node::paragraph(vec![
            Node::link("https://x", "x").into(),
            Node::footnote(vec!["note".into()]).into(),
        ])],
    );
    assert_eq!(
        convert(&doc).unwrap(),
        "# T\n\nx¹ᵃ\n\n=> https://x ¹ x\n\nᵃ note\n"
    );
}

#[test]
fn test_empty_document() {
    assert_eq!(convert(&Node::new(NodeKind::Document)).unwrap(), "\n");
}

// ============================================================================
// Header Lines
// ============================================================================

#[test]
fn test_byline_without_date() {
    let doc = Node::document("T", vec![])
        .with_attribute("author", "Ada")
        .with_attribute("author-prefix", "by");
    assert_eq!(convert(&doc).unwrap(), "# T\nby Ada\n\n");
}

#[test]
fn test_author_prefix_without_author_is_ignored() {
    let doc = Node::document("T", vec![])
        .with_attribute("revdate", "2024")
        .with_attribute("author-prefix", "by");
    assert_eq!(convert(&doc).unwrap(), "# T\n2024\n\n");
}

#[test]
fn test_keywords_without_prefix() {
    let doc = Node::document("T", vec![]).with_attribute("keywords", "a, b");
    assert_eq!(convert(&doc).unwrap(), "# T\na, b\n\n");
}

#[test]
fn test_custom_title_separator() {
    let doc = Node::document("Main - Sub", vec![]).with_attribute("title-separator", " - ");
    assert_eq!(convert(&doc).unwrap(), "# Main (Sub)\n\n");

    let untouched = Node::document("Main: Sub", vec![]).with_attribute("title-separator", " - ");
    assert_eq!(convert(&untouched).unwrap(), "# Main: Sub\n\n");
}

// ============================================================================
// Entity Normalization
// ============================================================================

#[test]
fn test_entities_decoded_everywhere() {
    let doc = Node::document(
        "Ada&#8217;s Notes",
        vec![Node::paragraph(vec![
            "It&#8217;s ".into(),
            Node::link("https://x.example/?a=1&amp;b=2", "Ada&#8217;s site").into(),
            Node::footnote(vec!["Don&#8217;t.".into()]).into(),
        ])],
    )
    .with_attribute("author", "O&#8217;Neil");

    let out = convert(&doc).unwrap();
    assert!(!out.contains("&#8217;"));
    assert!(!out.contains("&amp;"));
    assert!(out.starts_with("# Ada\u{2019}s Notes\nO\u{2019}Neil\n"));
    assert!(out.contains("It\u{2019}s Ada\u{2019}s site¹ᵃ\n"));
    assert!(out.contains("=> https://x.example/?a=1&b=2 ¹ Ada\u{2019}s site\n"));
    assert!(out.contains("ᵃ Don\u{2019}t.\n"));
}

#[test]
fn test_escaped_entity_reads_the_same_in_quote_and_paragraph() {
    let doc = Node::document(
        "T",
        vec![
            Node::paragraph(vec!["a &amp;lt; b".into()]),
            Node::quote(vec![Node::paragraph(vec!["a &amp;lt; b".into()])]),
        ],
    );
    assert_eq!(convert(&doc).unwrap(), "# T\n\na &lt; b\n> a &lt; b\n");
}

// ============================================================================
// Bare Links
// ============================================================================

#[test]
fn test_bare_link_in_list_item_keeps_its_line() {
    let doc = Node::document(
        "T",
        vec![Node::ulist(vec![vec![
            "see ".into(),
            Node::bare_link("https://x").into(),
            " more".into(),
        ]])],
    );

    let out = convert(&doc).unwrap();
    assert!(out.lines().any(|line| line == "=> https://x"));
    assert_eq!(out, "# T\n\n* see\n=> https://x\n* more\n");
}

#[test]
fn test_bare_link_in_footnote_keeps_its_line() {
    let doc = Node::document(
        "T",
        vec![Node::paragraph(vec![
            "Claim".into(),
            Node::footnote(vec!["Mirror: ".into(), Node::bare_link("https://x").into()]).into(),
        ])],
    );

    let out = convert(&doc).unwrap();
    assert_eq!(out, "# T\n\nClaimᵃ\n\nᵃ Mirror:\n=> https://x\n");
}

// ============================================================================
// Markers
// ============================================================================

#[test]
fn test_many_links_use_multi_digit_markers() {
    let children = (0..12)
        .map(|i| Node::link(format!("https://x/{i}"), format!("l{i}")).into())
        .collect();
    let doc = Node::document("T", vec![Node::paragraph(children)]);
    let out = convert(&doc).unwrap();

    let appendix: Vec<&str> = out.lines().filter(|l| l.starts_with("=> ")).collect();
    assert_eq!(appendix.len(), 12);
    assert_eq!(appendix[9], "=> https://x/9 ¹⁰ l9");
    assert_eq!(appendix[11], "=> https://x/11 ¹² l11");
    assert!(out.contains("l9¹⁰l10¹¹l11¹²"));
}

#[test]
fn test_footnotes_past_alphabet() {
    let children = (0..18)
        .map(|i| Node::footnote(vec![format!("n{i}").into()]).into())
        .collect();
    let doc = Node::document("T", vec![Node::paragraph(children)]);
    let out = convert(&doc).unwrap();

    let expected_body: String = (0..18).map(footnote_marker).collect();
    assert!(out.contains(&format!("{expected_body}\n")));
    assert!(out.contains("ᵃᵃ n16\n"));
    assert!(out.contains("ᵃᵇ n17\n"));
}

#[test]
fn test_links_inside_footnotes_and_lists_keep_traversal_order() {
    let doc = Node::document(
        "T",
        vec![
            Node::paragraph(vec![
                Node::link("https://one", "one").into(),
                Node::footnote(vec!["see ".into(), Node::link("https://two", "two").into()])
                    .into(),
            ]),
            Node::ulist(vec![vec![Node::link("https://three", "three").into()]]),
        ],
    );
    let out = convert(&doc).unwrap();
    assert_eq!(
        out,
        "# T\n\none¹ᵃ\n* three³\n\n=> https://one ¹ one\n=> https://two ² two\n=> https://three ³ three\n\nᵃ see two²\n"
    );
}

// ============================================================================
// Roots and Errors
// ============================================================================

#[test]
fn test_embedded_root_flushes_appendices() {
    let root = Node::new(NodeKind::Embedded).with_children([Node::paragraph(vec![
        Node::link("https://x", "x").into(),
    ])
    .into()]);
    assert_eq!(convert(&root).unwrap(), "x¹\n\n=> https://x ¹ x\n");
}

#[test]
fn test_unsupported_kind_aborts_render() {
    let doc = Node::document(
        "T",
        vec![
            Node::paragraph(vec!["fine".into()]),
            Node::section(1, "S", vec![Node::new(NodeKind::Sidebar)]),
        ],
    );
    let err = convert(&doc).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, Error::UnsupportedKind { .. }));
    assert!(message.contains("sidebar"));
    assert!(message.contains("document > section[1] > sidebar[0]"));
}

#[test]
fn test_unknown_transform() {
    let doc = Node::document("T", vec![]);
    let err = GemtextExporter::new()
        .convert_with_transform(&doc, Some("outline"))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedKind { ref transform, ref kind, ref context }
            if transform == "outline" && kind == "document" && context == "document"
    ));
}

#[test]
fn test_strict_image_policy() {
    let doc = Node::document(
        "T",
        vec![Node::image("/img/a.png").with_attribute("alt", "Cat")],
    );

    let lenient = convert(&doc).unwrap();
    assert!(lenient.contains("=> /img/a.png Cat\n"));

    let err = GemtextExporter::new()
        .with_attribute("image-base-url-policy", "strict")
        .convert(&doc)
        .unwrap_err();
    assert!(matches!(err, Error::MissingConfiguration { .. }));

    let based = GemtextExporter::new()
        .with_attribute("image-base-url-policy", "strict")
        .with_attribute("image-base-url", "gemini://img.example")
        .convert(&doc)
        .unwrap();
    assert!(based.contains("=> gemini://img.example/img/a.png Cat\n"));
}
