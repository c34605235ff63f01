mod common;

use common::{parse, parse_chunked, rebuild, summary};
use rustymarkup::{ElementBalancing, ErrorKind, MarkupEvent, ParseConfig, Position};

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Tëst <b>page</b></title>
  <script type="text/javascript">if (a < b && c > d) { x = "</div>"; }</script>
  <style>p > a { color: red }</style>
</head>
<body class='main' data-x="a>b">
  <!-- a comment with <tags> -->
  <ul><li>one<li>two<li>three</ul>
  <p>first<p>second <br> line<br/>
  <table><tr><td>1<td>2<tr><td>3</table>
  <![CDATA[ raw <data> ]]>
  <?php echo "hi" ?>
  1 < 2 and 3 > 2
</body>
</html>
"#;

fn html_auto_close() -> ParseConfig {
    ParseConfig::html().with_element_balancing(ElementBalancing::AutoClose)
}

#[test]
fn test_round_trip_html_page() {
    let events = parse(&ParseConfig::html(), PAGE.as_bytes()).unwrap();
    assert_eq!(rebuild(&events), PAGE.as_bytes());
}

#[test]
fn test_round_trip_xml_document() {
    let doc = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE feed SYSTEM \"feed.dtd\">\n<feed xmlns=\"urn:x\">\n  <entry id=\"1\"><title>A &amp; B</title><empty/></entry>\n  <?render fast?>\n</feed>\n";
    let events = parse(&ParseConfig::xml(), doc.as_bytes()).unwrap();
    assert_eq!(rebuild(&events), doc.as_bytes());
}

#[test]
fn test_chunk_size_transparency() {
    let whole = parse(&ParseConfig::html(), PAGE.as_bytes()).unwrap();
    for buffer_size in [16, 17, 31, 64, 4096] {
        for chunk in [1, 2, 3, 7, 100] {
            let pulled = parse_chunked(&ParseConfig::html(), PAGE.as_bytes(), buffer_size, chunk).unwrap();
            assert_eq!(whole, pulled, "buffer {} chunk {}", buffer_size, chunk);
        }
    }
}

#[test]
fn test_strict_xml_closes_mirror_opens() {
    let doc = b"<r><a><b/><c>t</c></a><a x='1'></a></r>";
    let events = parse(&ParseConfig::xml(), doc).unwrap();
    assert!(events.iter().all(|e| !e.is_synthetic()));
    let mut stack = Vec::new();
    for event in &events {
        match event {
            MarkupEvent::OpenElement { name, .. } => stack.push(name.clone()),
            MarkupEvent::CloseElement { name, .. } => assert_eq!(stack.pop().as_ref(), Some(name)),
            _ => {}
        }
    }
    assert!(stack.is_empty());
}

#[test]
fn test_br_is_always_standalone() {
    let events = parse(&html_auto_close(), b"<p>a<br>b<BR>c<br/></p>").unwrap();
    assert_eq!(
        summary(&events),
        vec![
            "open p",
            "text a",
            "standalone br",
            "text b",
            "standalone BR",
            "text c",
            "standalone br",
            "close p"
        ]
    );
}

#[test]
fn test_list_item_auto_close() {
    let events = parse(&html_auto_close(), b"<li>x<li>y</li>").unwrap();
    assert_eq!(
        summary(&events),
        vec!["open li", "text x", "auto-close li", "open li", "text y", "close li"]
    );
}

#[test]
fn test_script_body_is_text() {
    let events = parse(&ParseConfig::html(), br#"<script>var x = "<div>";</script>"#).unwrap();
    let authored: Vec<MarkupEvent> = events.into_iter().filter(|e| !e.is_synthetic()).collect();
    assert_eq!(
        summary(&authored),
        vec!["open script", r#"text var x = "<div>";"#, "close script"]
    );
}

#[test]
fn test_duplicate_xml_declaration() {
    let doc = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<?xml version=\"1.1\"?>\n<r/>";
    let err = parse(&ParseConfig::xml(), doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), Some(&ErrorKind::DuplicateXmlDeclaration));
    assert_eq!(err.position(), Some(Position::new(2, 1)));
    assert!(err.to_string().contains("only one XML Declaration"));
}

#[test]
fn test_unbalanced_close() {
    let err = parse(&ParseConfig::xml(), b"<a><b></a>").unwrap_err();
    assert_eq!(err.kind(), Some(&ErrorKind::UnclosedElement("b".to_string())));

    let config = ParseConfig::xml().with_element_balancing(ElementBalancing::AutoClose);
    let events = parse(&config, b"<a><b></a>").unwrap();
    assert_eq!(summary(&events), vec!["open a", "open b", "auto-close b", "close a"]);
}

#[test]
fn test_html_auto_open_structure() {
    let events = parse(&ParseConfig::html(), b"<title>t</title><p>x").unwrap();
    assert_eq!(
        summary(&events),
        vec![
            "auto-open html",
            "auto-open head",
            "open title",
            "text t",
            "close title",
            "auto-close head",
            "auto-open body",
            "open p",
            "text x",
            "auto-close p",
            "auto-close body",
            "auto-close html"
        ]
    );
}

#[test]
fn test_root_element_must_match_doctype() {
    let err = parse(&ParseConfig::xml(), b"<!DOCTYPE feed>\n<rss/>").unwrap_err();
    assert_eq!(
        err.kind(),
        Some(&ErrorKind::RootElementMismatch {
            expected: "feed".to_string(),
            found: "rss".to_string()
        })
    );
    assert_eq!(err.position(), Some(Position::new(2, 1)));
}

#[test]
fn test_reader_error_is_io() {
    struct Failing;
    impl std::io::Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }
    }
    let mut collector = rustymarkup::EventCollector::new();
    let err = rustymarkup::MarkupParser::default()
        .parse_reader(Failing, &mut collector)
        .unwrap_err();
    assert!(matches!(err, rustymarkup::ParseError::Io(_)));
    assert!(err.kind().is_none());
}

#[test]
fn test_html_with_xml_rules() {
    let config = ParseConfig::html()
        .with_case_sensitive(true)
        .with_no_unmatched_close_elements(true)
        .with_xml_well_formed_attribute_values(true);

    let err = parse(&config, b"<div id=main></div>").unwrap_err();
    assert_eq!(err.kind(), Some(&ErrorKind::UnquotedAttributeValue("id".to_string())));

    let err = parse(&config, b"<div></span></div>").unwrap_err();
    assert_eq!(err.kind(), Some(&ErrorKind::UnmatchedCloseElement("span".to_string())));
    assert_eq!(err.position(), Some(Position::new(1, 6)));

    let err = parse(&config, b"<DIV></div>").unwrap_err();
    assert_eq!(err.kind(), Some(&ErrorKind::UnmatchedCloseElement("div".to_string())));
}

#[test]
fn test_template_keeps_body_content() {
    for (input, expected) in [
        (
            "<template><div>x</div></template>",
            ["open template", "open div", "text x", "close div", "close template"],
        ),
        (
            "<noscript><p>x</p></noscript>",
            ["open noscript", "open p", "text x", "close p", "close noscript"],
        ),
    ] {
        let events = parse(&ParseConfig::html(), input.as_bytes()).unwrap();
        let authored: Vec<MarkupEvent> = events.into_iter().filter(|e| !e.is_synthetic()).collect();
        assert_eq!(summary(&authored), expected);
    }
}

#[test]
fn test_internal_subset_with_comment() {
    let doc = "<!DOCTYPE note [\n<!-- don't panic -->\n<!ELEMENT note (#PCDATA)>\n]>\n<note>hi</note>";
    let events = parse(&ParseConfig::xml(), doc.as_bytes()).unwrap();
    let subset = events.iter().find_map(|e| match e {
        MarkupEvent::DocType { element_name, internal_subset, .. } => {
            assert_eq!(element_name, b"note");
            internal_subset.clone()
        }
        _ => None,
    });
    assert_eq!(
        subset.as_deref(),
        Some(&b"\n<!-- don't panic -->\n<!ELEMENT note (#PCDATA)>\n"[..])
    );
    assert_eq!(rebuild(&events), doc.as_bytes());
}

#[test]
fn test_prolog_ordering_and_uniqueness() {
    let cases = [
        ("<!DOCTYPE a><!DOCTYPE a><a/>", ErrorKind::DuplicateDocType, Position::new(1, 13)),
        ("<a/><?xml version=\"1.0\"?>", ErrorKind::MisplacedXmlDeclaration, Position::new(1, 5)),
        ("<!DOCTYPE a><a/><a/>", ErrorKind::MultipleRootElements("a".to_string()), Position::new(1, 17)),
    ];
    for (input, kind, at) in cases {
        let err = parse(&ParseConfig::xml(), input.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), Some(&kind), "{}", input);
        assert_eq!(err.position(), Some(at), "{}", input);
    }
}
