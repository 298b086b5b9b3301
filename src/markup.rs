//! Splicing anchor markup around detected references.
//!
//! Two surfaces: plain strings get an escaped HTML rendition with `<a>`
//! elements at each reference span, and XML trees get their text nodes
//! split around real anchor elements, tails preserved, without ever
//! nesting an anchor inside another.

use crate::extract::Reference;
use html_escape::{encode_double_quoted_attribute, encode_text};
use indexmap::IndexMap;
use minidom::{Element, Node};
use std::fmt::Write as _;

/// Splices `<a href title>` anchors into a plain-text string.
///
/// Text outside and inside the anchors is HTML-escaped. References must
/// target `text` spans; out-of-order or overlapping entries are applied
/// first-come-first-served and the rest skipped.
pub(crate) fn markup_string(text: &str, references: &[Reference]) -> String {
    let mut references: Vec<&Reference> = references.iter().collect();
    references.sort_by_key(|r| r.span.start);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for reference in references {
        if reference.span.start < cursor || reference.span.end > text.len() {
            log::debug!("skipping out-of-bounds reference span {:?}", reference.span);
            continue;
        }
        out.push_str(&encode_text(&text[cursor..reference.span.start]));
        let _ = write!(
            out,
            r#"<a title="{}" href="{}">{}</a>"#,
            encode_double_quoted_attribute(&reference.title),
            encode_double_quoted_attribute(&reference.href),
            encode_text(&text[reference.span.start..reference.span.end]),
        );
        cursor = reference.span.end;
    }
    out.push_str(&encode_text(&text[cursor..]));
    out
}

/// Collects every text node of `element`, depth first, in document
/// order.
pub(crate) fn collect_texts(element: &Element, texts: &mut Vec<String>) {
    for node in element.nodes() {
        match node {
            Node::Text(text) => texts.push(text.clone()),
            Node::Element(child) => collect_texts(child, texts),
        }
    }
}

/// Rebuilds `element` with anchors spliced into its text nodes.
///
/// `annotations` maps each distinct text-node string to its references.
/// Text inside an existing anchor is left alone.
pub(crate) fn markup_element(
    element: &Element,
    annotations: &IndexMap<String, Vec<Reference>>,
) -> Element {
    let mut builder = Element::builder(element.name(), element.ns());
    for ((_ns, name), value) in element.attrs() {
        builder = builder.attr(name.clone(), value.as_str());
    }
    let mut nodes: Vec<Node> = Vec::new();
    for node in element.nodes() {
        match node {
            Node::Element(child) => {
                nodes.push(Node::Element(markup_element(child, annotations)));
            }
            Node::Text(text) => {
                let references = annotations.get(text.as_str()).map_or(&[][..], Vec::as_slice);
                if references.is_empty() || element.name() == "a" {
                    nodes.push(Node::Text(text.clone()));
                    continue;
                }
                splice_into(&mut nodes, element.ns(), text, references);
            }
        }
    }
    for node in nodes {
        builder = builder.append(node);
    }
    builder.build()
}

/// Splits one text node around anchor elements for its references.
fn splice_into(nodes: &mut Vec<Node>, ns: String, text: &str, references: &[Reference]) {
    let mut references: Vec<&Reference> = references.iter().collect();
    references.sort_by_key(|r| r.span.start);
    let mut cursor = 0usize;
    for reference in references {
        if reference.span.start < cursor || reference.span.end > text.len() {
            log::debug!("skipping out-of-bounds reference span {:?}", reference.span);
            continue;
        }
        if reference.span.start > cursor {
            nodes.push(Node::Text(text[cursor..reference.span.start].to_string()));
        }
        let anchor = Element::builder("a", ns.clone())
            .attr(minidom::rxml::NcName::try_from("title").unwrap(), reference.title.as_str())
            .attr(minidom::rxml::NcName::try_from("href").unwrap(), reference.href.as_str())
            .append(text[reference.span.start..reference.span.end].to_string())
            .build();
        nodes.push(Node::Element(anchor));
        cursor = reference.span.end;
    }
    if cursor < text.len() {
        nodes.push(Node::Text(text[cursor..].to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    fn reference(start: usize, end: usize, href: &str, title: &str) -> Reference {
        Reference {
            span: Span::new(start, end),
            href: href.to_string(),
            title: title.to_string(),
        }
    }

    const TEXT: &str = "Instrumente wurden von der Kommission gemäß Artikel 107 AEUV \
                        als mit dem Binnenmarkt vereinbar angesehen.";

    fn references() -> Vec<Reference> {
        // Byte offsets: "gemäß" carries a two-byte character.
        let article = TEXT.find("Artikel 107 AEUV").unwrap();
        let angesehen = TEXT.find("angesehen").unwrap();
        vec![
            reference(
                article,
                article + "Artikel 107 AEUV".len(),
                "/eu/AEUV/ART_107",
                "Artikel 107 halt",
            ),
            reference(
                angesehen,
                angesehen + "angesehen".len(),
                "http://ansehen.com",
                "Ansehen means ansehen",
            ),
        ]
    }

    #[test]
    fn string_markup() {
        assert_eq!(
            markup_string(TEXT, &references()),
            "Instrumente wurden von der Kommission gemäß \
             <a title=\"Artikel 107 halt\" href=\"/eu/AEUV/ART_107\">Artikel 107 AEUV</a> \
             als mit dem Binnenmarkt vereinbar \
             <a title=\"Ansehen means ansehen\" href=\"http://ansehen.com\">angesehen</a>."
        );
    }

    #[test]
    fn string_markup_escapes() {
        let text = "see Article 5 & <next>";
        let refs = vec![reference(4, 13, "#ART_5", "Art. 5 \"leaf\"")];
        assert_eq!(
            markup_string(text, &refs),
            "see <a title=\"Art. 5 &quot;leaf&quot;\" href=\"#ART_5\">Article 5</a> &amp; &lt;next&gt;"
        );
    }

    #[test]
    fn no_references_no_change() {
        assert_eq!(markup_string(TEXT, &[]), TEXT);
    }

    #[test]
    fn element_markup_splits_text_nodes() {
        let root: Element = format!("<div xmlns=''>{TEXT}</div>").parse().unwrap();
        let mut annotations = IndexMap::new();
        annotations.insert(TEXT.to_string(), references());
        let marked = markup_element(&root, &annotations);
        let children: Vec<&Element> = marked.children().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name(), "a");
        assert_eq!(children[0].attr("href"), Some("/eu/AEUV/ART_107"));
        assert_eq!(children[0].text(), "Artikel 107 AEUV");
        assert_eq!(children[1].attr("href"), Some("http://ansehen.com"));
        let all_text: String = marked.nodes().map(|n| match n {
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.text(),
        }).collect();
        assert_eq!(all_text, TEXT);
    }

    #[test]
    fn element_markup_preserves_tails_and_siblings() {
        let root: Element = format!("<div xmlns=''><br/>{TEXT}</div>").parse().unwrap();
        let mut annotations = IndexMap::new();
        annotations.insert(TEXT.to_string(), references());
        let marked = markup_element(&root, &annotations);
        let names: Vec<String> = marked.children().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["br", "a", "a"]);
    }

    #[test]
    fn no_nested_anchors() {
        let root: Element = "<div xmlns=''><a href='#x'>Artikel 107</a></div>".parse().unwrap();
        let mut annotations = IndexMap::new();
        annotations.insert(
            "Artikel 107".to_string(),
            vec![reference(0, 11, "#ART_107", "Art. 107")],
        );
        let marked = markup_element(&root, &annotations);
        let anchor = marked.children().next().unwrap();
        assert_eq!(anchor.children().count(), 0, "anchor content must stay text");
        assert_eq!(anchor.text(), "Artikel 107");
    }

    #[test]
    fn out_of_bounds_spans_are_skipped() {
        let refs = vec![reference(0, 500, "#broken", "broken")];
        assert_eq!(markup_string("short", &refs), "short");
    }
}
