use crate::dom::{Document, DomNode};
use scraper::{ElementRef, Html, Node};
use std::collections::HashMap;

/// Tags whose children are never rendered or executed
const SKIP_CHILDREN: &[&str] = &["style", "noscript", "svg"];

/// Parse raw HTML into an owned [`Document`].
///
/// Unlike a renderer's parse, `<script>` elements keep their inline code as
/// a text child: the swap step rebuilds them so the host can execute the
/// code (parser-inserted scripts are inert by construction).
pub fn parse_html(html: &str, url: &str) -> Document {
    let document = Html::parse_document(html);

    let title = scraper::Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let root = convert_element(document.root_element());

    Document {
        root,
        url: url.to_string(),
        title: title.trim().to_string(),
    }
}

fn convert_element(el: ElementRef<'_>) -> DomNode {
    let tag = el.value().name.local.as_ref().to_string();
    let attributes: HashMap<String, String> = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    if SKIP_CHILDREN.contains(&tag.as_str()) {
        return DomNode::element(tag, attributes, Vec::new());
    }

    // Script bodies bypass the whitespace filter so inline code round-trips
    // byte for byte.
    let keep_raw_text = tag == "script";

    let mut children = Vec::new();

    for child_ref in el.children() {
        match child_ref.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child_ref) {
                    children.push(convert_element(child_el));
                }
            }
            Node::Text(t) => {
                let s = t.text.to_string();
                if keep_raw_text {
                    if !s.is_empty() {
                        children.push(DomNode::text(s));
                    }
                } else if !s.trim().is_empty() {
                    children.push(DomNode::text(s));
                }
            }
            _ => {}
        }
    }

    DomNode::element(tag, attributes, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_html() {
        let html = r#"
        <html>
            <head><title>Test Page</title></head>
            <body>
                <h1>Hello</h1>
                <p>Content paragraph</p>
            </body>
        </html>
        "#;

        let doc = parse_html(html, "https://example.com");
        assert_eq!(doc.title, "Test Page");
        assert!(doc.root.node_count() > 0);
    }

    #[test]
    fn missing_title_is_empty() {
        let doc = parse_html("<html><body><p>x</p></body></html>", "https://example.com");
        assert!(doc.title.is_empty());
    }

    #[test]
    fn keeps_script_inline_code() {
        let html = r#"
        <html><body>
            <main><p>Visible</p><script>initWidget();</script></main>
        </body></html>
        "#;

        let doc = parse_html(html, "https://example.com");
        let region = doc.root.find_region("content").unwrap();
        let script = region
            .children
            .iter()
            .find(|c| c.tag == "script")
            .expect("script node kept");
        assert_eq!(script.collect_text(), "initWidget();");
    }

    #[test]
    fn strips_style_children() {
        let html = r#"
        <html><body>
            <p>Visible</p>
            <style>.ad { display: none }</style>
        </body></html>
        "#;

        let doc = parse_html(html, "https://example.com");
        let text = doc.root.collect_text();
        assert!(text.contains("Visible"));
        assert!(!text.contains("display"));
    }
}
