pub mod parser;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
}

/// Owned DOM node. Pages are parsed once into this tree and then mutated in
/// place when a navigation swaps the content region.
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

impl DomNode {
    pub fn document(children: Vec<DomNode>) -> Self {
        Self {
            tag: "#document".into(),
            attributes: HashMap::new(),
            text: String::new(),
            children,
            node_type: NodeType::Document,
        }
    }

    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Recursively count all nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Collect all text content recursively.
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        if !self.text.is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(self.text.trim());
        }
        for child in &self.children {
            child.collect_text_inner(buf);
        }
    }

    /// Collect the raw `href` of every anchor in this subtree, in document
    /// order. Duplicates are kept; the binding policy decides what survives.
    pub fn collect_hrefs(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_hrefs_inner(&mut out);
        out
    }

    fn collect_hrefs_inner(&self, out: &mut Vec<String>) {
        if self.tag == "a" {
            out.push(self.attr("href").unwrap_or("").to_string());
        }
        for child in &self.children {
            child.collect_hrefs_inner(out);
        }
    }

    /// Find the primary content region: the first `<main>` element, else the
    /// first element whose `id` equals `content_id`.
    pub fn find_region(&self, content_id: &str) -> Option<&DomNode> {
        if let Some(hit) = self.find_by(&|n| n.tag == "main") {
            return Some(hit);
        }
        self.find_by(&|n| n.attr("id") == Some(content_id))
    }

    /// Mutable variant of [`find_region`](Self::find_region).
    pub fn find_region_mut(&mut self, content_id: &str) -> Option<&mut DomNode> {
        if self.find_by(&|n| n.tag == "main").is_some() {
            return self.find_by_mut(&|n| n.tag == "main");
        }
        let id = content_id.to_string();
        self.find_by_mut(&move |n| n.attr("id") == Some(id.as_str()))
    }

    fn find_by(&self, pred: &dyn Fn(&DomNode) -> bool) -> Option<&DomNode> {
        if pred(self) {
            return Some(self);
        }
        for child in &self.children {
            if let Some(hit) = child.find_by(pred) {
                return Some(hit);
            }
        }
        None
    }

    fn find_by_mut(&mut self, pred: &dyn Fn(&DomNode) -> bool) -> Option<&mut DomNode> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(hit) = child.find_by_mut(pred) {
                return Some(hit);
            }
        }
        None
    }
}

/// Parsed page with metadata.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: DomNode,
    pub url: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(href: &str) -> DomNode {
        let mut attrs = HashMap::new();
        attrs.insert("href".to_string(), href.to_string());
        DomNode::element("a", attrs, vec![DomNode::text("link")])
    }

    #[test]
    fn collects_hrefs_in_document_order() {
        let root = DomNode::document(vec![
            anchor("/a"),
            DomNode::element("div", HashMap::new(), vec![anchor("/b"), anchor("/c")]),
        ]);
        assert_eq!(root.collect_hrefs(), vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn finds_main_before_content_id() {
        let mut id_attrs = HashMap::new();
        id_attrs.insert("id".to_string(), "content".to_string());
        let root = DomNode::document(vec![
            DomNode::element("div", id_attrs, vec![DomNode::text("by id")]),
            DomNode::element("main", HashMap::new(), vec![DomNode::text("by tag")]),
        ]);
        let region = root.find_region("content").unwrap();
        assert_eq!(region.tag, "main");
    }

    #[test]
    fn falls_back_to_content_id() {
        let mut id_attrs = HashMap::new();
        id_attrs.insert("id".to_string(), "content".to_string());
        let root = DomNode::document(vec![DomNode::element(
            "div",
            id_attrs,
            vec![DomNode::text("by id")],
        )]);
        let region = root.find_region("content").unwrap();
        assert_eq!(region.collect_text(), "by id");
        assert!(root.find_region("other").is_none());
    }
}
