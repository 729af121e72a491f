//! In-place content swap: Parse -> Locate -> Substitute -> Activate.
//!
//! Replaces only the designated content region of the current document,
//! leaving the surrounding chrome untouched. Malformed markup (no region,
//! no title) aborts the swap so the caller can fall back to a full load.

use crate::dom::parser::parse_html;
use crate::dom::{Document, DomNode};

/// Error during a swap attempt
#[derive(Debug)]
pub struct SwapError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for SwapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

/// A script element rebuilt from swapped-in markup, surfaced to the host
/// for execution (parser-inserted script nodes never run on their own).
#[derive(Debug, Clone, PartialEq)]
pub struct ActivatedScript {
    pub src: Option<String>,
    pub code: String,
}

/// Outcome of a successful swap.
#[derive(Debug)]
pub struct Swap {
    pub url: String,
    pub title: String,
    pub scripts: Vec<ActivatedScript>,
}

/// Swap `html` (fetched for `url`) into `current`, updating its region,
/// title, and URL. On any structural mismatch the current document is left
/// unchanged.
pub fn apply(
    current: &mut Document,
    html: &str,
    url: &str,
    content_id: &str,
) -> Result<Swap, SwapError> {
    let incoming = parse_html(html, url);

    if incoming.title.is_empty() {
        return Err(SwapError {
            message: format!("no title in fetched document for {}", url),
            phase: "locate",
        });
    }

    let region = incoming
        .root
        .find_region(content_id)
        .cloned()
        .ok_or_else(|| SwapError {
            message: format!("no content region in fetched document for {}", url),
            phase: "locate",
        })?;

    let target = current
        .root
        .find_region_mut(content_id)
        .ok_or_else(|| SwapError {
            message: format!("no content region in current document {}", current.url),
            phase: "locate",
        })?;

    *target = region;
    let scripts = activate_scripts(target);

    current.title = incoming.title.clone();
    current.url = url.to_string();

    Ok(Swap {
        url: url.to_string(),
        title: incoming.title,
        scripts,
    })
}

/// Substitute every `<script>` in the subtree with a freshly constructed
/// node carrying the same attributes and inline code, and collect them for
/// the host to execute.
pub fn activate_scripts(region: &mut DomNode) -> Vec<ActivatedScript> {
    let mut out = Vec::new();
    activate_scripts_inner(region, &mut out);
    out
}

fn activate_scripts_inner(node: &mut DomNode, out: &mut Vec<ActivatedScript>) {
    for child in &mut node.children {
        if child.tag == "script" {
            let code: String = child
                .children
                .iter()
                .map(|c| c.text.as_str())
                .collect();
            let fresh = DomNode::element(
                "script",
                child.attributes.clone(),
                if code.is_empty() {
                    Vec::new()
                } else {
                    vec![DomNode::text(code.clone())]
                },
            );
            out.push(ActivatedScript {
                src: fresh.attr("src").map(str::to_string),
                code,
            });
            *child = fresh;
        } else {
            activate_scripts_inner(child, out);
        }
    }
}
