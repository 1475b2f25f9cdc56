//! HTML loading
//!
//! Builds a [`Document`] from page markup with html5ever's HTML5 tree
//! builder, then converts the resulting DOM into our own tree. The tree is
//! what a browser would build: implied `<html>`, `<head>` and `<body>`,
//! implied end tags, raw script text and decoded character references.

use std::path::Path;

use html5ever::tendril::TendrilSink as _;
use html5ever::{parse_document, Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::error::{DocumentError, DocumentResult};
use super::types::{Doctype, Document, Element, Node};

impl Document {
    /// Load a document from an HTML file
    pub fn load(path: &Path) -> DocumentResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|error| DocumentError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse_html(&content)
    }

    /// Parse a document from HTML markup
    pub fn parse_html(html: &str) -> DocumentResult<Self> {
        let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

        let mut doctype = None;
        let mut root = None;

        for child in dom.document.children.borrow().iter() {
            match &child.data {
                NodeData::Doctype {
                    name,
                    public_id,
                    system_id,
                } if doctype.is_none() => {
                    doctype = Some(
                        Doctype::new(name.to_string())
                            .public_id(public_id.to_string())
                            .system_id(system_id.to_string()),
                    );
                }
                NodeData::Element { .. } if root.is_none() => {
                    if let Some(Node::Element(element)) = convert_node(child) {
                        root = Some(element);
                    }
                }
                _ => {}
            }
        }

        let root = root.ok_or(DocumentError::NoRootElement)?;

        tracing::debug!(root = %root.name, has_doctype = doctype.is_some(), "Parsed document");

        Ok(Document::new(doctype, root))
    }
}

/// Convert one html5ever node; doctypes and processing instructions are dropped
fn convert_node(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let mut element = Element::parsed(name.local.to_string());
            element.attributes = attrs
                .borrow()
                .iter()
                .map(|attr| (attribute_name(attr), attr.value.to_string()))
                .collect();

            // <template> children live in a separate fragment
            let contents = template_contents.borrow();
            let source = contents.as_ref().unwrap_or(handle);
            element.children = convert_children(source);

            Some(Node::Element(element))
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        _ => None,
    }
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn attribute_name(attr: &Attribute) -> String {
    match &attr.name.prefix {
        Some(prefix) => format!("{}:{}", prefix, attr.name.local),
        None => attr.name.local.to_string(),
    }
}
