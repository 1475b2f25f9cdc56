//! Outer-HTML serialization
//!
//! Follows the HTML fragment serialization rules browsers use for
//! `outerHTML`: void elements have no end tag, raw-text elements keep their
//! text verbatim, everything else is escaped.

use super::types::{Element, Node};

/// Elements that never have an end tag
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text children are serialized without escaping. `noscript`
/// is included because documents are parsed with scripting enabled.
pub const RAW_TEXT_ELEMENTS: [&str; 8] = [
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

impl Element {
    /// Serialize this element, its attributes and all descendants
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }

    /// Serialize only the descendants
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        write_children(self, &mut out);
        out
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');

    if is_void(&element.name) {
        return;
    }

    write_children(element, out);

    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn write_children(element: &Element, out: &mut String) {
    let raw = is_raw_text(&element.name);
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(e, out),
            Node::Text(text) if raw => out.push_str(text),
            Node::Text(text) => escape_into(text, false, out),
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}

fn escape_into(s: &str, attribute_mode: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
