//! Core document types
//!
//! A deliberately small DOM: a doctype descriptor plus an owned element tree.
//! Form controls carry a live `value` separate from their attributes, the way
//! a browser's `input.value` property is separate from the `value` attribute.

use std::collections::HashSet;

/// The document type declaration preceding the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctype {
    pub name: String,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
}

impl Doctype {
    /// Create a doctype with no identifiers
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public_id: None,
            system_id: None,
        }
    }

    /// The HTML5 doctype (`<!DOCTYPE html>`)
    pub fn html5() -> Self {
        Self::new("html")
    }

    /// Set the public identifier (builder pattern). Empty ids count as absent.
    pub fn public_id(mut self, id: impl Into<String>) -> Self {
        self.public_id = non_empty(id.into());
        self
    }

    /// Set the system identifier (builder pattern). Empty ids count as absent.
    pub fn system_id(mut self, id: impl Into<String>) -> Self {
        self.system_id = non_empty(id.into());
        self
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// A node in the element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An element with its attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Current value of a form control; never serialized as an attribute
    pub value: Option<String>,
}

impl Element {
    /// Create an empty element. Tag names are stored lowercase.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
            value: None,
        }
    }

    /// Element with its name kept verbatim, for names the parser has already
    /// case-adjusted (`foreignObject`, `clipPath`)
    pub(crate) fn parsed(name: String) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            value: None,
        }
    }

    /// Add an attribute (builder pattern)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Append a child element (builder pattern)
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text node (builder pattern)
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a comment node (builder pattern)
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Comment(text.into()));
        self
    }

    /// Get an attribute value by name (ASCII case-insensitive)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Current control value: the live value if set, else the `value` attribute
    pub fn current_value(&self) -> Option<&str> {
        self.value.as_deref().or_else(|| self.attribute("value"))
    }

    /// Set the live control value without touching attributes
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Iterate over direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Depth-first search (pre-order, self included)
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(pred))
    }

    /// Direct child `<input>` whose `name` attribute matches
    pub fn child_input_named(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| is_input_named(e, name))
    }

    fn collect_ids<'a>(&'a self, out: &mut HashSet<&'a str>) {
        if let Some(id) = self.attribute("id") {
            out.insert(id);
        }
        for child in self.child_elements() {
            child.collect_ids(out);
        }
    }
}

fn is_input_named(e: &Element, name: &str) -> bool {
    e.name == "input" && e.attribute("name") == Some(name)
}

fn is_form_with_action(e: &Element, action: &str) -> bool {
    e.name == "form" && e.attribute("action") == Some(action)
}

/// A page: optional doctype plus the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    doctype: Option<Doctype>,
    root: Element,
}

impl Document {
    pub fn new(doctype: Option<Doctype>, root: Element) -> Self {
        Self { doctype, root }
    }

    pub fn doctype(&self) -> Option<&Doctype> {
        self.doctype.as_ref()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// First element (document order) with the given `id`
    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find(&|e: &Element| e.attribute("id") == Some(id))
    }

    /// All element ids present in the document
    pub fn element_ids(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        self.root.collect_ids(&mut ids);
        ids.into_iter().map(str::to_string).collect()
    }

    /// First `<form>` whose `action` attribute equals `action` exactly
    pub fn find_form_by_action(&self, action: &str) -> Option<&Element> {
        self.root.find(&|e: &Element| is_form_with_action(e, action))
    }

    /// First `<input name=field>` (document order) whose parent is any
    /// `<form>` with the given `action`, as `form[action=..] > input[name=..]`
    /// selects it
    pub fn form_field(&self, action: &str, field: &str) -> Option<&Element> {
        let path = self.form_field_path(action, field)?;
        let mut element = &self.root;
        for &index in &path {
            element = match element.children.get(index)? {
                Node::Element(child) => child,
                _ => return None,
            };
        }
        Some(element)
    }

    /// Mutable variant of [`Document::form_field`]
    pub fn form_field_mut(&mut self, action: &str, field: &str) -> Option<&mut Element> {
        let path = self.form_field_path(action, field)?;
        let mut element = &mut self.root;
        for &index in &path {
            element = match element.children.get_mut(index)? {
                Node::Element(child) => child,
                _ => return None,
            };
        }
        Some(element)
    }

    fn form_field_path(&self, action: &str, field: &str) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        form_field_search(&self.root, action, field, &mut path).then_some(path)
    }
}

/// Pre-order search recording child indices; a match is checked before its
/// subtree so the first hit is first in document order
fn form_field_search(e: &Element, action: &str, field: &str, path: &mut Vec<usize>) -> bool {
    let parent_matches = is_form_with_action(e, action);
    for (index, child) in e.children.iter().enumerate() {
        let Node::Element(child) = child else {
            continue;
        };
        path.push(index);
        if (parent_matches && is_input_named(child, field))
            || form_field_search(child, action, field, path)
        {
            return true;
        }
        path.pop();
    }
    false
}
