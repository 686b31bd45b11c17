//! Typed view tree
//!
//! Controllers describe their output as a [`Node`] tree instead of
//! interpolating strings into markup. Text and attribute values are escaped
//! when the tree is serialized, so user content can never become markup.

use std::fmt::Write as _;

/// A node of the rendered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Elements serialized without a closing tag
const VOID_TAGS: &[&str] = &["img", "input", "br", "hr"];

impl Node {
    /// Start a new element.
    pub fn el(tag: &'static str) -> Self {
        Node::Element(Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Set an attribute, replacing an earlier value of the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Element(el) = &mut self {
            let name = name.into();
            let value = value.into();
            match el.attrs.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => el.attrs.push((name, value)),
            }
        }
        self
    }

    /// Append space-separated classes to the `class` attribute.
    pub fn class(mut self, classes: &str) -> Self {
        if let Node::Element(el) = &mut self {
            match el.attrs.iter_mut().find(|(n, _)| n == "class") {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(classes);
                }
                None => el.attrs.push(("class".to_string(), classes.to_string())),
            }
        }
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        if let Node::Element(el) = &mut self {
            el.children.push(child);
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        if let Node::Element(el) = &mut self {
            el.children.extend(children);
        }
        self
    }

    /// Bootstrap icon glyph, e.g. `icon("bi-download")`.
    pub fn icon(name: &str) -> Self {
        Node::el("i").class(&format!("bi {}", name))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(el) => el
                .attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Depth-first search for the first element carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&Node> {
        if self.has_class(class) {
            return Some(self);
        }
        match self {
            Node::Element(el) => el.children.iter().find_map(|c| c.find_class(class)),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Serialize to HTML with all text and attribute values escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

/// Escape the characters significant in HTML text and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
