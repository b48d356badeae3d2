//! Minimal markup tree and HTML serializer
//!
//! The renderer builds an owned [`Element`] tree instead of writing strings
//! directly, so callers (and tests) can inspect the structure before it is
//! serialized.

use std::fmt::Write;

/// Elements that never carry children or a closing tag
const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// Child of an element
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    /// Character data, escaped on output
    Text(String),
    /// Script body, written verbatim apart from `</` neutralization
    Raw(String),
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

/// An HTML element with ordered attributes
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    tag: String,
    /// `None` values are boolean attributes (`checked`, `required`)
    attrs: Vec<(String, Option<String>)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// `<script>` element with the given body
    pub fn script(body: impl Into<String>) -> Self {
        let mut elt = Self::new("script");
        elt.children.push(Node::Raw(body.into()));
        elt
    }

    /// Builder: set a valued attribute
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: set a boolean attribute
    pub fn flag(mut self, name: &str) -> Self {
        self.set_flag(name);
        self
    }

    /// Builder: append a text child
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Builder: append a child element
    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.upsert(name, Some(value.into()));
    }

    pub fn set_flag(&mut self, name: &str) {
        self.upsert(name, None);
    }

    fn upsert(&mut self, name: &str, value: Option<String>) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn extend(&mut self, children: impl IntoIterator<Item = Element>) {
        self.children
            .extend(children.into_iter().map(Node::Element));
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of an attribute; boolean attributes read as `""`
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Direct child elements with the given tag, in document order
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().filter(move |e| e.tag == tag)
    }

    /// First direct child element with the given tag
    pub fn first_child(&self, tag: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.tag == tag)
    }

    /// All descendant elements (excluding self) with the given tag, in document order
    pub fn descendants_named(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(tag, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.tag == tag {
                found.push(child);
            }
            child.collect_descendants(tag, found);
        }
    }

    /// Concatenated direct text and script content
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) | Node::Raw(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    /// Serialize compactly, without inter-element whitespace
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    /// Serialize with one element per line, indented by `indent` spaces per level
    pub fn to_pretty_html(&self, indent: usize) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, indent, 0);
        out
    }

    fn write_open_tag(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(v) = value {
                let _ = write!(out, "=\"{}\"", escape_attr(v));
            }
        }
        out.push('>');
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    fn write_compact(&self, out: &mut String) {
        self.write_open_tag(out);
        if self.is_void() {
            return;
        }
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_compact(out),
                Node::Text(t) => out.push_str(&escape_text(t)),
                Node::Raw(r) => out.push_str(&neutralize_script(r)),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    fn write_pretty(&self, out: &mut String, indent: usize, depth: usize) {
        let pad = " ".repeat(indent * depth);
        out.push_str(&pad);

        let has_element_children = self.child_elements().next().is_some();
        if self.is_void() || !has_element_children {
            self.write_compact(out);
            out.push('\n');
            return;
        }

        self.write_open_tag(out);
        out.push('\n');
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_pretty(out, indent, depth + 1),
                Node::Text(t) => {
                    let _ = writeln!(out, "{}{}", " ".repeat(indent * (depth + 1)), escape_text(t));
                }
                Node::Raw(r) => {
                    let _ = writeln!(out, "{}", neutralize_script(r));
                }
            }
        }
        let _ = writeln!(out, "{}</{}>", pad, self.tag);
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Keep a script body from closing its own element
fn neutralize_script(s: &str) -> String {
    s.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_element_serialization() {
        let elt = Element::new("input")
            .attr("type", "checkbox")
            .attr("name", "b")
            .flag("checked");
        assert_eq!(elt.to_html(), r#"<input type="checkbox" name="b" checked>"#);
    }

    #[test]
    fn test_attribute_escaping() {
        let elt = Element::new("input").attr("value", r#"a "quoted" <b> & c"#);
        assert_eq!(
            elt.to_html(),
            r#"<input value="a &quot;quoted&quot; &lt;b&gt; &amp; c">"#
        );
    }

    #[test]
    fn test_text_escaping_and_nesting() {
        let elt = Element::new("fieldset").child(Element::new("legend").text("A < B"));
        assert_eq!(elt.to_html(), "<fieldset><legend>A &lt; B</legend></fieldset>");
    }

    #[test]
    fn test_script_body_cannot_close_element() {
        let elt = Element::script("var s = '</script>';");
        assert_eq!(elt.to_html(), "<script>var s = '<\\/script>';</script>");
        assert_eq!(elt.text_content(), "var s = '</script>';");
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut elt = Element::new("input").attr("value", "1");
        elt.set_attr("value", "2");
        assert_eq!(elt.get_attr("value"), Some("2"));
        assert_eq!(elt.to_html(), r#"<input value="2">"#);
    }

    #[test]
    fn test_queries() {
        let tree = Element::new("form").child(
            Element::new("fieldset")
                .child(Element::new("input").attr("name", "a"))
                .child(Element::new("fieldset").child(Element::new("input").attr("name", "b.c"))),
        );
        let names: Vec<_> = tree
            .descendants_named("input")
            .iter()
            .filter_map(|e| e.get_attr("name"))
            .collect();
        assert_eq!(names, vec!["a", "b.c"]);

        let fieldset = tree.first_child("fieldset").unwrap();
        assert_eq!(fieldset.children_named("input").count(), 1);
        assert!(!fieldset.has_attr("name"));
    }

    #[test]
    fn test_pretty_output() {
        let tree = Element::new("form").child(Element::new("input").attr("name", "a"));
        assert_eq!(tree.to_pretty_html(2), "<form>\n  <input name=\"a\">\n</form>\n");
    }
}
