//! Minimal HTML node tree. Text and attribute values are escaped when the
//! tree is serialized, so callers never concatenate markup by hand.

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Valueless attribute such as `disabled`.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, None));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

impl Node {
    fn write_to(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_to(out),
            Node::Text(text) => out.push_str(&escape_text(text)),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// Font Awesome icon, e.g. `icon("fas fa-search")`.
pub fn icon(classes: &str) -> Element {
    Element::new("i").class(classes)
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
