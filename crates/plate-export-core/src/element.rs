//! Output element tree
//!
//! This module defines the markup-agnostic tree produced by the transform
//! pipeline and consumed by serializers.

use indexmap::IndexMap;

/// Attribute map of an element.
///
/// Insertion order is kept so serialization is deterministic, but equality
/// ignores order.
pub type Attributes = IndexMap<String, String>;

/// A child of an output element
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Nested element
    Element(Element),

    /// Opaque text run
    Text(String),
}

impl Content {
    /// Create a text run
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    /// Get the element if this is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        }
    }

    /// Get the text if this is a text run
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Element(_) => None,
        }
    }

    /// Concatenated text of this content and all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Content::Text(text) => out.push_str(text),
            Content::Element(element) => {
                for child in &element.children {
                    child.push_text(out);
                }
            }
        }
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Content::Element(element)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

/// A generic markup element: tag, attributes and ordered children.
///
/// Values are read-only once built. Tag names and attribute names are not
/// validated; that is left to the transforms producing them.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Attributes,
    children: Vec<Content>,
}

impl Element {
    pub fn new(tag: impl Into<String>, attributes: Attributes, children: Vec<Content>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            children,
        }
    }

    /// Start building an element with the given tag
    pub fn build(tag: impl Into<String>) -> ElementBuilder {
        ElementBuilder {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[Content] {
        &self.children
    }

    /// Only the element children, skipping text runs
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Content::as_element)
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text(&mut out);
        }
        out
    }

    /// Decompose into owned parts
    pub fn into_parts(self) -> (String, Attributes, Vec<Content>) {
        (self.tag, self.attributes, self.children)
    }
}

/// Consuming builder for [`Element`]
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    tag: String,
    attributes: Attributes,
    children: Vec<Content>,
}

impl ElementBuilder {
    /// Set an attribute, replacing a previous value with the same name
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set an attribute only when a value is present
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn child(mut self, child: impl Into<Content>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Content>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn finish(self) -> Element {
        Element {
            tag: self.tag,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

impl From<ElementBuilder> for Content {
    fn from(builder: ElementBuilder) -> Self {
        Content::Element(builder.finish())
    }
}
