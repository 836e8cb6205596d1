//! HTML serialization
//!
//! Converts output element trees into HTML text.

use crate::element::{Content, Element};
use crate::options::{SerializeOptions, VoidStyle};

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Serialize a sequence of content to an HTML string
pub fn serialize(content: &[Content], options: &SerializeOptions) -> String {
    let mut output = String::with_capacity(4096);
    for item in content {
        serialize_content(item, options, &mut output);
    }
    output
}

/// Serialize a single element to an HTML string
pub fn serialize_element(element: &Element, options: &SerializeOptions) -> String {
    let mut output = String::new();
    write_element(element, options, &mut output);
    output
}

fn serialize_content(content: &Content, options: &SerializeOptions, out: &mut String) {
    match content {
        Content::Text(text) => escape_text_into(text, out),
        Content::Element(element) => write_element(element, options, out),
    }
}

fn write_element(element: &Element, options: &SerializeOptions, out: &mut String) {
    let tag = element.tag();

    out.push('<');
    out.push_str(tag);
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        if value.is_empty() && options.collapse_empty_attributes {
            continue;
        }
        out.push_str("=\"");
        escape_attr_into(value, out);
        out.push('"');
    }

    if is_void(tag) {
        // Children of void elements have no representation in HTML
        match options.void_style {
            VoidStyle::Html => out.push('>'),
            VoidStyle::Xhtml => out.push_str(" />"),
        }
        return;
    }

    out.push('>');
    for child in element.children() {
        serialize_content(child, options, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_text_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
