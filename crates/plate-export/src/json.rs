//! JSON input support.
//!
//! This module builds [`Node`] trees from the editor's JSON value
//! (`[{ "type": "p", "children": [{ "text": "..." }] }]`). Kind-specific fields
//! are read with serde derives; children are built recursively here so that a
//! broken child becomes a [`Node::Malformed`] in place instead of failing the
//! whole document.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::node::{
    CodeBlock, Container, CustomNode, Heading, Link, MalformedNode, Media, Node, Paragraph,
    Table, TableCell, TableRow, TextLeaf,
};
use crate::{ExportError, Result};

/// Parse an editor value into nodes.
///
/// Accepts either an array of nodes (the usual editor value) or a single node
/// object.
///
/// # Example
///
/// ```rust
/// use plate_export::{parse_document, Node};
///
/// let nodes = parse_document(r#"[{"type":"p","children":[{"text":"Hi"}]}]"#).unwrap();
/// assert_eq!(nodes, vec![Node::paragraph(vec![Node::text("Hi")])]);
/// ```
pub fn parse_document(json: &str) -> Result<Vec<Node>> {
    let value: Value = serde_json::from_str(json)?;

    match value {
        Value::Array(items) => Ok(items.iter().map(Node::from_json).collect()),
        Value::Object(_) => Ok(vec![Node::from_json(&value)]),
        other => Err(ExportError::InvalidInput(format!(
            "expected an array of nodes or a node object, found {}",
            json_type(&other)
        ))),
    }
}

impl Node {
    /// Build a node from one JSON value.
    ///
    /// Never fails: input that cannot form a node yields [`Node::Malformed`].
    pub fn from_json(value: &Value) -> Node {
        let Some(object) = value.as_object() else {
            return Node::Malformed(MalformedNode::new(
                "unknown",
                format!("expected a node object, found {}", json_type(value)),
            ));
        };

        let kind = match object.get("type") {
            Some(Value::String(kind)) => kind.as_str(),
            Some(other) => {
                return Node::Malformed(MalformedNode::new(
                    "unknown",
                    format!("`type` must be a string, found {}", json_type(other)),
                ));
            }
            None if object.contains_key("text") => "text",
            None => {
                return Node::Malformed(MalformedNode::new(
                    "unknown",
                    "node has neither `type` nor `text`",
                ));
            }
        };

        build_node(kind, object, value).unwrap_or_else(Node::Malformed)
    }
}

fn build_node(
    kind: &str,
    object: &Map<String, Value>,
    value: &Value,
) -> std::result::Result<Node, MalformedNode> {
    let node = match kind {
        "text" => Node::Text(fields::<TextLeaf>(kind, value)?),

        "p" => Node::Paragraph(Paragraph {
            children: children(kind, object)?,
            ..fields(kind, value)?
        }),

        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = kind[1..].parse().unwrap_or(1);
            Node::Heading(Heading {
                level,
                children: children(kind, object)?,
                ..fields(kind, value)?
            })
        }

        "blockquote" => Node::Blockquote(container(kind, object)?),

        "code_block" => Node::CodeBlock(CodeBlock {
            children: children(kind, object)?,
            ..fields(kind, value)?
        }),

        "code_line" => Node::CodeLine(container(kind, object)?),

        // Void elements carry an empty text child in the editor; it is ignored
        "hr" => Node::HorizontalRule,

        "a" => Node::Link(Link {
            children: children(kind, object)?,
            ..fields(kind, value)?
        }),

        "img" => Node::Image(fields::<Media>(kind, value)?),
        "video" => Node::Video(fields::<Media>(kind, value)?),
        "audio" => Node::Audio(fields::<Media>(kind, value)?),
        "file" => Node::File(fields::<Media>(kind, value)?),

        "table" => Node::Table(Table {
            children: children(kind, object)?,
            ..fields(kind, value)?
        }),

        "tr" => Node::TableRow(TableRow {
            children: children(kind, object)?,
            ..fields(kind, value)?
        }),

        "td" | "th" => Node::TableCell(TableCell {
            header: kind == "th",
            children: children(kind, object)?,
            ..fields(kind, value)?
        }),

        "toggle" => Node::Toggle(container(kind, object)?),

        _ => Node::Custom(custom(kind, object)?),
    };

    Ok(node)
}

/// Deserialize the kind-specific fields of a node
fn fields<T: DeserializeOwned>(kind: &str, value: &Value) -> std::result::Result<T, MalformedNode> {
    T::deserialize(value).map_err(|e| MalformedNode::new(kind, e.to_string()))
}

/// Build the required `children` array of a container kind
fn children(
    kind: &str,
    object: &Map<String, Value>,
) -> std::result::Result<Vec<Node>, MalformedNode> {
    match object.get("children") {
        Some(Value::Array(items)) => Ok(items.iter().map(Node::from_json).collect()),
        Some(other) => Err(MalformedNode::new(
            kind,
            format!("`children` must be an array, found {}", json_type(other)),
        )),
        None => Err(MalformedNode::new(kind, "missing required `children` field")),
    }
}

fn container(
    kind: &str,
    object: &Map<String, Value>,
) -> std::result::Result<Container, MalformedNode> {
    Ok(Container {
        children: children(kind, object)?,
    })
}

fn custom(
    kind: &str,
    object: &Map<String, Value>,
) -> std::result::Result<CustomNode, MalformedNode> {
    let children = match object.get("children") {
        None => None,
        Some(_) => Some(children(kind, object)?),
    };

    let fields = object
        .iter()
        .filter(|(key, _)| key.as_str() != "type" && key.as_str() != "children")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(CustomNode {
        kind: kind.to_string(),
        fields,
        children,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
