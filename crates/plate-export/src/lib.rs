//! # plate-export
//!
//! Convert rich-text editor documents to HTML element trees.
//!
//! The editor stores its document as a tree of typed nodes (`p`, `img`,
//! `table`, text leaves with marks, ...). This crate maps that tree onto the
//! generic element tree of `plate-export-core`, one transform per node kind,
//! and serializes the result to HTML.
//!
//! ## Design
//!
//! - **Closed node model**: [`Node`] is a sum type with one variant per known
//!   kind; unknown kinds are kept as [`CustomNode`] instead of being dropped.
//! - **Post-order dispatch**: children are transformed first, then the
//!   transform registered for the parent's kind receives them.
//! - **Host-owned rules**: [`ExportService::register`] adds or overrides the
//!   transform for a kind without touching the dispatcher.
//! - **Partial results**: one bad node never discards its siblings; every
//!   export returns the element tree together with per-node [`Failure`]s.
//!
//! ## Example (JSON)
//!
//! ```rust
//! use plate_export::ExportService;
//!
//! let service = ExportService::new();
//! let export = service
//!     .export_json(r#"[{"type":"p","children":[{"text":"Hello","bold":true}]}]"#)
//!     .unwrap();
//!
//! assert!(export.is_complete());
//! assert_eq!(
//!     service.serialize(&export),
//!     "<p class=\"slate-p\"><strong>Hello</strong></p>"
//! );
//! ```
//!
//! ## Example (custom kind)
//!
//! ```rust
//! use plate_export::{Element, ExportService, Node};
//!
//! let mut service = ExportService::new();
//! service.register("mention", |node, _children, _options| {
//!     Ok(vec![Element::build("span")
//!         .attr("class", "mention")
//!         .child(format!("@{}", node.text_content()))
//!         .into()])
//! });
//!
//! let mention = Node::custom("mention", Some(vec![Node::text("ada")]));
//! let export = service.export(&mention);
//! assert_eq!(export.content[0].text_content(), "@ada");
//! ```

mod json;
pub mod node;
mod rules;
mod service;
pub mod table;
mod utilities;

pub use json::parse_document;
pub use node::{
    Align, BlockProps, Border, CellBorders, CodeBlock, Container, CustomNode, Heading,
    LineHeight, Link, MalformedNode, Media, Node, Paragraph, Table, TableCell, TableRow,
    TextLeaf,
};
pub use plate_export_core::{
    serialize, Attributes, Content, Element, ElementBuilder, SerializeOptions, VoidStyle,
};
pub use rules::{
    audio_element, border_value, code_block_element, file_element, heading_element,
    image_element, link_element, media_align_class, media_width, paragraph_element, plate_rules,
    table_cell_element, table_element, table_row_element, text_content, video_element, Rule,
    Rules, TransformFn,
};
pub use service::{
    default_service, export_html, Export, ExportOptions, ExportService, Failure,
    UnknownKindPolicy,
};
pub use utilities::*;

/// Error type for export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No transform registered for node kind `{kind}`")]
    UnknownNodeKind { kind: String },

    #[error("Malformed `{kind}` node: {reason}")]
    MalformedNode { kind: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<MalformedNode> for ExportError {
    fn from(node: MalformedNode) -> Self {
        ExportError::MalformedNode {
            kind: node.kind,
            reason: node.reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
