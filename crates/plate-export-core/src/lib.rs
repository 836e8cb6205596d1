//! plate-export-core - Output element tree and HTML serialization
//!
//! This crate provides the markup-agnostic element tree that document
//! transforms produce, and a serializer that renders it as HTML. It is used
//! by `plate-export`, which maps editor documents onto this tree.
//!
//! # Architecture
//!
//! ```text
//! Editor JSON ──▶ Semantic Nodes ──transforms──▶ ┌──────────────┐
//!                                                │ Element tree │ ──▶ HTML String
//!                                                └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use plate_export_core::{serialize, Content, Element, SerializeOptions};
//!
//! let tree = vec![Content::from(
//!     Element::build("p")
//!         .attr("class", "slate-p")
//!         .child("Hello ")
//!         .child(Element::build("strong").child("World")),
//! )];
//!
//! let html = serialize(&tree, &SerializeOptions::default());
//! assert_eq!(html, "<p class=\"slate-p\">Hello <strong>World</strong></p>");
//! ```

mod element;
mod options;
mod serialize;

pub use element::{Attributes, Content, Element, ElementBuilder};
pub use options::{SerializeOptions, VoidStyle};
pub use serialize::{is_void, serialize, serialize_element, VOID_ELEMENTS};
