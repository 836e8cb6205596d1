//! Semantic document nodes.
//!
//! This module models the rich-text editor's document tree as a closed set of
//! node kinds. Each kind carries only the fields valid for it, with optional
//! fields resolved through documented defaults at transform time. Kinds the
//! crate does not know are kept as [`CustomNode`] so host-registered
//! transforms can handle them.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Read a field that the editor may store as `null`, using the default for it
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read an alignment; an empty string counts as unset
fn optional_align<'de, D>(deserializer: D) -> Result<Option<Align>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|align| !align.trim().is_empty())
        .map(Align::from))
}

/// Horizontal alignment of a block or media node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    /// Default for media nodes
    #[default]
    Center,
    Right,
    Justify,
    /// Any value the editor stored that is not recognized
    Other(String),
}

impl Align {
    pub fn as_str(&self) -> &str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
            Align::Other(value) => value,
        }
    }
}

impl From<String> for Align {
    fn from(value: String) -> Self {
        match value.as_str() {
            "left" => Align::Left,
            "center" => Align::Center,
            "right" => Align::Right,
            "justify" => Align::Justify,
            _ => Align::Other(value),
        }
    }
}

impl From<&str> for Align {
    fn from(value: &str) -> Self {
        Align::from(value.to_string())
    }
}

/// A text run with its marks
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextLeaf {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bold: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub italic: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub underline: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub strikethrough: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub code: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub highlight: bool,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

impl TextLeaf {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }
}

/// Line height, stored by the editor as a number or a CSS string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LineHeight {
    Number(f64),
    Text(String),
}

/// Block attributes shared by paragraphs and headings
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockProps {
    #[serde(deserialize_with = "optional_align")]
    pub align: Option<Align>,
    /// Indentation level, multiplied by the configured indent width
    pub indent: Option<u32>,
    pub line_height: Option<LineHeight>,
    /// Indent-list style (`disc`, `decimal`, `todo`, ...)
    pub list_style_type: Option<String>,
    pub list_start: Option<u32>,
    /// Checked state of a `todo` list item
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Paragraph {
    #[serde(flatten)]
    pub props: BlockProps,
    #[serde(skip)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Heading {
    /// 1 through 6, taken from the node type
    #[serde(skip, default = "default_heading_level")]
    pub level: u8,
    #[serde(flatten)]
    pub props: BlockProps,
    #[serde(skip)]
    pub children: Vec<Node>,
}

fn default_heading_level() -> u8 {
    1
}

/// A node that only carries children
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Container {
    #[serde(skip)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CodeBlock {
    pub lang: Option<String>,
    #[serde(skip)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Link {
    pub url: Option<String>,
    pub target: Option<String>,
    #[serde(skip)]
    pub children: Vec<Node>,
}

/// Image, video, audio and file nodes
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Media {
    pub url: Option<String>,
    pub alt: Option<String>,
    /// File name, used by file nodes
    pub name: Option<String>,
    /// Display width in pixels
    pub width: Option<f64>,
    #[serde(deserialize_with = "optional_align")]
    pub align: Option<Align>,
    #[serde(deserialize_with = "null_as_default")]
    pub caption: Vec<TextLeaf>,
}

impl Media {
    pub fn new(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    /// Alignment with the media default applied
    pub fn align(&self) -> &Align {
        const CENTER: &Align = &Align::Center;
        self.align.as_ref().unwrap_or(CENTER)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default, deserialize_with = "null_as_default")]
    pub col_sizes: Vec<f64>,
    pub margin_left: Option<f64>,
    #[serde(skip)]
    pub children: Vec<Node>,
}

impl Table {
    /// Row nodes, skipping anything else the editor left in the table
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.children.iter().filter_map(|child| match child {
            Node::TableRow(row) => Some(row),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableRow {
    /// Row height in pixels
    pub size: Option<f64>,
    #[serde(skip)]
    pub children: Vec<Node>,
}

impl TableRow {
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.children.iter().filter_map(|child| match child {
            Node::TableCell(cell) => Some(cell),
            _ => None,
        })
    }
}

/// One side of a cell border
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Border {
    pub size: Option<f64>,
    pub style: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CellBorders {
    pub top: Option<Border>,
    pub bottom: Option<Border>,
    pub left: Option<Border>,
    pub right: Option<Border>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// `th` when true, `td` otherwise
    #[serde(skip)]
    pub header: bool,
    pub col_span: Option<u32>,
    pub row_span: Option<u32>,
    pub background: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub borders: CellBorders,
    /// Set on `th` cells that belong to the header row
    #[serde(default, rename = "table_header_row", deserialize_with = "null_as_default")]
    pub header_row: bool,
    /// Set on `th` cells that belong to the header column
    #[serde(default, rename = "table_header_cell", deserialize_with = "null_as_default")]
    pub header_cell: bool,
    #[serde(skip)]
    pub children: Vec<Node>,
}

impl TableCell {
    pub fn col_span(&self) -> u32 {
        self.col_span.unwrap_or(1)
    }

    pub fn row_span(&self) -> u32 {
        self.row_span.unwrap_or(1)
    }
}

/// A node whose kind has no built-in model
#[derive(Debug, Clone, PartialEq)]
pub struct CustomNode {
    pub kind: String,
    /// Remaining fields as stored by the editor
    pub fields: Map<String, Value>,
    /// `None` when the node has no `children` field at all
    pub children: Option<Vec<Node>>,
}

/// A node that could not be constructed from its input
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedNode {
    pub kind: String,
    pub reason: String,
}

impl MalformedNode {
    pub fn new(kind: &str, reason: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }
}

/// A semantic document node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(TextLeaf),
    Paragraph(Paragraph),
    Heading(Heading),
    Blockquote(Container),
    CodeBlock(CodeBlock),
    CodeLine(Container),
    HorizontalRule,
    Link(Link),
    Image(Media),
    Video(Media),
    Audio(Media),
    File(Media),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    Toggle(Container),
    Custom(CustomNode),
    Malformed(MalformedNode),
}

impl Node {
    /// Create a text leaf
    pub fn text(text: &str) -> Self {
        Node::Text(TextLeaf::new(text))
    }

    /// Create a paragraph
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph {
            props: BlockProps::default(),
            children,
        })
    }

    /// Create a heading, clamping the level to 1..=6
    pub fn heading(level: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading {
            level: level.clamp(1, 6),
            props: BlockProps::default(),
            children,
        })
    }

    /// Create an image node
    pub fn image(url: &str) -> Self {
        Node::Image(Media::new(url))
    }

    /// Create a link node
    pub fn link(url: &str, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: Some(url.to_string()),
            target: None,
            children,
        })
    }

    /// Create a node of a kind without built-in support
    pub fn custom(kind: &str, children: Option<Vec<Node>>) -> Self {
        Node::Custom(CustomNode {
            kind: kind.to_string(),
            fields: Map::new(),
            children,
        })
    }

    /// The editor's type discriminant for this node
    pub fn kind(&self) -> &str {
        match self {
            Node::Text(_) => "text",
            Node::Paragraph(_) => "p",
            Node::Heading(heading) => match heading.level {
                0 | 1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            Node::Blockquote(_) => "blockquote",
            Node::CodeBlock(_) => "code_block",
            Node::CodeLine(_) => "code_line",
            Node::HorizontalRule => "hr",
            Node::Link(_) => "a",
            Node::Image(_) => "img",
            Node::Video(_) => "video",
            Node::Audio(_) => "audio",
            Node::File(_) => "file",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tr",
            Node::TableCell(cell) => {
                if cell.header {
                    "th"
                } else {
                    "td"
                }
            }
            Node::Toggle(_) => "toggle",
            Node::Custom(custom) => custom.kind.as_str(),
            Node::Malformed(malformed) => malformed.kind.as_str(),
        }
    }

    /// Child nodes; empty for leaves and void kinds
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph(Paragraph { children, .. })
            | Node::Heading(Heading { children, .. })
            | Node::Blockquote(Container { children })
            | Node::CodeBlock(CodeBlock { children, .. })
            | Node::CodeLine(Container { children })
            | Node::Link(Link { children, .. })
            | Node::Table(Table { children, .. })
            | Node::TableRow(TableRow { children, .. })
            | Node::TableCell(TableCell { children, .. })
            | Node::Toggle(Container { children }) => children.as_slice(),
            Node::Custom(custom) => custom.children.as_deref().unwrap_or(&[]),
            Node::Text(_)
            | Node::HorizontalRule
            | Node::Image(_)
            | Node::Video(_)
            | Node::Audio(_)
            | Node::File(_)
            | Node::Malformed(_) => &[],
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(leaf) => leaf.text.clone(),
            _ => self.children().iter().map(Node::text_content).collect(),
        }
    }
}
