//! Built-in rules for the editor's node kinds.
//!
//! Each kind has a pure `*_element` / `*_content` function taking the typed
//! node and its transformed children, and a rule wrapping it for dispatch.

use super::Rule;
use crate::node::{
    Align, BlockProps, Border, CodeBlock, Heading, LineHeight, Link, Media, Node, Paragraph,
    Table, TableCell, TableRow, TextLeaf,
};
use crate::service::ExportOptions;
use crate::utilities::{cn, css_color, css_keyword, css_length, px, Style};
use crate::{Content, Element, ElementBuilder, ExportError};

const MEDIA_CONTAINER_CLASS: &str = "relative mt-4 mb-4 py-2";
const IMAGE_CLASS: &str = "slate-img w-full rounded-md";
const VIDEO_CLASS: &str = "slate-video w-full rounded-md";
const CAPTION_CLASS: &str = "slate-figcaption text-center max-w-full mt-2 mb-1";
const TABLE_CLASS: &str =
    "my-4 ml-px mr-0 table h-px w-[calc(100%-6px)] table-fixed border-collapse";
const CELL_CLASS: &str = "relative h-full overflow-visible border-none p-0";
const HEADER_CELL_CLASS: &str = "bg-muted text-left font-normal";
const CELL_CONTENT_CLASS: &str = "relative z-20 box-border h-full px-3 py-2";

/// List style types rendered as `ol`
const ORDERED_LIST_STYLES: &[&str] = &[
    "decimal",
    "decimal-leading-zero",
    "lower-alpha",
    "upper-alpha",
    "lower-latin",
    "upper-latin",
    "lower-roman",
    "upper-roman",
    "lower-greek",
];

/// Create all built-in rules, keyed by node kind
pub fn plate_rules() -> Vec<(&'static str, Rule)> {
    let heading = heading_rule();
    vec![
        ("text", text_rule()),
        ("p", paragraph_rule()),
        ("h1", heading.clone()),
        ("h2", heading.clone()),
        ("h3", heading.clone()),
        ("h4", heading.clone()),
        ("h5", heading.clone()),
        ("h6", heading),
        ("blockquote", blockquote_rule()),
        ("code_block", code_block_rule()),
        ("code_line", code_line_rule()),
        ("hr", horizontal_rule()),
        ("a", link_rule()),
        ("img", image_rule()),
        ("video", video_rule()),
        ("audio", audio_rule()),
        ("file", file_rule()),
        ("table", table_rule()),
        ("tr", table_row_rule()),
        ("td", table_cell_rule()),
        ("th", table_cell_rule()),
        ("toggle", toggle_rule()),
    ]
}

/// Error for a rule applied to a node of another kind
fn unexpected(node: &Node, expected: &str) -> ExportError {
    ExportError::MalformedNode {
        kind: node.kind().to_string(),
        reason: format!("expected a `{}` node", expected),
    }
}

// Text

fn text_rule() -> Rule {
    Rule::single(|node, _, _| match node {
        Node::Text(leaf) => Ok(text_content(leaf)),
        _ => Err(unexpected(node, "text")),
    })
}

/// Wrap a text run in its mark elements, innermost first
pub fn text_content(leaf: &TextLeaf) -> Content {
    let marks = [
        (leaf.code, "code"),
        (leaf.bold, "strong"),
        (leaf.italic, "em"),
        (leaf.underline, "u"),
        (leaf.strikethrough, "s"),
        (leaf.highlight, "mark"),
    ];

    let mut content = Content::text(leaf.text.as_str());
    for (_, tag) in marks.iter().filter(|(on, _)| *on) {
        content = Element::build(*tag).child(content).into();
    }

    let style = Style::new()
        .push_opt("color", css_color(leaf.color.as_deref()))
        .push_opt("background-color", css_color(leaf.background_color.as_deref()));
    if let Some(style) = style.finish() {
        content = Element::build("span").attr("style", style).child(content).into();
    }

    content
}

// Blocks

fn paragraph_rule() -> Rule {
    Rule::single(|node, children, options| match node {
        Node::Paragraph(paragraph) => Ok(paragraph_element(paragraph, children, options).into()),
        _ => Err(unexpected(node, "p")),
    })
}

/// Alignment, line height and indentation of a block
fn block_style(props: &BlockProps, options: &ExportOptions, indent: bool) -> Style {
    let align = props.align.as_ref().map(Align::as_str);
    let style = Style::new()
        .push_opt("text-align", css_keyword(align))
        .push_opt("line-height", props.line_height.as_ref().and_then(line_height));
    if indent {
        style.push_opt("margin-left", indent_margin(props, options))
    } else {
        style
    }
}

/// Numbers pass through; strings must be a number, a length or a keyword
fn line_height(value: &LineHeight) -> Option<String> {
    match value {
        LineHeight::Number(height) => Some(height.to_string()),
        LineHeight::Text(text) => css_length(Some(text.as_str()))
            .or_else(|| css_keyword(Some(text.as_str())))
            .map(str::to_string),
    }
}

fn indent_margin(props: &BlockProps, options: &ExportOptions) -> Option<String> {
    props
        .indent
        .filter(|level| *level > 0)
        .map(|level| px(f64::from(level) * options.indent_width))
}

/// Paragraph, or an indent-list item when `listStyleType` is set
pub fn paragraph_element(
    paragraph: &Paragraph,
    children: Vec<Content>,
    options: &ExportOptions,
) -> Element {
    let props = &paragraph.props;

    match props.list_style_type.as_deref() {
        None => Element::build("p")
            .attr("class", "slate-p")
            .attr_opt("style", block_style(props, options, true).finish())
            .children(children)
            .finish(),
        Some("todo") => todo_element(props, children, options),
        Some(list_style) => list_element(list_style, props, children, options),
    }
}

fn todo_element(props: &BlockProps, children: Vec<Content>, options: &ExportOptions) -> Element {
    let checkbox = Element::build("input")
        .attr("type", "checkbox")
        .attr("disabled", "")
        .attr_opt("checked", props.checked.filter(|c| *c).map(|_| ""));

    let class = if props.checked.unwrap_or(false) {
        "flex-1 line-through opacity-60"
    } else {
        "flex-1"
    };

    Element::build("div")
        .attr("class", "slate-todo flex flex-row items-start gap-2 py-1")
        .attr_opt(
            "style",
            Style::new()
                .push_opt("margin-left", indent_margin(props, options))
                .finish(),
        )
        .child(checkbox)
        .child(
            Element::build("span")
                .attr("class", class)
                .attr_opt("style", block_style(props, options, false).finish())
                .children(children),
        )
        .finish()
}

fn list_element(
    list_style: &str,
    props: &BlockProps,
    children: Vec<Content>,
    options: &ExportOptions,
) -> Element {
    let ordered = ORDERED_LIST_STYLES.contains(&list_style);
    let tag = if ordered { "ol" } else { "ul" };
    let start = props
        .list_start
        .filter(|start| ordered && *start > 1)
        .map(|start| start.to_string());

    let style = Style::new()
        .push_opt("list-style-type", css_keyword(Some(list_style)))
        .push_opt("margin-left", indent_margin(props, options));

    Element::build(tag)
        .attr("class", cn(&["slate-list", if ordered { "list-decimal" } else { "list-disc" }]))
        .attr_opt("start", start)
        .attr_opt("style", style.finish())
        .child(
            Element::build("li")
                .attr("class", "slate-li")
                .attr_opt("style", block_style(props, options, false).finish())
                .children(children),
        )
        .finish()
}

fn heading_rule() -> Rule {
    Rule::single(|node, children, options| match node {
        Node::Heading(heading) => Ok(heading_element(heading, children, options).into()),
        _ => Err(unexpected(node, "h1")),
    })
}

pub fn heading_element(
    heading: &Heading,
    children: Vec<Content>,
    options: &ExportOptions,
) -> Element {
    let tag = format!("h{}", heading.level.clamp(1, 6));
    Element::build(tag.as_str())
        .attr("class", format!("slate-{}", tag))
        .attr_opt("style", block_style(&heading.props, options, true).finish())
        .children(children)
        .finish()
}

fn blockquote_rule() -> Rule {
    Rule::single(|node, children, _| match node {
        Node::Blockquote(_) => Ok(Element::build("blockquote")
            .attr("class", "slate-blockquote my-1 border-l-2 pl-6 italic")
            .children(children)
            .into()),
        _ => Err(unexpected(node, "blockquote")),
    })
}

fn code_block_rule() -> Rule {
    Rule::single(|node, children, _| match node {
        Node::CodeBlock(code_block) => Ok(code_block_element(code_block, children).into()),
        _ => Err(unexpected(node, "code_block")),
    })
}

pub fn code_block_element(code_block: &CodeBlock, children: Vec<Content>) -> Element {
    let language = code_block
        .lang
        .as_deref()
        .filter(|lang| !lang.trim().is_empty())
        .map(|lang| format!("language-{}", lang.trim()));

    Element::build("pre")
        .attr("class", "slate-code_block overflow-x-auto rounded-md bg-muted px-6 py-8")
        .child(Element::build("code").attr_opt("class", language).children(children))
        .finish()
}

fn code_line_rule() -> Rule {
    Rule::single(|node, children, _| match node {
        Node::CodeLine(_) => Ok(Element::build("div")
            .attr("class", "slate-code_line")
            .children(children)
            .into()),
        _ => Err(unexpected(node, "code_line")),
    })
}

fn horizontal_rule() -> Rule {
    Rule::single(|node, _, _| match node {
        Node::HorizontalRule => Ok(Element::build("hr").attr("class", "slate-hr").into()),
        _ => Err(unexpected(node, "hr")),
    })
}

fn toggle_rule() -> Rule {
    Rule::single(|node, children, _| match node {
        Node::Toggle(_) => Ok(Element::build("details")
            .attr("class", "slate-toggle")
            .child(Element::build("summary").children(children))
            .into()),
        _ => Err(unexpected(node, "toggle")),
    })
}

// Inline

fn link_rule() -> Rule {
    Rule::single(|node, children, _| match node {
        Node::Link(link) => Ok(link_element(link, children).into()),
        _ => Err(unexpected(node, "a")),
    })
}

pub fn link_element(link: &Link, children: Vec<Content>) -> Element {
    Element::build("a")
        .attr(
            "class",
            "slate-a font-medium text-primary underline decoration-primary underline-offset-4",
        )
        .attr("href", link.url.as_deref().unwrap_or(""))
        .attr_opt("target", link.target.as_deref())
        .children(children)
        .finish()
}

// Media

fn image_rule() -> Rule {
    Rule::single(|node, _, _| match node {
        Node::Image(media) => Ok(image_element(media).into()),
        _ => Err(unexpected(node, "img")),
    })
}

/// Container class for a media alignment.
///
/// Only `center` and `left` are distinguished; every other value floats right.
pub fn media_align_class(align: &Align) -> &'static str {
    match align {
        Align::Center => "mx-auto",
        Align::Left => "float-left",
        _ => "float-right",
    }
}

/// Inline width of a media container: `<width>px`, or `100%` when unset or zero
pub fn media_width(media: &Media) -> String {
    match media.width {
        Some(width) if width != 0.0 => px(width),
        _ => "100%".to_string(),
    }
}

fn media_container(media: &Media) -> ElementBuilder {
    Element::build("div")
        .attr("class", cn(&[MEDIA_CONTAINER_CLASS, media_align_class(media.align())]))
        .attr("style", format!("width: {}", media_width(media)))
}

/// Caption holding the first caption run's text, or an empty text run
fn caption_element(media: &Media) -> Element {
    let text = media
        .caption
        .first()
        .map(|run| run.text.as_str())
        .unwrap_or("");

    Element::build("figcaption")
        .attr("class", CAPTION_CLASS)
        .child(Content::text(text))
        .finish()
}

/// Image block: aligned container with the image and its caption.
///
/// The media element is always written as the HTML `img` tag, not the editor's
/// `image` node name, so the output is valid HTML.
pub fn image_element(media: &Media) -> Element {
    let image = Element::build("img")
        .attr("src", media.url.as_deref().unwrap_or(""))
        .attr("alt", media.alt.as_deref().unwrap_or(""))
        .attr("width", "100%")
        .attr("controls", "true")
        .attr("class", IMAGE_CLASS);

    media_container(media)
        .child(image)
        .child(caption_element(media))
        .finish()
}

fn video_rule() -> Rule {
    Rule::single(|node, _, _| match node {
        Node::Video(media) => Ok(video_element(media).into()),
        _ => Err(unexpected(node, "video")),
    })
}

pub fn video_element(media: &Media) -> Element {
    let video = Element::build("video")
        .attr("src", media.url.as_deref().unwrap_or(""))
        .attr("width", "100%")
        .attr("controls", "true")
        .attr("class", VIDEO_CLASS);

    media_container(media)
        .child(video)
        .child(caption_element(media))
        .finish()
}

fn audio_rule() -> Rule {
    Rule::single(|node, _, _| match node {
        Node::Audio(media) => Ok(audio_element(media).into()),
        _ => Err(unexpected(node, "audio")),
    })
}

pub fn audio_element(media: &Media) -> Element {
    let audio = Element::build("audio")
        .attr("src", media.url.as_deref().unwrap_or(""))
        .attr("controls", "true")
        .attr("class", "w-full");

    let figure = Element::build("figure")
        .attr("class", "slate-audio relative my-4")
        .child(audio);

    if media.caption.is_empty() {
        figure.finish()
    } else {
        figure.child(caption_element(media)).finish()
    }
}

fn file_rule() -> Rule {
    Rule::single(|node, _, _| match node {
        Node::File(media) => Ok(file_element(media).into()),
        _ => Err(unexpected(node, "file")),
    })
}

pub fn file_element(media: &Media) -> Element {
    let url = media.url.as_deref().unwrap_or("");
    let name = media.name.as_deref().filter(|name| !name.is_empty());

    Element::build("a")
        .attr("class", "slate-file flex items-center rounded px-1 py-1.5")
        .attr("href", url)
        .attr("download", name.unwrap_or(""))
        .child(Content::text(name.unwrap_or(url)))
        .finish()
}

// Tables

fn table_rule() -> Rule {
    Rule::single(|node, children, options| match node {
        Node::Table(table) => Ok(table_element(table, children, options).into()),
        _ => Err(unexpected(node, "table")),
    })
}

pub fn table_element(table: &Table, children: Vec<Content>, options: &ExportOptions) -> Element {
    let cols = table.col_sizes.iter().map(|width| {
        let style = Style::new()
            .push("min-width", px(options.min_column_width))
            .push_opt("width", (*width != 0.0).then(|| px(*width)));
        Content::from(Element::build("col").attr_opt("style", style.finish()))
    });

    let body = Element::build("tbody").attr("class", "min-w-full").children(children);

    Element::build("div")
        .attr("class", "slate-table overflow-x-auto")
        .attr_opt(
            "style",
            table.margin_left.map(|margin| format!("padding-left: {}", px(margin))),
        )
        .child(
            Element::build("table")
                .attr("class", TABLE_CLASS)
                .child(Element::build("colgroup").children(cols))
                .child(body),
        )
        .finish()
}

fn table_row_rule() -> Rule {
    Rule::single(|node, children, _| match node {
        Node::TableRow(row) => Ok(table_row_element(row, children).into()),
        _ => Err(unexpected(node, "tr")),
    })
}

pub fn table_row_element(row: &TableRow, children: Vec<Content>) -> Element {
    Element::build("tr")
        .attr("class", "h-full")
        .attr_opt(
            "style",
            row.size.filter(|size| *size > 0.0).map(|size| format!("height: {}", px(size))),
        )
        .children(children)
        .finish()
}

fn table_cell_rule() -> Rule {
    Rule::single(|node, children, _| match node {
        Node::TableCell(cell) => Ok(table_cell_element(cell, children).into()),
        _ => Err(unexpected(node, "td")),
    })
}

/// CSS value for one border side: `none` for size 0, else `<size>px <style> <color>`
pub fn border_value(border: &Border) -> String {
    let size = border.size.unwrap_or(1.0);
    if size <= 0.0 {
        return "none".to_string();
    }

    let style = css_keyword(border.style.as_deref()).unwrap_or("solid");
    match css_color(border.color.as_deref()) {
        Some(color) => format!("{} {} {}", px(size), style, color),
        None => format!("{} {}", px(size), style),
    }
}

pub fn table_cell_element(cell: &TableCell, children: Vec<Content>) -> Element {
    let tag = if cell.header { "th" } else { "td" };
    let borders = &cell.borders;

    let style = Style::new()
        .push_opt("background-color", css_color(cell.background.as_deref()))
        .push_opt("border-top", borders.top.as_ref().map(border_value))
        .push_opt("border-bottom", borders.bottom.as_ref().map(border_value))
        .push_opt("border-left", borders.left.as_ref().map(border_value))
        .push_opt("border-right", borders.right.as_ref().map(border_value));

    Element::build(tag)
        .attr(
            "class",
            cn(&[CELL_CLASS, if cell.header { HEADER_CELL_CLASS } else { "" }]),
        )
        .attr_opt("colspan", (cell.col_span() > 1).then(|| cell.col_span().to_string()))
        .attr_opt("rowspan", (cell.row_span() > 1).then(|| cell.row_span().to_string()))
        .attr_opt("style", style.finish())
        .child(
            Element::build("div")
                .attr("class", CELL_CONTENT_CLASS)
                .children(children),
        )
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CellBorders, Container};
    use pretty_assertions::assert_eq;

    fn image(configure: impl FnOnce(&mut Media)) -> Element {
        let mut media = Media::new("https://example.com/cat.png");
        configure(&mut media);
        image_element(&media)
    }

    #[test]
    fn test_image_defaults() {
        let div = image(|_| {});
        assert_eq!(div.tag(), "div");
        assert_eq!(div.attr("class"), Some("relative mt-4 mb-4 py-2 mx-auto"));
        assert_eq!(div.attr("style"), Some("width: 100%"));

        let children: Vec<&Element> = div.element_children().collect();
        assert_eq!(children.len(), 2);

        let img = children[0];
        assert_eq!(img.tag(), "img");
        assert_eq!(img.attr("src"), Some("https://example.com/cat.png"));
        assert_eq!(img.attr("alt"), Some(""));
        assert_eq!(img.attr("width"), Some("100%"));
        assert_eq!(img.attr("controls"), Some("true"));
        assert_eq!(img.attr("class"), Some("slate-img w-full rounded-md"));
    }

    #[test]
    fn test_image_alignment() {
        let class = |align: &str| {
            image(|m| m.align = Some(Align::from(align)))
                .attr("class")
                .map(str::to_string)
        };
        assert_eq!(class("left").as_deref(), Some("relative mt-4 mb-4 py-2 float-left"));
        assert_eq!(class("center").as_deref(), Some("relative mt-4 mb-4 py-2 mx-auto"));
        assert_eq!(class("right").as_deref(), Some("relative mt-4 mb-4 py-2 float-right"));
        assert_eq!(class("banana").as_deref(), Some("relative mt-4 mb-4 py-2 float-right"));
    }

    #[test]
    fn test_image_width() {
        assert_eq!(image(|m| m.width = Some(300.0)).attr("style"), Some("width: 300px"));
        assert_eq!(image(|m| m.width = Some(0.0)).attr("style"), Some("width: 100%"));
        assert_eq!(image(|m| m.width = None).attr("style"), Some("width: 100%"));
    }

    #[test]
    fn test_image_caption_fallback() {
        let div = image(|_| {});
        let caption = div.element_children().nth(1).unwrap();
        assert_eq!(caption.tag(), "figcaption");
        assert_eq!(caption.children(), &[Content::text("")]);
    }

    #[test]
    fn test_image_caption_first_run() {
        let div = image(|m| m.caption = vec![TextLeaf::new("A cat"), TextLeaf::new("ignored")]);
        let caption = div.element_children().nth(1).unwrap();
        assert_eq!(caption.children(), &[Content::text("A cat")]);
    }

    #[test]
    fn test_image_empty_align_is_centered() {
        for align in ["", "  "] {
            let node = Node::from_json(&serde_json::json!({ "type": "img", "align": align }));
            let Node::Image(media) = node else {
                panic!("expected image, got {:?}", node);
            };
            assert_eq!(media.align, None);
            assert_eq!(
                image_element(&media).attr("class"),
                Some("relative mt-4 mb-4 py-2 mx-auto")
            );
        }
    }

    #[test]
    fn test_paragraph_line_height_text() {
        let style = |height: LineHeight| {
            let paragraph = Paragraph {
                props: BlockProps {
                    line_height: Some(height),
                    ..Default::default()
                },
                children: vec![],
            };
            paragraph_element(&paragraph, vec![], &ExportOptions::default())
                .attr("style")
                .map(str::to_string)
        };
        let text = |value: &str| style(LineHeight::Text(value.to_string()));
        assert_eq!(text("1.5").as_deref(), Some("line-height: 1.5"));
        assert_eq!(text("24px").as_deref(), Some("line-height: 24px"));
        assert_eq!(text("normal").as_deref(), Some("line-height: normal"));
        assert_eq!(text("2; color: red"), None);
    }

    #[test]
    fn test_image_missing_url() {
        let div = image_element(&Media::default());
        let img = div.element_children().next().unwrap();
        assert_eq!(img.attr("src"), Some(""));
    }

    #[test]
    fn test_text_marks() {
        let leaf = TextLeaf {
            text: "hi".to_string(),
            bold: true,
            italic: true,
            ..Default::default()
        };
        let expected: Content = Element::build("em")
            .child(Element::build("strong").child("hi"))
            .into();
        assert_eq!(text_content(&leaf), expected);
    }

    #[test]
    fn test_text_colors() {
        let leaf = TextLeaf {
            text: "hi".to_string(),
            color: Some("#ff0000".to_string()),
            background_color: Some("red; position: fixed".to_string()),
            ..Default::default()
        };
        let expected: Content = Element::build("span")
            .attr("style", "color: #ff0000")
            .child("hi")
            .into();
        assert_eq!(text_content(&leaf), expected);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(text_content(&TextLeaf::new("plain")), Content::text("plain"));
    }

    #[test]
    fn test_paragraph_style() {
        let paragraph = Paragraph {
            props: BlockProps {
                align: Some(Align::Right),
                indent: Some(2),
                line_height: Some(LineHeight::Number(1.5)),
                ..Default::default()
            },
            children: vec![],
        };
        let p = paragraph_element(&paragraph, vec![Content::text("x")], &ExportOptions::default());
        assert_eq!(p.tag(), "p");
        assert_eq!(
            p.attr("style"),
            Some("text-align: right; line-height: 1.5; margin-left: 48px")
        );
    }

    #[test]
    fn test_ordered_list_paragraph() {
        let paragraph = Paragraph {
            props: BlockProps {
                list_style_type: Some("decimal".to_string()),
                list_start: Some(3),
                indent: Some(1),
                ..Default::default()
            },
            children: vec![],
        };
        let ol = paragraph_element(&paragraph, vec![Content::text("x")], &ExportOptions::default());
        assert_eq!(ol.tag(), "ol");
        assert_eq!(ol.attr("start"), Some("3"));
        assert_eq!(ol.attr("style"), Some("list-style-type: decimal; margin-left: 24px"));
        let li = ol.element_children().next().unwrap();
        assert_eq!(li.tag(), "li");
        assert_eq!(li.text_content(), "x");
    }

    #[test]
    fn test_unordered_list_paragraph() {
        let paragraph = Paragraph {
            props: BlockProps {
                list_style_type: Some("disc".to_string()),
                list_start: Some(3),
                ..Default::default()
            },
            children: vec![],
        };
        let ul = paragraph_element(&paragraph, vec![], &ExportOptions::default());
        assert_eq!(ul.tag(), "ul");
        assert_eq!(ul.attr("start"), None);
    }

    #[test]
    fn test_todo_paragraph() {
        let paragraph = Paragraph {
            props: BlockProps {
                list_style_type: Some("todo".to_string()),
                checked: Some(true),
                ..Default::default()
            },
            children: vec![],
        };
        let todo = paragraph_element(
            &paragraph,
            vec![Content::text("done")],
            &ExportOptions::default(),
        );
        assert_eq!(todo.tag(), "div");
        let input = todo.element_children().next().unwrap();
        assert_eq!(input.tag(), "input");
        assert_eq!(input.attr("checked"), Some(""));
        assert_eq!(todo.text_content(), "done");
    }

    #[test]
    fn test_heading() {
        let heading = Heading {
            level: 2,
            props: BlockProps::default(),
            children: vec![],
        };
        let h2 = heading_element(&heading, vec![Content::text("Title")], &ExportOptions::default());
        assert_eq!(h2.tag(), "h2");
        assert_eq!(h2.attr("class"), Some("slate-h2"));
        assert_eq!(h2.attr("style"), None);
    }

    #[test]
    fn test_code_block_language() {
        let code_block = CodeBlock {
            lang: Some("rust".to_string()),
            children: vec![],
        };
        let pre = code_block_element(&code_block, vec![]);
        let code = pre.element_children().next().unwrap();
        assert_eq!(code.attr("class"), Some("language-rust"));

        let pre = code_block_element(&CodeBlock::default(), vec![]);
        let code = pre.element_children().next().unwrap();
        assert_eq!(code.attr("class"), None);
    }

    #[test]
    fn test_link_defaults() {
        let a = link_element(&Link::default(), vec![Content::text("here")]);
        assert_eq!(a.attr("href"), Some(""));
        assert_eq!(a.attr("target"), None);
    }

    #[test]
    fn test_file() {
        let mut media = Media::new("https://example.com/report.pdf");
        let a = file_element(&media);
        assert_eq!(a.text_content(), "https://example.com/report.pdf");

        media.name = Some("report.pdf".to_string());
        let a = file_element(&media);
        assert_eq!(a.attr("download"), Some("report.pdf"));
        assert_eq!(a.text_content(), "report.pdf");
    }

    #[test]
    fn test_audio_caption_only_when_present() {
        let figure = audio_element(&Media::new("a.mp3"));
        assert_eq!(figure.element_children().count(), 1);
    }

    #[test]
    fn test_table_colgroup() {
        let table = Table {
            col_sizes: vec![120.0, 0.0],
            margin_left: Some(16.0),
            children: vec![],
        };
        let wrapper = table_element(&table, vec![], &ExportOptions::default());
        assert_eq!(wrapper.attr("style"), Some("padding-left: 16px"));

        let table_el = wrapper.element_children().next().unwrap();
        assert_eq!(table_el.attr("class"), Some(TABLE_CLASS));
        let colgroup = table_el.element_children().next().unwrap();
        let cols: Vec<Option<&str>> = colgroup
            .element_children()
            .map(|c| c.attr("style"))
            .collect();
        assert_eq!(
            cols,
            vec![Some("min-width: 48px; width: 120px"), Some("min-width: 48px")]
        );
    }

    #[test]
    fn test_table_cell() {
        let cell = TableCell {
            header: true,
            col_span: Some(2),
            row_span: Some(1),
            background: Some("#eee".to_string()),
            borders: CellBorders {
                top: Some(Border {
                    size: Some(0.0),
                    ..Default::default()
                }),
                left: Some(Border {
                    size: Some(2.0),
                    style: Some("dashed".to_string()),
                    color: Some("#333".to_string()),
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let th = table_cell_element(&cell, vec![Content::text("A")]);
        assert_eq!(th.tag(), "th");
        assert_eq!(th.attr("colspan"), Some("2"));
        assert_eq!(th.attr("rowspan"), None);
        assert_eq!(
            th.attr("style"),
            Some("background-color: #eee; border-top: none; border-left: 2px dashed #333")
        );
        let inner = th.element_children().next().unwrap();
        assert_eq!(inner.attr("class"), Some(CELL_CONTENT_CLASS));
        assert_eq!(inner.text_content(), "A");
    }

    #[test]
    fn test_rule_rejects_other_kind() {
        let rule = image_rule();
        let err = rule
            .apply(&Node::Blockquote(Container::default()), vec![], &ExportOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::MalformedNode { ref kind, .. } if kind == "blockquote"));
    }
}
