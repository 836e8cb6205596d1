//! ExportService - the main entry point for node to element conversion.

use once_cell::sync::Lazy;

use crate::json::parse_document;
use crate::node::Node;
use crate::rules::{Rule, Rules};
use crate::{serialize, Content, ExportError, Result, SerializeOptions};

/// What to do with a node whose kind has no registered transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKindPolicy {
    /// Emit the node's transformed children in its place
    #[default]
    PassThrough,
    /// Emit nothing for the node or its subtree
    Skip,
}

/// Options for ExportService
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Handling of kinds without a transform
    pub unknown_kind: UnknownKindPolicy,

    /// Pixels of left margin per indent level
    pub indent_width: f64,

    /// Minimum width of a table column in pixels
    pub min_column_width: f64,

    /// Options used by [`ExportService::serialize`]
    pub serialize: SerializeOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            unknown_kind: UnknownKindPolicy::PassThrough,
            indent_width: 24.0,
            min_column_width: 48.0,
            serialize: SerializeOptions::default(),
        }
    }
}

/// A node that could not be transformed
#[derive(Debug)]
pub struct Failure {
    /// Index path from the exported root list to the node
    pub path: Vec<usize>,
    pub error: ExportError,
}

/// Result of an export: the output content plus every per-node failure
#[derive(Debug, Default)]
pub struct Export {
    pub content: Vec<Content>,
    pub failures: Vec<Failure>,
}

impl Export {
    /// True when every node was transformed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Serialize the content to HTML
    pub fn to_html(&self, options: &SerializeOptions) -> String {
        serialize(&self.content, options)
    }
}

/// The main service for converting editor nodes to output elements
#[derive(Debug, Clone)]
pub struct ExportService {
    options: ExportOptions,
    rules: Rules,
}

impl ExportService {
    /// Create a new ExportService with default options
    pub fn new() -> Self {
        Self {
            options: ExportOptions::default(),
            rules: Rules::new(),
        }
    }

    /// Create an ExportService with custom options
    pub fn with_options(options: ExportOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Register a transform for a kind, replacing any existing one
    pub fn register<F>(&mut self, kind: &str, transform: F) -> &mut Self
    where
        F: Fn(&Node, Vec<Content>, &ExportOptions) -> Result<Vec<Content>> + Send + Sync + 'static,
    {
        self.add_rule(kind, Rule::new(transform))
    }

    /// Add a rule for a kind
    pub fn add_rule(&mut self, kind: &str, rule: Rule) -> &mut Self {
        self.rules.add(kind, rule);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ExportOptions {
        &mut self.options
    }

    /// Get the registered rules
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Export one node. Failure paths are relative to this node.
    pub fn export(&self, node: &Node) -> Export {
        let mut failures = Vec::new();
        let content = self.transform_node(node, &mut Vec::new(), &mut failures);
        Export { content, failures }
    }

    /// Export a document's top-level nodes, in order
    pub fn export_document(&self, nodes: &[Node]) -> Export {
        let mut failures = Vec::new();
        let mut path = Vec::new();
        let mut content = Vec::new();

        for (index, node) in nodes.iter().enumerate() {
            path.push(index);
            content.extend(self.transform_node(node, &mut path, &mut failures));
            path.pop();
        }

        Export { content, failures }
    }

    /// Parse the editor's JSON value and export it
    pub fn export_json(&self, json: &str) -> Result<Export> {
        let nodes = parse_document(json)?;
        Ok(self.export_document(&nodes))
    }

    /// Serialize an export with the configured options
    pub fn serialize(&self, export: &Export) -> String {
        export.to_html(&self.options.serialize)
    }

    /// Transform a node after its children, collecting failures
    fn transform_node(
        &self,
        node: &Node,
        path: &mut Vec<usize>,
        failures: &mut Vec<Failure>,
    ) -> Vec<Content> {
        if let Node::Malformed(malformed) = node {
            tracing::warn!(
                kind = %malformed.kind,
                reason = %malformed.reason,
                ?path,
                "skipping malformed node"
            );
            failures.push(Failure {
                path: path.clone(),
                error: malformed.clone().into(),
            });
            return Vec::new();
        }

        let mut children = Vec::new();
        for (index, child) in node.children().iter().enumerate() {
            path.push(index);
            children.extend(self.transform_node(child, path, failures));
            path.pop();
        }

        let Some(rule) = self.rules.for_node(node) else {
            tracing::warn!(
                kind = node.kind(),
                ?path,
                policy = ?self.options.unknown_kind,
                "no transform for node kind"
            );
            failures.push(Failure {
                path: path.clone(),
                error: ExportError::UnknownNodeKind {
                    kind: node.kind().to_string(),
                },
            });
            return match self.options.unknown_kind {
                UnknownKindPolicy::PassThrough => children,
                UnknownKindPolicy::Skip => Vec::new(),
            };
        };

        tracing::trace!(kind = node.kind(), ?path, "transforming node");
        match rule.apply(node, children, &self.options) {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!(kind = node.kind(), ?path, %error, "transform failed");
                failures.push(Failure {
                    path: path.clone(),
                    error,
                });
                Vec::new()
            }
        }
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_SERVICE: Lazy<ExportService> = Lazy::new(ExportService::new);

/// Shared service with the built-in rules and default options
pub fn default_service() -> &'static ExportService {
    &DEFAULT_SERVICE
}

/// Convert the editor's JSON value to HTML with the default service.
///
/// Per-node failures are logged and left out of the output.
pub fn export_html(json: &str) -> Result<String> {
    let service = default_service();
    let export = service.export_json(json)?;
    Ok(service.serialize(&export))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Media, TextLeaf};
    use crate::{image_element, Element};
    use pretty_assertions::assert_eq;

    fn texts(content: &[Content]) -> Vec<String> {
        content.iter().map(Content::text_content).collect()
    }

    #[test]
    fn test_simple_paragraph() {
        let service = ExportService::new();
        let export = service.export(&Node::paragraph(vec![Node::text("Hello World")]));
        assert!(export.is_complete());
        assert_eq!(service.serialize(&export), r#"<p class="slate-p">Hello World</p>"#);
    }

    #[test]
    fn test_children_keep_order() {
        let service = ExportService::new();
        let node = Node::paragraph(vec![Node::text("a"), Node::text("b"), Node::text("c")]);
        let export = service.export(&node);
        let p = export.content[0].as_element().unwrap();
        assert_eq!(
            p.children(),
            &[Content::text("a"), Content::text("b"), Content::text("c")]
        );
    }

    #[test]
    fn test_document_order() {
        let service = ExportService::new();
        let export = service.export_document(&[
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![Node::text("Body")]),
        ]);
        assert_eq!(texts(&export.content), vec!["Title", "Body"]);
    }

    #[test]
    fn test_image_node() {
        let service = ExportService::new();
        let media = Media::new("https://example.com/a.png");
        let export = service.export(&Node::Image(media.clone()));
        assert_eq!(export.content, vec![Content::from(image_element(&media))]);
    }

    #[test]
    fn test_unknown_kind_passes_children_through() {
        let service = ExportService::new();
        let export = service.export_document(&[Node::paragraph(vec![
            Node::text("before "),
            Node::custom("mystery", Some(vec![Node::text("inner")])),
            Node::text(" after"),
        ])]);

        assert_eq!(texts(&export.content), vec!["before inner after"]);
        assert_eq!(export.failures.len(), 1);
        assert_eq!(export.failures[0].path, vec![0, 1]);
        assert!(matches!(
            &export.failures[0].error,
            ExportError::UnknownNodeKind { kind } if kind == "mystery"
        ));
    }

    #[test]
    fn test_unknown_kind_skip() {
        let service = ExportService::with_options(ExportOptions {
            unknown_kind: UnknownKindPolicy::Skip,
            ..Default::default()
        });
        let export = service.export_document(&[
            Node::custom("mystery", Some(vec![Node::text("inner")])),
            Node::paragraph(vec![Node::text("kept")]),
        ]);

        assert_eq!(texts(&export.content), vec!["kept"]);
        assert_eq!(export.failures.len(), 1);
        assert_eq!(export.failures[0].path, vec![0]);
    }

    #[test]
    fn test_malformed_node_is_isolated() {
        let service = ExportService::new();
        let export = service
            .export_json(
                r#"[
                    {"type":"p","children":[{"text":"first"}]},
                    {"type":"blockquote","children":[
                        {"type":"p"},
                        {"type":"p","children":[{"text":"ok"}]}
                    ]}
                ]"#,
            )
            .unwrap();

        assert_eq!(texts(&export.content), vec!["first", "ok"]);
        assert_eq!(export.failures.len(), 1);
        assert_eq!(export.failures[0].path, vec![1, 0]);
        assert!(matches!(
            &export.failures[0].error,
            ExportError::MalformedNode { kind, .. } if kind == "p"
        ));
    }

    #[test]
    fn test_failed_transform_drops_only_that_node() {
        let mut service = ExportService::new();
        service.register("hr", |_, _, _| {
            Err(ExportError::InvalidInput("no rules here".to_string()))
        });

        let export = service.export_document(&[
            Node::paragraph(vec![Node::text("a")]),
            Node::HorizontalRule,
            Node::paragraph(vec![Node::text("b")]),
        ]);

        assert_eq!(texts(&export.content), vec!["a", "b"]);
        assert_eq!(export.failures[0].path, vec![1]);
    }

    #[test]
    fn test_register_new_kind() {
        let mut service = ExportService::new();
        service.register("mention", |node, _, _| {
            let Node::Custom(custom) = node else {
                return Ok(Vec::new());
            };
            let value = custom
                .fields
                .get("value")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            Ok(vec![Element::build("span")
                .attr("class", "mention")
                .child(format!("@{}", value))
                .into()])
        });

        let export = service
            .export_json(
                r#"[{"type":"p","children":[
                    {"type":"mention","value":"ada","children":[{"text":""}]}
                ]}]"#,
            )
            .unwrap();
        assert!(export.is_complete());
        assert_eq!(
            service.serialize(&export),
            r#"<p class="slate-p"><span class="mention">@ada</span></p>"#
        );
    }

    #[test]
    fn test_register_overrides_builtin() {
        let mut service = ExportService::new();
        service.register("p", |_, children, _| {
            Ok(vec![Element::build("div").children(children).into()])
        });

        let node = Node::paragraph(vec![Node::text("x")]);
        let export = service.export(&node);
        assert_eq!(service.serialize(&export), "<div>x</div>");

        let shared = default_service();
        assert_eq!(shared.serialize(&shared.export(&node)), r#"<p class="slate-p">x</p>"#);
    }

    #[test]
    fn test_export_is_pure() {
        let service = ExportService::new();
        let node = Node::paragraph(vec![
            Node::Text(TextLeaf {
                text: "bold".to_string(),
                bold: true,
                ..Default::default()
            }),
            Node::image("a.png"),
        ]);

        let first = service.export(&node);
        let second = service.export(&node);
        assert_eq!(first.content, second.content);
    }

    #[test]
    fn test_use_plugin() {
        let mut service = ExportService::new();
        service.use_plugin(|s| {
            s.options_mut().indent_width = 10.0;
        });
        assert_eq!(service.options().indent_width, 10.0);
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExportService>();
        assert_send_sync::<Node>();
    }

    #[test]
    fn test_export_html() {
        let html = export_html(r#"[{"type":"hr","children":[{"text":""}]}]"#).unwrap();
        assert_eq!(html, r#"<hr class="slate-hr">"#);
    }

    #[test]
    fn test_export_json_rejects_invalid_input() {
        let service = ExportService::new();
        assert!(matches!(service.export_json("true"), Err(ExportError::InvalidInput(_))));
        assert!(matches!(service.export_json("{"), Err(ExportError::Json(_))));
    }
}
