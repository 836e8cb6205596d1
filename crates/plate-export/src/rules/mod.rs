//! Rule system for node to element conversion.

mod plate;
mod rule;

pub use plate::{
    audio_element, border_value, code_block_element, file_element, heading_element,
    image_element, link_element, media_align_class, media_width, paragraph_element, plate_rules,
    table_cell_element, table_element, table_row_element, text_content, video_element,
};
pub use rule::{Rule, TransformFn};

use indexmap::IndexMap;

use crate::node::Node;

/// Dispatch table from node kind to rule
#[derive(Debug, Clone)]
pub struct Rules {
    rules: IndexMap<String, Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in editor rules
    pub fn new() -> Self {
        let mut rules = Self::empty();
        for (kind, rule) in plate_rules() {
            rules.rules.insert(kind.to_string(), rule);
        }
        rules
    }

    /// Create a Rules instance without any rules
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Add a rule for a kind, replacing any existing rule for it
    pub fn add(&mut self, kind: &str, rule: Rule) {
        if self.rules.insert(kind.to_string(), rule).is_some() {
            tracing::debug!(kind, "replaced transform rule");
        } else {
            tracing::debug!(kind, "registered transform rule");
        }
    }

    /// Remove the rule for a kind
    pub fn remove(&mut self, kind: &str) -> Option<Rule> {
        self.rules.shift_remove(kind)
    }

    /// Get the rule for a kind
    pub fn get(&self, kind: &str) -> Option<&Rule> {
        self.rules.get(kind)
    }

    /// Find the rule for a node
    pub fn for_node(&self, node: &Node) -> Option<&Rule> {
        self.get(node.kind())
    }

    /// Check if a kind has a rule
    pub fn contains(&self, kind: &str) -> bool {
        self.rules.contains_key(kind)
    }

    /// Registered kinds, in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
