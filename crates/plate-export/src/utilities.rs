//! Utility functions for building class and style attributes.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Hex, functional (`rgb()`, `hsla()`, ...) or named CSS colors.
///
/// Function arguments may not contain `;`, `:` or quotes, so a matching value
/// cannot break out of its declaration.
static CSS_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:#[0-9a-fA-F]{3,8}|(?:rgba?|hsla?)\([-0-9a-z.,%\s/]+\)|[a-zA-Z]+)$")
        .expect("color pattern is valid")
});

/// Unitless number or length such as `1.5`, `24px` or `120%`
static CSS_LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+\.?\d*|\.\d+)(?:px|em|rem|%)?$").expect("length pattern is valid")
});

/// Single CSS keyword such as `solid` or `lower-roman`
static CSS_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z-]*$").expect("keyword pattern is valid")
});

/// Join class names, skipping empty parts
pub fn cn(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a pixel length (`300` → `300px`, `12.5` → `12.5px`)
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Check if a value is safe to use as a CSS color
pub fn is_css_color(value: &str) -> bool {
    CSS_COLOR.is_match(value.trim())
}

/// Check if a value is a single CSS keyword
pub fn is_css_keyword(value: &str) -> bool {
    CSS_KEYWORD.is_match(value)
}

/// Check if a value is a unitless number or a CSS length
pub fn is_css_length(value: &str) -> bool {
    CSS_LENGTH.is_match(value)
}

/// Return the color when it is a valid CSS color, logging and dropping it otherwise
pub fn css_color(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if is_css_color(value) {
        Some(value)
    } else {
        tracing::debug!(value, "dropping invalid css color");
        None
    }
}

/// Return the keyword when it is a valid CSS keyword, logging and dropping it otherwise
pub fn css_keyword(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if is_css_keyword(value) {
        Some(value)
    } else {
        tracing::debug!(value, "dropping invalid css keyword");
        None
    }
}

/// Return the value when it is a number or length, logging and dropping it otherwise
pub fn css_length(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if is_css_length(value) {
        Some(value)
    } else {
        tracing::debug!(value, "dropping invalid css length");
        None
    }
}

/// Inline style declarations, rendered as `prop: value; prop: value`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    declarations: Vec<(&'static str, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.declarations.push((property, value.into()));
        self
    }

    pub fn push_opt(self, property: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.push(property, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// The style string, or `None` when there are no declarations
    pub fn finish(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", property, value)?;
        }
        Ok(())
    }
}
