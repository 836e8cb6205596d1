//! Configuration options for HTML serialization

/// How void elements (`img`, `br`, ...) are closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoidStyle {
    /// `<img src="a.png">`
    #[default]
    Html,
    /// `<img src="a.png" />`
    Xhtml,
}

/// Options for HTML serialization
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerializeOptions {
    /// Void element closing style
    pub void_style: VoidStyle,

    /// Render attributes with an empty value as a bare name (`disabled`)
    /// instead of `disabled=""`
    pub collapse_empty_attributes: bool,
}
