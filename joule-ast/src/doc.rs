//! Documentation-comment model.
//!
//! A [`DocComment`] holds a body of parts (plain text, inline tags, nested
//! HTML blocks) plus block tags in their emission order. The model is pure
//! data: escaping and layout belong to the emission crate, which applies
//! them lazily as each segment is written.

use indexmap::IndexMap;

/// One segment of documentation text.
#[derive(Debug, Clone, PartialEq)]
pub enum DocPart {
    /// Plain text; may contain explicit newlines, which are preserved.
    Text(String),
    /// An inline `{@code ...}` tag.
    Code(String),
    /// An inline `{@literal ...}` tag.
    Literal(String),
    /// An inline `{@link target}` tag.
    Link(String),
    /// A nested HTML element rendered as an indented block.
    Html {
        tag: String,
        parts: Vec<DocPart>,
    },
}

/// A structured documentation comment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocComment {
    /// Main description.
    pub body: Vec<DocPart>,
    /// `@param` tags, in insertion order.
    pub params: IndexMap<String, Vec<DocPart>>,
    /// The `@return` tag.
    pub returns: Option<Vec<DocPart>>,
    /// `@throws` tags keyed by exception type name, in insertion order.
    pub throws: IndexMap<String, Vec<DocPart>>,
    /// The `@deprecated` tag.
    pub deprecated: Option<Vec<DocPart>>,
    /// `@see` tags.
    pub see: Vec<String>,
    /// The `@since` tag.
    pub since: Option<String>,
    /// The `@author` tag.
    pub author: Option<String>,
}

impl DocComment {
    /// A comment whose body is a single text part.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            body: vec![DocPart::Text(text.into())],
            ..Self::default()
        }
    }

    /// An empty comment, to be filled part by part.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a text part to the body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.body.push(DocPart::Text(text.into()));
        self
    }

    /// Append an inline `{@code ...}` part.
    pub fn code(mut self, text: impl Into<String>) -> Self {
        self.body.push(DocPart::Code(text.into()));
        self
    }

    /// Append an inline `{@literal ...}` part.
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.body.push(DocPart::Literal(text.into()));
        self
    }

    /// Append an inline `{@link target}` part.
    pub fn link(mut self, target: impl Into<String>) -> Self {
        self.body.push(DocPart::Link(target.into()));
        self
    }

    /// Append a nested HTML block.
    pub fn html(mut self, tag: impl Into<String>, parts: Vec<DocPart>) -> Self {
        self.body.push(DocPart::Html {
            tag: tag.into(),
            parts,
        });
        self
    }

    /// Add a `@param` tag.
    pub fn param(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.params
            .insert(name.into(), vec![DocPart::Text(text.into())]);
        self
    }

    /// Set the `@return` tag.
    pub fn returns(mut self, text: impl Into<String>) -> Self {
        self.returns = Some(vec![DocPart::Text(text.into())]);
        self
    }

    /// Add a `@throws` tag.
    pub fn throws(mut self, ty: impl Into<String>, text: impl Into<String>) -> Self {
        self.throws
            .insert(ty.into(), vec![DocPart::Text(text.into())]);
        self
    }

    /// Set the `@deprecated` tag.
    pub fn deprecated(mut self, text: impl Into<String>) -> Self {
        self.deprecated = Some(vec![DocPart::Text(text.into())]);
        self
    }

    /// Add a `@see` tag.
    pub fn see(mut self, target: impl Into<String>) -> Self {
        self.see.push(target.into());
        self
    }

    /// Set the `@since` tag.
    pub fn since(mut self, version: impl Into<String>) -> Self {
        self.since = Some(version.into());
        self
    }

    /// Set the `@author` tag.
    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.author = Some(name.into());
        self
    }

    /// Whether the comment carries any block tags.
    pub fn has_tags(&self) -> bool {
        !self.params.is_empty()
            || self.returns.is_some()
            || !self.throws.is_empty()
            || self.deprecated.is_some()
            || !self.see.is_empty()
            || self.since.is_some()
            || self.author.is_some()
    }
}
