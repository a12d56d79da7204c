//! Formatting preferences.
//!
//! A [`FormatPrefs`] maps every spacing rule site to one of `{no-space,
//! space, forced-newline}` and every indentation kind to a width plus an
//! absolute/relative flag. Lookups are total: an unset key resolves to the
//! site's documented default, never to an error. The object is immutable
//! once built and may be shared across threads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Behavior of one spacing rule site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spacing {
    /// Emit nothing.
    None,
    /// Emit a single deferred space.
    Space,
    /// Force a line break.
    Newline,
}

/// The closed set of named spacing decision points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSite {
    /// Between a call name and its opening parenthesis.
    BeforeCallParen,
    /// Inside an empty parameter or argument list.
    WithinEmptyParens,
    /// Before the opening brace of a type body.
    BeforeClassBrace,
    /// Before the opening brace of a method or initializer body.
    BeforeMethodBrace,
    /// Before the opening brace of a control-flow body.
    BeforeControlBrace,
    /// Between a closing brace and `else`.
    BeforeElse,
    /// Between a closing brace and `catch`.
    BeforeCatch,
    /// Between a closing brace and `finally`.
    BeforeFinally,
    /// Between a closing brace and the `while` of a do-while loop.
    BeforeWhile,
    /// After a comma in any list.
    AfterComma,
    /// Before a comma in any list.
    BeforeComma,
    /// Before the `?` of a conditional expression.
    BeforeTernaryQuestion,
    /// After the `?` of a conditional expression.
    AfterTernaryQuestion,
    /// Before the `:` of a conditional expression.
    BeforeTernaryColon,
    /// After the `:` of a conditional expression.
    AfterTernaryColon,
    /// On both sides of a binary operator.
    AroundBinaryOp,
    /// On both sides of an assignment operator.
    AroundAssign,
    /// Between a cast's closing parenthesis and its operand.
    AfterCastParen,
    /// After a semicolon inside a `for` header or resource list.
    AfterSemicolonInFor,
    /// Between a statement keyword and its opening parenthesis.
    BeforeStatementParen,
}

impl RuleSite {
    /// The documented default behavior of this site.
    pub fn default_spacing(self) -> Spacing {
        match self {
            Self::BeforeCallParen | Self::WithinEmptyParens | Self::BeforeComma => Spacing::None,
            Self::BeforeClassBrace
            | Self::BeforeMethodBrace
            | Self::BeforeControlBrace
            | Self::BeforeElse
            | Self::BeforeCatch
            | Self::BeforeFinally
            | Self::BeforeWhile
            | Self::AfterComma
            | Self::BeforeTernaryQuestion
            | Self::AfterTernaryQuestion
            | Self::BeforeTernaryColon
            | Self::AfterTernaryColon
            | Self::AroundBinaryOp
            | Self::AroundAssign
            | Self::AfterCastParen
            | Self::AfterSemicolonInFor
            | Self::BeforeStatementParen => Spacing::Space,
        }
    }

    /// The kebab-case key used in preference files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeCallParen => "before-call-paren",
            Self::WithinEmptyParens => "within-empty-parens",
            Self::BeforeClassBrace => "before-class-brace",
            Self::BeforeMethodBrace => "before-method-brace",
            Self::BeforeControlBrace => "before-control-brace",
            Self::BeforeElse => "before-else",
            Self::BeforeCatch => "before-catch",
            Self::BeforeFinally => "before-finally",
            Self::BeforeWhile => "before-while",
            Self::AfterComma => "after-comma",
            Self::BeforeComma => "before-comma",
            Self::BeforeTernaryQuestion => "before-ternary-question",
            Self::AfterTernaryQuestion => "after-ternary-question",
            Self::BeforeTernaryColon => "before-ternary-colon",
            Self::AfterTernaryColon => "after-ternary-colon",
            Self::AroundBinaryOp => "around-binary-op",
            Self::AroundAssign => "around-assign",
            Self::AfterCastParen => "after-cast-paren",
            Self::AfterSemicolonInFor => "after-semicolon-in-for",
            Self::BeforeStatementParen => "before-statement-paren",
        }
    }
}

/// The closed set of indentation context kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentKind {
    /// A type body.
    Member,
    /// A statement block.
    Block,
    /// Case labels relative to their switch brace.
    CaseLabel,
    /// A case body relative to its labels.
    CaseBody,
    /// The starred continuation lines of a comment.
    Comment,
    /// The body of an HTML element inside a documentation comment.
    HtmlTag,
    /// Elements of an annotation member array.
    AnnotationArray,
    /// A statement label.
    Label,
}

impl IndentKind {
    /// The documented default unit for this kind.
    pub fn default_unit(self) -> IndentUnit {
        match self {
            Self::Comment => IndentUnit {
                width: 1,
                absolute: false,
            },
            Self::Label => IndentUnit {
                width: 0,
                absolute: false,
            },
            Self::Member
            | Self::Block
            | Self::CaseLabel
            | Self::CaseBody
            | Self::HtmlTag
            | Self::AnnotationArray => IndentUnit {
                width: 4,
                absolute: false,
            },
        }
    }

    /// The kebab-case key used in preference files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Block => "block",
            Self::CaseLabel => "case-label",
            Self::CaseBody => "case-body",
            Self::Comment => "comment",
            Self::HtmlTag => "html-tag",
            Self::AnnotationArray => "annotation-array",
            Self::Label => "label",
        }
    }
}

impl std::fmt::Display for IndentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width and interpretation of one indentation kind.
///
/// A relative unit adds its width to the contexts below it; an absolute unit
/// overrides everything pushed before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentUnit {
    pub width: usize,
    pub absolute: bool,
}

/// Reserved line-wrapping mode. Accepted by configuration and recorded, but
/// consulted by nothing: reflow is a declared hook, not implemented behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapMode {
    #[default]
    Off,
    Greedy,
    Balanced,
}

/// An immutable set of formatting preferences.
#[derive(Debug, Clone, Default)]
pub struct FormatPrefs {
    spacing: HashMap<RuleSite, Spacing>,
    indents: HashMap<IndentKind, IndentUnit>,
    wrap: WrapMode,
}

impl FormatPrefs {
    /// Preferences with every site at its documented default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a preference set.
    pub fn builder() -> FormatPrefsBuilder {
        FormatPrefsBuilder::default()
    }

    /// Resolve a spacing rule site. Total: unset sites resolve to their
    /// documented default.
    pub fn spacing(&self, site: RuleSite) -> Spacing {
        self.spacing
            .get(&site)
            .copied()
            .unwrap_or_else(|| site.default_spacing())
    }

    /// Resolve an indentation kind. Total: unset kinds resolve to their
    /// documented default.
    pub fn indent(&self, kind: IndentKind) -> IndentUnit {
        self.indents
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_unit())
    }

    /// The recorded (unconsumed) wrap mode.
    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }
}

/// Builder for [`FormatPrefs`].
#[derive(Debug, Clone, Default)]
pub struct FormatPrefsBuilder {
    spacing: HashMap<RuleSite, Spacing>,
    indents: HashMap<IndentKind, IndentUnit>,
    wrap: WrapMode,
}

impl FormatPrefsBuilder {
    /// Override one spacing rule site.
    pub fn space(mut self, site: RuleSite, spacing: Spacing) -> Self {
        self.spacing.insert(site, spacing);
        self
    }

    /// Override one indentation kind.
    pub fn indent(mut self, kind: IndentKind, width: usize, absolute: bool) -> Self {
        self.indents.insert(kind, IndentUnit { width, absolute });
        self
    }

    /// Record the wrap mode.
    pub fn wrap(mut self, mode: WrapMode) -> Self {
        self.wrap = mode;
        self
    }

    /// Finish building.
    pub fn build(self) -> FormatPrefs {
        FormatPrefs {
            spacing: self.spacing,
            indents: self.indents,
            wrap: self.wrap,
        }
    }
}
