//! The emission engine.
//!
//! A [`Writer`] is one emission session: created per output unit, mutated
//! while the unit's tree is walked, and discarded by [`Writer::finish`]. It
//! mediates every character through the token rule and the preferences, and
//! carries the session state the nodes themselves do not know about:
//! pending whitespace, the indent-context stack, and the enclosing-type
//! stack.
//!
//! Whitespace is deferred: a space or newline request only sets a flag, and
//! the flag is materialized by the next token write. Requesting a space
//! while one is pending is a no-op, so the engine never emits two adjacent
//! spaces and never a space before a line terminator. The active indent is
//! recomputed from the full stack each time a line start is materialized,
//! because an absolute context overrides everything pushed below it.

use std::io;

use thiserror::Error;
use tracing::{debug, trace};

use crate::prefs::{FormatPrefs, IndentKind, IndentUnit, RuleSite, Spacing};
use crate::token::{TokenClass, space_required};

/// Receives the emitted character runs.
///
/// The writer performs its own buffering; implementations need none.
pub trait Sink {
    /// Append a raw character run.
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    /// Flush buffered output, if any.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Release the sink at the end of a unit.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for String {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }
}

/// Adapts any [`io::Write`] to the [`Sink`] interface.
#[derive(Debug)]
pub struct IoSink<W: io::Write> {
    inner: W,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A fatal emission failure. The current unit is abandoned; other units are
/// unaffected.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A pop did not match the innermost indent context. This is a tree
    /// structure bug, not a recoverable condition.
    #[error("indent context mismatch: tried to pop '{requested}' but {found}")]
    IndentMismatch {
        requested: IndentKind,
        found: String,
    },

    /// A pop did not match the innermost enclosing type.
    #[error("enclosing type mismatch: tried to pop '{requested}' but {found}")]
    TypeMismatch { requested: String, found: String },

    /// A self-type reference was written outside any type body.
    #[error("self-type reference outside of any type body")]
    NoEnclosingType,

    /// The session finished with contexts still open.
    #[error("emission finished with {indents} open indent context(s) and {types} open enclosing type(s)")]
    Unbalanced { indents: usize, types: usize },

    /// The output sink failed.
    #[error("failed to write to the output sink")]
    Sink {
        #[from]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy)]
struct IndentFrame {
    kind: IndentKind,
    unit: IndentUnit,
}

/// One emission session. See the module docs.
pub struct Writer<'p, S> {
    sink: S,
    prefs: &'p FormatPrefs,
    buf: String,
    line: u32,
    column: u32,
    pending_space: bool,
    pending_newlines: u8,
    indents: Vec<IndentFrame>,
    types: Vec<String>,
    last: Option<TokenClass>,
}

impl<'p, S: Sink> Writer<'p, S> {
    /// Start a session writing to `sink` under `prefs`.
    pub fn new(prefs: &'p FormatPrefs, sink: S) -> Self {
        trace!("starting emission session");
        Self {
            sink,
            prefs,
            buf: String::new(),
            line: 1,
            column: 0,
            pending_space: false,
            pending_newlines: 0,
            indents: Vec::new(),
            types: Vec::new(),
            last: None,
        }
    }

    /// The preferences this session resolves against.
    pub fn prefs(&self) -> &FormatPrefs {
        self.prefs
    }

    /// Current line, for diagnostics only.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current column, for diagnostics only.
    pub fn column(&self) -> u32 {
        self.column
    }

    fn push_raw(&mut self, s: &str) {
        self.buf.push_str(s);
        self.column += s.chars().count() as u32;
    }

    /// Materialize deferred whitespace. Returns true when any whitespace was
    /// written, which suppresses the reactive token rule for this write.
    fn materialize_pending(&mut self) -> bool {
        if self.pending_newlines > 0 {
            for _ in 0..self.pending_newlines {
                self.buf.push('\n');
                self.line += 1;
            }
            self.pending_newlines = 0;
            self.pending_space = false;
            self.column = 0;
            let indent = self.current_indent();
            for _ in 0..indent {
                self.buf.push(' ');
            }
            self.column = indent as u32;
            self.last = None;
            true
        } else if self.pending_space {
            self.buf.push(' ');
            self.column += 1;
            self.pending_space = false;
            true
        } else {
            false
        }
    }

    /// Write one classified token, materializing deferred whitespace first
    /// and inserting an obligatory space where the token rule demands one.
    pub fn token(&mut self, class: TokenClass, text: &str) {
        let had_ws = self.materialize_pending();
        if !had_ws {
            if let Some(prev) = self.last {
                if space_required(prev, class) {
                    self.buf.push(' ');
                    self.column += 1;
                }
            }
        }
        self.push_raw(text);
        self.last = Some(class);
    }

    /// Write a raw run with no token identity: deferred whitespace is
    /// materialized, but no reactive space is inserted before or after.
    /// Used for comment content, whose spacing the caller controls.
    pub fn text(&mut self, s: &str) {
        self.materialize_pending();
        self.push_raw(s);
        self.last = None;
    }

    /// A word-like token: keyword, identifier, or literal.
    pub fn word(&mut self, s: &str) {
        self.token(TokenClass::Word, s);
    }

    /// An operator symbol.
    pub fn op(&mut self, s: &str) {
        self.token(TokenClass::Operator, s);
    }

    pub fn open_paren(&mut self) {
        self.token(TokenClass::Open, "(");
    }

    pub fn close_paren(&mut self) {
        self.token(TokenClass::Close, ")");
    }

    pub fn open_bracket(&mut self) {
        self.token(TokenClass::Open, "[");
    }

    pub fn close_bracket(&mut self) {
        self.token(TokenClass::Close, "]");
    }

    pub fn open_brace(&mut self) {
        self.token(TokenClass::OpenBrace, "{");
    }

    pub fn close_brace(&mut self) {
        self.token(TokenClass::CloseBrace, "}");
    }

    pub fn generic_open(&mut self) {
        self.token(TokenClass::GenericOpen, "<");
    }

    pub fn generic_close(&mut self) {
        self.token(TokenClass::GenericClose, ">");
    }

    pub fn comma(&mut self) {
        self.token(TokenClass::Comma, ",");
    }

    pub fn semi(&mut self) {
        self.token(TokenClass::Semi, ";");
    }

    pub fn dot(&mut self) {
        self.token(TokenClass::Dot, ".");
    }

    pub fn at(&mut self) {
        self.token(TokenClass::At, "@");
    }

    pub fn colon(&mut self) {
        self.token(TokenClass::Operator, ":");
    }

    pub fn question(&mut self) {
        self.token(TokenClass::Operator, "?");
    }

    /// Defer a single space. A no-op while a space or newline is pending,
    /// and at a line start, where indentation owns the leading whitespace.
    pub fn space(&mut self) {
        if self.pending_newlines == 0 && self.last.is_some() {
            self.pending_space = true;
        }
    }

    /// Defer a line break. Supersedes any pending space; a no-op while a
    /// newline is already pending.
    pub fn newline(&mut self) {
        self.pending_space = false;
        if self.pending_newlines == 0 {
            self.pending_newlines = 1;
        }
    }

    /// Defer a blank line (two line breaks).
    pub fn blank_line(&mut self) {
        self.pending_space = false;
        self.pending_newlines = 2;
    }

    /// Apply the configured behavior of a rule site.
    pub fn rule(&mut self, site: RuleSite) {
        match self.prefs.spacing(site) {
            Spacing::None => {}
            Spacing::Space => self.space(),
            Spacing::Newline => self.newline(),
        }
    }

    /// Total indentation currently active, recomputed from the full stack:
    /// relative contexts add, absolute contexts override everything below.
    fn current_indent(&self) -> usize {
        let mut total = 0;
        for frame in &self.indents {
            if frame.unit.absolute {
                total = frame.unit.width;
            } else {
                total += frame.unit.width;
            }
        }
        total
    }

    /// Enter a nested indentation context.
    pub fn push_indent(&mut self, kind: IndentKind) {
        let unit = self.prefs.indent(kind);
        self.indents.push(IndentFrame { kind, unit });
    }

    /// Leave the innermost indentation context, which must be `kind`.
    pub fn pop_indent(&mut self, kind: IndentKind) -> Result<(), EmitError> {
        match self.indents.last() {
            Some(frame) if frame.kind == kind => {
                self.indents.pop();
                Ok(())
            }
            top => {
                let found = match top {
                    Some(frame) => format!("'{}' is innermost", frame.kind),
                    None => "no context is active".to_string(),
                };
                debug!(depth = self.indents.len(), "indent pop mismatch");
                Err(EmitError::IndentMismatch {
                    requested: kind,
                    found,
                })
            }
        }
    }

    /// Enter a type body; self-type references now resolve to `name`.
    pub fn push_type(&mut self, name: impl Into<String>) {
        let name = name.into();
        trace!(%name, "entering type body");
        self.types.push(name);
    }

    /// Leave the innermost type body, which must be `name`.
    pub fn pop_type(&mut self, name: &str) -> Result<(), EmitError> {
        match self.types.last() {
            Some(top) if top == name => {
                self.types.pop();
                Ok(())
            }
            top => {
                let found = match top {
                    Some(top) => format!("'{}' is innermost", top),
                    None => "no type is active".to_string(),
                };
                debug!(depth = self.types.len(), "type pop mismatch");
                Err(EmitError::TypeMismatch {
                    requested: name.to_string(),
                    found,
                })
            }
        }
    }

    /// The simple name of the type currently being emitted.
    pub fn self_type_name(&self) -> Result<&str, EmitError> {
        self.types
            .last()
            .map(String::as_str)
            .ok_or(EmitError::NoEnclosingType)
    }

    /// Push buffered output through to the sink.
    pub fn flush(&mut self) -> Result<(), EmitError> {
        if !self.buf.is_empty() {
            self.sink.write_str(&self.buf)?;
            self.buf.clear();
        }
        self.sink.flush()?;
        Ok(())
    }

    /// End the session: verify both stacks are empty, materialize any
    /// trailing line break, flush, and close the sink.
    pub fn finish(mut self) -> Result<S, EmitError> {
        if !self.indents.is_empty() || !self.types.is_empty() {
            return Err(EmitError::Unbalanced {
                indents: self.indents.len(),
                types: self.types.len(),
            });
        }
        for _ in 0..self.pending_newlines {
            self.buf.push('\n');
            self.line += 1;
        }
        self.pending_newlines = 0;
        self.sink.write_str(&self.buf)?;
        self.sink.flush()?;
        self.sink.close()?;
        debug!(lines = self.line, "emission unit complete");
        Ok(self.sink)
    }
}
