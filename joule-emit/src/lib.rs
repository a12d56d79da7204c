//! Formatting-aware Java source emission for the joule code generator.
//!
//! This crate is the emission half of joule: it takes the immutable trees
//! built with `joule-ast` and serializes them to consistently formatted
//! source text. Parenthesization was already decided when the tree was
//! built, so emission is a single depth-first pass in which the only running
//! state lives in the [`Writer`] session: pending whitespace, the
//! indent-context stack, and the enclosing-type stack.
//!
//! # Module Organization
//!
//! - [`token`] - Lexical token classes and the obligatory-spacing rule
//! - [`prefs`] - Formatting preferences: rule sites and indentation kinds
//! - [`config`] - Loading preferences from a TOML file
//! - [`writer`] - The emission session: whitespace state machine and stacks
//! - Per-node emitters for expressions, statements, types, declarations,
//!   and comments (crate-private; reached through [`render`] and friends)
//!
//! # Example
//!
//! ```
//! use joule_ast::{Expr, FieldDecl, Modifiers, TypeDecl, TypeRef};
//! use joule_emit::{render, FormatPrefs};
//!
//! let class = TypeDecl::class("Greeter")
//!     .public()
//!     .field(
//!         FieldDecl::new(TypeRef::string(), "GREETING")
//!             .modifiers(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL)
//!             .init(Expr::from("hello")),
//!     );
//! let source = render(&class, &FormatPrefs::new()).unwrap();
//! assert!(source.contains("public static final java.lang.String GREETING = \"hello\";"));
//! ```

pub mod config;
pub mod prefs;
pub mod token;
pub mod writer;

mod decl;
mod doc;
mod expr;
mod stmt;
mod types;

use joule_ast::decl::TypeDecl;
use joule_ast::expr::Expr;
use joule_ast::stmt::Stmt;

pub use config::ConfigError;
pub use prefs::{FormatPrefs, FormatPrefsBuilder, IndentKind, IndentUnit, RuleSite, Spacing, WrapMode};
pub use token::{TokenClass, space_required};
pub use writer::{EmitError, IoSink, Sink, Writer};

/// Render one type declaration to a string.
pub fn render(decl: &TypeDecl, prefs: &FormatPrefs) -> Result<String, EmitError> {
    emit_into(decl, prefs, String::new())
}

/// Render one type declaration into an arbitrary sink, returning the sink.
pub fn emit_into<S: Sink>(decl: &TypeDecl, prefs: &FormatPrefs, sink: S) -> Result<S, EmitError> {
    let mut w = Writer::new(prefs, sink);
    decl::emit_type_decl(decl, &mut w)?;
    w.finish()
}

/// Render a single expression to a string. Useful for tests and embedding.
pub fn render_expr(expr: &Expr, prefs: &FormatPrefs) -> Result<String, EmitError> {
    let mut w = Writer::new(prefs, String::new());
    expr::emit_expr(expr, &mut w)?;
    w.finish()
}

/// Render a single statement to a string.
pub fn render_stmt(stmt: &Stmt, prefs: &FormatPrefs) -> Result<String, EmitError> {
    let mut w = Writer::new(prefs, String::new());
    stmt::emit_stmt(stmt, &mut w)?;
    w.finish()
}
