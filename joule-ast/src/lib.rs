//! Immutable Java syntax tree model and fluent builders.
//!
//! This crate is the construction half of the joule code generator: callers
//! assemble expression, statement, type, and declaration nodes through
//! fluent builders, and the sibling `joule-emit` crate serializes the
//! finished tree to formatted source text.
//!
//! Nodes are plain sum types, immutable once constructed. Operator
//! constructors consult the [`precedence`] table exactly once and wrap any
//! operand that binds too loosely for its position in a parenthesized
//! wrapper node, so a finished tree is always structurally safe to emit.
//!
//! # Module Organization
//!
//! - [`precedence`] - Operator categories, precedence ranks, associativity
//! - [`expr`] - Expression nodes and construction-time parenthesization
//! - [`stmt`] - Statement nodes
//! - [`types`] - Type references, including the context-sensitive self type
//! - [`decl`] - Type declarations and members
//! - [`doc`] - Documentation-comment model
//! - [`name`] - Caller-owned interning pool for repeated simple names
//! - [`error`] - Construction-time usage errors

pub mod decl;
pub mod doc;
pub mod error;
pub mod expr;
pub mod name;
pub mod precedence;
pub mod stmt;
pub mod types;

pub use decl::{
    AnnotationElem, AnnotationUse, AnnotationValue, ConstructorDecl, EnumConstant, FieldDecl,
    Member, MethodDecl, Modifiers, Param, TypeDecl, TypeKind, TypeParam,
};
pub use doc::{DocComment, DocPart};
pub use error::AstError;
pub use expr::{Expr, LambdaBody};
pub use name::NamePool;
pub use precedence::{Assoc, AssignOp, BinaryOp, Precedence, UnaryOp};
pub use stmt::{
    CaseLabel, Catch, Declarator, ForInit, LocalVar, Resource, Stmt, SwitchCase,
};
pub use types::{Primitive, TypeArg, TypeRef};
