//! Construction-time usage errors.

use thiserror::Error;

use crate::decl::TypeKind;

/// An operation invalid for the node it was requested on.
///
/// These are reported immediately and locally; nothing already built is
/// modified by a rejected operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("a {kind} declaration cannot declare a superclass")]
    ExtendsNotAllowed { kind: TypeKind },

    #[error("a {kind} declaration cannot implement interfaces")]
    ImplementsNotAllowed { kind: TypeKind },

    #[error("a {kind} declaration cannot declare a constructor")]
    ConstructorNotAllowed { kind: TypeKind },

    #[error("enum constants are only valid inside an enum declaration, not a {kind}")]
    ConstantOutsideEnum { kind: TypeKind },

    #[error("annotation elements are only valid inside an annotation declaration, not a {kind}")]
    ElementOutsideAnnotation { kind: TypeKind },

    #[error("an abstract method cannot carry a body: '{name}'")]
    AbstractMethodWithBody { name: String },

    #[error("a varargs parameter must be the final parameter, but '{name}' follows one")]
    ParamAfterVarargs { name: String },
}
