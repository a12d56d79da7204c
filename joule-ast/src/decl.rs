//! Type declarations and their members.
//!
//! A [`TypeDecl`] covers all four declaration kinds (class, interface, enum,
//! annotation type). Builder operations that are invalid for a kind are
//! rejected immediately with an [`AstError`]; the declaration built so far is
//! returned untouched inside the error path, so sibling state never corrupts.

use indexmap::IndexMap;

use crate::doc::DocComment;
use crate::error::AstError;
use crate::expr::Expr;
use crate::stmt::Stmt;
use crate::types::TypeRef;

bitflags::bitflags! {
    /// Declaration and member modifiers, emitted in canonical order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const DEFAULT = 1 << 4;
        const STATIC = 1 << 5;
        const FINAL = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const NATIVE = 1 << 8;
        const TRANSIENT = 1 << 9;
        const VOLATILE = 1 << 10;
        const STRICTFP = 1 << 11;
    }
}

impl Modifiers {
    /// The modifier keywords present, in canonical declaration order.
    pub fn keywords(self) -> Vec<&'static str> {
        const ORDER: &[(Modifiers, &str)] = &[
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::DEFAULT, "default"),
            (Modifiers::STATIC, "static"),
            (Modifiers::FINAL, "final"),
            (Modifiers::SYNCHRONIZED, "synchronized"),
            (Modifiers::NATIVE, "native"),
            (Modifiers::TRANSIENT, "transient"),
            (Modifiers::VOLATILE, "volatile"),
            (Modifiers::STRICTFP, "strictfp"),
        ];
        ORDER
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, kw)| *kw)
            .collect()
    }
}

/// The four declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
        };
        f.write_str(s)
    }
}

/// A generic type parameter with optional bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeParam {
    /// An unbounded type parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Add an `extends` bound; multiple bounds join with `&`.
    pub fn bound(mut self, ty: TypeRef) -> Self {
        self.bounds.push(ty);
        self
    }
}

/// An annotation applied to a declaration, member, or parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationUse {
    /// The annotation type.
    pub ty: TypeRef,
    /// Named member values, in insertion order.
    pub args: IndexMap<String, AnnotationValue>,
}

/// A value of an annotation member.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    /// An expression value.
    Expr(Expr),
    /// A nested annotation.
    Annotation(Box<AnnotationUse>),
    /// An array of values; emitted one element per line.
    Array(Vec<AnnotationValue>),
}

impl AnnotationUse {
    /// An annotation with no members.
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            args: IndexMap::new(),
        }
    }

    /// Set a named member to an expression value.
    pub fn set(mut self, name: impl Into<String>, value: Expr) -> Self {
        self.args.insert(name.into(), AnnotationValue::Expr(value));
        self
    }

    /// Set a named member to an arbitrary annotation value.
    pub fn set_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    /// Set the shorthand `value` member, emitted without a name when it is
    /// the only member.
    pub fn single(self, value: Expr) -> Self {
        self.set("value", value)
    }
}

/// A field member.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub doc: Option<DocComment>,
    pub ty: TypeRef,
    pub name: String,
    pub init: Option<Expr>,
}

impl FieldDecl {
    /// A field with no modifiers and no initializer.
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            doc: None,
            ty,
            name: name.into(),
            init: None,
        }
    }

    /// Set the modifier set.
    pub fn modifiers(mut self, m: Modifiers) -> Self {
        self.modifiers = m;
        self
    }

    /// Set the initializer.
    pub fn init(mut self, value: Expr) -> Self {
        self.init = Some(value);
        self
    }

    /// Attach a documentation comment.
    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Apply an annotation.
    pub fn annotate(mut self, a: AnnotationUse) -> Self {
        self.annotations.push(a);
        self
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub is_final: bool,
    pub ty: TypeRef,
    pub name: String,
    pub varargs: bool,
}

impl Param {
    /// A plain parameter.
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            is_final: false,
            ty,
            name: name.into(),
            varargs: false,
        }
    }

    /// Mark the parameter `final`.
    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Mark the parameter as varargs; must be the last parameter.
    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }
}

/// A method member.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub doc: Option<DocComment>,
    pub type_params: Vec<TypeParam>,
    pub return_ty: TypeRef,
    pub name: String,
    pub params: Vec<Param>,
    pub throws: Vec<TypeRef>,
    /// `None` renders an abstract/interface method ending in `;`.
    pub body: Option<Vec<Stmt>>,
}

impl MethodDecl {
    /// A bodiless method with no modifiers.
    pub fn new(return_ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            doc: None,
            type_params: Vec::new(),
            return_ty,
            name: name.into(),
            params: Vec::new(),
            throws: Vec::new(),
            body: None,
        }
    }

    /// Set the modifier set. Rejected when the method already has a body and
    /// the new set contains `abstract`.
    pub fn modifiers(mut self, m: Modifiers) -> Result<Self, AstError> {
        if m.contains(Modifiers::ABSTRACT) && self.body.is_some() {
            return Err(AstError::AbstractMethodWithBody {
                name: self.name.clone(),
            });
        }
        self.modifiers = m;
        Ok(self)
    }

    /// Add a parameter. Rejected when a varargs parameter is already last.
    pub fn param(mut self, p: Param) -> Result<Self, AstError> {
        if self.params.last().is_some_and(|prev| prev.varargs) {
            return Err(AstError::ParamAfterVarargs { name: p.name });
        }
        self.params.push(p);
        Ok(self)
    }

    /// Add a generic type parameter.
    pub fn type_param(mut self, tp: TypeParam) -> Self {
        self.type_params.push(tp);
        self
    }

    /// Declare a checked exception.
    pub fn throws(mut self, ty: TypeRef) -> Self {
        self.throws.push(ty);
        self
    }

    /// Give the method a body. Rejected on abstract methods.
    pub fn body(mut self, stmts: Vec<Stmt>) -> Result<Self, AstError> {
        if self.modifiers.contains(Modifiers::ABSTRACT) {
            return Err(AstError::AbstractMethodWithBody {
                name: self.name.clone(),
            });
        }
        self.body = Some(stmts);
        Ok(self)
    }

    /// Attach a documentation comment.
    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Apply an annotation.
    pub fn annotate(mut self, a: AnnotationUse) -> Self {
        self.annotations.push(a);
        self
    }
}

/// A constructor member. Its name is resolved from the enclosing type at
/// emission time.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub doc: Option<DocComment>,
    pub params: Vec<Param>,
    pub throws: Vec<TypeRef>,
    pub body: Vec<Stmt>,
}

impl ConstructorDecl {
    /// An empty-bodied constructor with no modifiers.
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            doc: None,
            params: Vec::new(),
            throws: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Set the modifier set.
    pub fn modifiers(mut self, m: Modifiers) -> Self {
        self.modifiers = m;
        self
    }

    /// Add a parameter. Rejected when a varargs parameter is already last.
    pub fn param(mut self, p: Param) -> Result<Self, AstError> {
        if self.params.last().is_some_and(|prev| prev.varargs) {
            return Err(AstError::ParamAfterVarargs { name: p.name });
        }
        self.params.push(p);
        Ok(self)
    }

    /// Declare a checked exception.
    pub fn throws(mut self, ty: TypeRef) -> Self {
        self.throws.push(ty);
        self
    }

    /// Set the body.
    pub fn body(mut self, stmts: Vec<Stmt>) -> Self {
        self.body = stmts;
        self
    }

    /// Attach a documentation comment.
    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }
}

impl Default for ConstructorDecl {
    fn default() -> Self {
        Self::new()
    }
}

/// One constant of an enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub name: String,
    pub args: Vec<Expr>,
    pub doc: Option<DocComment>,
    pub annotations: Vec<AnnotationUse>,
}

impl EnumConstant {
    /// A constant without constructor arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            doc: None,
            annotations: Vec::new(),
        }
    }

    /// Add a constructor argument.
    pub fn arg(mut self, value: Expr) -> Self {
        self.args.push(value);
        self
    }

    /// Attach a documentation comment.
    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// One element of an annotation type, `Type name() default value;`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationElem {
    pub doc: Option<DocComment>,
    pub ty: TypeRef,
    pub name: String,
    pub default: Option<Expr>,
}

impl AnnotationElem {
    /// An element without a default value.
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            doc: None,
            ty,
            name: name.into(),
            default: None,
        }
    }

    /// Set the default value.
    pub fn default_value(mut self, value: Expr) -> Self {
        self.default = Some(value);
        self
    }

    /// Attach a documentation comment.
    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// A member of a type declaration, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    EnumConstant(EnumConstant),
    AnnotationElem(AnnotationElem),
    /// An instance or static initializer block.
    Initializer {
        is_static: bool,
        body: Vec<Stmt>,
    },
    Nested(TypeDecl),
}

/// A class, interface, enum, or annotation type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub doc: Option<DocComment>,
    pub annotations: Vec<AnnotationUse>,
    pub members: Vec<Member>,
}

impl TypeDecl {
    fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            modifiers: Modifiers::empty(),
            name: name.into(),
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            doc: None,
            annotations: Vec::new(),
            members: Vec::new(),
        }
    }

    /// A class declaration.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    /// An interface declaration.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    /// An enum declaration.
    pub fn enum_(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Enum, name)
    }

    /// An annotation type declaration.
    pub fn annotation(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Annotation, name)
    }

    /// Set the modifier set.
    pub fn modifiers(mut self, m: Modifiers) -> Self {
        self.modifiers = m;
        self
    }

    /// Shorthand for adding `public`.
    pub fn public(mut self) -> Self {
        self.modifiers |= Modifiers::PUBLIC;
        self
    }

    /// Add a generic type parameter.
    pub fn type_param(mut self, tp: TypeParam) -> Self {
        self.type_params.push(tp);
        self
    }

    /// Declare the superclass. Enums and annotation types reject this.
    pub fn extends(mut self, ty: TypeRef) -> Result<Self, AstError> {
        match self.kind {
            TypeKind::Enum | TypeKind::Annotation => Err(AstError::ExtendsNotAllowed {
                kind: self.kind,
            }),
            TypeKind::Class | TypeKind::Interface => {
                if self.kind == TypeKind::Interface {
                    // Interfaces extend any number of interfaces.
                    self.implements.push(ty);
                } else {
                    self.extends = Some(ty);
                }
                Ok(self)
            }
        }
    }

    /// Declare an implemented interface. Annotation types reject this.
    pub fn implements(mut self, ty: TypeRef) -> Result<Self, AstError> {
        if self.kind == TypeKind::Annotation {
            return Err(AstError::ImplementsNotAllowed { kind: self.kind });
        }
        self.implements.push(ty);
        Ok(self)
    }

    /// Add a field member.
    pub fn field(mut self, f: FieldDecl) -> Self {
        self.members.push(Member::Field(f));
        self
    }

    /// Add a method member.
    pub fn method(mut self, m: MethodDecl) -> Self {
        self.members.push(Member::Method(m));
        self
    }

    /// Add a constructor. Interfaces and annotation types reject this.
    pub fn constructor(mut self, c: ConstructorDecl) -> Result<Self, AstError> {
        match self.kind {
            TypeKind::Interface | TypeKind::Annotation => Err(AstError::ConstructorNotAllowed {
                kind: self.kind,
            }),
            TypeKind::Class | TypeKind::Enum => {
                self.members.push(Member::Constructor(c));
                Ok(self)
            }
        }
    }

    /// Add an enum constant. Only enums accept this.
    pub fn constant(mut self, c: EnumConstant) -> Result<Self, AstError> {
        if self.kind != TypeKind::Enum {
            return Err(AstError::ConstantOutsideEnum {
                kind: self.kind,
            });
        }
        self.members.push(Member::EnumConstant(c));
        Ok(self)
    }

    /// Add an annotation element. Only annotation types accept this.
    pub fn element(mut self, e: AnnotationElem) -> Result<Self, AstError> {
        if self.kind != TypeKind::Annotation {
            return Err(AstError::ElementOutsideAnnotation {
                kind: self.kind,
            });
        }
        self.members.push(Member::AnnotationElem(e));
        Ok(self)
    }

    /// Add an instance or static initializer block.
    pub fn initializer(mut self, is_static: bool, body: Vec<Stmt>) -> Self {
        self.members.push(Member::Initializer { is_static, body });
        self
    }

    /// Add a nested type declaration.
    pub fn nested(mut self, decl: TypeDecl) -> Self {
        self.members.push(Member::Nested(decl));
        self
    }

    /// Attach a documentation comment.
    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Apply an annotation.
    pub fn annotate(mut self, a: AnnotationUse) -> Self {
        self.annotations.push(a);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_keyword_order() {
        let m = Modifiers::FINAL | Modifiers::STATIC | Modifiers::PUBLIC;
        assert_eq!(m.keywords(), vec!["public", "static", "final"]);
    }

    #[test]
    fn test_enum_rejects_extends() {
        let err = TypeDecl::enum_("Color")
            .extends(TypeRef::object())
            .unwrap_err();
        assert!(matches!(
            err,
            AstError::ExtendsNotAllowed {
                kind: TypeKind::Enum
            }
        ));
    }

    #[test]
    fn test_interface_extends_accumulates() {
        let decl = TypeDecl::interface("Closeable")
            .extends(TypeRef::named("java.lang.AutoCloseable"))
            .unwrap();
        assert!(decl.extends.is_none());
        assert_eq!(decl.implements.len(), 1);
    }

    #[test]
    fn test_annotation_rejects_implements() {
        let err = TypeDecl::annotation("Marker")
            .implements(TypeRef::object())
            .unwrap_err();
        assert!(matches!(err, AstError::ImplementsNotAllowed { .. }));
    }

    #[test]
    fn test_interface_rejects_constructor() {
        let err = TypeDecl::interface("Runner")
            .constructor(ConstructorDecl::new())
            .unwrap_err();
        assert!(matches!(err, AstError::ConstructorNotAllowed { .. }));
    }

    #[test]
    fn test_constant_only_on_enum() {
        let err = TypeDecl::class("Color")
            .constant(EnumConstant::new("RED"))
            .unwrap_err();
        assert!(matches!(err, AstError::ConstantOutsideEnum { .. }));
    }

    #[test]
    fn test_rejected_operation_leaves_siblings_intact() {
        let decl = TypeDecl::enum_("Color")
            .constant(EnumConstant::new("RED"))
            .unwrap();
        // A rejected extends consumes the builder but the error carries no
        // partial mutation; rebuilding from the same inputs reproduces it.
        let again = decl.clone().extends(TypeRef::object());
        assert!(again.is_err());
        assert_eq!(decl.members.len(), 1);
    }

    #[test]
    fn test_varargs_must_be_last() {
        let err = MethodDecl::new(TypeRef::void_(), "log")
            .param(Param::new(TypeRef::string().array_of(), "parts").varargs())
            .unwrap()
            .param(Param::new(TypeRef::int_(), "level"))
            .unwrap_err();
        assert!(matches!(err, AstError::ParamAfterVarargs { .. }));
    }

    #[test]
    fn test_abstract_method_rejects_body() {
        let err = MethodDecl::new(TypeRef::void_(), "run")
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .unwrap()
            .body(vec![])
            .unwrap_err();
        assert!(matches!(err, AstError::AbstractMethodWithBody { .. }));
    }
}
