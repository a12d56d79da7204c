//! Java type references.
//!
//! Type references are plain values: a primitive, a (possibly generic) named
//! class type, an array, a type variable, or the context-sensitive
//! [`TypeRef::SelfType`] that resolves to the type currently being emitted.

/// The primitive types, plus `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

impl Primitive {
    /// The keyword for this primitive.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

/// A reference to a Java type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A primitive type or `void`.
    Primitive(Primitive),
    /// A class or interface type, dot-qualified, with optional generic
    /// arguments.
    Named {
        /// Dot-qualified name as the caller supplied it.
        qualified: String,
        /// Generic arguments; empty for a raw reference.
        args: Vec<TypeArg>,
    },
    /// An array of the component type.
    Array(Box<TypeRef>),
    /// A type variable such as `T`.
    Var(String),
    /// The type whose body is currently being emitted.
    ///
    /// This is the one context-sensitive node kind: its rendered text is
    /// resolved against the writer session's enclosing-type stack at the
    /// moment it is written, not against any field of its own.
    SelfType,
}

/// A generic type argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArg {
    /// An ordinary type argument.
    Type(TypeRef),
    /// The unbounded wildcard `?`.
    Wildcard,
    /// `? extends T`.
    Extends(TypeRef),
    /// `? super T`.
    Super(TypeRef),
}

impl TypeRef {
    /// A class or interface type by dot-qualified name.
    pub fn named(qualified: impl Into<String>) -> Self {
        Self::Named {
            qualified: qualified.into(),
            args: Vec::new(),
        }
    }

    /// A named type with ordinary generic arguments.
    pub fn generic(qualified: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Named {
            qualified: qualified.into(),
            args: args.into_iter().map(TypeArg::Type).collect(),
        }
    }

    /// A named type with explicit (possibly wildcard) generic arguments.
    pub fn generic_args(qualified: impl Into<String>, args: Vec<TypeArg>) -> Self {
        Self::Named {
            qualified: qualified.into(),
            args,
        }
    }

    /// A type variable.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// The enclosing type being emitted. See [`TypeRef::SelfType`].
    pub fn self_type() -> Self {
        Self::SelfType
    }

    /// An array of this type.
    pub fn array_of(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Convenience: `boolean`.
    pub fn boolean_() -> Self {
        Self::Primitive(Primitive::Boolean)
    }

    /// Convenience: `int`.
    pub fn int_() -> Self {
        Self::Primitive(Primitive::Int)
    }

    /// Convenience: `long`.
    pub fn long_() -> Self {
        Self::Primitive(Primitive::Long)
    }

    /// Convenience: `char`.
    pub fn char_() -> Self {
        Self::Primitive(Primitive::Char)
    }

    /// Convenience: `double`.
    pub fn double_() -> Self {
        Self::Primitive(Primitive::Double)
    }

    /// Convenience: `void`.
    pub fn void_() -> Self {
        Self::Primitive(Primitive::Void)
    }

    /// Convenience: `java.lang.String`.
    pub fn string() -> Self {
        Self::named("java.lang.String")
    }

    /// Convenience: `java.lang.Object`.
    pub fn object() -> Self {
        Self::named("java.lang.Object")
    }

    /// The dot-qualified name form, without generic arguments.
    ///
    /// `None` for [`TypeRef::SelfType`], whose name exists only relative to
    /// an emission session.
    pub fn qualified_name(&self) -> Option<String> {
        match self {
            Self::Primitive(p) => Some(p.as_str().to_string()),
            Self::Named { qualified, .. } => Some(qualified.clone()),
            Self::Array(inner) => inner.qualified_name().map(|n| format!("{}[]", n)),
            Self::Var(name) => Some(name.clone()),
            Self::SelfType => None,
        }
    }

    /// The simple name form: the last dotted segment, without generic
    /// arguments. `None` for [`TypeRef::SelfType`].
    pub fn simple_name(&self) -> Option<String> {
        match self {
            Self::Primitive(p) => Some(p.as_str().to_string()),
            Self::Named { qualified, .. } => Some(
                qualified
                    .rsplit('.')
                    .next()
                    .unwrap_or(qualified)
                    .to_string(),
            ),
            Self::Array(inner) => inner.simple_name().map(|n| format!("{}[]", n)),
            Self::Var(name) => Some(name.clone()),
            Self::SelfType => None,
        }
    }

    /// This type with all generic arguments dropped.
    pub fn erasure(&self) -> TypeRef {
        match self {
            Self::Named { qualified, .. } => Self::named(qualified.clone()),
            Self::Array(inner) => Self::Array(Box::new(inner.erasure())),
            other => other.clone(),
        }
    }

    /// Whether this is the `void` pseudo-type.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::Void))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_forms() {
        let list = TypeRef::generic("java.util.List", vec![TypeRef::string()]);
        assert_eq!(list.qualified_name().as_deref(), Some("java.util.List"));
        assert_eq!(list.simple_name().as_deref(), Some("List"));
    }

    #[test]
    fn test_array_name_forms() {
        let arr = TypeRef::int_().array_of().array_of();
        assert_eq!(arr.qualified_name().as_deref(), Some("int[][]"));
        assert_eq!(arr.simple_name().as_deref(), Some("int[][]"));
    }

    #[test]
    fn test_self_type_has_no_standalone_name() {
        assert_eq!(TypeRef::self_type().qualified_name(), None);
        assert_eq!(TypeRef::self_type().simple_name(), None);
    }

    #[test]
    fn test_erasure_drops_arguments() {
        let map = TypeRef::generic(
            "java.util.Map",
            vec![TypeRef::string(), TypeRef::object()],
        );
        assert_eq!(map.erasure(), TypeRef::named("java.util.Map"));
    }

    #[test]
    fn test_void_detection() {
        assert!(TypeRef::void_().is_void());
        assert!(!TypeRef::int_().is_void());
    }
}
