//! Expression nodes and construction-time parenthesization.
//!
//! Every operator constructor inspects its operands' precedence and wraps
//! any operand that binds too loosely for its position in an explicit
//! [`Expr::Paren`] node. A wrapped operand has effective precedence 0 and is
//! never re-wrapped, so emission is a pure tree walk with no re-analysis.
//!
//! Trees are strict: a node owns its children exclusively. Re-using a
//! sub-expression at two sites is done by cloning, never by aliasing.

use std::sync::Arc;

use crate::precedence::{
    self, Assoc, AssignOp, BinaryOp, Precedence, UnaryOp,
};
use crate::stmt::Stmt;
use crate::types::TypeRef;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The `null` literal.
    Null,
    /// A `boolean` literal.
    Bool(bool),
    /// An `int` literal.
    Int(i32),
    /// A `long` literal, emitted with the `L` suffix.
    Long(i64),
    /// A `double` literal.
    Double(f64),
    /// A `char` literal.
    Char(char),
    /// A string literal; escaped at emission time.
    Str(String),
    /// A simple name (variable, parameter, field in scope).
    Name(Arc<str>),
    /// The `this` reference.
    This,
    /// The `super` reference.
    Super,
    /// A class literal, `T.class`.
    ClassLiteral(TypeRef),
    /// A synthesized parenthesized wrapper. Effective precedence 0.
    Paren(Box<Expr>),
    /// Instance field access, `target.name`.
    Field {
        target: Box<Expr>,
        name: String,
    },
    /// Static field access, `Type.name`.
    StaticField {
        ty: TypeRef,
        name: String,
    },
    /// Array element access, `array[index]`.
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    /// Method invocation; `target` is absent for unqualified calls.
    Call {
        target: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
    },
    /// Static method invocation, `Type.name(args)`.
    StaticCall {
        ty: TypeRef,
        name: String,
        args: Vec<Expr>,
    },
    /// Object construction, `new Type(args)`.
    New {
        ty: TypeRef,
        args: Vec<Expr>,
    },
    /// Array construction, `new T[dims]` or `new T[] { init }`.
    NewArray {
        elem: TypeRef,
        dims: Vec<Expr>,
        init: Option<Vec<Expr>>,
    },
    /// A unary operator application.
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// A binary operator application.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A cast, `(Type) operand`.
    Cast {
        ty: TypeRef,
        operand: Box<Expr>,
    },
    /// A type test, `operand instanceof Type`.
    InstanceOf {
        operand: Box<Expr>,
        ty: TypeRef,
    },
    /// The conditional operator, `cond ? then : otherwise`.
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// An assignment expression; reachable as a statement or by explicit use.
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// A lambda expression.
    Lambda {
        params: Vec<String>,
        body: LambdaBody,
    },
}

/// The body of a lambda expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    /// `x -> expr`
    Expr(Box<Expr>),
    /// `x -> { statements }`
    Block(Vec<Stmt>),
}

impl Expr {
    /// The `null` literal.
    pub fn null() -> Self {
        Self::Null
    }

    /// An `int` literal.
    pub fn int(v: i32) -> Self {
        Self::Int(v)
    }

    /// A `long` literal.
    pub fn long(v: i64) -> Self {
        Self::Long(v)
    }

    /// A `double` literal.
    pub fn double(v: f64) -> Self {
        Self::Double(v)
    }

    /// A `char` literal.
    pub fn char_(v: char) -> Self {
        Self::Char(v)
    }

    /// A string literal.
    pub fn str(v: impl Into<String>) -> Self {
        Self::Str(v.into())
    }

    /// A simple name.
    pub fn name(n: impl Into<Arc<str>>) -> Self {
        Self::Name(n.into())
    }

    /// The `this` reference.
    pub fn this() -> Self {
        Self::This
    }

    /// The `super` reference.
    pub fn super_() -> Self {
        Self::Super
    }

    /// A class literal, `T.class`.
    pub fn class_literal(ty: TypeRef) -> Self {
        Self::ClassLiteral(ty)
    }

    /// Static field access, `Type.name`.
    pub fn static_field(ty: TypeRef, name: impl Into<String>) -> Self {
        Self::StaticField {
            ty,
            name: name.into(),
        }
    }

    /// Unqualified method invocation, `name(args)`.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: None,
            name: name.into(),
            args,
        }
    }

    /// Static method invocation, `Type.name(args)`.
    pub fn static_call(ty: TypeRef, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::StaticCall {
            ty,
            name: name.into(),
            args,
        }
    }

    /// Object construction, `new Type(args)`.
    pub fn new_instance(ty: TypeRef, args: Vec<Expr>) -> Self {
        Self::New { ty, args }
    }

    /// Array construction with explicit dimensions, `new T[n]...`.
    pub fn new_array(elem: TypeRef, dims: Vec<Expr>) -> Self {
        Self::NewArray {
            elem,
            dims,
            init: None,
        }
    }

    /// Array construction with an initializer, `new T[] { values }`.
    pub fn array_init(elem: TypeRef, values: Vec<Expr>) -> Self {
        Self::NewArray {
            elem,
            dims: Vec::new(),
            init: Some(values),
        }
    }

    /// A lambda with an expression body.
    pub fn lambda(params: Vec<String>, body: Expr) -> Self {
        Self::Lambda {
            params,
            body: LambdaBody::Expr(Box::new(body)),
        }
    }

    /// A lambda with a block body.
    pub fn lambda_block(params: Vec<String>, body: Vec<Stmt>) -> Self {
        Self::Lambda {
            params,
            body: LambdaBody::Block(body),
        }
    }

    /// Effective precedence of this node at a use site.
    ///
    /// A [`Expr::Paren`] wrapper is an atom: once synthesized it is never
    /// wrapped again, however deeply the tree nests afterwards.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::Long(_)
            | Self::Double(_)
            | Self::Char(_)
            | Self::Str(_)
            | Self::Name(_)
            | Self::This
            | Self::Super
            | Self::ClassLiteral(_)
            | Self::Paren(_)
            | Self::Field { .. }
            | Self::StaticField { .. }
            | Self::Index { .. }
            | Self::Call { .. }
            | Self::StaticCall { .. } => precedence::ATOM,
            Self::Unary { op, .. } => op.precedence(),
            Self::New { .. } | Self::NewArray { .. } | Self::Cast { .. } => precedence::CAST,
            Self::Binary { op, .. } => op.precedence(),
            Self::InstanceOf { .. } => precedence::RELATIONAL,
            Self::Ternary { .. } => precedence::CONDITIONAL,
            Self::Assign { op, .. } => op.precedence(),
            Self::Lambda { .. } => precedence::ASSIGNMENT,
        }
    }

    fn wrap_if(self, wrap: bool) -> Self {
        if wrap {
            Self::Paren(Box::new(self))
        } else {
            self
        }
    }

    /// Wrap unless this node is already an atom. Used for receiver positions
    /// (call targets, field access, array access), which admit only atoms.
    fn atom(self) -> Self {
        let wrap = self.precedence() > precedence::ATOM;
        self.wrap_if(wrap)
    }

    /// A binary operator application.
    ///
    /// Operands that bind too loosely for their side are wrapped here, once,
    /// permanently: for a left-associative operator the left operand may
    /// share the operator's precedence but the right operand may not.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        let p = op.precedence();
        let (wrap_lhs, wrap_rhs) = match op.associativity() {
            Assoc::Left => (lhs.precedence() > p, rhs.precedence() >= p),
            Assoc::Right => (lhs.precedence() >= p, rhs.precedence() > p),
        };
        Self::Binary {
            op,
            lhs: Box::new(lhs.wrap_if(wrap_lhs)),
            rhs: Box::new(rhs.wrap_if(wrap_rhs)),
        }
    }

    /// A unary operator application.
    ///
    /// The operand must be an atom; this keeps nested same-symbol prefixes
    /// like `-(-x)` from merging into a decrement token.
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        let wrap = operand.precedence() >= precedence::UNARY;
        Self::Unary {
            op,
            operand: Box::new(operand.wrap_if(wrap)),
        }
    }

    /// A cast. Casts chain without wrapping (`(long) (int) x`), but any
    /// operand looser than the cast tier is wrapped.
    pub fn cast(ty: TypeRef, operand: Expr) -> Self {
        let wrap = operand.precedence() > precedence::CAST;
        Self::Cast {
            ty,
            operand: Box::new(operand.wrap_if(wrap)),
        }
    }

    /// A type test, `operand instanceof Type`.
    pub fn instance_of(operand: Expr, ty: TypeRef) -> Self {
        let wrap = operand.precedence() > precedence::RELATIONAL;
        Self::InstanceOf {
            operand: Box::new(operand.wrap_if(wrap)),
            ty,
        }
    }

    /// The conditional operator.
    ///
    /// The condition must bind tighter than the conditional tier; either
    /// branch may itself be a conditional, so chains nest without parens.
    pub fn ternary(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        let wrap_cond = cond.precedence() >= precedence::CONDITIONAL;
        let wrap_then = then.precedence() > precedence::CONDITIONAL;
        let wrap_else = otherwise.precedence() > precedence::CONDITIONAL;
        Self::Ternary {
            cond: Box::new(cond.wrap_if(wrap_cond)),
            then: Box::new(then.wrap_if(wrap_then)),
            otherwise: Box::new(otherwise.wrap_if(wrap_else)),
        }
    }

    /// Simple assignment, `target = value`.
    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::assign_with(AssignOp::Assign, target, value)
    }

    /// Assignment with an explicit (possibly compound) operator.
    ///
    /// Assignment associates right, so a conditional or nested assignment on
    /// the value side is accepted without wrapping.
    pub fn assign_with(op: AssignOp, target: Expr, value: Expr) -> Self {
        let p = op.precedence();
        let wrap_target = target.precedence() >= p;
        let wrap_value = value.precedence() > p;
        Self::Assign {
            op,
            target: Box::new(target.wrap_if(wrap_target)),
            value: Box::new(value.wrap_if(wrap_value)),
        }
    }

    /// Instance method invocation on this expression.
    pub fn invoke(self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: Some(Box::new(self.atom())),
            name: name.into(),
            args,
        }
    }

    /// Field access on this expression.
    pub fn field(self, name: impl Into<String>) -> Self {
        Self::Field {
            target: Box::new(self.atom()),
            name: name.into(),
        }
    }

    /// Array element access on this expression.
    pub fn index(self, index: Expr) -> Self {
        Self::Index {
            array: Box::new(self.atom()),
            index: Box::new(index),
        }
    }

    /// Cast this expression to a type.
    pub fn cast_to(self, ty: TypeRef) -> Self {
        Self::cast(ty, self)
    }
}

macro_rules! binary_method {
    ($(#[$doc:meta] $method:ident => $op:ident),* $(,)?) => {
        impl Expr {
            $(
                #[$doc]
                pub fn $method(self, rhs: Expr) -> Expr {
                    Expr::binary(BinaryOp::$op, self, rhs)
                }
            )*
        }
    };
}

binary_method! {
    /// `self + rhs`
    plus => Add,
    /// `self - rhs`
    minus => Sub,
    /// `self * rhs`
    mul => Mul,
    /// `self / rhs`
    div => Div,
    /// `self % rhs`
    rem => Rem,
    /// `self << rhs`
    shl => Shl,
    /// `self >> rhs`
    shr => Shr,
    /// `self >>> rhs`
    ushr => UShr,
    /// `self < rhs`
    lt => Lt,
    /// `self <= rhs`
    lte => Le,
    /// `self > rhs`
    gt => Gt,
    /// `self >= rhs`
    gte => Ge,
    /// `self == rhs`
    eq_ => Eq,
    /// `self != rhs`
    ne_ => Ne,
    /// `self & rhs`
    bit_and => BitAnd,
    /// `self ^ rhs`
    bit_xor => BitXor,
    /// `self | rhs`
    bit_or => BitOr,
    /// `self && rhs`
    and => And,
    /// `self || rhs`
    or => Or,
}

impl Expr {
    /// `-self`
    pub fn neg(self) -> Self {
        Self::unary(UnaryOp::Minus, self)
    }

    /// `!self`
    pub fn not(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }

    /// `~self`
    pub fn complement(self) -> Self {
        Self::unary(UnaryOp::BitNot, self)
    }

    /// `++self`
    pub fn pre_inc(self) -> Self {
        Self::unary(UnaryOp::PreInc, self)
    }

    /// `--self`
    pub fn pre_dec(self) -> Self {
        Self::unary(UnaryOp::PreDec, self)
    }

    /// `self++`
    pub fn post_inc(self) -> Self {
        Self::unary(UnaryOp::PostInc, self)
    }

    /// `self--`
    pub fn post_dec(self) -> Self {
        Self::unary(UnaryOp::PostDec, self)
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Expr {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Expr {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

/// A `&str` converts to a string *literal*, not a name; use [`Expr::name`]
/// for identifiers.
impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Expr {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}
