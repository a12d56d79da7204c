//! Statement nodes.
//!
//! Statements are plain sum-type values. A local variable declaration holds
//! an ordered list of declarators sharing one type, so `int a = 1, b;` is a
//! single node rather than a chain of linked declarations.

use crate::expr::Expr;
use crate::types::TypeRef;

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression statement, `expr;`.
    Expr(Expr),
    /// A local variable declaration.
    Local(LocalVar),
    /// `if` / `else`.
    If {
        cond: Expr,
        then: Vec<Stmt>,
        otherwise: Option<Vec<Stmt>>,
    },
    /// `while (cond) { .. }`.
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// `do { .. } while (cond);`.
    DoWhile {
        body: Vec<Stmt>,
        cond: Expr,
    },
    /// A classic three-clause `for` loop.
    For {
        init: ForInit,
        cond: Option<Expr>,
        update: Vec<Expr>,
        body: Vec<Stmt>,
    },
    /// An enhanced `for (T name : iterable)` loop.
    ForEach {
        var_ty: TypeRef,
        var: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    /// A `switch` statement.
    Switch {
        selector: Expr,
        cases: Vec<SwitchCase>,
    },
    /// `break`, optionally targeting a label.
    Break {
        label: Option<String>,
    },
    /// `continue`, optionally targeting a label.
    Continue {
        label: Option<String>,
    },
    /// A labeled statement, `label: stmt`.
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    /// `return`, with an optional value.
    Return(Option<Expr>),
    /// `throw expr;`.
    Throw(Expr),
    /// `try` with optional resources, catch clauses, and finally block.
    Try {
        resources: Vec<Resource>,
        body: Vec<Stmt>,
        catches: Vec<Catch>,
        finally: Option<Vec<Stmt>>,
    },
    /// `synchronized (lock) { .. }`.
    Synchronized {
        lock: Expr,
        body: Vec<Stmt>,
    },
    /// A bare block.
    Block(Vec<Stmt>),
    /// A free-text line comment; rendered verbatim with a `//` prefix.
    LineComment(String),
    /// A free-text block comment; rendered verbatim, one `*` line per line.
    BlockComment(String),
}

/// A local variable declaration: one type, one or more declarators.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVar {
    /// Whether the declaration is `final`.
    pub is_final: bool,
    /// The declared type, shared by all declarators.
    pub ty: TypeRef,
    /// Ordered `(name, initializer)` pairs.
    pub declarators: Vec<Declarator>,
}

/// One `(name, optional initializer)` pair of a local declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub init: Option<Expr>,
}

impl LocalVar {
    /// A declaration of the given type with no declarators yet.
    pub fn new(ty: TypeRef) -> Self {
        Self {
            is_final: false,
            ty,
            declarators: Vec::new(),
        }
    }

    /// Mark the declaration `final`.
    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Append a declarator.
    pub fn declare(mut self, name: impl Into<String>, init: Option<Expr>) -> Self {
        self.declarators.push(Declarator {
            name: name.into(),
            init,
        });
        self
    }
}

/// The init clause of a classic `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// No init clause.
    Empty,
    /// A local declaration, `for (int i = 0; ..)`.
    Local(LocalVar),
    /// One or more expressions, `for (i = 0, j = n; ..)`.
    Exprs(Vec<Expr>),
}

/// One case group of a `switch` statement. An empty body falls through.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub labels: Vec<CaseLabel>,
    pub body: Vec<Stmt>,
}

/// A single `case` or `default` label.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseLabel {
    Expr(Expr),
    Default,
}

/// One resource of a try-with-resources statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub ty: TypeRef,
    pub name: String,
    pub init: Expr,
}

/// A catch clause; multiple types form a multi-catch union.
#[derive(Debug, Clone, PartialEq)]
pub struct Catch {
    pub types: Vec<TypeRef>,
    pub name: String,
    pub body: Vec<Stmt>,
}

impl Stmt {
    /// An expression statement.
    pub fn expr(e: Expr) -> Self {
        Self::Expr(e)
    }

    /// A single-declarator local variable with an initializer.
    pub fn local(ty: TypeRef, name: impl Into<String>, init: Expr) -> Self {
        Self::Local(LocalVar::new(ty).declare(name, Some(init)))
    }

    /// A single-declarator local variable without an initializer.
    pub fn local_uninit(ty: TypeRef, name: impl Into<String>) -> Self {
        Self::Local(LocalVar::new(ty).declare(name, None))
    }

    /// An `if` without an else branch.
    pub fn if_(cond: Expr, then: Vec<Stmt>) -> Self {
        Self::If {
            cond,
            then,
            otherwise: None,
        }
    }

    /// An `if` / `else`.
    pub fn if_else(cond: Expr, then: Vec<Stmt>, otherwise: Vec<Stmt>) -> Self {
        Self::If {
            cond,
            then,
            otherwise: Some(otherwise),
        }
    }

    /// A `while` loop.
    pub fn while_(cond: Expr, body: Vec<Stmt>) -> Self {
        Self::While { cond, body }
    }

    /// A `do` / `while` loop.
    pub fn do_while(body: Vec<Stmt>, cond: Expr) -> Self {
        Self::DoWhile { body, cond }
    }

    /// A classic `for` loop.
    pub fn for_(init: ForInit, cond: Option<Expr>, update: Vec<Expr>, body: Vec<Stmt>) -> Self {
        Self::For {
            init,
            cond,
            update,
            body,
        }
    }

    /// An enhanced `for` loop.
    pub fn for_each(
        var_ty: TypeRef,
        var: impl Into<String>,
        iterable: Expr,
        body: Vec<Stmt>,
    ) -> Self {
        Self::ForEach {
            var_ty,
            var: var.into(),
            iterable,
            body,
        }
    }

    /// A `switch` statement.
    pub fn switch(selector: Expr, cases: Vec<SwitchCase>) -> Self {
        Self::Switch { selector, cases }
    }

    /// An unlabeled `break`.
    pub fn break_() -> Self {
        Self::Break { label: None }
    }

    /// A labeled `break`.
    pub fn break_to(label: impl Into<String>) -> Self {
        Self::Break {
            label: Some(label.into()),
        }
    }

    /// An unlabeled `continue`.
    pub fn continue_() -> Self {
        Self::Continue { label: None }
    }

    /// A labeled `continue`.
    pub fn continue_to(label: impl Into<String>) -> Self {
        Self::Continue {
            label: Some(label.into()),
        }
    }

    /// A labeled statement.
    pub fn labeled(label: impl Into<String>, body: Stmt) -> Self {
        Self::Labeled {
            label: label.into(),
            body: Box::new(body),
        }
    }

    /// A value-returning `return`.
    pub fn ret(value: Expr) -> Self {
        Self::Return(Some(value))
    }

    /// A bare `return;`.
    pub fn ret_void() -> Self {
        Self::Return(None)
    }

    /// A `throw` statement.
    pub fn throw(value: Expr) -> Self {
        Self::Throw(value)
    }

    /// A `try` / `catch` with no resources or finally block.
    pub fn try_catch(body: Vec<Stmt>, catches: Vec<Catch>) -> Self {
        Self::Try {
            resources: Vec::new(),
            body,
            catches,
            finally: None,
        }
    }

    /// A try-with-resources statement.
    pub fn try_with(
        resources: Vec<Resource>,
        body: Vec<Stmt>,
        catches: Vec<Catch>,
        finally: Option<Vec<Stmt>>,
    ) -> Self {
        Self::Try {
            resources,
            body,
            catches,
            finally,
        }
    }

    /// A `synchronized` block.
    pub fn synchronized(lock: Expr, body: Vec<Stmt>) -> Self {
        Self::Synchronized { lock, body }
    }

    /// A bare block.
    pub fn block(body: Vec<Stmt>) -> Self {
        Self::Block(body)
    }

    /// A free-text line comment.
    pub fn line_comment(text: impl Into<String>) -> Self {
        Self::LineComment(text.into())
    }

    /// A free-text block comment.
    pub fn block_comment(text: impl Into<String>) -> Self {
        Self::BlockComment(text.into())
    }
}
