//! Interning pool for repeated simple-name expressions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::expr::Expr;

/// A caller-owned cache that interns repeated simple names.
///
/// Name expressions built through the pool share one allocation per distinct
/// spelling. The pool grows until [`NamePool::clear`] is called; nothing
/// clears it automatically, so callers should reset it between unrelated
/// batches of work to bound memory.
#[derive(Debug, Default)]
pub struct NamePool {
    names: HashMap<String, Arc<str>>,
}

impl NamePool {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a spelling, returning the shared allocation.
    pub fn intern(&mut self, s: &str) -> Arc<str> {
        if let Some(existing) = self.names.get(s) {
            return Arc::clone(existing);
        }
        let shared: Arc<str> = Arc::from(s);
        self.names.insert(s.to_string(), Arc::clone(&shared));
        shared
    }

    /// Build a name expression backed by the pool.
    pub fn name(&mut self, s: &str) -> Expr {
        Expr::Name(self.intern(s))
    }

    /// Number of distinct spellings interned.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drop every interned spelling. Expressions already built keep their
    /// allocations alive; only the pool's own references are released.
    pub fn clear(&mut self) {
        self.names.clear();
    }
}
